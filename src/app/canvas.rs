//! egui painter backend for draw commands

use egui::{Align2, Color32, FontId, Painter, Pos2, Shape};
use glam::DVec2;

use crate::render::{Canvas, DrawCommand, Rgba, Stroke};

/// Paints widget-local draw commands into an egui painter
///
/// `origin` is the widget rect's top-left in egui points.
pub struct EguiCanvas<'a> {
    painter: &'a Painter,
    origin: Pos2,
}

impl<'a> EguiCanvas<'a> {
    pub fn new(painter: &'a Painter, origin: Pos2) -> Self {
        Self { painter, origin }
    }

    fn pos(&self, local: DVec2) -> Pos2 {
        Pos2::new(
            self.origin.x + local.x as f32,
            self.origin.y + local.y as f32,
        )
    }
}

pub fn color32(color: Rgba) -> Color32 {
    let [r, g, b, a] = color.to_rgba8();
    Color32::from_rgba_unmultiplied(r, g, b, a)
}

fn stroke(stroke: Stroke) -> egui::Stroke {
    if stroke.width <= 0.0 {
        egui::Stroke::NONE
    } else {
        egui::Stroke::new(stroke.width, color32(stroke.color))
    }
}

impl Canvas for EguiCanvas<'_> {
    fn draw(&mut self, command: &DrawCommand) {
        match command {
            DrawCommand::Circle {
                center,
                radius,
                fill,
                stroke: outline,
            } => {
                self.painter.circle(
                    self.pos(*center),
                    *radius as f32,
                    color32(*fill),
                    stroke(*outline),
                );
            }

            DrawCommand::Polygon {
                points,
                fill,
                stroke: outline,
            } => {
                let points: Vec<Pos2> = points.iter().map(|p| self.pos(*p)).collect();
                if fill.a > 0.0 {
                    for piece in convex_pieces(&points) {
                        self.painter
                            .add(Shape::convex_polygon(piece, color32(*fill), egui::Stroke::NONE));
                    }
                }
                if outline.width > 0.0 {
                    self.painter.add(Shape::closed_line(points, stroke(*outline)));
                }
            }

            DrawCommand::Line {
                from,
                to,
                stroke: outline,
            } => {
                self.painter
                    .line_segment([self.pos(*from), self.pos(*to)], stroke(*outline));
            }

            DrawCommand::Text {
                pos,
                text,
                size,
                color,
            } => {
                self.painter.text(
                    self.pos(*pos),
                    Align2::CENTER_TOP,
                    text,
                    FontId::proportional(*size),
                    color32(*color),
                );
            }
        }
    }
}

fn cross(o: Pos2, a: Pos2, b: Pos2) -> f32 {
    (a - o).x * (b - o).y - (a - o).y * (b - o).x
}

fn is_convex(points: &[Pos2]) -> bool {
    let n = points.len();
    let mut sign = 0.0f32;
    for i in 0..n {
        let c = cross(points[i], points[(i + 1) % n], points[(i + 2) % n]);
        if c != 0.0 {
            if sign != 0.0 && c.signum() != sign {
                return false;
            }
            sign = c.signum();
        }
    }
    true
}

/// Splits a simple polygon into convex pieces egui can fill
///
/// Quads are split along their interior diagonal; anything else non-convex
/// is ear-clipped into triangles.
fn convex_pieces(points: &[Pos2]) -> Vec<Vec<Pos2>> {
    if points.len() < 3 {
        return Vec::new();
    }
    if is_convex(points) {
        return vec![points.to_vec()];
    }

    if let [a, b, c, d] = *points {
        // Diagonal a-c is interior iff both halves share an orientation
        if cross(a, b, c).signum() == cross(a, c, d).signum() {
            return vec![vec![a, b, c], vec![a, c, d]];
        }
        return vec![vec![b, c, d], vec![b, d, a]];
    }

    ear_clip(points)
}

/// Triangulates a simple polygon of either winding
///
/// Stops early on degenerate input, so self-intersecting outlines may come
/// back partially filled.
fn ear_clip(points: &[Pos2]) -> Vec<Vec<Pos2>> {
    let n = points.len();
    let orientation = (0..n)
        .map(|i| cross(Pos2::ZERO, points[i], points[(i + 1) % n]))
        .sum::<f32>()
        .signum();
    let mut remaining: Vec<usize> = (0..n).collect();
    let mut triangles = Vec::with_capacity(n - 2);

    while remaining.len() > 3 {
        let m = remaining.len();
        let ear = (0..m).find(|&i| {
            let (a, b, c) = (
                points[remaining[(i + m - 1) % m]],
                points[remaining[i]],
                points[remaining[(i + 1) % m]],
            );
            cross(a, b, c) * orientation > 0.0
                && remaining
                    .iter()
                    .map(|&k| points[k])
                    .filter(|p| *p != a && *p != b && *p != c)
                    .all(|p| !in_triangle(p, a, b, c, orientation))
        });
        let Some(i) = ear else { break };
        triangles.push(vec![
            points[remaining[(i + m - 1) % m]],
            points[remaining[i]],
            points[remaining[(i + 1) % m]],
        ]);
        remaining.remove(i);
    }

    if remaining.len() == 3 {
        triangles.push(remaining.iter().map(|&k| points[k]).collect());
    }
    triangles
}

/// Edge-inclusive
fn in_triangle(p: Pos2, a: Pos2, b: Pos2, c: Pos2, orientation: f32) -> bool {
    cross(a, b, p) * orientation >= 0.0
        && cross(b, c, p) * orientation >= 0.0
        && cross(c, a, p) * orientation >= 0.0
}
