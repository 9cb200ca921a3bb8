//! Hit testing for point and polygon entities
//!
//! All queries take widget-local screen coordinates and a [`TransformParams`]
//! built for the current frame. Results are indices into the slice that was
//! passed in, so nothing outside the supplied set can ever be returned.

use glam::DVec2;

use super::transform::TransformParams;

/// A circular entity such as a star
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointEntity {
    /// Center in normalized map coordinates
    pub norm: DVec2,
    /// Drawn radius at zoom 1.0, in pixels
    pub radius_px: f64,
}

/// A polygonal entity such as a province
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonEntity {
    /// Outline in normalized map coordinates, implicitly closed
    pub vertices: Vec<DVec2>,
}

impl PolygonEntity {
    pub fn new(vertices: Vec<DVec2>) -> Self {
        Self { vertices }
    }

    /// A polygon needs three vertices to enclose anything
    pub fn is_degenerate(&self) -> bool {
        self.vertices.len() < 3
    }

    /// Even-odd ray casting in normalized space
    pub fn contains(&self, point: DVec2) -> bool {
        if self.is_degenerate() {
            return false;
        }

        let mut inside = false;
        let mut j = self.vertices.len() - 1;
        for (i, vi) in self.vertices.iter().enumerate() {
            let vj = self.vertices[j];
            if (vi.y > point.y) != (vj.y > point.y) {
                let x_cross = (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x;
                if point.x < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// Area-weighted centroid, used to place labels
    ///
    /// Falls back to the vertex average when the signed area vanishes.
    pub fn centroid(&self) -> DVec2 {
        if self.vertices.is_empty() {
            return DVec2::ZERO;
        }

        let n = self.vertices.len();
        let mut area2 = 0.0;
        let mut acc = DVec2::ZERO;
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            let cross = a.perp_dot(b);
            area2 += cross;
            acc += (a + b) * cross;
        }

        if area2.abs() < f64::EPSILON {
            let sum: DVec2 = self.vertices.iter().copied().sum();
            return sum / n as f64;
        }
        acc / (3.0 * area2)
    }
}

/// Nearest point entity whose zoomed hit circle contains `screen`
///
/// The hit radius is `radius_px * zoom * multiplier`. Distances are compared
/// squared and the boundary is exclusive. On equal distance the earlier
/// entity wins.
pub fn nearest_point_entity_at(
    entities: &[PointEntity],
    params: &TransformParams,
    screen: DVec2,
    multiplier: f64,
) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;

    for (idx, entity) in entities.iter().enumerate() {
        let center = params.to_screen(entity.norm);
        let radius = params.scale_length(entity.radius_px) * multiplier;
        let dist_sq = center.distance_squared(screen);
        if dist_sq >= radius * radius {
            continue;
        }
        match best {
            Some((_, best_sq)) if best_sq <= dist_sq => {}
            _ => best = Some((idx, dist_sq)),
        }
    }

    best.map(|(idx, _)| idx)
}

/// Indices of all entities whose center maps inside the screen rectangle
///
/// `a` and `b` are any two opposite corners. The boundary is inclusive and
/// indices come back in iteration order.
pub fn entities_in_screen_rect(
    centers: impl IntoIterator<Item = DVec2>,
    params: &TransformParams,
    a: DVec2,
    b: DVec2,
) -> Vec<usize> {
    let min = a.min(b);
    let max = a.max(b);

    centers
        .into_iter()
        .enumerate()
        .filter_map(|(idx, norm)| {
            let p = params.to_screen(norm);
            let inside = p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y;
            inside.then_some(idx)
        })
        .collect()
}

/// First polygon, in iteration order, that contains `screen`
pub fn polygon_at(
    polygons: &[PolygonEntity],
    params: &TransformParams,
    screen: DVec2,
) -> Option<usize> {
    let norm = params.to_norm(screen);
    polygons.iter().position(|polygon| polygon.contains(norm))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(zoom: f64) -> TransformParams {
        TransformParams::new(DVec2::new(800.0, 600.0), DVec2::ZERO, zoom)
    }

    fn star(x: f64, y: f64, radius_px: f64) -> PointEntity {
        PointEntity {
            norm: DVec2::new(x, y),
            radius_px,
        }
    }

    fn square(x0: f64, y0: f64, side: f64) -> PolygonEntity {
        PolygonEntity::new(vec![
            DVec2::new(x0, y0),
            DVec2::new(x0 + side, y0),
            DVec2::new(x0 + side, y0 + side),
            DVec2::new(x0, y0 + side),
        ])
    }

    #[test]
    fn test_no_entities_no_hit() {
        assert_eq!(nearest_point_entity_at(&[], &params(1.0), DVec2::ZERO, 1.5), None);
        assert_eq!(polygon_at(&[], &params(1.0), DVec2::ZERO), None);
    }

    #[test]
    fn test_point_hit_inside_radius() {
        // (0.5, 0.5) -> (400, 300); radius 4 * 1.5 = 6
        let stars = [star(0.5, 0.5, 4.0)];
        let p = params(1.0);
        assert_eq!(nearest_point_entity_at(&stars, &p, DVec2::new(405.0, 300.0), 1.5), Some(0));
        assert_eq!(nearest_point_entity_at(&stars, &p, DVec2::new(407.0, 300.0), 1.5), None);
    }

    #[test]
    fn test_point_hit_boundary_is_exclusive() {
        let stars = [star(0.5, 0.5, 4.0)];
        let p = params(1.0);
        assert_eq!(nearest_point_entity_at(&stars, &p, DVec2::new(406.0, 300.0), 1.5), None);
    }

    #[test]
    fn test_point_hit_radius_scales_with_zoom() {
        let stars = [star(0.5, 0.5, 4.0)];
        let miss = DVec2::new(410.0, 300.0);
        assert_eq!(nearest_point_entity_at(&stars, &params(1.0), miss, 1.5), None);
        // radius 4 * 2 * 1.5 = 12, center still at (400, 300)
        assert_eq!(nearest_point_entity_at(&stars, &params(2.0), miss, 1.5), Some(0));
    }

    #[test]
    fn test_nearest_center_wins() {
        // Two overlapping hit circles; the pointer is closer to the second
        let stars = [star(0.5, 0.5, 10.0), star(0.51, 0.5, 10.0)];
        let hit = nearest_point_entity_at(&stars, &params(1.0), DVec2::new(406.0, 300.0), 1.5);
        assert_eq!(hit, Some(1));
    }

    #[test]
    fn test_equal_distance_keeps_first() {
        let stars = [star(0.5, 0.5, 10.0), star(0.5, 0.5, 10.0)];
        let hit = nearest_point_entity_at(&stars, &params(1.0), DVec2::new(401.0, 300.0), 1.5);
        assert_eq!(hit, Some(0));
    }

    #[test]
    fn test_rect_select_boundary_inclusive_and_ordered() {
        let centers = [
            DVec2::new(0.5, 0.5),   // (400, 300) on the corner
            DVec2::new(0.1, 0.1),   // (80, 60) outside
            DVec2::new(0.45, 0.48), // (360, 288) inside
        ];
        let hits = entities_in_screen_rect(
            centers,
            &params(1.0),
            DVec2::new(400.0, 300.0),
            DVec2::new(300.0, 200.0),
        );
        assert_eq!(hits, vec![0, 2]);
    }

    #[test]
    fn test_rect_select_empty_when_nothing_inside() {
        let hits = entities_in_screen_rect(
            [DVec2::new(0.9, 0.9)],
            &params(1.0),
            DVec2::ZERO,
            DVec2::new(10.0, 10.0),
        );
        assert!(hits.is_empty());
    }

    #[test]
    fn test_polygon_contains() {
        let sq = square(0.2, 0.2, 0.2);
        assert!(sq.contains(DVec2::new(0.3, 0.3)));
        assert!(!sq.contains(DVec2::new(0.5, 0.3)));
        assert!(!sq.contains(DVec2::new(0.3, 0.1)));
    }

    #[test]
    fn test_concave_polygon() {
        // U shape: the notch between the arms is outside
        let u = PolygonEntity::new(vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(0.3, 0.0),
            DVec2::new(0.3, 0.3),
            DVec2::new(0.2, 0.3),
            DVec2::new(0.2, 0.1),
            DVec2::new(0.1, 0.1),
            DVec2::new(0.1, 0.3),
            DVec2::new(0.0, 0.3),
        ]);
        assert!(u.contains(DVec2::new(0.05, 0.2)));
        assert!(!u.contains(DVec2::new(0.15, 0.2)));
        assert!(u.contains(DVec2::new(0.15, 0.05)));
    }

    #[test]
    fn test_degenerate_polygon_never_matches() {
        let line = PolygonEntity::new(vec![DVec2::new(0.0, 0.0), DVec2::new(1.0, 1.0)]);
        assert!(line.is_degenerate());
        assert!(!line.contains(DVec2::new(0.5, 0.5)));
    }

    #[test]
    fn test_polygon_at_uses_inverse_transform() {
        let polys = [square(0.0, 0.0, 0.5), square(0.5, 0.5, 0.5)];
        let p = TransformParams::new(DVec2::new(800.0, 600.0), DVec2::new(50.0, 0.0), 2.0);
        let target = p.to_screen(DVec2::new(0.7, 0.7));
        assert_eq!(polygon_at(&polys, &p, target), Some(1));
    }

    #[test]
    fn test_overlapping_polygons_first_match_wins() {
        let polys = [square(0.0, 0.0, 0.6), square(0.4, 0.4, 0.6)];
        let screen = params(1.0).to_screen(DVec2::new(0.5, 0.5));
        assert_eq!(polygon_at(&polys, &params(1.0), screen), Some(0));
    }

    #[test]
    fn test_centroid_of_square() {
        let c = square(0.2, 0.4, 0.2).centroid();
        assert!((c - DVec2::new(0.3, 0.5)).length() < 1e-12);
    }

    #[test]
    fn test_centroid_falls_back_for_collinear_points() {
        let flat = PolygonEntity::new(vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(0.5, 0.5),
            DVec2::new(1.0, 1.0),
        ]);
        assert!((flat.centroid() - DVec2::new(0.5, 0.5)).length() < 1e-12);
    }
}
