//! Backend-agnostic draw commands
//!
//! Builders emit these in widget-local screen pixels; a [`Canvas`] turns them
//! into real draw calls.

use glam::DVec2;

/// Linear RGBA color with components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from 8-bit channels
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Moves each channel towards white by `amount` in `[0, 1]`
    pub fn lighten(self, amount: f32) -> Self {
        let t = amount.clamp(0.0, 1.0);
        Self {
            r: self.r + (1.0 - self.r) * t,
            g: self.g + (1.0 - self.g) * t,
            b: self.b + (1.0 - self.b) * t,
            a: self.a,
        }
    }

    /// Channels as 8-bit values, unmultiplied
    pub fn to_rgba8(self) -> [u8; 4] {
        let to_u8 = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [to_u8(self.r), to_u8(self.g), to_u8(self.b), to_u8(self.a)]
    }
}

/// Outline style
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub width: f32,
    pub color: Rgba,
}

impl Stroke {
    pub const NONE: Stroke = Stroke {
        width: 0.0,
        color: Rgba::TRANSPARENT,
    };

    pub fn new(width: f32, color: Rgba) -> Self {
        Self { width, color }
    }
}

/// A single primitive in widget-local screen pixels
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Circle {
        center: DVec2,
        radius: f64,
        fill: Rgba,
        stroke: Stroke,
    },
    /// Closed polygon; the outline joins the last point back to the first
    Polygon {
        points: Vec<DVec2>,
        fill: Rgba,
        stroke: Stroke,
    },
    Line {
        from: DVec2,
        to: DVec2,
        stroke: Stroke,
    },
    /// Text centered horizontally on `pos`, hanging below it
    Text {
        pos: DVec2,
        text: String,
        size: f32,
        color: Rgba,
    },
}

impl DrawCommand {
    /// Short name for render debugging
    pub fn debug_name(&self) -> &'static str {
        match self {
            DrawCommand::Circle { .. } => "Circle",
            DrawCommand::Polygon { .. } => "Polygon",
            DrawCommand::Line { .. } => "Line",
            DrawCommand::Text { .. } => "Text",
        }
    }
}

/// The rendering backend seam
pub trait Canvas {
    fn draw(&mut self, command: &DrawCommand);

    fn draw_all(&mut self, commands: &[DrawCommand]) {
        for command in commands {
            self.draw(command);
        }
    }
}

/// Canvas that keeps every command it is given
///
/// Used by tests and by the headless render health check.
#[derive(Debug, Default)]
pub struct CommandRecorder {
    commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of recorded commands with the given debug name
    pub fn count(&self, debug_name: &str) -> usize {
        self.commands
            .iter()
            .filter(|c| c.debug_name() == debug_name)
            .count()
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Canvas for CommandRecorder {
    fn draw(&mut self, command: &DrawCommand) {
        self.commands.push(command.clone());
    }
}
