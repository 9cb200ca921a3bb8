//! Named render styles
//!
//! The registry is built once at startup and handed to the command builders
//! by reference. Lookups never fail: an unknown name resolves to a loud
//! fallback color so a typo shows up on screen instead of in a panic.

use std::collections::HashMap;

use enum_map::{EnumMap, enum_map};

use super::command::{Rgba, Stroke};
use crate::scene::StarClass;

/// Well-known style names
pub mod keys {
    pub const BACKGROUND: &str = "background";
    pub const SELECTION: &str = "selection";
    pub const HOVER: &str = "hover";
    pub const LABEL: &str = "label";
    pub const LABEL_DIM: &str = "label.dim";
    pub const BORDER: &str = "border";
}

/// Shown for unregistered names
const MISSING: Rgba = Rgba::new(1.0, 0.0, 1.0, 1.0);

/// Registry of colors and strokes
#[derive(Debug, Clone)]
pub struct StyleRegistry {
    colors: HashMap<String, Rgba>,
    strokes: HashMap<String, Stroke>,
    star_colors: EnumMap<StarClass, Rgba>,
    faction_colors: Vec<Rgba>,
}

impl StyleRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self {
            colors: HashMap::new(),
            strokes: HashMap::new(),
            star_colors: EnumMap::from_fn(|_| MISSING),
            faction_colors: Vec::new(),
        }
    }

    /// The palette used by the application
    pub fn standard() -> Self {
        let mut registry = Self::new();

        registry.register_color(keys::BACKGROUND, Rgba::from_rgb8(6, 8, 20));
        registry.register_color(keys::LABEL, Rgba::from_rgb8(230, 232, 240));
        registry.register_color(keys::LABEL_DIM, Rgba::from_rgb8(150, 156, 175));

        registry.register_stroke(keys::SELECTION, Stroke::new(2.0, Rgba::from_rgb8(255, 214, 92)));
        registry.register_stroke(keys::HOVER, Stroke::new(1.5, Rgba::from_rgb8(140, 200, 255)));
        registry.register_stroke(keys::BORDER, Stroke::new(1.0, Rgba::from_rgb8(20, 22, 30)));

        registry.star_colors = enum_map! {
            StarClass::O => Rgba::from_rgb8(155, 176, 255),
            StarClass::B => Rgba::from_rgb8(170, 191, 255),
            StarClass::A => Rgba::from_rgb8(202, 215, 255),
            StarClass::F => Rgba::from_rgb8(248, 247, 255),
            StarClass::G => Rgba::from_rgb8(255, 244, 234),
            StarClass::K => Rgba::from_rgb8(255, 210, 161),
            StarClass::M => Rgba::from_rgb8(255, 204, 111),
        };

        registry.faction_colors = vec![
            Rgba::from_rgb8(96, 125, 171),
            Rgba::from_rgb8(160, 92, 86),
            Rgba::from_rgb8(104, 150, 96),
            Rgba::from_rgb8(176, 150, 88),
        ];

        registry
    }

    /// Registers or replaces a named color
    pub fn register_color(&mut self, name: &str, color: Rgba) {
        self.colors.insert(name.to_string(), color);
    }

    /// Registers or replaces a named stroke
    pub fn register_stroke(&mut self, name: &str, stroke: Stroke) {
        self.strokes.insert(name.to_string(), stroke);
    }

    pub fn color(&self, name: &str) -> Rgba {
        self.colors.get(name).copied().unwrap_or(MISSING)
    }

    pub fn stroke(&self, name: &str) -> Stroke {
        self.strokes
            .get(name)
            .copied()
            .unwrap_or(Stroke::new(1.0, MISSING))
    }

    pub fn star_color(&self, class: StarClass) -> Rgba {
        self.star_colors[class]
    }

    /// Faction colors cycle if there are more factions than entries
    pub fn faction_color(&self, faction: usize) -> Rgba {
        if self.faction_colors.is_empty() {
            return MISSING;
        }
        self.faction_colors[faction % self.faction_colors.len()]
    }
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registry_has_known_keys() {
        let styles = StyleRegistry::standard();
        for key in [keys::BACKGROUND, keys::LABEL, keys::LABEL_DIM] {
            assert_ne!(styles.color(key), MISSING, "{key}");
        }
        for key in [keys::SELECTION, keys::HOVER, keys::BORDER] {
            assert_ne!(styles.stroke(key).color, MISSING, "{key}");
        }
    }

    #[test]
    fn test_unknown_names_fall_back() {
        let styles = StyleRegistry::new();
        assert_eq!(styles.color("nope"), MISSING);
        assert_eq!(styles.faction_color(3), MISSING);
        assert_eq!(styles.star_color(StarClass::G), MISSING);
    }

    #[test]
    fn test_faction_colors_cycle() {
        let styles = StyleRegistry::standard();
        assert_eq!(styles.faction_color(0), styles.faction_color(4));
    }

    #[test]
    fn test_register_replaces() {
        let mut styles = StyleRegistry::new();
        styles.register_color("x", Rgba::WHITE);
        styles.register_color("x", Rgba::TRANSPARENT);
        assert_eq!(styles.color("x"), Rgba::TRANSPARENT);
    }
}
