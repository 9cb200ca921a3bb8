//! Tunable viewport constants
//!
//! Loaded through the application config (`[viewport]` table) and validated
//! before they reach a controller.

use serde::{Deserialize, Serialize};

/// Lower zoom bound
pub const DEFAULT_MIN_ZOOM: f64 = 0.1;
/// Upper zoom bound
pub const DEFAULT_MAX_ZOOM: f64 = 10.0;
/// Zoom factor change per wheel unit
pub const DEFAULT_ZOOM_SENSITIVITY: f64 = 0.1;
/// Star hit radius relative to the drawn radius
pub const DEFAULT_HIT_RADIUS_MULTIPLIER: f64 = 1.5;
/// Visual scale-up of a hovered entity
pub const DEFAULT_HOVER_SCALE: f64 = 1.15;
/// Visual scale-up of a selected entity
pub const DEFAULT_SELECTED_SCALE: f64 = 1.3;

/// Viewport interaction and highlight settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportSettings {
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub zoom_sensitivity: f64,
    pub hit_radius_multiplier: f64,
    pub hover_scale: f64,
    pub selected_scale: f64,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            zoom_sensitivity: DEFAULT_ZOOM_SENSITIVITY,
            hit_radius_multiplier: DEFAULT_HIT_RADIUS_MULTIPLIER,
            hover_scale: DEFAULT_HOVER_SCALE,
            selected_scale: DEFAULT_SELECTED_SCALE,
        }
    }
}

impl ViewportSettings {
    /// Returns a copy that is safe to hand to a controller
    ///
    /// Zoom bounds may narrow the default range but never widen it. They must
    /// be finite and ordered once capped, or the whole pair falls back to the
    /// defaults. Other values fall back individually.
    pub fn validated(self) -> Self {
        let defaults = Self::default();
        let min_zoom = self.min_zoom.max(DEFAULT_MIN_ZOOM);
        let max_zoom = self.max_zoom.min(DEFAULT_MAX_ZOOM);
        let bounds_ok = min_zoom.is_finite() && max_zoom.is_finite() && min_zoom <= max_zoom;
        let (min_zoom, max_zoom) = if bounds_ok {
            (min_zoom, max_zoom)
        } else {
            (defaults.min_zoom, defaults.max_zoom)
        };

        Self {
            min_zoom,
            max_zoom,
            zoom_sensitivity: positive_or(self.zoom_sensitivity, defaults.zoom_sensitivity),
            hit_radius_multiplier: positive_or(
                self.hit_radius_multiplier,
                defaults.hit_radius_multiplier,
            ),
            hover_scale: positive_or(self.hover_scale, defaults.hover_scale),
            selected_scale: positive_or(self.selected_scale, defaults.selected_scale),
        }
    }

    /// Clamps a requested zoom into the configured bounds
    ///
    /// NaN maps to the lower bound so the result is always usable as a divisor.
    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        if zoom.is_nan() {
            return self.min_zoom;
        }
        zoom.clamp(self.min_zoom, self.max_zoom)
    }
}

fn positive_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_constants() {
        let s = ViewportSettings::default();
        assert_eq!(s.min_zoom, 0.1);
        assert_eq!(s.max_zoom, 10.0);
        assert_eq!(s.zoom_sensitivity, 0.1);
        assert_eq!(s.hit_radius_multiplier, 1.5);
        assert_eq!(s.hover_scale, 1.15);
        assert_eq!(s.selected_scale, 1.3);
    }

    #[test]
    fn test_validated_repairs_inverted_bounds() {
        let s = ViewportSettings {
            min_zoom: 5.0,
            max_zoom: 1.0,
            ..Default::default()
        }
        .validated();
        assert_eq!((s.min_zoom, s.max_zoom), (0.1, 10.0));
    }

    #[test]
    fn test_validated_repairs_zero_min_zoom() {
        let s = ViewportSettings {
            min_zoom: 0.0,
            ..Default::default()
        }
        .validated();
        assert_eq!(s.min_zoom, 0.1);
    }

    #[test]
    fn test_validated_never_widens_zoom_domain() {
        let s = ViewportSettings {
            min_zoom: 0.01,
            max_zoom: 20.0,
            ..Default::default()
        }
        .validated();
        assert_eq!((s.min_zoom, s.max_zoom), (0.1, 10.0));
        assert_eq!(s.clamp_zoom(15.0), 10.0);
    }

    #[test]
    fn test_validated_keeps_sane_custom_values() {
        let custom = ViewportSettings {
            min_zoom: 0.5,
            max_zoom: 4.0,
            zoom_sensitivity: 0.2,
            hit_radius_multiplier: 2.0,
            hover_scale: 1.1,
            selected_scale: 1.5,
        };
        assert_eq!(custom.validated(), custom);
    }

    #[test]
    fn test_validated_repairs_negative_scalars() {
        let s = ViewportSettings {
            zoom_sensitivity: -1.0,
            hit_radius_multiplier: f64::NAN,
            ..Default::default()
        }
        .validated();
        assert_eq!(s.zoom_sensitivity, 0.1);
        assert_eq!(s.hit_radius_multiplier, 1.5);
    }

    #[test]
    fn test_clamp_zoom() {
        let s = ViewportSettings::default();
        assert_eq!(s.clamp_zoom(0.01), 0.1);
        assert_eq!(s.clamp_zoom(50.0), 10.0);
        assert_eq!(s.clamp_zoom(-3.0), 0.1);
        assert_eq!(s.clamp_zoom(f64::NAN), 0.1);
        assert_eq!(s.clamp_zoom(2.0), 2.0);
    }
}
