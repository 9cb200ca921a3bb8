//! Affine mapping between normalized map coordinates and widget pixels
//!
//! Zoom is anchored at the widget center, and pan is applied in screen space
//! after zoom. A pan of N pixels therefore moves content by N pixels at any
//! zoom level.

use glam::DVec2;

/// Snapshot of everything needed to map between normalized and screen space
///
/// Built fresh from the current view state and the widget's current size for
/// every event and every frame. Never cache one across a resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformParams {
    pub screen_width: f64,
    pub screen_height: f64,
    pub pan_x: f64,
    pub pan_y: f64,
    /// Always strictly positive (the view state clamps it)
    pub zoom: f64,
}

impl TransformParams {
    /// Creates params from a widget size, a pan offset and a zoom factor
    pub fn new(size: DVec2, pan: DVec2, zoom: f64) -> Self {
        Self {
            screen_width: size.x,
            screen_height: size.y,
            pan_x: pan.x,
            pan_y: pan.y,
            zoom,
        }
    }

    /// Widget size in pixels
    pub fn screen_size(&self) -> DVec2 {
        DVec2::new(self.screen_width, self.screen_height)
    }

    /// Pan offset in pixels
    pub fn pan(&self) -> DVec2 {
        DVec2::new(self.pan_x, self.pan_y)
    }

    /// The fixed point of the zoom, in widget-local pixels
    pub fn center(&self) -> DVec2 {
        self.screen_size() * 0.5
    }

    /// Maps a normalized point to widget-local screen pixels
    pub fn to_screen(&self, norm: DVec2) -> DVec2 {
        let center = self.center();
        let base = norm * self.screen_size();
        center + (base - center) * self.zoom + self.pan()
    }

    /// Maps widget-local screen pixels back to normalized coordinates
    ///
    /// Exact inverse of [`Self::to_screen`] up to floating point rounding.
    pub fn to_norm(&self, screen: DVec2) -> DVec2 {
        let center = self.center();
        let base = (screen - self.pan() - center) / self.zoom + center;
        base / self.screen_size()
    }

    /// Scales an unzoomed pixel length by the current zoom
    pub fn scale_length(&self, px: f64) -> f64 {
        px * self.zoom
    }
}

/// A widget's content rectangle in window coordinates
///
/// Owned by the layout collaborator; the viewport engine only reads it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub origin: DVec2,
    pub size: DVec2,
}

impl ScreenRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: DVec2::new(x, y),
            size: DVec2::new(width, height),
        }
    }

    /// A zero-area rect cannot host a transform (its inverse would divide by zero)
    pub fn is_empty(&self) -> bool {
        !(self.size.x > 0.0 && self.size.y > 0.0)
    }

    /// Edge-inclusive containment test in window coordinates
    pub fn contains(&self, pos: DVec2) -> bool {
        let max = self.origin + self.size;
        pos.x >= self.origin.x && pos.x <= max.x && pos.y >= self.origin.y && pos.y <= max.y
    }

    /// Converts a window position to rect-local coordinates
    pub fn localize(&self, pos: DVec2) -> DVec2 {
        pos - self.origin
    }

    /// Center of the rect in rect-local coordinates
    pub fn local_center(&self) -> DVec2 {
        self.size * 0.5
    }
}
