//! Viewport engine health check

use glam::DVec2;

use crate::health::check::{CheckResult, SystemCheck};
use crate::viewport::{
    PointEntity, ScreenRect, StarField, TransformParams, ViewportController, ViewportInput,
    ViewportSettings,
};

const TOLERANCE: f64 = 1e-6;

/// Exercises the transform and controller end to end on a synthetic rect
pub struct ViewportCheck {
    rect: ScreenRect,
}

impl ViewportCheck {
    pub fn new() -> Self {
        Self {
            rect: ScreenRect::new(240.0, 0.0, 800.0, 600.0),
        }
    }
}

impl Default for ViewportCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewportCheck {
    fn round_trip(&self) -> Result<String, String> {
        let params = TransformParams::new(self.rect.size, DVec2::new(-37.5, 12.0), 3.25);
        let worst = [
            DVec2::ZERO,
            DVec2::ONE,
            DVec2::new(0.25, 0.8),
            DVec2::new(1.5, -0.5),
        ]
        .into_iter()
        .map(|p| (params.to_norm(params.to_screen(p)) - p).length())
        .fold(0.0, f64::max);

        if worst < TOLERANCE {
            Ok(format!("round trip error {:.1e}", worst))
        } else {
            Err(format!("round trip error {:.1e} exceeds tolerance", worst))
        }
    }

    fn anchor_invariance(&self) -> Result<String, String> {
        let field = StarField::new(Vec::new());
        let mut controller = ViewportController::new("health", ViewportSettings::default());
        let cursor = self.rect.origin + DVec2::new(130.0, 470.0);
        let local = self.rect.localize(cursor);

        let before = controller.params(&self.rect).to_norm(local);
        controller.handle(
            ViewportInput::Scroll {
                pos: cursor,
                delta_y: 3.0,
                rect: self.rect,
            },
            &field,
        );
        let after = controller.params(&self.rect).to_norm(local);

        let drift = (after - before).length();
        if drift < TOLERANCE {
            Ok(format!(
                "zoom {:.2}x kept cursor point (drift {:.1e})",
                controller.state().zoom(),
                drift
            ))
        } else {
            Err(format!("cursor point drifted {:.1e} while zooming", drift))
        }
    }

    fn clamp_and_pan(&self) -> Result<String, String> {
        let settings = ViewportSettings::default();
        let field = StarField::new(vec![PointEntity {
            norm: DVec2::new(0.1, 0.1),
            radius_px: 4.0,
        }]);
        let mut controller = ViewportController::new("health", settings);
        let center = self.rect.origin + self.rect.local_center();

        for _ in 0..200 {
            controller.handle(
                ViewportInput::Scroll {
                    pos: center,
                    delta_y: 5.0,
                    rect: self.rect,
                },
                &field,
            );
        }
        let zoom = controller.state().zoom();
        if zoom > settings.max_zoom {
            return Err(format!("zoom {} escaped the upper bound", zoom));
        }

        let start = self.rect.origin + DVec2::new(700.0, 500.0);
        let pan_before = controller.state().pan();
        controller.handle(
            ViewportInput::Click {
                pos: start,
                rect: self.rect,
            },
            &field,
        );
        controller.handle(
            ViewportInput::Hover {
                pos: start + DVec2::new(25.0, -40.0),
                rect: self.rect,
            },
            &field,
        );
        controller.handle(ViewportInput::MouseUp, &field);

        let moved = controller.state().pan() - pan_before;
        if (moved - DVec2::new(25.0, -40.0)).length() > TOLERANCE {
            return Err(format!("drag moved pan by {:?} at zoom {}", moved, zoom));
        }
        Ok(format!("zoom held at {}x, drag exact at max zoom", zoom))
    }
}

impl SystemCheck for ViewportCheck {
    fn name(&self) -> &'static str {
        "Viewport Engine"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates transform round trip, zoom anchoring, clamping and drag panning")
    }

    fn check(&self) -> CheckResult {
        let steps = [
            ("Transform", self.round_trip()),
            ("Anchor", self.anchor_invariance()),
            ("Clamp/pan", self.clamp_and_pan()),
        ];

        let mut details = Vec::new();
        let mut failures = 0;
        for (name, outcome) in steps {
            match outcome {
                Ok(msg) => details.push(format!("  ✓ {}: {}", name, msg)),
                Err(msg) => {
                    failures += 1;
                    details.push(format!("  ✗ {}: {}", name, msg));
                }
            }
        }

        if failures > 0 {
            CheckResult::fail(format!("{} viewport invariants broken", failures))
                .with_details(details.join("\n"))
        } else {
            CheckResult::pass("Viewport invariants hold").with_details(details.join("\n"))
        }
    }
}
