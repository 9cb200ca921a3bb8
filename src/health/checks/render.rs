//! Headless rendering health check
//!
//! Builds draw commands for both maps and paints them through the egui
//! backend without a window, then tessellates the result.

use egui::Context;
use glam::DVec2;

use crate::app::EguiCanvas;
use crate::health::check::{CheckResult, SystemCheck};
use crate::render::{
    Canvas, CommandRecorder, DrawCommand, StyleRegistry, galaxy_commands, province_commands,
};
use crate::scene::{Galaxy, Provinces};
use crate::viewport::{ProvinceId, StarId, ViewState, ViewportSettings};

const CANVAS_SIZE: DVec2 = DVec2::new(800.0, 600.0);

/// Checks that map commands can be built and painted by egui
pub struct RenderCheck;

impl RenderCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RenderCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for RenderCheck {
    fn name(&self) -> &'static str {
        "Rendering"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates draw command building and headless egui painting")
    }

    fn check(&self) -> CheckResult {
        let mut details = Vec::new();
        let styles = StyleRegistry::standard();
        let settings = ViewportSettings::default();

        let galaxy = Galaxy::generate(1977, 200);
        let star_view = ViewState::<StarId>::default();
        let star_commands = galaxy_commands(
            &star_view,
            &galaxy,
            &star_view.params(CANVAS_SIZE),
            0.0,
            &styles,
            &settings,
        );

        let provinces = Provinces::generate(1977, 6, 4);
        let province_view = ViewState::<ProvinceId>::default();
        let province_cmds = province_commands(
            &province_view,
            &provinces,
            &province_view.params(CANVAS_SIZE),
            &styles,
        );

        let mut recorder = CommandRecorder::new();
        recorder.draw_all(&star_commands);
        recorder.draw_all(&province_cmds);
        details.push(format!(
            "  ✓ Built {} star and {} province commands",
            star_commands.len(),
            province_cmds.len()
        ));

        if recorder.count("Circle") < galaxy.stars().len() {
            details.push("  ✗ Some stars were culled at the default view".to_string());
            return CheckResult::fail("Star commands incomplete").with_details(details.join("\n"));
        }

        let ctx = Context::default();
        let raw_input = egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(
                egui::Pos2::ZERO,
                egui::vec2(CANVAS_SIZE.x as f32, CANVAS_SIZE.y as f32),
            )),
            ..Default::default()
        };
        let all: Vec<&DrawCommand> = star_commands.iter().chain(&province_cmds).collect();
        let output = ctx.run(raw_input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                let painter = ui.painter();
                let mut canvas = EguiCanvas::new(painter, egui::Pos2::ZERO);
                for command in &all {
                    canvas.draw(command);
                }
            });
        });
        details.push(format!("  ✓ egui produced {} shapes", output.shapes.len()));

        let meshes = ctx.tessellate(output.shapes, output.pixels_per_point);
        if meshes.is_empty() {
            details.push("  ✗ Tessellation produced no meshes".to_string());
            return CheckResult::fail("egui painting failed").with_details(details.join("\n"));
        }
        details.push(format!("  ✓ Tessellated into {} primitives", meshes.len()));

        CheckResult::pass("Maps render headlessly").with_details(details.join("\n"))
    }
}
