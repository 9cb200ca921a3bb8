//! Scene generation and hit testing health check

use glam::DVec2;

use crate::health::check::{CheckResult, SystemCheck};
use crate::scene::{Galaxy, Provinces};
use crate::viewport::{EntityLayer, ProvinceId, TransformParams, ViewportSettings};

/// Generates both maps and hit-tests them at their own anchors
pub struct SceneCheck {
    seed: u64,
    star_count: usize,
    grid: (usize, usize),
}

impl SceneCheck {
    pub fn new() -> Self {
        Self {
            seed: 1977,
            star_count: 400,
            grid: (12, 8),
        }
    }

    /// Uses the scene parameters of a loaded configuration
    pub fn with_scene(seed: u64, star_count: usize, cols: usize, rows: usize) -> Self {
        Self {
            seed,
            star_count,
            grid: (cols, rows),
        }
    }
}

impl Default for SceneCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for SceneCheck {
    fn name(&self) -> &'static str {
        "Scene"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates map generation determinism and hit testing")
    }

    fn check(&self) -> CheckResult {
        let mut details = Vec::new();
        let settings = ViewportSettings::default();
        let params = TransformParams::new(DVec2::new(1000.0, 1000.0), DVec2::ZERO, 1.0);

        let galaxy = Galaxy::generate(self.seed, self.star_count);
        if Galaxy::generate(self.seed, self.star_count).stars() != galaxy.stars() {
            return CheckResult::fail("Galaxy generation is not deterministic");
        }
        details.push(format!("  ✓ Galaxy: {} stars", galaxy.len()));

        // Overlapping discs may legitimately resolve to a neighbor
        let missed = galaxy
            .field()
            .iter()
            .filter(|(_, star)| {
                let screen = params.to_screen(star.norm);
                galaxy.entity_at(&params, screen, &settings).is_none()
            })
            .count();
        if missed > 0 {
            details.push(format!("  ✗ {} stars not hit at their own center", missed));
            return CheckResult::fail("Star hit testing failed").with_details(details.join("\n"));
        }
        details.push("  ✓ Every star center hits a star".to_string());

        let (cols, rows) = self.grid;
        let provinces = Provinces::generate(self.seed, cols, rows);
        details.push(format!("  ✓ Provinces: {} ({}x{})", provinces.len(), cols, rows));

        let wrong = (0..provinces.len())
            .map(ProvinceId)
            .filter(|id| {
                let Some(anchor) = provinces.anchor(*id) else {
                    return true;
                };
                provinces.entity_at(&params, params.to_screen(anchor), &settings) != Some(*id)
            })
            .count();

        let outside = params.to_screen(DVec2::new(-0.5, -0.5));
        if provinces.entity_at(&params, outside, &settings).is_some() {
            details.push("  ✗ A point off the map hit a province".to_string());
            return CheckResult::fail("Province hit testing failed")
                .with_details(details.join("\n"));
        }

        if wrong > 0 {
            details.push(format!(
                "  ⚠ {} province centroids resolve to another province",
                wrong
            ));
            return CheckResult::warn("Some province centroids are ambiguous")
                .with_details(details.join("\n"));
        }
        details.push("  ✓ Every centroid hits its own province".to_string());

        CheckResult::pass("Scene generated and hit-testable").with_details(details.join("\n"))
    }
}
