//! Configuration system health check

use crate::app::AppConfig;
use crate::health::check::{CheckResult, SystemCheck};
use crate::viewport::ViewportSettings;

/// Checks that configuration can be loaded for all profiles
pub struct ConfigCheck {
    profiles: Vec<&'static str>,
}

impl ConfigCheck {
    /// Creates a new config check with default profiles
    pub fn new() -> Self {
        Self {
            profiles: vec!["debug", "release"],
        }
    }

    /// Creates a config check with custom profiles
    pub fn with_profiles(profiles: Vec<&'static str>) -> Self {
        Self { profiles }
    }
}

impl Default for ConfigCheck {
    fn default() -> Self {
        Self::new()
    }
}

/// Loaded settings that differ from what a controller will actually use
fn repaired_fields(settings: &ViewportSettings) -> Vec<&'static str> {
    let validated = settings.validated();
    let mut fields = Vec::new();
    if validated.min_zoom != settings.min_zoom || validated.max_zoom != settings.max_zoom {
        fields.push("zoom bounds");
    }
    if validated.zoom_sensitivity != settings.zoom_sensitivity {
        fields.push("zoom_sensitivity");
    }
    if validated.hit_radius_multiplier != settings.hit_radius_multiplier {
        fields.push("hit_radius_multiplier");
    }
    if validated.hover_scale != settings.hover_scale
        || validated.selected_scale != settings.selected_scale
    {
        fields.push("highlight scales");
    }
    fields
}

impl SystemCheck for ConfigCheck {
    fn name(&self) -> &'static str {
        "Configuration"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates configuration loading from files and environment")
    }

    fn check(&self) -> CheckResult {
        let mut details = Vec::new();
        let mut all_success = true;
        let mut has_warnings = false;

        for profile in &self.profiles {
            match AppConfig::load(profile) {
                Ok(config) => {
                    details.push(format!(
                        "  ✓ Profile '{}': zoom {}..{}, {} stars, {}x{} provinces, starts on {}",
                        profile,
                        config.viewport.min_zoom,
                        config.viewport.max_zoom,
                        config.scene.star_count,
                        config.scene.province_cols,
                        config.scene.province_rows,
                        config.scene.initial_map
                    ));
                    if config.scene.star_count == 0 || config.scene.province_cols == 0 {
                        details.push(format!("  ⚠ Profile '{}': a map is empty", profile));
                        has_warnings = true;
                    }
                }
                Err(e) => {
                    details.push(format!("  ✗ Profile '{}': failed to load - {}", profile, e));
                    all_success = false;
                }
            }
        }

        match AppConfig::load_from_env() {
            Ok(config) => {
                details.push(format!(
                    "  ✓ Environment config: profile '{}' loaded",
                    config.profile
                ));
            }
            Err(e) => {
                details.push(format!("  ⚠ Environment config: {}", e));
                has_warnings = true;
            }
        }

        let broken = ViewportSettings {
            min_zoom: 5.0,
            max_zoom: 1.0,
            zoom_sensitivity: f64::NAN,
            ..ViewportSettings::default()
        };
        let repaired = repaired_fields(&broken);
        if repaired.len() == 2 && broken.validated().min_zoom <= broken.validated().max_zoom {
            details.push(format!("  ✓ Validation repairs {}", repaired.join(", ")));
        } else {
            details.push("  ✗ Invalid viewport settings were not repaired".to_string());
            all_success = false;
        }

        let details_str = details.join("\n");

        if !all_success {
            CheckResult::fail("Failed to load or validate configuration").with_details(details_str)
        } else if has_warnings {
            CheckResult::warn("Config loaded with warnings").with_details(details_str)
        } else {
            CheckResult::pass(format!("{} profiles validated", self.profiles.len()))
                .with_details(details_str)
        }
    }
}
