//! Health check system for validating application initialization and status
//!
//! This module provides a framework for testing system health, useful for:
//! - Validating application startup
//! - CI/CD health checks
//! - Debugging initialization issues
//! - Ensuring the viewport engine and both maps are operational
//!
//! # Example
//!
//! ```no_run
//! use starmap::health::{HealthCheckRunner, checks::*};
//!
//! let report = HealthCheckRunner::new()
//!     .add_check(ConfigCheck::new())
//!     .add_check(ViewportCheck::new())
//!     .add_check(BuildInfoCheck::new())
//!     .add_check(SystemInfoCheck::new())
//!     .run();
//!
//! if report.is_healthy() {
//!     println!("All systems operational!");
//! }
//! ```

pub mod check;
pub mod checks;
pub mod reporter;
pub mod runner;

pub use check::{CheckResult, CheckStatus, SystemCheck};
pub use reporter::{format_report, print_report};
pub use runner::{HealthCheckReport, HealthCheckRunner};

use crate::app::AppConfig;

/// Runs all default health checks and returns a report
pub fn run_all_checks() -> HealthCheckReport {
    HealthCheckRunner::new()
        .add_check(checks::ConfigCheck::new())
        .add_check(checks::ViewportCheck::new())
        .add_check(checks::SceneCheck::new())
        .add_check(checks::RenderCheck::new())
        .add_check(checks::BuildInfoCheck::new())
        .add_check(checks::SystemInfoCheck::new())
        .run()
}

/// Runs the default suite with the scene from a loaded configuration
pub fn run_checks_for(config: &AppConfig) -> HealthCheckReport {
    let scene = &config.scene;
    HealthCheckRunner::new()
        .add_check(checks::ConfigCheck::new())
        .add_check(checks::ViewportCheck::new())
        .add_check(checks::SceneCheck::with_scene(
            scene.seed,
            scene.star_count,
            scene.province_cols,
            scene.province_rows,
        ))
        .add_check(checks::RenderCheck::new())
        .add_check(checks::BuildInfoCheck::new())
        .add_check(checks::SystemInfoCheck::new())
        .run()
}
