//! Build information health check

use crate::build_info;
use crate::health::check::{CheckResult, SystemCheck};

/// Checks that build information is accessible and valid
pub struct BuildInfoCheck;

impl BuildInfoCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BuildInfoCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for BuildInfoCheck {
    fn name(&self) -> &'static str {
        "Build Info"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates build metadata (git, rustc, timestamps)")
    }

    fn check(&self) -> CheckResult {
        let mut details = vec![format!("  Version: {}", build_info::version_string())];
        details.extend(build_info::detailed_info().lines().map(|l| format!("  {}", l)));

        if build_info::RUSTC_SEMVER.is_empty() || build_info::CARGO_TARGET_TRIPLE.is_empty() {
            return CheckResult::fail("Compiler metadata missing").with_details(details.join("\n"));
        }

        if build_info::GIT_SHA.is_none() {
            return CheckResult::warn("Built outside a git checkout")
                .with_details(details.join("\n"));
        }

        CheckResult::pass("Build metadata accessible").with_details(details.join("\n"))
    }
}
