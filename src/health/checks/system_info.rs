//! System information health check

use sysinfo::System;

use crate::health::check::{CheckResult, SystemCheck};

/// Below this much memory the viewer still runs, but warn about it
const MIN_MEMORY_GB: f64 = 1.0;

/// Checks that host information can be gathered
pub struct SystemInfoCheck;

impl SystemInfoCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemInfoCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for SystemInfoCheck {
    fn name(&self) -> &'static str {
        "System Info"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates OS, CPU, and memory information gathering")
    }

    fn check(&self) -> CheckResult {
        let mut sys = System::new();
        sys.refresh_memory();
        sys.refresh_cpu_all();

        let unknown = || "Unknown".to_string();
        let physical_cores = System::physical_core_count().unwrap_or(0);
        let logical_cores = sys.cpus().len();
        let total_memory_gb = sys.total_memory() as f64 / 1_073_741_824.0;

        let mut details = vec![
            format!(
                "  OS: {} {}",
                System::name().unwrap_or_else(unknown),
                System::os_version().unwrap_or_else(unknown)
            ),
            format!("  Kernel: {}", System::kernel_version().unwrap_or_else(unknown)),
            format!(
                "  CPU cores: {} physical, {} logical",
                physical_cores, logical_cores
            ),
            format!("  Memory: {:.1} GB total", total_memory_gb),
        ];
        if let Some(hostname) = System::host_name() {
            details.push(format!("  Hostname: {}", hostname));
        }
        let details = details.join("\n");

        if logical_cores == 0 {
            CheckResult::warn("Unable to detect CPU cores").with_details(details)
        } else if total_memory_gb < MIN_MEMORY_GB {
            CheckResult::warn("Low memory detected").with_details(details)
        } else {
            CheckResult::pass("System info gathered successfully").with_details(details)
        }
    }
}
