//! Test runner for orchestrating health checks

use std::process::ExitCode;
use std::time::Instant;

use tracing::{debug, info, warn};

use super::check::{CheckResult, CheckStatus, SystemCheck};

/// Results from running a health check suite
#[derive(Debug)]
pub struct HealthCheckReport {
    /// Individual check results with their system names, in run order
    pub results: Vec<(String, CheckResult)>,
    pub total: usize,
    pub passed: usize,
    pub warned: usize,
    pub failed: usize,
}

impl HealthCheckReport {
    /// Returns true if all checks passed (no failures)
    pub fn is_healthy(&self) -> bool {
        self.failed == 0
    }

    pub fn has_warnings(&self) -> bool {
        self.warned > 0
    }

    /// The most severe status in the report
    pub fn worst(&self) -> CheckStatus {
        self.results
            .iter()
            .map(|(_, r)| r.status)
            .max()
            .unwrap_or(CheckStatus::Pass)
    }

    /// Results that did not pass cleanly
    pub fn problems(&self) -> impl Iterator<Item = (&str, &CheckResult)> {
        self.results
            .iter()
            .filter(|(_, r)| r.status != CheckStatus::Pass)
            .map(|(name, r)| (name.as_str(), r))
    }

    /// 0 = all pass, 1 = any fail, 2 = any warn (but no fail)
    pub fn exit_code(&self) -> ExitCode {
        match self.worst() {
            CheckStatus::Pass => ExitCode::SUCCESS,
            CheckStatus::Fail => ExitCode::from(1),
            CheckStatus::Warn => ExitCode::from(2),
        }
    }
}

/// Orchestrates running health checks and collecting results
pub struct HealthCheckRunner {
    checks: Vec<Box<dyn SystemCheck>>,
}

impl HealthCheckRunner {
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    pub fn add_check<C: SystemCheck + 'static>(mut self, check: C) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Runs all registered checks in order and returns a report
    pub fn run(self) -> HealthCheckReport {
        let mut results = Vec::with_capacity(self.checks.len());
        let (mut passed, mut warned, mut failed) = (0, 0, 0);

        for check in self.checks {
            let name = check.name();
            debug!(check = name, description = ?check.description(), "Running health check");

            let start = Instant::now();
            let result = check.check().with_duration(start.elapsed());

            match result.status {
                CheckStatus::Pass => {
                    passed += 1;
                    info!(check = name, duration = ?result.duration, "{}", result.message);
                }
                CheckStatus::Warn => {
                    warned += 1;
                    warn!(check = name, "{}", result.message);
                }
                CheckStatus::Fail => {
                    failed += 1;
                    warn!(check = name, status = "fail", "{}", result.message);
                }
            }

            results.push((name.to_string(), result));
        }

        HealthCheckReport {
            total: results.len(),
            results,
            passed,
            warned,
            failed,
        }
    }
}

impl Default for HealthCheckRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static str, CheckStatus);

    impl SystemCheck for Fixed {
        fn name(&self) -> &'static str {
            self.0
        }

        fn check(&self) -> CheckResult {
            CheckResult::new(self.1, "fixed")
        }
    }

    #[test]
    fn test_report_counts_and_worst_status() {
        let report = HealthCheckRunner::new()
            .add_check(Fixed("a", CheckStatus::Pass))
            .add_check(Fixed("b", CheckStatus::Warn))
            .run();
        assert_eq!((report.total, report.passed, report.warned), (2, 1, 1));
        assert!(report.is_healthy());
        assert_eq!(report.worst(), CheckStatus::Warn);
        assert_eq!(report.problems().map(|(n, _)| n).collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn test_empty_runner_is_healthy() {
        let runner = HealthCheckRunner::new();
        assert!(runner.is_empty());
        let report = runner.run();
        assert_eq!(report.worst(), CheckStatus::Pass);
        assert_eq!(report.exit_code(), ExitCode::SUCCESS);
    }
}
