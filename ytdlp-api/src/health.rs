//! Liveness reporting.
//!
//! A [`HealthReporter`] runs a list of named checks and aggregates their
//! results. Checks are plain functions: they must not block and must not
//! check external dependencies.

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;

type Check = Box<dyn Fn() -> (bool, String) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Success,
    Failure
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub checker: String,
    pub output: String,
    pub passed: bool,
    pub timestamp: DateTime<Utc>,
    /// Seconds spent running the check.
    pub response_time: f64
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub timestamp: DateTime<Utc>,
    pub results: Vec<CheckResult>
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Success
    }
}

#[derive(Default)]
pub struct HealthReporter {
    checks: Vec<(String, Check)>
}

impl HealthReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reporter with the service's standard checks registered.
    pub fn with_default_checks() -> Self {
        let mut reporter = Self::new();
        reporter.add_check("app_available", app_available);
        reporter
    }

    pub fn add_check<F>(&mut self, name: impl Into<String>, check: F)
    where
        F: Fn() -> (bool, String) + Send + Sync + 'static
    {
        self.checks.push((name.into(), Box::new(check)));
    }

    pub fn run(&self) -> HealthReport {
        let results: Vec<CheckResult> = self
            .checks
            .iter()
            .map(|(name, check)| {
                let started = Instant::now();
                let (passed, output) = check();
                CheckResult {
                    checker: name.clone(),
                    output,
                    passed,
                    timestamp: Utc::now(),
                    response_time: started.elapsed().as_secs_f64()
                }
            })
            .collect();

        let status = if results.iter().all(|r| r.passed) {
            HealthStatus::Success
        } else {
            HealthStatus::Failure
        };

        HealthReport {
            status,
            timestamp: Utc::now(),
            results
        }
    }
}

pub fn app_available() -> (bool, String) {
    (true, "app ok".to_string())
}
