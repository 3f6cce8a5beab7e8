// Scenario outcome reporting
//
// Counterpart of the original harness's test-watcher hooks: each observed
// scenario gets its outcome recorded and logged, and a failure never stops
// later scenarios from running; scenarios stay isolated, with only the
// browser lifecycle being run-global.

use std::future::Future;
use std::time::{Duration, Instant};

use tracing::{error, info};

use crate::error::Result;

/// Outcome of one observed scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScenarioStatus {
    Passed,
    Failed(String),
}

/// Record of one scenario run.
#[derive(Debug, Clone)]
pub struct ScenarioReport {
    pub name: String,
    pub status: ScenarioStatus,
    pub duration: Duration,
}

impl ScenarioReport {
    pub fn passed(&self) -> bool {
        self.status == ScenarioStatus::Passed
    }
}

/// Collects per-scenario outcomes across a run.
#[derive(Debug, Default)]
pub struct Reporter {
    reports: Vec<ScenarioReport>,
}

impl Reporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs a scenario future, records its outcome, and logs it.
    ///
    /// Errors are absorbed into the report so the caller can keep driving
    /// the remaining scenarios.
    pub async fn observe<Fut>(&mut self, name: &str, scenario: Fut) -> &ScenarioReport
    where
        Fut: Future<Output = Result<()>>,
    {
        let start = Instant::now();
        let status = match scenario.await {
            Ok(()) => {
                info!(scenario = name, "scenario passed");
                ScenarioStatus::Passed
            }
            Err(err) => {
                error!(scenario = name, error = %err, "scenario failed");
                ScenarioStatus::Failed(err.to_string())
            }
        };
        self.reports.push(ScenarioReport {
            name: name.to_string(),
            status,
            duration: start.elapsed(),
        });
        self.reports.last().expect("report just pushed")
    }

    /// All recorded reports, in run order.
    pub fn reports(&self) -> &[ScenarioReport] {
        &self.reports
    }

    /// Number of passed scenarios.
    pub fn passed(&self) -> usize {
        self.reports.iter().filter(|r| r.passed()).count()
    }

    /// Number of failed scenarios.
    pub fn failed(&self) -> usize {
        self.reports.len() - self.passed()
    }

    /// Whether every observed scenario passed.
    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }
}
