//! Suite results and reporting.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};

/// Outcome of a single case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestStatus {
    /// All assertions held
    Passed,
    /// An assertion failed
    Failed,
    /// The harness itself broke (navigation, browser, fixture)
    Errored,
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passed => write!(f, "PASS"),
            Self::Failed => write!(f, "FAIL"),
            Self::Errored => write!(f, "ERROR"),
        }
    }
}

/// Result of one case
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseResult {
    /// Case name
    pub name: String,
    /// Outcome
    pub status: TestStatus,
    /// Failure or error message, when not passed
    pub message: Option<String>,
    /// Wall-clock duration
    pub duration: Duration,
}

impl CaseResult {
    /// Whether the case passed
    #[must_use]
    pub fn passed(&self) -> bool {
        self.status == TestStatus::Passed
    }
}

/// Accumulated results for one suite
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuiteReport {
    /// Suite name
    pub suite: String,
    /// Per-case results, in execution order
    pub cases: Vec<CaseResult>,
}

impl SuiteReport {
    /// Start an empty report for a named suite
    #[must_use]
    pub fn new(suite: impl Into<String>) -> Self {
        Self {
            suite: suite.into(),
            cases: Vec::new(),
        }
    }

    /// Record the outcome of one case. Assertion failures count as `Failed`,
    /// anything else the harness surfaces counts as `Errored`.
    pub fn record(
        &mut self,
        name: &str,
        outcome: &crate::result::VitrinaResult<()>,
        duration: Duration,
    ) {
        let (status, message) = match outcome {
            Ok(()) => (TestStatus::Passed, None),
            Err(e) if e.is_assertion() => (TestStatus::Failed, Some(e.to_string())),
            Err(e) => (TestStatus::Errored, Some(e.to_string())),
        };
        match status {
            TestStatus::Passed => tracing::info!(suite = %self.suite, case = name, "pass"),
            _ => tracing::warn!(
                suite = %self.suite,
                case = name,
                message = message.as_deref().unwrap_or(""),
                "fail"
            ),
        }
        self.cases.push(CaseResult {
            name: name.to_string(),
            status,
            message,
            duration,
        });
    }

    /// Run one case through a closure-produced future, timing it
    pub async fn run_case<F>(&mut self, name: &str, fut: F)
    where
        F: std::future::Future<Output = crate::result::VitrinaResult<()>>,
    {
        let start = Instant::now();
        let outcome = fut.await;
        self.record(name, &outcome, start.elapsed());
    }

    /// Whether every case passed
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.cases.iter().all(CaseResult::passed)
    }

    /// Number of passed cases
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.cases.iter().filter(|c| c.passed()).count()
    }

    /// Number of failed or errored cases
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.cases.len() - self.passed_count()
    }

    /// The non-passing cases
    pub fn failures(&self) -> impl Iterator<Item = &CaseResult> {
        self.cases.iter().filter(|c| !c.passed())
    }

    /// Total wall-clock time across cases
    #[must_use]
    pub fn total_duration(&self) -> Duration {
        self.cases.iter().map(|c| c.duration).sum()
    }

    /// Human-readable summary, one line per case
    #[must_use]
    pub fn summary(&self) -> String {
        let mut out = format!("{}\n", self.suite);
        for case in &self.cases {
            out.push_str(&format!(
                "  [{}] {} ({:?})\n",
                case.status, case.name, case.duration
            ));
            if let Some(ref message) = case.message {
                out.push_str(&format!("        {message}\n"));
            }
        }
        out.push_str(&format!(
            "  {} passed, {} failed\n",
            self.passed_count(),
            self.failed_count()
        ));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::VitrinaError;

    #[test]
    fn assertion_failures_and_harness_errors_are_distinguished() {
        let mut report = SuiteReport::new("Quota");
        report.record("passes", &Ok(()), Duration::from_millis(5));
        report.record(
            "fails",
            &Err(VitrinaError::AssertionFailed {
                message: "expected p#quota-message to exist".to_string(),
            }),
            Duration::from_millis(5),
        );
        report.record(
            "errors",
            &Err(VitrinaError::Navigation {
                url: "http://localhost:1337".to_string(),
                message: "connection refused".to_string(),
            }),
            Duration::from_millis(5),
        );

        assert_eq!(report.cases[0].status, TestStatus::Passed);
        assert_eq!(report.cases[1].status, TestStatus::Failed);
        assert_eq!(report.cases[2].status, TestStatus::Errored);
        assert!(!report.all_passed());
        assert_eq!(report.passed_count(), 1);
        assert_eq!(report.failed_count(), 2);
        assert_eq!(report.failures().count(), 2);
    }

    #[test]
    fn summary_includes_messages() {
        let mut report = SuiteReport::new("Header");
        report.record(
            "shows title",
            &Err(VitrinaError::AssertionFailed {
                message: "expected header h1 to exist".to_string(),
            }),
            Duration::from_millis(1),
        );
        let summary = report.summary();
        assert!(summary.contains("Header"));
        assert!(summary.contains("[FAIL] shows title"));
        assert!(summary.contains("expected header h1 to exist"));
        assert!(summary.contains("0 passed, 1 failed"));
    }
}
