use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed steps of a run, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestStep {
    DatabaseSetup,
    TestFileCreation,
    ModUpload,
    GetMetadata,
    ModDownload,
    FileComparison,
    Cleanup,
}

impl TestStep {
    pub fn name(&self) -> &'static str {
        match self {
            TestStep::DatabaseSetup => "Database Setup",
            TestStep::TestFileCreation => "Test File Creation",
            TestStep::ModUpload => "Mod Upload",
            TestStep::GetMetadata => "Get Metadata",
            TestStep::ModDownload => "Mod Download",
            TestStep::FileComparison => "File Comparison",
            TestStep::Cleanup => "Cleanup",
        }
    }
}

impl fmt::Display for TestStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of one step, as written to the JSON report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub test: String,
    pub success: bool,
    pub message: String,
    pub timestamp: String,
    #[serde(default)]
    pub response_data: Option<serde_json::Value>,
}

impl TestResult {
    pub fn new(
        step: TestStep,
        success: bool,
        message: impl Into<String>,
        response_data: Option<serde_json::Value>,
    ) -> Self {
        Self {
            test: step.name().to_string(),
            success,
            message: message.into(),
            timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            // a JSON null body serializes like an absent one
            response_data: response_data.filter(|data| !data.is_null()),
        }
    }
}

/// Append-only record of a run
#[derive(Debug, Clone, Default)]
pub struct TestSession {
    results: Vec<TestResult>,
}

impl TestSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: TestResult) -> &TestResult {
        self.results.push(result);
        &self.results[self.results.len() - 1]
    }

    pub fn results(&self) -> &[TestResult] {
        &self.results
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary::from_results(&self.results)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn from_results(results: &[TestResult]) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.success).count();
        Self {
            total,
            passed,
            failed: total - passed,
        }
    }
}
