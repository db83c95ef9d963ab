use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

/// 一次探測執行，所有請求共用同一個 run_id 作為關聯鍵
#[derive(Debug, Clone, Serialize)]
pub struct ProbeRun {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
}

impl ProbeRun {
    /// run_id = 前綴 + 毫秒時間戳，每次執行都不同
    pub fn generate(prefix: &str) -> Self {
        let started_at = Utc::now();
        Self {
            run_id: format!("{}-{}", prefix, started_at.timestamp_millis()),
            started_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct Check {
    pub label: String,
    pub passed: bool,
}

impl Check {
    pub fn new(label: impl Into<String>, passed: bool) -> Self {
        Self {
            label: label.into(),
            passed,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StepReport {
    pub step: String,
    pub method: String,
    pub endpoint: String,
    pub status: u16,
    pub success: bool,
    pub duration: Duration,
    pub checks: Vec<Check>,
    pub details: Vec<String>,
}

impl StepReport {
    pub fn passed(&self) -> bool {
        self.success && self.checks.iter().all(|c| c.passed)
    }
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub run_id: String,
    pub steps: Vec<StepReport>,
}

impl RunSummary {
    pub fn passed(&self) -> bool {
        !self.steps.is_empty() && self.steps.iter().all(|s| s.passed())
    }

    pub fn passed_steps(&self) -> usize {
        self.steps.iter().filter(|s| s.passed()).count()
    }

    pub fn failed_checks(&self) -> Vec<&Check> {
        self.steps
            .iter()
            .flat_map(|s| s.checks.iter())
            .filter(|c| !c.passed)
            .collect()
    }
}
