use crate::domain::model::{RunSummary, StepReport};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn run_prefix(&self) -> &str;
    fn token(&self) -> &str;
    fn chat_message(&self) -> &str;
    fn wait_seconds(&self) -> u64;
    fn timeout_seconds(&self) -> u64;
}

#[async_trait]
pub trait Scenario: Send + Sync {
    fn name(&self) -> &str;
    async fn execute(&self) -> Result<RunSummary>;
}

pub trait Reporter: Send + Sync {
    fn step(&self, report: &StepReport);
    fn summary(&self, summary: &RunSummary);
}
