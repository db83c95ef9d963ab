use crate::core::{Reporter, RunSummary, Scenario};
use crate::utils::error::Result;

pub struct ProbeEngine<S: Scenario, R: Reporter> {
    scenario: S,
    reporter: R,
}

impl<S: Scenario, R: Reporter> ProbeEngine<S, R> {
    pub fn new(scenario: S, reporter: R) -> Self {
        Self { scenario, reporter }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!("Starting probe scenario '{}'", self.scenario.name());

        let summary = self.scenario.execute().await?;

        for step in &summary.steps {
            self.reporter.step(step);
        }
        self.reporter.summary(&summary);

        tracing::info!(
            "Scenario '{}' finished: {}/{} steps passed",
            self.scenario.name(),
            summary.passed_steps(),
            summary.steps.len()
        );

        Ok(summary)
    }
}
