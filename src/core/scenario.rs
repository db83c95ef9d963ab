use crate::core::interpreter;
use crate::core::{
    ApiClient, Check, ConfigProvider, ProbeRun, RunSummary, Scenario, StepReport,
};
use crate::utils::error::Result;
use serde_json::json;
use std::time::{Duration, Instant};

/// 記憶回想情境：store → 等待 → search → chat 回想 → 列出記憶。
/// 順序固定、一次一個請求，對應原始診斷腳本的線性流程。
pub struct MemoryRecallScenario<C: ConfigProvider> {
    config: C,
    client: ApiClient,
}

impl<C: ConfigProvider> MemoryRecallScenario<C> {
    pub fn new(config: C) -> Result<Self> {
        let client = ApiClient::new(config.base_url(), config.timeout_seconds())?;
        Ok(Self { config, client })
    }

    async fn store_step(&self, run: &ProbeRun) -> Result<StepReport> {
        let body = json!({
            "userId": run.run_id,
            "memoryType": "personal_info",
            "content": format!("My name is {}", self.config.token()),
            "importanceScore": 0.9,
            "tags": ["name", "identity"],
            "metadata": { "source": "memory-probe", "startedAt": run.started_at.to_rfc3339() }
        });

        let started = Instant::now();
        let response = self.client.post_json("/api/memory/store", &body).await?;
        let duration = started.elapsed();

        let id = interpreter::stored_id(&response.body).map(str::to_string);
        let mut details = vec![];
        if let Some(id) = &id {
            details.push(format!("memory id: {}", id));
        }
        let message = interpreter::message_text(&response.body);
        if !message.is_empty() {
            details.push(format!("message: {}", message));
        }

        Ok(StepReport {
            step: "store".to_string(),
            method: "POST".to_string(),
            endpoint: "/api/memory/store".to_string(),
            status: response.status,
            success: interpreter::success_flag(&response.body),
            duration,
            checks: vec![Check::new("memory id returned", id.is_some())],
            details,
        })
    }

    async fn search_step(&self, run: &ProbeRun) -> Result<StepReport> {
        let started = Instant::now();
        let response = self
            .client
            .get_json(
                "/api/memory/search",
                &[("userId", run.run_id.as_str()), ("query", "name")],
            )
            .await?;
        let duration = started.elapsed();

        let memories = interpreter::memories(&response.body);
        let hits = interpreter::memories_mentioning(memories, self.config.token());

        Ok(StepReport {
            step: "search".to_string(),
            method: "GET".to_string(),
            endpoint: "/api/memory/search".to_string(),
            status: response.status,
            success: interpreter::success_flag(&response.body),
            duration,
            checks: vec![Check::new(
                format!("search hits mention {}", self.config.token()),
                hits > 0,
            )],
            details: vec![format!(
                "memories returned: {}, matching: {}",
                memories.len(),
                hits
            )],
        })
    }

    async fn chat_step(&self, run: &ProbeRun) -> Result<StepReport> {
        let body = json!({
            "userId": run.run_id,
            "message": self.config.chat_message(),
            "operation": "chat",
            "chatType": "general"
        });

        let started = Instant::now();
        let response = self.client.post_json("/api/study-buddy", &body).await?;
        let duration = started.elapsed();

        let content = interpreter::reply_content(&response.body);
        let references = interpreter::memory_reference_count(&response.body);
        tracing::debug!("chat reply: {}", content);

        Ok(StepReport {
            step: "chat-recall".to_string(),
            method: "POST".to_string(),
            endpoint: "/api/study-buddy".to_string(),
            status: response.status,
            success: interpreter::success_flag(&response.body),
            duration,
            checks: vec![
                Check::new(
                    format!("reply mentions {}", self.config.token()),
                    interpreter::mentions(content, self.config.token()),
                ),
                Check::new("reply cites stored memories", references > 0),
            ],
            details: vec![
                format!("memory references: {}", references),
                format!(
                    "layers used: {}, optimizations: {}",
                    interpreter::layers_used(&response.body),
                    interpreter::optimizations_applied(&response.body)
                ),
            ],
        })
    }

    async fn list_step(&self, run: &ProbeRun) -> Result<StepReport> {
        let started = Instant::now();
        let response = self
            .client
            .get_json("/api/student/memories", &[("userId", run.run_id.as_str())])
            .await?;
        let duration = started.elapsed();

        let memories = interpreter::memories(&response.body);
        let hits = interpreter::memories_mentioning(memories, self.config.token());

        Ok(StepReport {
            step: "list-memories".to_string(),
            method: "GET".to_string(),
            endpoint: "/api/student/memories".to_string(),
            status: response.status,
            success: interpreter::success_flag(&response.body),
            duration,
            checks: vec![Check::new("stored memory visible", hits > 0)],
            details: vec![format!("memories listed: {}", memories.len())],
        })
    }
}

#[async_trait::async_trait]
impl<C: ConfigProvider> Scenario for MemoryRecallScenario<C> {
    fn name(&self) -> &str {
        "memory-recall"
    }

    async fn execute(&self) -> Result<RunSummary> {
        let run = ProbeRun::generate(self.config.run_prefix());
        tracing::info!(
            "🚀 Probe run {} against {}",
            run.run_id,
            self.config.base_url()
        );

        let mut steps = Vec::new();

        // 每次執行恰好一個 store，之後的查詢都在它後面
        steps.push(self.store_step(&run).await?);

        let wait = self.config.wait_seconds();
        if wait > 0 {
            // 固定延遲只是給服務端寫入的猜測時間，不是同步屏障
            tracing::info!("⏳ Waiting {}s before recall (best-effort, not a real ack)", wait);
            tokio::time::sleep(Duration::from_secs(wait)).await;
        }

        steps.push(self.search_step(&run).await?);
        steps.push(self.chat_step(&run).await?);
        steps.push(self.list_step(&run).await?);

        Ok(RunSummary {
            run_id: run.run_id,
            steps,
        })
    }
}
