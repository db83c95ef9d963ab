use httpmock::prelude::*;
use memory_probe::{CliConfig, ConsoleReporter, MemoryRecallScenario, ProbeEngine, ProbeError};

fn probe_config(base_url: String) -> CliConfig {
    CliConfig {
        base_url,
        run_prefix: "probe-user".to_string(),
        token: "Kunal".to_string(),
        chat_message: "What is my name?".to_string(),
        // 測試裡不等待，固定延遲只對真實服務有意義
        wait_seconds: 0,
        timeout_seconds: 5,
        verbose: false,
    }
}

fn mock_store(server: &MockServer, success: bool) -> httpmock::Mock<'_> {
    server.mock(|when, then| {
        when.method(POST).path("/api/memory/store");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "success": success,
                "message": "Memory stored successfully",
                "data": { "id": "mem-123" }
            }));
    })
}

fn mock_search(server: &MockServer) -> httpmock::Mock<'_> {
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/memory/search")
            .query_param_exists("userId")
            .query_param("query", "name");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "success": true,
                "data": { "memories": [ { "content": "My name is Kunal" } ] }
            }));
    })
}

fn mock_chat<'a>(server: &'a MockServer, content: &str) -> httpmock::Mock<'a> {
    let body = serde_json::json!({
        "success": true,
        "data": { "response": { "content": content, "memory_references": ["mem-123"] } },
        "metadata": { "layersUsed": ["memory"], "optimizationsApplied": [] }
    });
    server.mock(move |when, then| {
        when.method(POST).path("/api/study-buddy");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(body);
    })
}

fn mock_list(server: &MockServer) -> httpmock::Mock<'_> {
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/student/memories")
            .query_param_exists("userId");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "success": true,
                "data": { "memories": [ { "content": "My name is Kunal" } ] }
            }));
    })
}

#[tokio::test]
async fn test_end_to_end_probe_run_passes() {
    let server = MockServer::start();
    let store = mock_store(&server, true);
    let search = mock_search(&server);
    let chat = mock_chat(&server, "Your name is Kunal!");
    let list = mock_list(&server);

    let scenario = MemoryRecallScenario::new(probe_config(server.base_url())).unwrap();
    let engine = ProbeEngine::new(scenario, ConsoleReporter::new());

    let summary = engine.run().await.unwrap();

    // 每個端點恰好打一次，store 只有一個
    store.assert();
    search.assert();
    chat.assert();
    list.assert();

    assert!(summary.passed());
    assert_eq!(summary.steps.len(), 4);
    assert!(summary.run_id.starts_with("probe-user-"));
    assert_eq!(summary.steps[0].step, "store");
    assert_eq!(summary.steps[1].step, "search");
    assert_eq!(summary.steps[2].step, "chat-recall");
    assert_eq!(summary.steps[3].step, "list-memories");
}

#[tokio::test]
async fn test_recall_check_is_case_insensitive() {
    let server = MockServer::start();
    mock_store(&server, true);
    mock_search(&server);
    mock_chat(&server, "I believe your name is KUNAL.");
    mock_list(&server);

    let scenario = MemoryRecallScenario::new(probe_config(server.base_url())).unwrap();
    let engine = ProbeEngine::new(scenario, ConsoleReporter::new());

    let summary = engine.run().await.unwrap();

    assert!(summary.passed());
}

#[tokio::test]
async fn test_reply_without_token_fails_the_check() {
    let server = MockServer::start();
    mock_store(&server, true);
    mock_search(&server);
    mock_chat(&server, "I don't have that information about you.");
    mock_list(&server);

    let scenario = MemoryRecallScenario::new(probe_config(server.base_url())).unwrap();
    let engine = ProbeEngine::new(scenario, ConsoleReporter::new());

    let summary = engine.run().await.unwrap();

    assert!(!summary.passed());
    let chat_step = &summary.steps[2];
    assert!(chat_step.success);
    let failed: Vec<_> = chat_step.checks.iter().filter(|c| !c.passed).collect();
    assert_eq!(failed.len(), 1);
    assert!(failed[0].label.contains("mentions"));
}

#[tokio::test]
async fn test_success_false_still_produces_a_summary() {
    let server = MockServer::start();
    let store = mock_store(&server, false);
    let search = mock_search(&server);
    mock_chat(&server, "Your name is Kunal!");
    mock_list(&server);

    let scenario = MemoryRecallScenario::new(probe_config(server.base_url())).unwrap();
    let engine = ProbeEngine::new(scenario, ConsoleReporter::new());

    // success:false 不是錯誤，整個流程照常跑完
    let summary = engine.run().await.unwrap();

    store.assert();
    search.assert();
    assert_eq!(summary.steps.len(), 4);
    assert!(!summary.steps[0].success);
    assert!(!summary.passed());
}

#[tokio::test]
async fn test_transport_failure_aborts_the_run() {
    let server = MockServer::start();
    let store = mock_store(&server, true);
    let search = server.mock(|when, then| {
        when.method(GET).path("/api/memory/search");
        then.status(500);
    });
    let chat = mock_chat(&server, "Your name is Kunal!");

    let scenario = MemoryRecallScenario::new(probe_config(server.base_url())).unwrap();
    let engine = ProbeEngine::new(scenario, ConsoleReporter::new());

    let err = engine.run().await.unwrap_err();

    match err {
        ProbeError::HttpStatusError { endpoint, status } => {
            assert_eq!(endpoint, "/api/memory/search");
            assert_eq!(status, 500);
        }
        other => panic!("unexpected error: {:?}", other),
    }

    // store 已經打出去，後續的 chat 不會再發生
    store.assert();
    search.assert();
    chat.assert_hits(0);
}

#[tokio::test]
async fn test_sparse_response_bodies_are_tolerated() {
    let server = MockServer::start();
    // 所有端點都回空物件：判讀全部落到預設值，不會 panic 也不會回錯誤
    let sparse = server.mock(|_when, then| {
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({}));
    });

    let scenario = MemoryRecallScenario::new(probe_config(server.base_url())).unwrap();
    let engine = ProbeEngine::new(scenario, ConsoleReporter::new());

    let summary = engine.run().await.unwrap();

    assert_eq!(sparse.hits(), 4);
    assert_eq!(summary.steps.len(), 4);
    assert!(!summary.passed());
    for step in &summary.steps {
        assert!(!step.success);
    }
}
