//! 回應解讀：服務端的 JSON 形狀是非正式約定，任何欄位都可能缺席，
//! 缺席時一律以預設值代替，不拋錯。

use serde_json::Value;

const EMPTY: &[Value] = &[];

pub fn success_flag(body: &Value) -> bool {
    body.get("success").and_then(|v| v.as_bool()).unwrap_or(false)
}

pub fn message_text(body: &Value) -> &str {
    body.get("message").and_then(|v| v.as_str()).unwrap_or("")
}

pub fn stored_id(body: &Value) -> Option<&str> {
    body.get("data")
        .and_then(|d| d.get("id"))
        .and_then(|v| v.as_str())
}

pub fn reply_content(body: &Value) -> &str {
    body.get("data")
        .and_then(|d| d.get("response"))
        .and_then(|r| r.get("content"))
        .and_then(|v| v.as_str())
        .unwrap_or("")
}

pub fn memory_reference_count(body: &Value) -> usize {
    body.get("data")
        .and_then(|d| d.get("response"))
        .and_then(|r| r.get("memory_references"))
        .and_then(|v| v.as_array())
        .map(|refs| refs.len())
        .unwrap_or(0)
}

pub fn memories(body: &Value) -> &[Value] {
    body.get("data")
        .and_then(|d| d.get("memories"))
        .and_then(|v| v.as_array())
        .map(|v| v.as_slice())
        .unwrap_or(EMPTY)
}

pub fn layers_used(body: &Value) -> usize {
    metadata_list_len(body, "layersUsed")
}

pub fn optimizations_applied(body: &Value) -> usize {
    metadata_list_len(body, "optimizationsApplied")
}

fn metadata_list_len(body: &Value, key: &str) -> usize {
    body.get("metadata")
        .and_then(|m| m.get(key))
        .and_then(|v| v.as_array())
        .map(|list| list.len())
        .unwrap_or(0)
}

/// 不分大小寫的子字串比對，這就是全部的「協定解析」
pub fn mentions(content: &str, token: &str) -> bool {
    if token.is_empty() {
        return false;
    }
    content.to_lowercase().contains(&token.to_lowercase())
}

pub fn memories_mentioning(memories: &[Value], token: &str) -> usize {
    memories
        .iter()
        .filter(|m| {
            m.get("content")
                .and_then(|v| v.as_str())
                .map(|content| mentions(content, token))
                .unwrap_or(false)
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mentions_token_in_reply() {
        let body = json!({
            "success": true,
            "data": { "response": { "content": "Your name is kunal, as you told me.", "memory_references": [1] } }
        });

        assert!(success_flag(&body));
        assert!(mentions(reply_content(&body), "kunal"));
        assert_eq!(memory_reference_count(&body), 1);
    }

    #[test]
    fn test_does_not_mention_absent_token() {
        let body = json!({
            "success": true,
            "data": { "response": { "content": "I don't have that information." } }
        });

        assert!(!mentions(reply_content(&body), "kunal"));
        assert_eq!(memory_reference_count(&body), 0);
    }

    #[test]
    fn test_mentions_is_case_insensitive() {
        assert!(mentions("My name is KUNAL", "kunal"));
        assert!(mentions("my name is kunal", "Kunal"));
        assert!(!mentions("no name here", "kunal"));
    }

    #[test]
    fn test_empty_token_never_matches() {
        assert!(!mentions("anything at all", ""));
    }

    #[test]
    fn test_all_fields_default_on_empty_body() {
        let body = json!({});

        assert!(!success_flag(&body));
        assert_eq!(message_text(&body), "");
        assert_eq!(stored_id(&body), None);
        assert_eq!(reply_content(&body), "");
        assert_eq!(memory_reference_count(&body), 0);
        assert!(memories(&body).is_empty());
        assert_eq!(layers_used(&body), 0);
        assert_eq!(optimizations_applied(&body), 0);
    }

    #[test]
    fn test_mistyped_fields_default_instead_of_erroring() {
        // success 是字串、memories 是物件：照樣給預設值
        let body = json!({
            "success": "yes",
            "data": { "memories": { "oops": true }, "response": { "content": 42 } }
        });

        assert!(!success_flag(&body));
        assert!(memories(&body).is_empty());
        assert_eq!(reply_content(&body), "");
    }

    #[test]
    fn test_stored_id_extraction() {
        let body = json!({ "success": true, "message": "stored", "data": { "id": "mem-42" } });

        assert_eq!(stored_id(&body), Some("mem-42"));
        assert_eq!(message_text(&body), "stored");
    }

    #[test]
    fn test_memories_mentioning_counts_content_hits() {
        let body = json!({
            "success": true,
            "data": { "memories": [
                { "content": "The student's name is Kunal" },
                { "content": "Prefers evening study sessions" },
                { "id": "no-content-field" }
            ] }
        });

        let hits = memories_mentioning(memories(&body), "kunal");
        assert_eq!(hits, 1);
    }

    #[test]
    fn test_metadata_lists_counted() {
        let body = json!({
            "success": true,
            "metadata": { "layersUsed": ["memory", "context"], "optimizationsApplied": ["cache"] }
        });

        assert_eq!(layers_used(&body), 2);
        assert_eq!(optimizations_applied(&body), 1);
    }
}
