use crate::core::ApiResponse;
use crate::utils::error::{ProbeError, Result};
use reqwest::Client;
use std::time::Duration;

/// 請求驅動器：對固定 base URL 發送 GET/POST，回傳狀態碼與 JSON body
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn post_json(&self, path: &str, body: &serde_json::Value) -> Result<ApiResponse> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("POST {} body={}", url, body);

        let response = self.client.post(&url).json(body).send().await?;
        self.into_api_response(path, response).await
    }

    pub async fn get_json(&self, path: &str, query: &[(&str, &str)]) -> Result<ApiResponse> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("GET {} query={:?}", url, query);

        let response = self.client.get(&url).query(query).send().await?;
        self.into_api_response(path, response).await
    }

    // 非 2xx 一律視為錯誤並中止本次執行，不重試
    async fn into_api_response(
        &self,
        path: &str,
        response: reqwest::Response,
    ) -> Result<ApiResponse> {
        let status = response.status();
        tracing::debug!("{} responded {}", path, status);

        if !status.is_success() {
            return Err(ProbeError::HttpStatusError {
                endpoint: path.to_string(),
                status: status.as_u16(),
            });
        }

        let body: serde_json::Value = response.json().await?;
        Ok(ApiResponse {
            status: status.as_u16(),
            body,
        })
    }
}
