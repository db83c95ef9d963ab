use crate::core::ConfigProvider;
use crate::utils::error::{ProbeError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_CHAT_MESSAGE: &str = "What is my name?";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    pub probe: ProbeInfo,
    pub target: TargetConfig,
    pub run: RunConfig,
    pub chat: Option<ChatConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeInfo {
    pub name: String,
    pub description: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    pub base_url: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub prefix: String,
    pub token: String,
    pub wait_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    pub message: Option<String>,
}

impl ProbeConfig {
    /// 從 TOML 檔案載入探測配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ProbeError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ProbeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PROBE_BASE_URL})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("probe.name", &self.probe.name)?;
        validation::validate_url("target.base_url", &self.target.base_url)?;
        validation::validate_non_empty_string("run.prefix", &self.run.prefix)?;
        validation::validate_non_empty_string("run.token", &self.run.token)?;
        validation::validate_range("run.wait_seconds", self.wait_seconds(), 0, 60)?;
        validation::validate_positive_number(
            "target.timeout_seconds",
            self.timeout_seconds() as usize,
            1,
        )?;
        Ok(())
    }
}

impl ConfigProvider for ProbeConfig {
    fn base_url(&self) -> &str {
        &self.target.base_url
    }

    fn run_prefix(&self) -> &str {
        &self.run.prefix
    }

    fn token(&self) -> &str {
        &self.run.token
    }

    fn chat_message(&self) -> &str {
        self.chat
            .as_ref()
            .and_then(|c| c.message.as_deref())
            .unwrap_or(DEFAULT_CHAT_MESSAGE)
    }

    fn wait_seconds(&self) -> u64 {
        self.run.wait_seconds.unwrap_or(2)
    }

    fn timeout_seconds(&self) -> u64 {
        self.target.timeout_seconds.unwrap_or(30)
    }
}

impl Validate for ProbeConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
