use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "memory-probe")]
#[command(about = "Diagnostic probe for the chat assistant memory API")]
pub struct CliConfig {
    /// Base URL of the service under test
    #[arg(long, default_value = "http://localhost:3000")]
    pub base_url: String,

    /// Prefix for the generated per-run identifier
    #[arg(long, default_value = "probe-user")]
    pub run_prefix: String,

    /// Token stored in the memory and searched for in the replies
    #[arg(long, default_value = "Kunal")]
    pub token: String,

    /// Question sent to the chat endpoint
    #[arg(long, default_value = "What is my name?")]
    pub chat_message: String,

    /// Seconds to wait between the store and the recall steps
    #[arg(long, default_value = "2")]
    pub wait_seconds: u64,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout_seconds: u64,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn run_prefix(&self) -> &str {
        &self.run_prefix
    }

    fn token(&self) -> &str {
        &self.token
    }

    fn chat_message(&self) -> &str {
        &self.chat_message
    }

    fn wait_seconds(&self) -> u64 {
        self.wait_seconds
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("base_url", &self.base_url)?;
        validation::validate_non_empty_string("run_prefix", &self.run_prefix)?;
        validation::validate_non_empty_string("token", &self.token)?;
        validation::validate_non_empty_string("chat_message", &self.chat_message)?;
        validation::validate_range("wait_seconds", self.wait_seconds, 0, 60)?;
        validation::validate_positive_number("timeout_seconds", self.timeout_seconds as usize, 1)?;
        Ok(())
    }
}
