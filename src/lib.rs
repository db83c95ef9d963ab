pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::probe_config::ProbeConfig;
pub use crate::core::{
    client::ApiClient, engine::ProbeEngine, report::ConsoleReporter,
    scenario::MemoryRecallScenario,
};
pub use crate::utils::error::{ProbeError, Result};
