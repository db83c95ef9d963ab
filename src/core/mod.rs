pub mod client;
pub mod engine;
pub mod interpreter;
pub mod report;
pub mod scenario;

pub use crate::domain::model::{ApiResponse, Check, ProbeRun, RunSummary, StepReport};
pub use crate::domain::ports::{ConfigProvider, Reporter, Scenario};
pub use crate::utils::error::Result;

pub use client::ApiClient;
