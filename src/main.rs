use clap::Parser;
use memory_probe::utils::{logger, validation::Validate};
use memory_probe::{CliConfig, ConsoleReporter, MemoryRecallScenario, ProbeEngine};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting memory-probe CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(3);
    }

    // 建立情境與引擎
    let scenario = match MemoryRecallScenario::new(config) {
        Ok(scenario) => scenario,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(3);
        }
    };
    let engine = ProbeEngine::new(scenario, ConsoleReporter::new());

    match engine.run().await {
        Ok(summary) if summary.passed() => {
            tracing::info!("✅ Probe run {} passed", summary.run_id);
        }
        Ok(summary) => {
            tracing::warn!(
                "❌ Probe run {} failed: {}/{} steps passed",
                summary.run_id,
                summary.passed_steps(),
                summary.steps.len()
            );
            // 判讀未通過也要以退出碼回報，而不是只靠主控台文字
            std::process::exit(1);
        }
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ Probe run aborted: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            // 輸出用戶友好的錯誤信息
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                memory_probe::utils::error::ErrorSeverity::Low => 0,
                memory_probe::utils::error::ErrorSeverity::Medium => 2, // 網路錯誤
                memory_probe::utils::error::ErrorSeverity::High => 1,   // 協定錯誤
                memory_probe::utils::error::ErrorSeverity::Critical => 3, // 配置錯誤
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
