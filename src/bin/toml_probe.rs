use clap::Parser;
use memory_probe::config::probe_config::ProbeConfig;
use memory_probe::core::ConfigProvider;
use memory_probe::utils::{logger, validation::Validate};
use memory_probe::{ConsoleReporter, MemoryRecallScenario, ProbeEngine};

#[derive(Parser)]
#[command(name = "toml-probe")]
#[command(about = "Memory probe driven by a TOML scenario file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "probe-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Dry run - show the planned calls without issuing them
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting TOML-based memory probe");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    // 載入 TOML 配置
    let config = match ProbeConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(3);
        }
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(3);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");

    // 顯示配置摘要
    display_config_summary(&config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No requests will be issued");
        perform_dry_run(&config);
        return Ok(());
    }

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
            std::process::exit(1);
        }
        Err(e) => {
            tracing::error!(
                "❌ Probe run aborted: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                memory_probe::utils::error::ErrorSeverity::Low => 0,
                memory_probe::utils::error::ErrorSeverity::Medium => 2,
                memory_probe::utils::error::ErrorSeverity::High => 1,
                memory_probe::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &ProbeConfig) {
    println!("📋 Configuration Summary:");
    println!("  Probe: {} v{}", config.probe.name, config.probe.version);
    println!("  Target: {}", config.base_url());
    println!("  Run prefix: {}", config.run_prefix());
    println!("  Token: {}", config.token());
    println!("  Wait before recall: {}s", config.wait_seconds());
    println!("  Request timeout: {}s", config.timeout_seconds());
    println!();
}

fn perform_dry_run(config: &ProbeConfig) {
    println!("🔍 Dry Run Analysis:");
    println!();

    println!("📡 Planned calls (in order, one at a time):");
    println!(
        "  1. POST {}/api/memory/store  — store \"My name is {}\"",
        config.base_url(),
        config.token()
    );
    println!(
        "  2. wait {}s  — best-effort delay, not a persistence ack",
        config.wait_seconds()
    );
    println!(
        "  3. GET  {}/api/memory/search?userId=<run>&query=name",
        config.base_url()
    );
    println!(
        "  4. POST {}/api/study-buddy  — ask \"{}\"",
        config.base_url(),
        config.chat_message()
    );
    println!(
        "  5. GET  {}/api/student/memories?userId=<run>",
        config.base_url()
    );

    println!();
    println!("⚙️ Judgments that will be derived:");
    println!("  - store acknowledged and memory id returned");
    println!("  - search hits mention {}", config.token());
    println!("  - chat reply mentions {}", config.token());
    println!("  - chat reply cites stored memories");
    println!("  - stored memory visible in the student listing");

    println!();
    println!("✅ Dry run analysis complete. Run again without --dry-run to execute.");
}
