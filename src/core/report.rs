use crate::core::{Reporter, RunSummary, StepReport};

/// 結果輸出：每一步一段帶標籤的判讀，最後一行 PASS / FAIL
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Reporter for ConsoleReporter {
    fn step(&self, report: &StepReport) {
        println!(
            "📋 {}: {} {} → {} in {:?}",
            report.step, report.method, report.endpoint, report.status, report.duration
        );
        println!("   success: {}", report.success);

        for detail in &report.details {
            println!("   {}", detail);
        }

        for check in &report.checks {
            let mark = if check.passed { "✅" } else { "❌" };
            println!("   {} {}", mark, check.label);
        }
    }

    fn summary(&self, summary: &RunSummary) {
        println!();
        println!("📊 Probe summary (run {})", summary.run_id);
        println!(
            "   steps passed: {}/{}",
            summary.passed_steps(),
            summary.steps.len()
        );

        for check in summary.failed_checks() {
            println!("   ❌ {}", check.label);
        }

        if summary.passed() {
            println!("🎉 PASS");
        } else {
            println!("❌ FAIL");
        }
    }
}
