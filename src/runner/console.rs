use super::state::{RunSummary, TestResult};
use colored::Colorize;
use std::path::Path;

pub fn print_banner() {
    println!("\n{} Starting API tests...\n", "🚀".green().bold());
    println!("{}", "=".repeat(50));
}

pub fn print_result(result: &TestResult) {
    let status = if result.success {
        "✅".green()
    } else {
        "❌".red()
    };
    println!("\n{} {}: {}", status, result.test.bold(), result.message);

    if let Some(data) = result.response_data.as_ref().filter(|d| !is_blank(d)) {
        println!("\n{}", "Response Data:".dimmed());
        println!("{}", render_data(data));
    }
    println!("{}", "-".repeat(50));
}

pub fn print_summary(summary: &RunSummary) {
    println!("\n{} Test Summary:", "📊".to_string().blue());
    println!("{}", "=".repeat(50));
    println!("Total Tests: {}", summary.total);
    println!("Passed: {}", summary.passed.to_string().green());
    println!("Failed: {}", summary.failed.to_string().red());
}

pub fn print_report_saved(report_path: &Path) {
    println!(
        "\nDetailed test results saved to '{}'",
        report_path.display().to_string().cyan()
    );
}

/// Pretty JSON; strings holding JSON are expanded, other strings print raw.
pub fn render_data(data: &serde_json::Value) -> String {
    match data {
        serde_json::Value::String(s) => match serde_json::from_str::<serde_json::Value>(s) {
            Ok(parsed) => serde_json::to_string_pretty(&parsed).unwrap_or_else(|_| s.clone()),
            Err(_) => s.clone(),
        },
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

fn is_blank(data: &serde_json::Value) -> bool {
    match data {
        serde_json::Value::Null => true,
        serde_json::Value::Bool(b) => !b,
        serde_json::Value::String(s) => s.is_empty(),
        serde_json::Value::Array(a) => a.is_empty(),
        serde_json::Value::Object(o) => o.is_empty(),
        serde_json::Value::Number(n) => n.as_f64() == Some(0.0),
    }
}
