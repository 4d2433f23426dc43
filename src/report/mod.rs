pub mod json;
pub mod junit;

use anyhow::Result;
use std::path::Path;

/// Render a saved results file in another format
pub fn generate_report(results_path: &Path, format: &str, output: Option<&Path>) -> Result<()> {
    let results = json::read_results(results_path)?;

    match format {
        "json" => json::generate(&results, output),
        "junit" => junit::generate(&results, output),
        _ => anyhow::bail!("Unknown format: {}", format),
    }
}
