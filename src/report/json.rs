use crate::runner::state::TestResult;
use anyhow::{Context, Result};
use std::path::Path;

/// Write results as a pretty-printed JSON array
pub fn write_results(results: &[TestResult], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(results)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write results to {}", path.display()))?;
    log::debug!("wrote {} results to {}", results.len(), path.display());
    Ok(())
}

pub fn read_results(path: &Path) -> Result<Vec<TestResult>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read results from {}", path.display()))?;
    let results = serde_json::from_str(&content)
        .with_context(|| format!("Invalid results file: {}", path.display()))?;
    Ok(results)
}

/// Generate JSON report
pub fn generate(results: &[TestResult], output: Option<&Path>) -> Result<()> {
    if let Some(path) = output {
        write_results(results, path)?;
        println!("JSON report saved to: {}", path.display());
    } else {
        println!("{}", serde_json::to_string_pretty(results)?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::state::TestStep;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_written_report_reads_back() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("test_results.json");
        let results = vec![
            TestResult::new(TestStep::DatabaseSetup, true, "Status code: 200", Some(json!("ok"))),
            TestResult::new(TestStep::Cleanup, true, "Test files removed successfully", None),
        ];

        write_results(&results, &path).unwrap();
        assert_eq!(read_results(&path).unwrap(), results);

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.starts_with("[\n  {"));
        assert!(raw.contains("\"response_data\": null"));
    }

    #[test]
    fn test_read_rejects_non_array() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("bad.json");
        std::fs::write(&path, r#"{"test": "x"}"#).unwrap();
        assert!(read_results(&path).is_err());
    }
}
