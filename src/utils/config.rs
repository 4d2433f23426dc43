use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_MOD_ID: &str = "test-mod-1";
pub const DEFAULT_MOD_TITLE: &str = "Test Mod Title";
pub const DEFAULT_MOD_VERSION: &str = "1.0.0";
pub const DEFAULT_RESULTS_FILE: &str = "test_results.json";

/// Runner configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server under test (e.g. "http://localhost:8080")
    pub base_url: String,

    /// Identifier used for upload and download
    pub mod_id: String,

    pub mod_title: String,
    pub mod_version: String,

    /// Directory holding fixtures and the downloaded file
    pub work_dir: PathBuf,

    /// JSON report path, relative paths resolve against `work_dir`
    pub results_path: PathBuf,

    /// Optional JUnit XML report path, resolved like `results_path`
    pub junit_path: Option<PathBuf>,
}

impl Config {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn resolve(&self, path: impl AsRef<std::path::Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.work_dir.join(path)
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            mod_id: DEFAULT_MOD_ID.to_string(),
            mod_title: DEFAULT_MOD_TITLE.to_string(),
            mod_version: DEFAULT_MOD_VERSION.to_string(),
            work_dir: PathBuf::from("."),
            results_path: PathBuf::from(DEFAULT_RESULTS_FILE),
            junit_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_local_server() {
        let config = Config::default();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.mod_id, "test-mod-1");
        assert_eq!(config.resolve(&config.results_path), PathBuf::from("./test_results.json"));
    }

    #[test]
    fn test_resolve_keeps_absolute_paths() {
        let config = Config {
            work_dir: PathBuf::from("/tmp/work"),
            ..Config::default()
        };
        assert_eq!(config.resolve("/var/out.json"), PathBuf::from("/var/out.json"));
        assert_eq!(config.resolve("out.json"), PathBuf::from("/tmp/work/out.json"));
    }
}
