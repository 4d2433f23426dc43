use super::console;
use super::fixtures::{self, UploadFields};
use super::state::{RunSummary, TestResult, TestSession, TestStep};
use crate::api::{ModApiClient, ResponseBody};
use crate::error::{StepError, StepResult};
use crate::report;
use crate::utils::config::Config;
use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

/// Drives one pass over the mod API and collects its results.
///
/// Every step handles its own failures: a transport error, an unexpected
/// status or a local I/O error becomes a failed [`TestResult`], and the next
/// step runs regardless.
pub struct ModApiTester {
    client: ModApiClient,
    config: Config,
    session: TestSession,
}

impl ModApiTester {
    pub fn new(base_url: &str) -> Self {
        Self::with_config(Config::with_base_url(base_url))
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            client: ModApiClient::new(&config.base_url),
            config,
            session: TestSession::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    pub fn results(&self) -> &[TestResult] {
        self.session.results()
    }

    pub fn summary(&self) -> RunSummary {
        self.session.summary()
    }

    fn log_result(
        &mut self,
        step: TestStep,
        success: bool,
        message: impl Into<String>,
        response_data: Option<serde_json::Value>,
    ) -> bool {
        let result = self
            .session
            .record(TestResult::new(step, success, message, response_data));
        if !result.success {
            log::warn!("{} failed: {}", result.test, result.message);
        }
        console::print_result(result);
        success
    }

    fn log_error(&mut self, step: TestStep, error: &StepError) -> bool {
        self.log_result(step, false, format!("Error: {}", error), None)
    }

    /// GET /setup, passes on 200
    pub async fn setup_database(&mut self) -> bool {
        match self.fetch(self.client.setup().await).await {
            Ok((status, body)) => self.log_result(
                TestStep::DatabaseSetup,
                status == StatusCode::OK,
                format!("Status code: {}", status.as_u16()),
                Some(body.to_value()),
            ),
            Err(e) => self.log_error(TestStep::DatabaseSetup, &e),
        }
    }

    /// Write the mod and thumbnail fixtures into the working directory
    pub fn create_test_mod_file(&mut self) -> bool {
        match fixtures::create_fixtures(&self.config.work_dir) {
            Ok(created) => {
                let data: serde_json::Map<_, _> = created
                    .into_iter()
                    .map(|name| (name.to_string(), json!("Created")))
                    .collect();
                self.log_result(
                    TestStep::TestFileCreation,
                    true,
                    "Test files created successfully",
                    Some(serde_json::Value::Object(data)),
                )
            }
            Err(e) => self.log_error(TestStep::TestFileCreation, &e),
        }
    }

    /// Multipart POST /upload of both fixtures under `mod_id`, passes on 200
    pub async fn upload_mod(&mut self, mod_id: &str) -> bool {
        let fields = UploadFields {
            id: mod_id.to_string(),
            title: self.config.mod_title.clone(),
            version: self.config.mod_version.clone(),
        };

        match self.send_upload(&fields).await {
            Ok((status, body)) => self.log_result(
                TestStep::ModUpload,
                status == StatusCode::OK,
                format!("Status code: {}", status.as_u16()),
                Some(json!({
                    "request": fields.describe(),
                    "response": body,
                })),
            ),
            Err(e) => self.log_error(TestStep::ModUpload, &e),
        }
    }

    async fn send_upload(&self, fields: &UploadFields) -> StepResult<(StatusCode, ResponseBody)> {
        let form = fixtures::build_upload_form(&self.config.work_dir, fields)?;
        self.fetch(self.client.upload(form).await).await
    }

    /// GET /metadata; the body on 200, `None` otherwise
    pub async fn get_metadata(&mut self) -> Option<ResponseBody> {
        match self.fetch(self.client.metadata().await).await {
            Ok((status, body)) if status == StatusCode::OK => {
                self.log_result(
                    TestStep::GetMetadata,
                    true,
                    format!("Retrieved metadata. Status code: {}", status.as_u16()),
                    Some(body.to_value()),
                );
                Some(body)
            }
            Ok((status, body)) => {
                self.log_result(
                    TestStep::GetMetadata,
                    false,
                    format!("Status code: {}", status.as_u16()),
                    Some(body.to_value()),
                );
                None
            }
            Err(e) => {
                self.log_error(TestStep::GetMetadata, &e);
                None
            }
        }
    }

    /// GET /download/{mod_id}, saving the body on 200
    pub async fn download_mod(&mut self, mod_id: &str) -> bool {
        match self.fetch_download(mod_id).await {
            Ok(Ok(size)) => self.log_result(
                TestStep::ModDownload,
                true,
                "Mod downloaded successfully",
                Some(json!({ "size": size, "mod_id": mod_id })),
            ),
            Ok(Err((status, body))) => self.log_result(
                TestStep::ModDownload,
                false,
                format!("Status code: {}", status.as_u16()),
                Some(body.to_value()),
            ),
            Err(e) => self.log_error(TestStep::ModDownload, &e),
        }
    }

    /// Inner `Ok` carries the saved byte count, inner `Err` the rejected response.
    async fn fetch_download(
        &self,
        mod_id: &str,
    ) -> StepResult<std::result::Result<usize, (StatusCode, ResponseBody)>> {
        let response = self.client.download(mod_id).await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Ok(Err((status, ResponseBody::from_response(response).await)));
        }

        let bytes = response.bytes().await?;
        fixtures::write_download(&self.config.work_dir, &bytes)?;
        Ok(Ok(bytes.len()))
    }

    /// Byte-for-byte comparison of the mod fixture and the downloaded copy
    pub fn compare_files(&mut self) -> bool {
        match fixtures::compare_download(&self.config.work_dir) {
            Ok(comparison) => {
                if !comparison.matches {
                    log::debug!(
                        "download differs: original {} bytes, downloaded {} bytes",
                        comparison.original_size,
                        comparison.downloaded_size
                    );
                }
                self.log_result(
                    TestStep::FileComparison,
                    comparison.matches,
                    if comparison.matches {
                        "Files match"
                    } else {
                        "Files differ"
                    },
                    Some(comparison.to_value()),
                )
            }
            Err(e) => self.log_error(TestStep::FileComparison, &e),
        }
    }

    /// Remove fixtures and the downloaded copy, skipping absent files
    pub fn cleanup(&mut self) -> bool {
        match fixtures::remove_artifacts(&self.config.work_dir) {
            Ok(removed) => self.log_result(
                TestStep::Cleanup,
                true,
                "Test files removed successfully",
                Some(json!({ "removed_files": removed })),
            ),
            Err(e) => self.log_error(TestStep::Cleanup, &e),
        }
    }

    /// Run every step in order, then write the reports.
    ///
    /// Steps never short-circuit; the only error returned is a failure to
    /// write a report file.
    pub async fn run_all_tests(&mut self) -> Result<RunSummary> {
        console::print_banner();
        log::info!("testing mod API at {}", self.base_url());

        let mod_id = self.config.mod_id.clone();
        self.setup_database().await;
        self.create_test_mod_file();
        self.upload_mod(&mod_id).await;
        if let Some(metadata) = self.get_metadata().await {
            if !metadata.contains(&mod_id) {
                log::warn!("metadata does not list {}", mod_id);
            }
        }
        self.download_mod(&mod_id).await;
        self.compare_files();

        self.cleanup();

        let summary = self.summary();
        console::print_summary(&summary);

        let results_path = self.config.resolve(&self.config.results_path);
        report::json::write_results(self.results(), &results_path)?;
        console::print_report_saved(&results_path);

        if let Some(junit_path) = &self.config.junit_path {
            let junit_path = self.config.resolve(junit_path);
            report::junit::write_report(self.results(), &junit_path)?;
        }

        Ok(summary)
    }

    async fn fetch(
        &self,
        response: Result<reqwest::Response, reqwest::Error>,
    ) -> StepResult<(StatusCode, ResponseBody)> {
        let response = response?;
        let status = response.status();
        log::debug!("{} -> {}", response.url(), status);
        Ok((status, ResponseBody::from_response(response).await))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn offline_tester(dir: &std::path::Path) -> ModApiTester {
        ModApiTester::with_config(Config {
            // nothing listens on port 9 (discard) in the test environment
            base_url: "http://127.0.0.1:9".to_string(),
            work_dir: dir.to_path_buf(),
            ..Config::default()
        })
    }

    #[test]
    fn test_new_keeps_base_url() {
        let tester = ModApiTester::new("http://example.test:8080/");
        assert_eq!(tester.base_url(), "http://example.test:8080");
        assert!(tester.results().is_empty());
    }

    #[test]
    fn test_local_steps_record_results() {
        let temp = tempdir().unwrap();
        let mut tester = offline_tester(temp.path());

        assert!(tester.create_test_mod_file());
        // no download happened yet
        assert!(!tester.compare_files());
        assert!(tester.cleanup());

        let results = tester.results();
        assert_eq!(results.len(), 3);
        assert_eq!(
            results[0].response_data,
            Some(json!({"test_mod.gz": "Created", "test_thumbnail.png": "Created"}))
        );
        assert!(results[1].message.starts_with("Error: "));
        assert_eq!(
            results[2].response_data,
            Some(json!({"removed_files": ["test_mod.gz", "test_thumbnail.png"]}))
        );
    }

    #[tokio::test]
    async fn test_unreachable_server_is_recorded_not_raised() {
        let temp = tempdir().unwrap();
        let mut tester = offline_tester(temp.path());

        assert!(!tester.setup_database().await);
        assert!(tester.get_metadata().await.is_none());

        let results = tester.results();
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| !r.success));
        assert!(results.iter().all(|r| r.message.starts_with("Error: ")));
    }

    #[tokio::test]
    async fn test_upload_without_fixtures_fails_locally() {
        let temp = tempdir().unwrap();
        let mut tester = offline_tester(temp.path());

        assert!(!tester.upload_mod("test-mod-1").await);
        let result = &tester.results()[0];
        assert_eq!(result.test, "Mod Upload");
        assert!(result.message.contains("test_thumbnail.png"));
    }
}
