//! HTTP client for the mod server
//!
//! One method per endpoint. Status codes are not interpreted here; the
//! runner decides what counts as success.

use reqwest::multipart::Form;
use reqwest::Response;

/// Client bound to a single server
pub struct ModApiClient {
    /// Base URL without trailing slash (e.g., "http://localhost:8080")
    base_url: String,
    client: reqwest::Client,
}

impl ModApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GET /setup
    pub async fn setup(&self) -> Result<Response, reqwest::Error> {
        self.get("setup").await
    }

    /// POST /upload with a multipart form
    pub async fn upload(&self, form: Form) -> Result<Response, reqwest::Error> {
        let url = self.url("upload");
        log::debug!("POST {}", url);
        self.client.post(&url).multipart(form).send().await
    }

    /// GET /metadata
    pub async fn metadata(&self) -> Result<Response, reqwest::Error> {
        self.get("metadata").await
    }

    /// GET /download/{mod_id}
    pub async fn download(&self, mod_id: &str) -> Result<Response, reqwest::Error> {
        self.get(&format!("download/{}", mod_id)).await
    }

    async fn get(&self, path: &str) -> Result<Response, reqwest::Error> {
        let url = self.url(path);
        log::debug!("GET {}", url);
        self.client.get(&url).send().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = ModApiClient::new("http://localhost:8080/");
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(client.url("setup"), "http://localhost:8080/setup");
        assert_eq!(
            client.url("/download/test-mod-1"),
            "http://localhost:8080/download/test-mod-1"
        );
    }
}
