//! API Client
//!
//! Handles communication with the folder structure visualizer service.
//! Each operation is a single request: failures are logged and handed back
//! to the caller unchanged, with no retry or backoff.

use thiserror::Error;
use tracing::error;

use super::messages::{ErrorBody, GenerateData, GenerateRequest, GenerateResponse};

/// Where the visualizer service lives
#[derive(Clone, Debug)]
pub struct ServiceOrigin {
    pub host: String,
    pub port: u16,
}

impl Default for ServiceOrigin {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 8000,
        }
    }
}

impl ServiceOrigin {
    /// Read the origin from TREESCOPE_HOST / TREESCOPE_PORT, falling back
    /// to the default of localhost:8000
    pub fn from_env() -> Self {
        let default = Self::default();
        let host = std::env::var("TREESCOPE_HOST").unwrap_or(default.host);
        let port = std::env::var("TREESCOPE_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(default.port);
        Self { host, port }
    }

    /// The origin as a URL prefix, without a trailing slash
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

/// Errors surfaced by the API client
#[derive(Debug, Error)]
pub enum ApiError {
    /// The service answered with a non-success status
    #[error("service returned {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Service {
        status: reqwest::StatusCode,
        detail: Option<String>,
    },
    /// The request never completed
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Client for the visualizer service
#[derive(Clone)]
pub struct ApiClient {
    origin: ServiceOrigin,
    http_client: reqwest::Client,
}

impl ApiClient {
    /// Create a new client against the given origin
    pub fn new(origin: ServiceOrigin) -> Self {
        Self {
            origin,
            http_client: reqwest::Client::new(),
        }
    }

    pub fn origin(&self) -> &ServiceOrigin {
        &self.origin
    }

    /// Join a service-relative path onto the origin
    pub fn absolute_url(&self, path: &str) -> String {
        format!("{}{}", self.origin.base_url(), path)
    }

    /// Ask the service to generate the graph image and tree text for a folder
    pub async fn generate(
        &self,
        folder_path: &str,
        output_filename: &str,
    ) -> Result<GenerateData, ApiError> {
        match self.request_generate(folder_path, output_filename).await {
            Ok(data) => Ok(data),
            Err(err) => {
                error!("error generating folder structure: {err}");
                Err(err)
            }
        }
    }

    /// Fetch a generated image by filename (extension included)
    pub async fn fetch_image(&self, filename: &str) -> Result<Vec<u8>, ApiError> {
        match self.request_image(filename).await {
            Ok(bytes) => Ok(bytes),
            Err(err) => {
                error!("error fetching image {filename}: {err}");
                Err(err)
            }
        }
    }

    /// Fetch a generated text file by stem (the service appends .txt)
    pub async fn fetch_text(&self, stem: &str) -> Result<String, ApiError> {
        match self.request_text(stem).await {
            Ok(text) => Ok(text),
            Err(err) => {
                error!("error fetching text file {stem}: {err}");
                Err(err)
            }
        }
    }

    /// Check if the service is reachable
    pub async fn health_check(&self) -> bool {
        let url = self.origin.base_url();
        self.http_client.get(&url).send().await.is_ok()
    }

    async fn request_generate(
        &self,
        folder_path: &str,
        output_filename: &str,
    ) -> Result<GenerateData, ApiError> {
        let url = format!("{}/generate-folder-structure", self.origin.base_url());
        let request = GenerateRequest {
            folder_path: folder_path.to_string(),
            output_filename: output_filename.to_string(),
        };

        let response = self.http_client.post(&url).json(&request).send().await?;
        let response = Self::check_status(response).await?;
        let body: GenerateResponse = response.json().await?;
        Ok(body.data)
    }

    async fn request_image(&self, filename: &str) -> Result<Vec<u8>, ApiError> {
        let url = format!("{}/get-image/{}", self.origin.base_url(), filename);
        let response = Self::check_status(self.http_client.get(&url).send().await?).await?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn request_text(&self, stem: &str) -> Result<String, ApiError> {
        let url = format!("{}/get-text/{}", self.origin.base_url(), stem);
        let response = Self::check_status(self.http_client.get(&url).send().await?).await?;
        Ok(response.text().await?)
    }

    /// Turn a non-success response into a Service error carrying the
    /// detail string the service attaches to failures
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let detail = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.detail);
        Err(ApiError::Service { status, detail })
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(ServiceOrigin::default())
    }
}
