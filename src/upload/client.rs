use crate::config::Settings;
use crate::error::{ApiError, ConfigError};
use crate::upload::types::{AnalysisRequest, AnalysisResult, FileReference, SelectedFile};
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use tracing::{error, info};

const SAVE_IMAGE: &str = "save_image";
const QUESTION_WHETHER_DIRTY: &str = "question_whether_dirty";

/// Multipart field the storage endpoint reads the image from.
pub const UPLOAD_FIELD: &str = "file";

/// The only component that talks to the network.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    upload_path: String,
    analysis_path: String,
}

impl ApiClient {
    pub fn new(settings: &Settings) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            upload_path: settings.upload_path.clone(),
            analysis_path: settings.analysis_path.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Where the storage server exposes an uploaded image.
    pub fn image_url(&self, imglink: &str) -> String {
        self.url(&format!("outdata/{}", imglink.trim_start_matches('/')))
    }

    /// Uploads the image. The multipart body takes over the file's bytes.
    pub async fn save_image(&self, file: SelectedFile) -> Result<FileReference, ApiError> {
        let SelectedFile { name, mime, bytes } = file;
        info!(name = %name, len = bytes.len(), "uploading image");

        let len = bytes.len() as u64;
        let part = Part::stream_with_length(bytes, len)
            .file_name(name)
            .mime_str(&mime)
            .map_err(|source| ApiError::Transport {
                endpoint: SAVE_IMAGE,
                source,
            })?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let response = self
            .http
            .post(self.url(&self.upload_path))
            .multipart(form)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                endpoint: SAVE_IMAGE,
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            error!(status = %status, "upload rejected");
            return Err(ApiError::Status {
                endpoint: SAVE_IMAGE,
                status,
            });
        }

        let reference = response
            .json::<FileReference>()
            .await
            .map_err(|source| ApiError::Decode {
                endpoint: SAVE_IMAGE,
                source,
            })?;
        info!(reference = %reference, "upload stored");
        Ok(reference)
    }

    pub async fn question_whether_dirty(
        &self,
        reference: &FileReference,
    ) -> Result<AnalysisResult, ApiError> {
        info!(reference = %reference, "requesting analysis");

        let request: &AnalysisRequest = reference;
        let response = self
            .http
            .post(self.url(&self.analysis_path))
            .json(request)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                endpoint: QUESTION_WHETHER_DIRTY,
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            error!(status = %status, reference = %reference, "analysis rejected");
            return Err(ApiError::Status {
                endpoint: QUESTION_WHETHER_DIRTY,
                status,
            });
        }

        let result = response
            .json::<AnalysisResult>()
            .await
            .map_err(|source| ApiError::Decode {
                endpoint: QUESTION_WHETHER_DIRTY,
                source,
            })?;
        info!(is_dirty = result.is_dirty, "analysis received");
        Ok(result)
    }
}

#[cfg(test)]
#[path = "tests/client_tests.rs"]
mod tests;
