use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Rejections surfaced to the user as a notice. None of these change the
/// workflow state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select an image to upload.")]
    NoFileSelected,

    #[error("Please select a single image ({0} were selected).")]
    TooManyFiles(usize),

    #[error("Please upload an image before requesting an analysis.")]
    NoReference,

    #[error("Please wait for the current request to finish.")]
    OperationInFlight,

    #[error("{name} is not an image ({mime}).")]
    UnsupportedType { name: String, mime: String },

    #[error("Could not read {}: {reason}", .path.display())]
    Unreadable { path: PathBuf, reason: String },
}

/// Failures of the two remote calls. The detail is logged; the user only
/// ever sees a generic failure message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} responded with HTTP {status}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
    },

    #[error("{endpoint} returned an unreadable body: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
