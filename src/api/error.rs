use reqwest::{Method, StatusCode, Url};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Api(#[from] ErrorResponse),
    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("failed to write response body: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// The structured error returned by the API, if this was a non-2xx response.
    pub fn response(&self) -> Option<&ErrorResponse> {
        match self {
            ApiError::Api(resp) => Some(resp),
            _ => None,
        }
    }
}

/// A non-2xx reply from the API: the request it answered, its status and
/// the messages listed under `"errors"` in the body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{method} {url}: ({}) {}", .status.as_u16(), .errors.join("; "))]
pub struct ErrorResponse {
    pub method: Method,
    pub url: Url,
    pub status: StatusCode,
    pub errors: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<String>,
}

impl ErrorResponse {
    /// Builds the error from a raw response body. Bodies that are empty or not
    /// of the `{"errors": [...]}` shape leave the message list empty.
    pub fn from_body(method: Method, url: Url, status: StatusCode, body: &[u8]) -> Self {
        let parsed: ErrorBody = serde_json::from_slice(body).unwrap_or_default();
        Self {
            method,
            url,
            status,
            errors: parsed.errors,
        }
    }
}
