use thiserror::Error;

/// Failures from the external data services. All variants render as plain
/// human-readable strings for the UI; no structured codes leak past here.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned {status}: {body}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("README payload is not valid base64: {0}")]
    ReadmePayload(#[from] base64::DecodeError),
}
