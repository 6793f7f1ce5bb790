use thiserror::Error;

/// Failures talking to the account API
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("multi-factor code required (pass --mfa-code)")]
    MfaRequired,

    #[error("not logged in")]
    NotLoggedIn,

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("api error: {status} {body}")]
    Status { status: u16, body: String },
}
