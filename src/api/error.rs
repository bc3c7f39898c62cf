/// Errors that can occur while talking to the backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request could not be sent or the response could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not the JSON shape expected.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The server answered with something other than the agreed contract.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}
