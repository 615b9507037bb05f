/// Client error types
///
/// The board never shows these to the user; they are returned so the caller
/// can decide whether to reload.

/// Errors raised while talking to the task API
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request could not be sent or the response could not be read
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with an error status
    #[error("Server returned {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,

        /// Message from the error body, or the status reason
        message: String,
    },

    /// The draft cannot be submitted without a title
    #[error("Task title is required")]
    EmptyTitle,
}

impl ClientError {
    /// Whether the server reported that the task does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Api { status: 404, .. })
    }
}

/// Client result type alias
pub type ClientResult<T> = Result<T, ClientError>;
