use thiserror::Error;

/// Failures surfaced by the notes client.
///
/// Server-side messages are kept as sent (`None` when the response had no
/// `message` field) so the caller can decide on a fallback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Rejected input, either before sending or by the store (HTTP 400)
    #[error("validation failed: {}", .0.as_deref().unwrap_or("no message"))]
    Validation(Option<String>),

    /// The targeted note does not exist (HTTP 404)
    #[error("not found: {}", .0.as_deref().unwrap_or("no message"))]
    NotFound(Option<String>),

    /// Any other non-2xx response
    #[error("server error ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Server { status: u16, message: Option<String> },

    /// The request never produced a response (connect, timeout, IO)
    #[error("transport error: {0}")]
    Transport(String),

    /// A 2xx response whose body did not match the contract
    #[error("invalid response: {0}")]
    Decode(String),

    /// The same form already has a request in flight
    #[error("a request from this form is already in progress")]
    Busy,
}

pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// Map a non-2xx status and optional body message to an error
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        let message = message.filter(|m| !m.trim().is_empty());
        match status {
            400 | 422 => ClientError::Validation(message),
            404 => ClientError::NotFound(message),
            status => ClientError::Server { status, message },
        }
    }

    /// Text to show the user: the server's own message when it sent one,
    /// `fallback` otherwise.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Validation(Some(message))
            | ClientError::NotFound(Some(message))
            | ClientError::Server {
                message: Some(message),
                ..
            } => message.clone(),
            ClientError::Busy => "Please wait for the current request to finish".to_string(),
            _ => fallback.to_string(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else {
            ClientError::Transport(e.to_string())
        }
    }
}
