/// Errors raised while shaping an OAuth2 response.
///
/// `InvalidArgument` and `InvalidResponseState` indicate a programming error in
/// the caller (wrong status code, missing redirect target) rather than
/// something an end user can trigger, so hosts usually surface them as a 500.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResponseError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Response status {status} is not a valid {expected} status code")]
    InvalidResponseState { expected: &'static str, status: u16 },

    #[error("Failed to encode redirect parameters: {0}")]
    QueryEncoding(String),
}

impl ResponseError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        ResponseError::InvalidArgument(message.into())
    }
}
