//! OAuth2 error and redirect payloads.

use std::{fmt, str::FromStr};

use crate::error::ResponseError;

/// Base URL that `#fragment` shorthand error URIs expand against.
pub const RFC6749_URL: &str = "http://tools.ietf.org/html/rfc6749";

/// Error codes registered by RFC 6749 and RFC 6750.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidRequest,
    UnauthorizedClient,
    AccessDenied,
    UnsupportedResponseType,
    InvalidScope,
    ServerError,
    TemporarilyUnavailable,
    InvalidClient,
    InvalidGrant,
    UnsupportedGrantType,
    InvalidToken,
    InsufficientScope,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidRequest => "invalid_request",
            ErrorCode::UnauthorizedClient => "unauthorized_client",
            ErrorCode::AccessDenied => "access_denied",
            ErrorCode::UnsupportedResponseType => "unsupported_response_type",
            ErrorCode::InvalidScope => "invalid_scope",
            ErrorCode::ServerError => "server_error",
            ErrorCode::TemporarilyUnavailable => "temporarily_unavailable",
            ErrorCode::InvalidClient => "invalid_client",
            ErrorCode::InvalidGrant => "invalid_grant",
            ErrorCode::UnsupportedGrantType => "unsupported_grant_type",
            ErrorCode::InvalidToken => "invalid_token",
            ErrorCode::InsufficientScope => "insufficient_scope",
        }
    }

    /// Status code used when the error is returned directly rather than
    /// through a redirect.
    pub fn default_status(self) -> u16 {
        match self {
            ErrorCode::InvalidClient | ErrorCode::InvalidToken => 401,
            ErrorCode::AccessDenied | ErrorCode::InsufficientScope => 403,
            ErrorCode::ServerError => 500,
            ErrorCode::TemporarilyUnavailable => 503,
            _ => 400,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown OAuth2 error code: {0}")]
pub struct ErrorCodeParseError(String);

impl FromStr for ErrorCode {
    type Err = ErrorCodeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = match s {
            "invalid_request" => ErrorCode::InvalidRequest,
            "unauthorized_client" => ErrorCode::UnauthorizedClient,
            "access_denied" => ErrorCode::AccessDenied,
            "unsupported_response_type" => ErrorCode::UnsupportedResponseType,
            "invalid_scope" => ErrorCode::InvalidScope,
            "server_error" => ErrorCode::ServerError,
            "temporarily_unavailable" => ErrorCode::TemporarilyUnavailable,
            "invalid_client" => ErrorCode::InvalidClient,
            "invalid_grant" => ErrorCode::InvalidGrant,
            "unsupported_grant_type" => ErrorCode::UnsupportedGrantType,
            "invalid_token" => ErrorCode::InvalidToken,
            "insufficient_scope" => ErrorCode::InsufficientScope,
            _ => return Err(ErrorCodeParseError(s.to_string())),
        };
        Ok(code)
    }
}

/// An `error` / `error_description` / `error_uri` triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorPayload {
    pub error: String,
    pub error_description: Option<String>,
    pub error_uri: Option<String>,
}

impl ErrorPayload {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            error_description: None,
            error_uri: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.error_description = Some(description.into());
        self
    }

    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.error_uri = Some(uri.into());
        self
    }
}

impl From<ErrorCode> for ErrorPayload {
    fn from(code: ErrorCode) -> Self {
        ErrorPayload::new(code.as_str())
    }
}

/// Expand a `#fragment` error URI against `base`. Other URIs pass through.
pub fn expand_error_uri(uri: &str, base: &str) -> String {
    if uri.starts_with('#') {
        format!("{base}{uri}")
    } else {
        uri.to_string()
    }
}

/// Where to send the user agent, and what to tell the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectPayload {
    url: String,
    pub state: Option<String>,
    pub error: Option<ErrorPayload>,
}

impl RedirectPayload {
    /// Fails with [`ResponseError::InvalidArgument`] for an empty URL.
    pub fn new(url: impl Into<String>) -> Result<Self, ResponseError> {
        let url = url.into();
        if url.is_empty() {
            return Err(ResponseError::invalid_argument(
                "Cannot redirect to an empty URL",
            ));
        }

        Ok(Self {
            url,
            state: None,
            error: None,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn with_error(mut self, error: impl Into<ErrorPayload>) -> Self {
        self.error = Some(error.into());
        self
    }
}
