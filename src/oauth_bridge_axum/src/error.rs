use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use oauth_bridge_core::{ErrorCode, ResponseError};
use thiserror::Error;

use crate::adapters::response_builder;

/// Errors that can occur while decoding an incoming request
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Failed to read request body: {0}")]
    Body(String),

    #[error("Malformed query string: {0}")]
    MalformedQuery(serde_urlencoded::de::Error),

    #[error("Malformed form body: {0}")]
    MalformedForm(serde_urlencoded::de::Error),
}

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Response(#[from] ResponseError),
}

impl IntoResponse for BridgeError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            BridgeError::Request(_) => (StatusCode::BAD_REQUEST, ErrorCode::InvalidRequest),
            BridgeError::Response(e) => {
                tracing::error!(error = %e, "OAuth2 response shaping failed");
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::ServerError)
            }
        };

        let mut builder = response_builder();
        let description = self.to_string();
        let shaped = builder.set_error(
            status.as_u16(),
            code.as_str(),
            Some(description.as_str()),
            None,
        );
        if let Err(e) = shaped {
            tracing::error!(error = %e, "Failed to build OAuth2 error response");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }

        builder.into_inner().into_response()
    }
}
