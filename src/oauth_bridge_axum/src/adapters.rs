//! Axum framework adapters for OAuth2 response shaping.
//!
//! This module implements `RequestSource` and `ResponseSink` for Axum using
//! wrapper types, so the framework-agnostic builder in `oauth_bridge_core`
//! can drive Axum requests and responses without violating the orphan rule.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────┐
//! │  oauth_bridge_core::RequestSource (trait)  │
//! │  oauth_bridge_core::ResponseSink  (trait)  │
//! └────────────────┬───────────────────────────┘
//!                  │
//!                  ▼
//! ┌────────────────────────────────────────────┐
//! │  AxumRequest  (parts + decoded parameters) │
//! │  AxumResponse (HttpResponse + body format) │
//! └────────────────────────────────────────────┘
//! ```
//!
//! Unlike headers, query and form parameters have to be decoded up front, so
//! `AxumRequest` buffers the body once when it is built.

use axum::{
    body::Body,
    extract::{FromRef, FromRequest, Request},
    http::{StatusCode, header::CONTENT_TYPE, request::Parts},
    response::{IntoResponse, Response},
};
use oauth_bridge_core::{
    BodyFormat, HttpResponse, OAuth2ResponseBuilder, Parameters, RequestSource, ResponseSink,
    has_form_body,
};

use crate::{
    error::{BridgeError, RequestError},
    settings::BridgeSettings,
};

/// An Axum request with its query and form parameters decoded.
#[derive(Debug)]
pub struct AxumRequest {
    parts: Parts,
    query: Parameters,
    body: Parameters,
}

impl AxumRequest {
    /// Decode an Axum request.
    ///
    /// The body is only read for POST/PUT/PATCH/DELETE requests with a
    /// form-urlencoded content type, and at most `max_body_bytes` of it.
    #[tracing::instrument(name = "AxumRequest::from_http", skip(req))]
    pub async fn from_http(req: Request, max_body_bytes: usize) -> Result<Self, RequestError> {
        let (parts, body) = req.into_parts();

        let query = match parts.uri.query() {
            Some(raw) => parse_form(raw.as_bytes()).map_err(RequestError::MalformedQuery)?,
            None => Parameters::new(),
        };

        let content_type = parts
            .headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok());

        let body = if has_form_body(parts.method.as_str(), content_type) {
            let bytes = axum::body::to_bytes(body, max_body_bytes)
                .await
                .map_err(|e| RequestError::Body(e.to_string()))?;
            parse_form(&bytes).map_err(RequestError::MalformedForm)?
        } else {
            Parameters::new()
        };

        tracing::debug!(
            query = query.len(),
            body = body.len(),
            "Decoded OAuth2 request parameters"
        );

        Ok(Self { parts, query, body })
    }

    /// [`from_http`](Self::from_http) bounded by `settings.max_body_bytes`.
    pub async fn from_http_with(
        req: Request,
        settings: &BridgeSettings,
    ) -> Result<Self, RequestError> {
        Self::from_http(req, settings.max_body_bytes).await
    }

    pub fn parts(&self) -> &Parts {
        &self.parts
    }
}

fn parse_form(input: &[u8]) -> Result<Parameters, serde_urlencoded::de::Error> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(input)?;
    Ok(pairs.into_iter().collect())
}

/// Extracts with the body limit from the router's [`BridgeSettings`].
impl<S> FromRequest<S> for AxumRequest
where
    BridgeSettings: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = BridgeError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let settings = BridgeSettings::from_ref(state);
        Ok(AxumRequest::from_http_with(req, &settings).await?)
    }
}

impl RequestSource for AxumRequest {
    fn query(&self, name: &str) -> Option<&str> {
        self.query.get(name)
    }

    fn query_all(&self) -> &Parameters {
        &self.query
    }

    fn request(&self, name: &str) -> Option<&str> {
        self.body.get(name)
    }

    fn request_all(&self) -> &Parameters {
        &self.body
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.parts.headers.get(name)?.to_str().ok()
    }

    fn method(&self) -> &str {
        self.parts.method.as_str()
    }
}

/// An OAuth2 response that Axum can send.
///
/// Parameters are written as the body (in `format`) unless the response is a
/// redirect, where they already travel in the `Location` query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AxumResponse {
    inner: HttpResponse,
    format: BodyFormat,
}

impl AxumResponse {
    pub fn new(format: BodyFormat) -> Self {
        Self {
            inner: HttpResponse::new(),
            format,
        }
    }

    pub fn inner(&self) -> &HttpResponse {
        &self.inner
    }

    pub fn format(&self) -> BodyFormat {
        self.format
    }
}

impl ResponseSink for AxumResponse {
    fn status_code(&self) -> u16 {
        self.inner.status_code()
    }

    fn set_status_code(&mut self, code: u16) {
        self.inner.set_status_code(code);
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.inner.header(name)
    }

    fn set_header(&mut self, name: &str, value: &str) {
        self.inner.set_header(name, value);
    }

    fn set_parameter(&mut self, name: &str, value: &str) {
        self.inner.set_parameter(name, value);
    }

    fn parameters(&self) -> &Parameters {
        self.inner.parameters()
    }
}

impl IntoResponse for AxumResponse {
    fn into_response(self) -> Response {
        let Ok(status) = StatusCode::from_u16(self.inner.status_code()) else {
            tracing::error!(
                status = self.inner.status_code(),
                "Cannot send a response with an out-of-range status code"
            );
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        };

        let mut builder = Response::builder().status(status);
        for (name, value) in self.inner.headers().iter() {
            builder = builder.header(name, value);
        }

        let body = if self.inner.is_redirection() || self.inner.parameters().is_empty() {
            String::new()
        } else {
            match self.inner.body(self.format) {
                Ok(body) => {
                    builder = builder.header(CONTENT_TYPE, self.format.content_type());
                    body
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to serialize OAuth2 response body");
                    return StatusCode::INTERNAL_SERVER_ERROR.into_response();
                }
            }
        };

        builder.body(Body::from(body)).unwrap_or_else(|e| {
            tracing::error!(error = %e, "Failed to build OAuth2 response");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        })
    }
}

/// Helper function to create a builder over a fresh JSON [`AxumResponse`].
///
/// ```ignore
/// async fn authorize(req: AxumRequest) -> Result<AxumResponse, BridgeError> {
///     let mut builder = response_builder();
///     builder.set_redirect(302, redirect_uri, req.query("state"), Some("access_denied"), None, None)?;
///     Ok(builder.into_inner())
/// }
/// ```
pub fn response_builder() -> OAuth2ResponseBuilder<AxumResponse> {
    OAuth2ResponseBuilder::new(AxumResponse::default())
}

/// Like [`response_builder`], configured from settings.
pub fn response_builder_with(settings: &BridgeSettings) -> OAuth2ResponseBuilder<AxumResponse> {
    OAuth2ResponseBuilder::new(AxumResponse::new(settings.body_format))
        .with_error_uri_base(settings.error_uri_base.clone())
        .with_redirect_status(settings.redirect_status)
}
