//! Stamps OAuth2 error and redirect semantics onto a [`ResponseSink`].
//!
//! Each operation mutates the sink step by step and only validates the final
//! status class afterwards. A failed call therefore still leaves its headers
//! and parameters applied.

use crate::{
    error::ResponseError,
    http_abstraction::ResponseSink,
    params::Parameters,
    payload::{ErrorPayload, RFC6749_URL, RedirectPayload, expand_error_uri},
    status::StatusClass,
};

pub const DEFAULT_REDIRECT_STATUS: u16 = 302;

/// Shapes one response for one request-handling cycle.
///
/// # Example
///
/// ```
/// use oauth_bridge_core::{HttpResponse, OAuth2ResponseBuilder, ResponseSink};
///
/// let mut builder = OAuth2ResponseBuilder::new(HttpResponse::new());
/// builder
///     .set_redirect(302, "http://example.com/cb", Some("xyz"), None, None, None)
///     .unwrap();
///
/// let response = builder.into_inner();
/// assert_eq!(response.header("Location"), Some("http://example.com/cb?state=xyz"));
/// ```
#[derive(Debug, Clone)]
pub struct OAuth2ResponseBuilder<S: ResponseSink> {
    sink: S,
    error_uri_base: String,
    redirect_status: u16,
}

impl<S: ResponseSink> OAuth2ResponseBuilder<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            error_uri_base: RFC6749_URL.to_string(),
            redirect_status: DEFAULT_REDIRECT_STATUS,
        }
    }

    /// Base URL that `#fragment` error URIs are expanded against.
    pub fn with_error_uri_base(mut self, base: impl Into<String>) -> Self {
        self.error_uri_base = base.into();
        self
    }

    /// Status used by [`redirect`](Self::redirect).
    pub fn with_redirect_status(mut self, status: u16) -> Self {
        self.redirect_status = status;
        self
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_inner(self) -> S {
        self.sink
    }

    pub fn set_status_code(&mut self, status_code: u16) {
        self.sink.set_status_code(status_code);
    }

    /// Turn the response into an OAuth2 error response.
    ///
    /// Fails with [`ResponseError::InvalidResponseState`] if `status_code` is
    /// not 4xx/5xx. The status, parameters and `Cache-Control` header are
    /// applied before that check.
    #[tracing::instrument(
        name = "OAuth2ResponseBuilder::set_error",
        skip(self, error_description, error_uri)
    )]
    pub fn set_error(
        &mut self,
        status_code: u16,
        error: &str,
        error_description: Option<&str>,
        error_uri: Option<&str>,
    ) -> Result<(), ResponseError> {
        let mut parameters = Parameters::new();
        parameters.insert("error", error);
        if let Some(description) = error_description {
            parameters.insert("error_description", description);
        }
        if let Some(uri) = error_uri {
            parameters.insert("error_uri", expand_error_uri(uri, &self.error_uri_base));
        }

        self.sink.set_status_code(status_code);
        self.sink.add_parameters(parameters.iter());
        self.sink.set_header("Cache-Control", "no-store");

        if !StatusClass::of(self.sink.status_code()).is_error() {
            return Err(self.invalid_state("client or server error"));
        }
        Ok(())
    }

    /// Turn the response into an OAuth2 redirect.
    ///
    /// When `error` is given the error parameters are stamped first with a
    /// fixed 400, then `status_code` overrides it. All parameters accumulated
    /// on the sink end up in the `Location` query.
    ///
    /// A URL that is empty or can't be sent as a `Location` header fails with
    /// [`ResponseError::InvalidArgument`] before anything is changed.
    #[tracing::instrument(
        name = "OAuth2ResponseBuilder::set_redirect",
        skip(self, state, error_description, error_uri)
    )]
    pub fn set_redirect(
        &mut self,
        status_code: u16,
        url: &str,
        state: Option<&str>,
        error: Option<&str>,
        error_description: Option<&str>,
        error_uri: Option<&str>,
    ) -> Result<(), ResponseError> {
        if url.is_empty() {
            return Err(ResponseError::invalid_argument(
                "Cannot redirect to an empty URL",
            ));
        }
        if http::HeaderValue::from_str(url).is_err() {
            return Err(ResponseError::invalid_argument(
                "Redirect URL is not a valid Location header value",
            ));
        }

        let mut parameters = Parameters::new();
        if let Some(state) = state {
            parameters.insert("state", state);
        }

        if let Some(error) = error {
            self.set_error(400, error, error_description, error_uri)?;
        }

        self.sink.set_status_code(status_code);
        self.sink.add_parameters(parameters.iter());

        let mut location = url.to_string();
        if !self.sink.parameters().is_empty() {
            let query = self
                .sink
                .parameters()
                .to_query_string()
                .map_err(|e| ResponseError::QueryEncoding(e.to_string()))?;
            location.push(if has_query_component(url) { '&' } else { '?' });
            location.push_str(&query);
        }
        self.sink.set_header("Location", &location);

        if StatusClass::of(self.sink.status_code()) != StatusClass::Redirection {
            return Err(self.invalid_state("redirection"));
        }
        Ok(())
    }

    pub fn apply_error(
        &mut self,
        status_code: u16,
        payload: &ErrorPayload,
    ) -> Result<(), ResponseError> {
        self.set_error(
            status_code,
            &payload.error,
            payload.error_description.as_deref(),
            payload.error_uri.as_deref(),
        )
    }

    pub fn apply_redirect(
        &mut self,
        status_code: u16,
        payload: &RedirectPayload,
    ) -> Result<(), ResponseError> {
        let error = payload.error.as_ref();
        self.set_redirect(
            status_code,
            payload.url(),
            payload.state.as_deref(),
            error.map(|e| e.error.as_str()),
            error.and_then(|e| e.error_description.as_deref()),
            error.and_then(|e| e.error_uri.as_deref()),
        )
    }

    /// [`apply_redirect`](Self::apply_redirect) with the configured redirect status.
    pub fn redirect(&mut self, payload: &RedirectPayload) -> Result<(), ResponseError> {
        self.apply_redirect(self.redirect_status, payload)
    }

    fn invalid_state(&self, expected: &'static str) -> ResponseError {
        let status = self.sink.status_code();
        tracing::warn!(status, expected, "OAuth2 response left in an invalid state");
        ResponseError::InvalidResponseState { expected, status }
    }
}

/// Whether the URL carries a query component, empty or not.
fn has_query_component(url: &str) -> bool {
    url.split('#').next().unwrap_or_default().contains('?')
}
