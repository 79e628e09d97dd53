//! Zero-cost HTTP abstraction traits for OAuth2 response shaping.
//!
//! This module defines the two capabilities the OAuth2 layer needs from a web
//! framework. Frameworks implement them directly on their own types (via
//! newtype wrappers), so the response-shaping logic never depends on a
//! concrete framework.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  oauth_bridge_core: Defines HTTP traits  │
//! └──────────────┬───────────────────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────────────────┐
//! │  oauth_bridge_axum: Newtype wrappers     │
//! │  struct AxumRequest { parts, query, .. } │
//! │  impl RequestSource for AxumRequest { }  │
//! └──────────────┬───────────────────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────────────────┐
//! │  OAuth2ResponseBuilder is generic over   │
//! │  ResponseSink (framework independent)    │
//! └──────────────────────────────────────────┘
//! ```
//!
//! # Orphan Rule Solution
//!
//! Framework-specific crates wrap their types:
//! ```ignore
//! // In oauth_bridge_axum
//! pub struct AxumResponse { inner: HttpResponse, format: BodyFormat }
//!
//! impl oauth_bridge_core::ResponseSink for AxumResponse {
//!     fn status_code(&self) -> u16 {
//!         self.inner.status_code()
//!     }
//!     // ... just delegates to inner type
//! }
//! ```

use base64::{Engine as _, engine::general_purpose::STANDARD};
use secrecy::Secret;

use crate::params::Parameters;

/// Request methods whose form body carries OAuth2 parameters.
pub const BODY_METHODS: [&str; 4] = ["POST", "PUT", "PATCH", "DELETE"];

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Trait for HTTP requests that feed the OAuth2 pipeline.
///
/// # Implementation Notes
///
/// - Return `&str` references directly from data the adapter already holds
/// - Case-insensitive header lookup should be handled by implementor
/// - `request` parameters are only expected for [`BODY_METHODS`] with a
///   form-urlencoded content type; see [`has_form_body`]
pub trait RequestSource {
    /// Get a query-string parameter by name.
    fn query(&self, name: &str) -> Option<&str>;

    /// All query-string parameters, in request order.
    fn query_all(&self) -> &Parameters;

    /// Get a decoded body parameter by name.
    fn request(&self, name: &str) -> Option<&str>;

    /// All decoded body parameters.
    fn request_all(&self) -> &Parameters;

    /// Get a header value by name.
    ///
    /// Header lookup should be case-insensitive (per HTTP spec).
    /// Returns `None` if the header doesn't exist or isn't valid UTF-8.
    fn header(&self, name: &str) -> Option<&str>;

    /// Get the HTTP method (GET, POST, etc.)
    fn method(&self) -> &str;

    fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Credentials from an `Authorization: Basic` header.
    ///
    /// Returns `None` when the header is missing, uses another scheme, or
    /// doesn't decode to `username:password`.
    fn basic_credentials(&self) -> Option<BasicCredentials> {
        BasicCredentials::from_authorization(self.header("authorization")?)
    }
}

/// Whether a request with this method and content type carries form parameters.
///
/// Parameters on the content type (`; charset=UTF-8`) are ignored.
pub fn has_form_body(method: &str, content_type: Option<&str>) -> bool {
    let Some(content_type) = content_type else {
        return false;
    };
    let media_type = content_type.split(';').next().unwrap_or_default().trim();

    BODY_METHODS
        .iter()
        .any(|m| m.eq_ignore_ascii_case(method))
        && media_type.eq_ignore_ascii_case(FORM_CONTENT_TYPE)
}

/// Username and password presented through HTTP basic authentication.
#[derive(Debug)]
pub struct BasicCredentials {
    pub username: String,
    pub password: Secret<String>,
}

impl BasicCredentials {
    /// Parse the value of an `Authorization` header.
    pub fn from_authorization(value: &str) -> Option<Self> {
        let (scheme, encoded) = value.trim().split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("basic") {
            return None;
        }

        let decoded = STANDARD.decode(encoded.trim()).ok()?;
        let decoded = String::from_utf8(decoded).ok()?;
        let (username, password) = decoded.split_once(':')?;

        Some(Self {
            username: username.to_string(),
            password: Secret::new(password.to_string()),
        })
    }
}

/// Trait for the response side of an OAuth2 exchange.
///
/// Unlike a consuming builder, a sink is mutated in place: OAuth2 shaping
/// applies status, headers and parameters step by step and validates the
/// result afterwards.
///
/// # Example
///
/// ```ignore
/// impl ResponseSink for MyFrameworkResponse {
///     fn status_code(&self) -> u16 { self.status }
///     fn set_status_code(&mut self, code: u16) { self.status = code }
///     // ...
/// }
/// ```
pub trait ResponseSink {
    fn status_code(&self) -> u16;

    /// Set the status code. No validation happens here.
    fn set_status_code(&mut self, code: u16);

    /// Get a header value by name (case-insensitive).
    fn header(&self, name: &str) -> Option<&str>;

    /// Set a header, replacing any existing value under the same name.
    fn set_header(&mut self, name: &str, value: &str);

    fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters().get(name)
    }

    /// Set a parameter, replacing any existing value under the same key.
    fn set_parameter(&mut self, name: &str, value: &str);

    /// Parameters accumulated so far, in insertion order.
    fn parameters(&self) -> &Parameters;

    /// Merge parameters into the response. Last write per key wins.
    fn add_parameters<'a, I>(&mut self, parameters: I)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (name, value) in parameters {
            self.set_parameter(name, value);
        }
    }

    /// Merge headers into the response. Last write per name wins.
    fn add_headers<'a, I>(&mut self, headers: I)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (name, value) in headers {
            self.set_header(name, value);
        }
    }
}
