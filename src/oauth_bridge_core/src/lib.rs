pub mod builder;
pub mod error;
pub mod http_abstraction;
pub mod params;
pub mod payload;
pub mod response;
pub mod status;

// Re-export commonly used types for convenience
pub use builder::{DEFAULT_REDIRECT_STATUS, OAuth2ResponseBuilder};
pub use error::ResponseError;
pub use http_abstraction::{BasicCredentials, RequestSource, ResponseSink, has_form_body};
pub use params::{Headers, Parameters};
pub use payload::{
    ErrorCode, ErrorCodeParseError, ErrorPayload, RFC6749_URL, RedirectPayload, expand_error_uri,
};
pub use response::{BodyFormat, BodyFormatParseError, HttpResponse};
pub use status::StatusClass;
