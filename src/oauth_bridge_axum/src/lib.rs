//! Axum integration for the OAuth2 response-shaping library.
//!
//! This crate provides Axum adapters for the framework-agnostic traits
//! defined in `oauth_bridge_core`.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  oauth_bridge_core: traits + builder     │
//! └──────────────┬───────────────────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────────────────┐
//! │  oauth_bridge_axum: Axum implementations │
//! │  - AxumRequest (FromRequest extractor)   │
//! │  - AxumResponse (IntoResponse)           │
//! │  - BridgeSettings, tracing setup         │
//! └──────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use oauth_bridge_axum::{AxumRequest, AxumResponse, BridgeError, response_builder};
//! use oauth_bridge_core::RequestSource;
//!
//! async fn deny(req: AxumRequest) -> Result<AxumResponse, BridgeError> {
//!     let redirect_uri = req.query("redirect_uri").unwrap_or_default();
//!     let mut builder = response_builder();
//!     builder.set_redirect(302, redirect_uri, req.query("state"), Some("access_denied"), None, None)?;
//!     Ok(builder.into_inner())
//! }
//!
//! let app = Router::new()
//!     .route("/authorize/deny", get(deny))
//!     .with_state(BridgeSettings::load()?);
//! ```

pub mod adapters;
pub mod error;
pub mod settings;
pub mod telemetry;

// Re-export for convenience
pub use adapters::{AxumRequest, AxumResponse, response_builder, response_builder_with};
pub use error::{BridgeError, RequestError};
pub use settings::{BridgeSettings, SettingsError};
