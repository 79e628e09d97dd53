//! # OAuth Bridge - OAuth2 Response Shaping Library
//!
//! This is a facade crate that re-exports all public APIs from the bridge components.
//! Use this crate to get access to all response-shaping functionality in one place.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! oauth_bridge = { path = "../oauth_bridge" }
//! ```
//!
//! ## Structure
//!
//! - **HTTP traits**: `RequestSource`, `ResponseSink`
//! - **Response shaping**: `OAuth2ResponseBuilder`, `HttpResponse`, payload types
//! - **Axum adapters**: `AxumRequest`, `AxumResponse`, `BridgeSettings`

// ============================================================================
// Core Types
// ============================================================================

/// Framework-agnostic traits and the response builder
pub mod core {
    pub use oauth_bridge_core::*;
}

// Re-export most commonly used core types at the root level
pub use oauth_bridge_core::{
    BasicCredentials, BodyFormat, ErrorCode, ErrorPayload, HttpResponse, OAuth2ResponseBuilder,
    Parameters, RedirectPayload, RequestSource, ResponseError, ResponseSink, StatusClass,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Framework adapters
pub mod adapters {
    /// Axum integration
    pub mod axum {
        pub use oauth_bridge_axum::*;
    }
}

// Re-export commonly used adapters at root level
pub use oauth_bridge_axum::{
    AxumRequest, AxumResponse, BridgeError, BridgeSettings, response_builder,
    response_builder_with, telemetry,
};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export secrecy for reading basic-auth passwords
pub use secrecy::{ExposeSecret, Secret};

pub use http;
