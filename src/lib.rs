//! Bearer-token authentication gate for axum services.
//!
//! Build an [`AuthGate`] once from [`GateOptions`], install it with
//! [`middleware::auth::apply`], and read the verified claims in handlers through
//! [`CurrentIdentity`] or the [`IdentityContext`] request extension.
//!
//! ```ignore
//! use bearer_gate::{AuthGate, GateOptions, middleware};
//!
//! let gate = AuthGate::new(GateOptions::new().secret(secret))?;
//! let app = middleware::auth::apply(Router::new().route("/me", get(me)), gate);
//! ```

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;

pub use api::v1::extractors::{CurrentIdentity, IdentityContext};
pub use error::{AuthError, ConfigurationError};
pub use services::auth::{
    AuthGate, BearerHeader, Claims, Decision, Extraction, GateLogger, GateOptions, HeaderToken,
    MessageOverrides, Messages, QueryToken, TokenExtractor, TracingLogger, VerificationOutcome,
};
