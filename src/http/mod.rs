//! Request/response surface consumed and produced by middlewares.
//!
//! # Data Flow
//! ```text
//! axum::http::Request (or a hand-built snapshot)
//!     → request.rs (path, locale, headers, query, cookies, parsed once)
//!     → matching engine + handlers read by key
//!     → response.rs (Flow: terminal response or pass-through)
//! ```

pub mod request;
pub mod response;

pub use request::{DetectedLocale, RequestContext, RequestContextBuilder};
pub use response::Flow;
