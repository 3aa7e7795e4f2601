//! Request matching subsystem.
//!
//! # Data Flow
//! ```text
//! RequestContext + Matcher (config)
//!     → engine.rs (normalize entries, OR across them)
//!     → path.rs / cache.rs (compiled pattern and regex tests)
//!     → condition.rs (has / missing field checks)
//!     → bool
//! ```
//!
//! # Design Decisions
//! - Pattern and regex compilation delegated to `matchit` / `regex`
//! - Compiled artifacts cached per source string, never evicted
//! - Evaluation is pure: same request and config, same answer

pub mod cache;
pub mod condition;
pub mod engine;
pub mod path;

pub use cache::PatternCache;
pub use engine::MatcherEngine;

use thiserror::Error;

/// Errors raised when a pattern or regexp in matcher config fails to
/// compile.
///
/// Surfaced on first use of the offending string and propagated to the
/// composed handler's caller; evaluation itself never fails.
#[derive(Debug, Error)]
pub enum MatchError {
    /// Path pattern rejected by the router syntax.
    #[error("invalid path pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: matchit::InsertError,
    },

    /// Regular expression rejected by the regex engine.
    #[error("invalid regexp `{pattern}`: {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
