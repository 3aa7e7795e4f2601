//! Matcher configuration subsystem.
//!
//! # Data Flow
//! ```text
//! code literal / JSON / TOML
//!     → schema.rs (serde shapes: Matcher, MatcherCondition, MatchConfig)
//!     → validation.rs (exclusivity check → ModuleRule)
//!     → held immutable by the composed stack
//! ```
//!
//! # Design Decisions
//! - Config is immutable once a stack is composed
//! - Validation separates syntactic (serde) from semantic checks
//! - The raw shape keeps the `matcher`-vs-`include`/`exclude` conflict
//!   representable so it can be reported; the internal rule cannot
//!   represent it

pub mod schema;
pub mod validation;

pub use schema::{ElementKind, MatchConfig, Matcher, MatcherCondition, MatcherElement, MatcherEntry};
pub use validation::{ConfigError, ModuleRule};
