//! Guarded middleware composition.
//!
//! Register several independent middlewares, each guarded by a declarative
//! matcher (path pattern, regex filter, header/query/cookie conditions), and
//! run them in order against each request: the first eligible handler that
//! produces a response ends the chain, the rest never run.

pub mod compose;
pub mod config;
pub mod http;
pub mod matcher;

pub use compose::{compose, BoxError, FlowEvent, MiddlewareStack, Module};
pub use config::{
    ConfigError, ElementKind, MatchConfig, Matcher, MatcherCondition, MatcherElement, MatcherEntry,
};
pub use http::{DetectedLocale, Flow, RequestContext};
pub use matcher::{MatchError, MatcherEngine, PatternCache};
