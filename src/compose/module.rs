//! Middleware module definition.

use std::fmt;
use std::future::Future;

use futures_util::future::BoxFuture;

use crate::config::schema::MatchConfig;
use crate::http::{request::RequestContext, response::Flow};

use super::event::FlowEvent;

/// Errors escaping a middleware handler; passed through to the stack's
/// caller untouched.
pub use axum::BoxError;

/// Boxed middleware function.
pub type Handler =
    Box<dyn Fn(RequestContext, FlowEvent) -> BoxFuture<'static, Result<Flow, BoxError>> + Send + Sync>;

/// One middleware plus its optional guard configuration.
///
/// Modules are supplied at composition time and held immutable for the
/// lifetime of the composed stack.
pub struct Module {
    pub(crate) label: Option<String>,
    pub(crate) handler: Handler,
    pub(crate) config: Option<MatchConfig>,
}

impl Module {
    /// Wrap an async handler with no guard: it is eligible for every
    /// request that reaches it.
    pub fn new<F, Fut>(handler: F) -> Self
    where
        F: Fn(RequestContext, FlowEvent) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Flow, BoxError>> + Send + 'static,
    {
        Self {
            label: None,
            handler: Box::new(move |request, event| Box::pin(handler(request, event))),
            config: None,
        }
    }

    /// Name the module; the label shows up in config errors and log output.
    pub fn named(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Attach guard configuration.
    pub fn with_config(mut self, config: MatchConfig) -> Self {
        self.config = Some(config);
        self
    }
}

impl fmt::Debug for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Module")
            .field("label", &self.label)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
