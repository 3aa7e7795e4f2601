//! Middleware chaining with short-circuit evaluation.
//!
//! # Responsibilities
//! - Validate module configuration once, at composition time
//! - Evaluate eligibility per module and request
//! - Run eligible handlers in registration order until one responds
//!
//! # Design Decisions
//! - A module ineligible for a request costs one matcher evaluation, no
//!   handler call
//! - A produced response stops the chain; later modules never observe the
//!   request

use tracing::debug;

use crate::config::validation::{resolve_rule, ConfigError, ModuleRule};
use crate::http::{request::RequestContext, response::Flow};
use crate::matcher::{MatchError, MatcherEngine};

use super::event::FlowEvent;
use super::module::{BoxError, Handler, Module};

struct GuardedModule {
    label: String,
    handler: Handler,
    rule: ModuleRule,
}

/// Middlewares composed into a single handler.
pub struct MiddlewareStack {
    modules: Vec<GuardedModule>,
    engine: MatcherEngine,
}

impl std::fmt::Debug for MiddlewareStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MiddlewareStack")
            .field("modules", &self.modules.len())
            .finish_non_exhaustive()
    }
}

/// Compose modules into one handler, validating their configuration.
///
/// Fails when any module defines both `matcher` and `include`/`exclude`;
/// a stack that composes successfully can never hit that error while
/// handling requests.
pub fn compose(modules: Vec<Module>) -> Result<MiddlewareStack, ConfigError> {
    let mut guarded = Vec::with_capacity(modules.len());
    for (index, module) in modules.into_iter().enumerate() {
        let label = module.label.unwrap_or_else(|| format!("#{index}"));
        let rule = resolve_rule(&label, module.config.as_ref())?;
        guarded.push(GuardedModule {
            label,
            handler: module.handler,
            rule,
        });
    }
    Ok(MiddlewareStack {
        modules: guarded,
        engine: MatcherEngine::new(),
    })
}

impl MiddlewareStack {
    /// Run the stack against one request.
    ///
    /// Modules are tried in registration order; the first eligible handler
    /// that produces a response ends the chain. [`Flow::Continue`] comes
    /// back when every module declines. Handler errors, and pattern or
    /// regexp compilation errors hit on first use, propagate unchanged.
    pub async fn handle(
        &self,
        request: RequestContext,
        event: FlowEvent,
    ) -> Result<Flow, BoxError> {
        for module in &self.modules {
            if !self.eligible(&request, module)? {
                debug!(module = %module.label, path = request.path(), "skipped");
                continue;
            }
            match (module.handler)(request.clone(), event.clone()).await? {
                Flow::Respond(response) => {
                    debug!(module = %module.label, path = request.path(), "responded");
                    return Ok(Flow::Respond(response));
                }
                Flow::Continue => {
                    debug!(module = %module.label, path = request.path(), "passed through");
                }
            }
        }
        Ok(Flow::Continue)
    }

    /// Number of modules in the stack.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    fn eligible(
        &self,
        request: &RequestContext,
        module: &GuardedModule,
    ) -> Result<bool, MatchError> {
        match &module.rule {
            ModuleRule::Always => Ok(true),
            ModuleRule::Matcher(matcher) => self.engine.resolve_matcher(request, Some(matcher)),
            ModuleRule::Scope { include, exclude } => {
                if !self.engine.resolve_matcher(request, include.as_ref())? {
                    return Ok(false);
                }
                if let Some(exclude) = exclude {
                    if self.engine.resolve_matcher(request, Some(exclude))? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
        }
    }
}
