//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject configs that set both `matcher` and `include`/`exclude`
//! - Fold raw [`MatchConfig`] into the internal rule representation
//!
//! # Design Decisions
//! - Runs once, when the stack is composed, never per request
//! - After the boundary check the conflict is unrepresentable: a
//!   [`ModuleRule`] is either the exclusive or the scoped form

use thiserror::Error;

use super::schema::{MatchConfig, Matcher};

/// Errors raised when a middleware stack is composed from invalid config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A module sets `matcher` together with `include`/`exclude`.
    #[error("middleware module `{module}` cannot define both `matcher` and `include`/`exclude`")]
    ConflictingSelectors {
        /// Label of the offending module.
        module: String,
    },
}

/// Per-module selection rule, derived from validated config.
#[derive(Debug, Clone)]
pub enum ModuleRule {
    /// No config: the module is eligible for every request.
    Always,
    /// Exclusive `matcher` selection.
    Matcher(Matcher),
    /// Inclusive/exclusive selection; `None` means no restriction on that
    /// side.
    Scope {
        include: Option<Matcher>,
        exclude: Option<Matcher>,
    },
}

/// Validate a module's raw config and fold it into a [`ModuleRule`].
pub fn resolve_rule(
    module: &str,
    config: Option<&MatchConfig>,
) -> Result<ModuleRule, ConfigError> {
    let Some(config) = config else {
        return Ok(ModuleRule::Always);
    };
    if config.matcher.is_some() && (config.include.is_some() || config.exclude.is_some()) {
        return Err(ConfigError::ConflictingSelectors {
            module: module.to_string(),
        });
    }
    Ok(match &config.matcher {
        Some(matcher) => ModuleRule::Matcher(matcher.clone()),
        None => ModuleRule::Scope {
            include: config.include.clone(),
            exclude: config.exclude.clone(),
        },
    })
}
