//! Matcher resolution.
//!
//! Resolves matcher config against a request: a bare pattern tests the raw
//! path, a structured condition layers locale adjustment, a regex filter,
//! and field checks on top, and a list is an OR across its entries.

use crate::config::schema::{Matcher, MatcherCondition, MatcherEntry};
use crate::http::request::RequestContext;
use crate::matcher::{cache::PatternCache, condition, MatchError};

/// Evaluates matcher configuration against requests, owning the compiled
/// pattern caches.
#[derive(Debug, Default)]
pub struct MatcherEngine {
    cache: PatternCache,
}

impl MatcherEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a whole matcher. Absent config selects every request.
    ///
    /// Entries of a list are tried left to right; the first match wins.
    pub fn resolve_matcher(
        &self,
        request: &RequestContext,
        matcher: Option<&Matcher>,
    ) -> Result<bool, MatchError> {
        let Some(matcher) = matcher else {
            return Ok(true);
        };
        match matcher {
            Matcher::Pattern(pattern) => self.match_path(request.path(), pattern),
            Matcher::Condition(condition) => self.resolve_condition(request, condition),
            Matcher::Any(entries) => {
                for entry in entries {
                    let matched = match entry {
                        MatcherEntry::Pattern(pattern) => {
                            self.match_path(request.path(), pattern)?
                        }
                        MatcherEntry::Condition(condition) => {
                            self.resolve_condition(request, condition)?
                        }
                    };
                    if matched {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }

    /// Resolve one structured condition. Every present constraint must
    /// hold; evaluation stops at the first one that fails.
    pub fn resolve_condition(
        &self,
        request: &RequestContext,
        condition: &MatcherCondition,
    ) -> Result<bool, MatchError> {
        let path = effective_path(request, condition);

        if !self.match_path(path, &condition.source)? {
            return Ok(false);
        }
        if let Some(regexp) = &condition.regexp {
            let regex = self.cache.get_or_compile_regex(regexp)?;
            if !regex.is_match(path) {
                return Ok(false);
            }
        }
        if !condition.has.is_empty() && !condition::satisfies_has(request, &condition.has) {
            return Ok(false);
        }
        if !condition.missing.is_empty()
            && !condition::satisfies_missing(request, &condition.missing)
        {
            return Ok(false);
        }
        Ok(true)
    }

    fn match_path(&self, path: &str, pattern: &str) -> Result<bool, MatchError> {
        let compiled = self.cache.get_or_compile_path(pattern)?;
        Ok(compiled.is_match(path))
    }
}

/// Path the condition is evaluated against: the raw request path, or, under
/// `locale: false`, the path with its detected locale prefix stripped.
///
/// Stripping applies only when the prefix is the entire first segment; a
/// path that merely starts with the locale's letters (`/enterprise` for
/// locale `en`) is left alone. Stripping the whole path falls back to `/`.
fn effective_path<'r>(request: &'r RequestContext, condition: &MatcherCondition) -> &'r str {
    if condition.locale != Some(false) {
        return request.path();
    }
    let Some(locale) = request.locale() else {
        return request.path();
    };
    let path = request.path();
    let prefix = format!("/{locale}");
    match path.strip_prefix(prefix.as_str()) {
        Some("") => "/",
        Some(rest) if rest.starts_with('/') => rest,
        _ => path,
    }
}
