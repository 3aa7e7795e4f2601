//! Compiled-pattern caches.
//!
//! # Responsibilities
//! - Hand out compiled path patterns and regexes by source string
//! - Compile each distinct string at most once per cache
//!
//! # Design Decisions
//! - Lock-striped maps (`DashMap`); reads never observe partial values
//! - Entries are write-once, nothing is ever evicted
//! - Concurrent first use of the same string may compile twice; the first
//!   insert wins and the duplicate is dropped
//! - Owned by the engine rather than process-global

use std::sync::Arc;

use dashmap::DashMap;
use regex::Regex;

use crate::matcher::{path::PathPattern, MatchError};

/// Cache of compiled path patterns and regexes, keyed by exact source
/// string.
#[derive(Debug, Default)]
pub struct PatternCache {
    paths: DashMap<String, Arc<PathPattern>>,
    regexes: DashMap<String, Arc<Regex>>,
}

impl PatternCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiled matcher for `pattern`, compiling on first use.
    pub fn get_or_compile_path(&self, pattern: &str) -> Result<Arc<PathPattern>, MatchError> {
        if let Some(compiled) = self.paths.get(pattern) {
            return Ok(Arc::clone(compiled.value()));
        }
        let compiled = Arc::new(PathPattern::compile(pattern)?);
        let entry = self.paths.entry(pattern.to_string()).or_insert(compiled);
        Ok(Arc::clone(entry.value()))
    }

    /// Compiled regex for `source`, compiling on first use.
    pub fn get_or_compile_regex(&self, source: &str) -> Result<Arc<Regex>, MatchError> {
        if let Some(compiled) = self.regexes.get(source) {
            return Ok(Arc::clone(compiled.value()));
        }
        let compiled = Regex::new(source).map_err(|err| MatchError::InvalidRegex {
            pattern: source.to_string(),
            source: err,
        })?;
        let entry = self
            .regexes
            .entry(source.to_string())
            .or_insert(Arc::new(compiled));
        Ok(Arc::clone(entry.value()))
    }
}
