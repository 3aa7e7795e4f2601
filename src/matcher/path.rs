//! Path pattern compilation and testing.
//!
//! Wraps the `matchit` router (the matcher axum routes through) so a single
//! pattern can be compiled once and tested against many paths.

use std::fmt;

use crate::matcher::MatchError;

/// A compiled path pattern.
///
/// Patterns use the axum router syntax: literal segments, named parameters
/// (`/users/{id}`), and catch-alls (`/assets/{*rest}`).
pub struct PathPattern {
    pattern: String,
    router: matchit::Router<()>,
}

impl PathPattern {
    /// Compile `pattern`, rejecting invalid router syntax.
    pub fn compile(pattern: &str) -> Result<Self, MatchError> {
        let mut router = matchit::Router::new();
        router
            .insert(pattern, ())
            .map_err(|source| MatchError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;
        Ok(Self {
            pattern: pattern.to_string(),
            router,
        })
    }

    /// The source string this pattern was compiled from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Test a request path against the compiled pattern.
    pub fn is_match(&self, path: &str) -> bool {
        self.router.at(path).is_ok()
    }
}

impl fmt::Debug for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathPattern")
            .field("pattern", &self.pattern)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_pattern() {
        let pattern = PathPattern::compile("/about").unwrap();
        assert!(pattern.is_match("/about"));
        assert!(!pattern.is_match("/about/team"));
        assert!(!pattern.is_match("/not-about"));
    }

    #[test]
    fn named_parameter() {
        let pattern = PathPattern::compile("/users/{id}").unwrap();
        assert!(pattern.is_match("/users/42"));
        assert!(!pattern.is_match("/users"));
        assert!(!pattern.is_match("/users/42/posts"));
    }

    #[test]
    fn catch_all() {
        let pattern = PathPattern::compile("/api/{*path}").unwrap();
        assert!(pattern.is_match("/api/data"));
        assert!(pattern.is_match("/api/v1/data"));
        assert!(!pattern.is_match("/web/data"));
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        let err = PathPattern::compile("/{unclosed").unwrap_err();
        assert!(err.to_string().contains("/{unclosed"));
    }
}
