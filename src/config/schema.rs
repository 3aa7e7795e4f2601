//! Matcher configuration schema definitions.
//!
//! External shape of per-module match configuration. All types derive Serde
//! traits so matcher config can be written as a code literal or deserialized
//! from JSON/TOML.

use serde::{Deserialize, Serialize};

/// Request field a [`MatcherElement`] reads.
///
/// Deserialized from its lowercase string form. Unrecognized names are kept
/// as [`ElementKind::Other`] and fail every check they guard, instead of
/// rejecting the whole config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ElementKind {
    Header,
    Query,
    Cookie,
    Other(String),
}

impl From<String> for ElementKind {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "header" => Self::Header,
            "query" => Self::Query,
            "cookie" => Self::Cookie,
            _ => Self::Other(raw),
        }
    }
}

impl From<ElementKind> for String {
    fn from(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Header => "header".to_string(),
            ElementKind::Query => "query".to_string(),
            ElementKind::Cookie => "cookie".to_string(),
            ElementKind::Other(raw) => raw,
        }
    }
}

/// One request-field check inside a `has`/`missing` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatcherElement {
    /// Field to read.
    #[serde(rename = "type")]
    pub kind: ElementKind,

    /// Header name, query parameter name, or cookie name.
    pub key: String,

    /// Exact value the field must carry; `None` makes mere presence enough.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl MatcherElement {
    /// Header check.
    pub fn header(key: impl Into<String>) -> Self {
        Self {
            kind: ElementKind::Header,
            key: key.into(),
            value: None,
        }
    }

    /// Query parameter check.
    pub fn query(key: impl Into<String>) -> Self {
        Self {
            kind: ElementKind::Query,
            key: key.into(),
            value: None,
        }
    }

    /// Cookie check.
    pub fn cookie(key: impl Into<String>) -> Self {
        Self {
            kind: ElementKind::Cookie,
            key: key.into(),
            value: None,
        }
    }

    /// Require an exact value on top of presence.
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

/// Structured match unit: a path pattern plus optional extra constraints,
/// all of which must hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatcherCondition {
    /// Path pattern the request path must satisfy, in the axum router
    /// syntax: literal segments, named parameters (`/users/{id}`), and
    /// catch-alls (`/dashboard/{*rest}`).
    pub source: String,

    /// Secondary regular-expression filter over the same path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regexp: Option<String>,

    /// Set to `false` to match against the path with its detected locale
    /// prefix stripped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<bool>,

    /// Fields that must be present, with matching values where given.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub has: Vec<MatcherElement>,

    /// Fields that must be absent, or present with a different value than
    /// the one given.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<MatcherElement>,
}

impl MatcherCondition {
    /// Condition matching `source` alone.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            regexp: None,
            locale: None,
            has: Vec::new(),
            missing: Vec::new(),
        }
    }
}

/// Declarative predicate deciding whether a request is selected.
///
/// A bare string is shorthand for matching the raw request path; a list is a
/// left-to-right disjunction of its entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Matcher {
    /// Path pattern tested against the raw request path.
    Pattern(String),
    /// Structured condition.
    Condition(MatcherCondition),
    /// Any of the entries (OR, first match wins).
    Any(Vec<MatcherEntry>),
}

/// One entry of a [`Matcher::Any`] list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MatcherEntry {
    Pattern(String),
    Condition(MatcherCondition),
}

impl From<&str> for Matcher {
    fn from(pattern: &str) -> Self {
        Self::Pattern(pattern.to_string())
    }
}

impl From<String> for Matcher {
    fn from(pattern: String) -> Self {
        Self::Pattern(pattern)
    }
}

impl From<MatcherCondition> for Matcher {
    fn from(condition: MatcherCondition) -> Self {
        Self::Condition(condition)
    }
}

impl From<Vec<MatcherEntry>> for Matcher {
    fn from(entries: Vec<MatcherEntry>) -> Self {
        Self::Any(entries)
    }
}

impl From<&str> for MatcherEntry {
    fn from(pattern: &str) -> Self {
        Self::Pattern(pattern.to_string())
    }
}

impl From<String> for MatcherEntry {
    fn from(pattern: String) -> Self {
        Self::Pattern(pattern)
    }
}

impl From<MatcherCondition> for MatcherEntry {
    fn from(condition: MatcherCondition) -> Self {
        Self::Condition(condition)
    }
}

/// Raw per-module match configuration, as supplied by the caller.
///
/// `matcher` is exclusive with `include`/`exclude`; the conflict is rejected
/// when the stack is composed, before any request is handled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Exclusive selection: the request must match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matcher: Option<Matcher>,

    /// Inclusive selection: the request must match when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<Matcher>,

    /// Exclusive filter: the request must not match when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Matcher>,
}

impl MatchConfig {
    /// Config using the exclusive `matcher` form.
    pub fn matcher(matcher: impl Into<Matcher>) -> Self {
        Self {
            matcher: Some(matcher.into()),
            ..Self::default()
        }
    }

    /// Config using the inclusive/exclusive form. `None` means no
    /// restriction on that side.
    pub fn scope(include: Option<Matcher>, exclude: Option<Matcher>) -> Self {
        Self {
            matcher: None,
            include,
            exclude,
        }
    }
}
