//! Field condition evaluation.
//!
//! The two polarities of element checks: `has` (field must be present,
//! optionally with an exact value) and `missing` (field must be absent, or
//! present with a value other than the one specified). Note the asymmetry:
//! `missing` is not the per-element negation of `has`.

use crate::config::schema::{ElementKind, MatcherElement};
use crate::http::request::RequestContext;

enum Field<'r> {
    Value(&'r str),
    Absent,
    /// Unrecognized element kind: fails whichever check it guards.
    Unreadable,
}

fn read_field<'r>(request: &'r RequestContext, element: &MatcherElement) -> Field<'r> {
    let value = match &element.kind {
        ElementKind::Header => request.header(&element.key),
        ElementKind::Query => request.query(&element.key),
        ElementKind::Cookie => request.cookie(&element.key),
        ElementKind::Other(_) => return Field::Unreadable,
    };
    match value {
        Some(value) => Field::Value(value),
        None => Field::Absent,
    }
}

/// True when every element is present on the request, carrying the exact
/// value where one is specified.
pub(crate) fn satisfies_has(request: &RequestContext, elements: &[MatcherElement]) -> bool {
    for element in elements {
        match read_field(request, element) {
            Field::Value(actual) => {
                if let Some(expected) = element.value.as_deref() {
                    if actual != expected {
                        return false;
                    }
                }
            }
            Field::Absent | Field::Unreadable => return false,
        }
    }
    true
}

/// True when every element is "missing" from the request: absent outright,
/// or present with a value different from the one specified. A present
/// field violates the check when the element names no value at all, or when
/// the live value equals the named one.
pub(crate) fn satisfies_missing(request: &RequestContext, elements: &[MatcherElement]) -> bool {
    for element in elements {
        match read_field(request, element) {
            Field::Value(actual) => match element.value.as_deref() {
                None => return false,
                Some(expected) if actual == expected => return false,
                Some(_) => {}
            },
            Field::Absent => {}
            Field::Unreadable => return false,
        }
    }
    true
}
