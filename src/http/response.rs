//! Handler outcomes.
//!
//! A middleware either produces a response, which ends the chain, or
//! signals pass-through so the next module gets a look. The composed stack
//! itself resolves to the same two outcomes.

use axum::response::{IntoResponse, Redirect, Response};

/// Outcome of one middleware invocation, and of the composed stack.
#[derive(Debug)]
pub enum Flow {
    /// Terminal response, returned verbatim to the caller.
    Respond(Response),
    /// Pass-through: continue with the next module, or, at the end of the
    /// stack, let the surrounding framework proceed unmodified.
    Continue,
}

impl Flow {
    /// Wrap any response-like value as a terminal outcome.
    pub fn respond(response: impl IntoResponse) -> Self {
        Self::Respond(response.into_response())
    }

    /// Temporary redirect (307) to `location`.
    pub fn redirect(location: &str) -> Self {
        Self::Respond(Redirect::temporary(location).into_response())
    }

    /// See-other redirect (303) to `location`.
    pub fn see_other(location: &str) -> Self {
        Self::Respond(Redirect::to(location).into_response())
    }

    /// True when this outcome carries a response.
    pub fn is_respond(&self) -> bool {
        matches!(self, Self::Respond(_))
    }

    /// The carried response, if any.
    pub fn into_response(self) -> Option<Response> {
        match self {
            Self::Respond(response) => Some(response),
            Self::Continue => None,
        }
    }
}

impl From<Response> for Flow {
    fn from(response: Response) -> Self {
        Self::Respond(response)
    }
}
