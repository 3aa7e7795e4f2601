//! Middleware composition subsystem.
//!
//! # Data Flow
//! ```text
//! Vec<Module> (handler + raw MatchConfig)
//!     → composer.rs (validate config → ModuleRule, build the stack)
//!     → MiddlewareStack::handle(request, event)
//!         → matcher engine (eligibility per module, in order)
//!         → first eligible handler that responds wins
//!     → Flow::Respond(response) | Flow::Continue
//! ```
//!
//! # Design Decisions
//! - Misconfiguration fails `compose`, never a request
//! - Handler errors pass through untouched; the stack adds no retries
//! - One matcher engine, and so one pattern cache, per composed stack

pub mod composer;
pub mod event;
pub mod module;

pub use composer::{compose, MiddlewareStack};
pub use event::FlowEvent;
pub use module::{BoxError, Module};
