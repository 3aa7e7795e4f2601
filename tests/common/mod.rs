//! Shared helpers for integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use waypoint::{BoxError, Flow, Module};

/// Module that answers every request it is eligible for with a redirect to
/// `location`.
pub fn redirecter(label: &str, location: &'static str) -> Module {
    Module::new(move |_request, _event| async move { Ok(Flow::redirect(location)) }).named(label)
}

/// Module that declines every request.
pub fn passthrough(label: &str) -> Module {
    Module::new(|_request, _event| async { Ok(Flow::Continue) }).named(label)
}

/// Module whose handler fails the test if it is ever invoked.
pub fn must_not_run(label: &str) -> Module {
    Module::new(|_request, _event| async {
        Err::<Flow, BoxError>("handler must not be invoked".into())
    })
    .named(label)
}

/// Module that counts its invocations and declines.
pub fn counting(label: &str, hits: Arc<AtomicUsize>) -> Module {
    Module::new(move |_request, _event| {
        let hits = hits.clone();
        async move {
            hits.fetch_add(1, Ordering::SeqCst);
            Ok(Flow::Continue)
        }
    })
    .named(label)
}
