//! Execution-context value handed to every middleware.

use std::future::Future;
use std::sync::{Arc, Mutex};

use tokio::task::JoinHandle;
use tracing::warn;

/// Per-invocation execution context.
///
/// Lets a middleware detach background work (audit writes, cache warms)
/// that should complete without delaying the response.
#[derive(Clone, Debug, Default)]
pub struct FlowEvent {
    tasks: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl FlowEvent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn `work` onto the runtime and keep its handle so the caller can
    /// wait for it after the response is out.
    pub fn wait_until<F>(&self, work: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(work);
        self.tasks
            .lock()
            .expect("task list mutex poisoned")
            .push(handle);
    }

    /// Await completion of all detached work. Failed tasks are logged and
    /// otherwise ignored.
    pub async fn drain(&self) {
        loop {
            let handle = {
                let mut tasks = self.tasks.lock().expect("task list mutex poisoned");
                tasks.pop()
            };
            let Some(handle) = handle else {
                break;
            };
            if let Err(err) = handle.await {
                warn!(error = %err, "detached task failed");
            }
        }
    }
}
