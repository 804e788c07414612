use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

/// Cancels a whole request from outside the pipeline (or from inside a
/// resolver). Fields already resolving run to completion; fields entered
/// afterwards are cancelled without a message.
#[derive(Clone, Debug, Default)]
pub struct ExecutionCancelHandle {
    cancelled: Arc<AtomicBool>,
}
impl ExecutionCancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
