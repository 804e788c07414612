//! Joining the flat result set of a batch resolver back onto the source
//! items it was resolved for.

mod batch_key;
mod batch_reconciler;
mod batch_result;

pub use batch_key::BatchKey;
pub use batch_reconciler::BatchAssignment;
pub use batch_reconciler::BatchReconciler;
pub use batch_result::BatchResult;
pub use batch_result::ResultKeysFn;
pub use batch_result::SourceKeyFn;

#[cfg(test)]
mod tests;
