use thiserror::Error;

/// A fault in the pipeline itself, as opposed to a problem with the query or
/// a resolver (which are reported as messages). These abort the request.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum InternalError {
    #[error("the batch field `{field}` was invoked without any source items")]
    EmptyBatch {
        field: String,
    },

    #[error(
        "the field `{field}` resolves one source item per invocation but was \
        invoked with {count}"
    )]
    SourceItemCount {
        count: usize,
        field: String,
    },

    /// Raised by a custom pipeline stage that cannot continue.
    #[error("the stage `{stage}` failed on the field `{field}`: {message}")]
    StageFailed {
        field: String,
        message: String,
        stage: &'static str,
    },
}
