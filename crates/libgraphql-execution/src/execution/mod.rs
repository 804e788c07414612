//! The field resolution pipeline and the executor that drives it.

mod cancel_handle;
mod execution_config;
mod field_middleware;
mod field_resolution_context;
mod graph_data_item;
mod internal_error;
mod query_executor;
mod stages;

pub use cancel_handle::ExecutionCancelHandle;
pub use execution_config::ChildExecutionMode;
pub use execution_config::ExecutionConfig;
pub use field_middleware::FieldMiddleware;
pub use field_middleware::Next;
pub use field_middleware::default_stages;
pub use field_resolution_context::ExecutionRequest;
pub use field_resolution_context::FieldResolutionContext;
pub use graph_data_item::GraphDataItem;
pub use graph_data_item::ItemStatus;
pub use internal_error::InternalError;
pub use query_executor::ExecutionResult;
pub use query_executor::QueryExecutor;
pub use stages::CompleteFieldStage;
pub use stages::DirectiveStage;
pub use stages::InvokeResolverStage;
pub use stages::ProcessChildFieldsStage;
pub use stages::ValidateFieldStage;

#[cfg(test)]
mod tests;
