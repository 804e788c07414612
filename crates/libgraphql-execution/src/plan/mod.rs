//! Compilation of one operation of a [`QueryDocument`](crate::document::QueryDocument)
//! into the read-only [`FieldInvocationContext`] tree that requests execute.

mod argument_set;
mod execution_plan;
mod execution_plan_builder;
mod field_invocation_context;

pub use argument_set::ArgumentError;
pub use argument_set::ArgumentSet;
pub use argument_set::ArgumentValue;
pub use execution_plan::ExecutionPlan;
pub use execution_plan_builder::ExecutionPlanBuilder;
pub use field_invocation_context::DirectiveInvocation;
pub use field_invocation_context::FieldInvocationContext;

#[cfg(test)]
mod tests;
