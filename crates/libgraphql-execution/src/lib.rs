//! Execution of GraphQL operations against a [`Schema`](schema::Schema).
//!
//! Query text is reshaped into a [`SyntaxTree`](syntax::SyntaxTree), bound to
//! the schema by a rule-driven
//! [`DocumentConstructor`](document::DocumentConstructor), compiled into an
//! [`ExecutionPlan`](plan::ExecutionPlan) and finally run by the
//! [`QueryExecutor`](execution::QueryExecutor), which resolves every field
//! through a middleware pipeline and reports diagnostics as
//! [`GraphMessage`]s rather than errors.

mod action_result;
pub mod ast;
pub mod batch;
pub mod document;
pub mod error_codes;
pub mod execution;
mod loc;
mod messages;
pub mod named_ref;
pub mod plan;
pub mod resolvers;
mod response_path;
pub mod schema;
pub mod syntax;
mod value;
pub mod variables;

pub use action_result::ActionResult;
pub use action_result::ModelValidationFailure;
pub use action_result::ResolutionTarget;
pub use loc::SourceLocation;
pub use messages::GraphMessage;
pub use messages::MessageCollection;
pub use messages::MessageSeverity;
pub use messages::SourceOrigin;
pub use response_path::PathSegment;
pub use response_path::ResponsePath;
pub use value::Arguments;
pub use value::DataValue;
pub use value::InputValue;
pub use value::ObjectValue;

#[cfg(test)]
mod tests;
