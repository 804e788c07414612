mod complete_field;
mod directive_processing;
mod invoke_resolver;
mod process_child_fields;
mod validate_field;

pub use complete_field::CompleteFieldStage;
pub use directive_processing::DirectiveStage;
pub(crate) use invoke_resolver::guarded;
pub(crate) use invoke_resolver::unhandled_exception;
pub use invoke_resolver::InvokeResolverStage;
pub use process_child_fields::ProcessChildFieldsStage;
pub(crate) use process_child_fields::execute_field;
pub(crate) use process_child_fields::resolve_child_fields;
pub use validate_field::ValidateFieldStage;
