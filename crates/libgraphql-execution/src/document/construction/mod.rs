mod construction_context;
mod construction_step;
mod document_constructor;
mod field_steps;
mod fragment_steps;
mod input_steps;
mod operation_steps;

pub use construction_context::ConstructionContext;
pub use construction_step::ConstructionStep;
pub use document_constructor::DocumentConstructionError;
pub use document_constructor::DocumentConstructor;
pub use field_steps::DirectiveStep;
pub use field_steps::FieldSelectionSetStep;
pub use field_steps::FieldStep;
pub use field_steps::TypeNameStep;
pub use fragment_steps::FragmentSpreadStep;
pub use fragment_steps::InlineFragmentStep;
pub use fragment_steps::NamedFragmentStep;
pub use input_steps::DirectiveArgumentStep;
pub use input_steps::FieldArgumentStep;
pub use input_steps::InputObjectFieldStep;
pub use input_steps::SuppliedValueStep;
pub use input_steps::VariableReferenceStep;
pub use operation_steps::DocumentStep;
pub use operation_steps::OperationStep;
pub use operation_steps::VariableStep;
