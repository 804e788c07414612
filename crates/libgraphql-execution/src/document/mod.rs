//! The bound, schema-aware representation of a query document and the
//! rule engine that builds it from a [`SyntaxTree`](crate::syntax::SyntaxTree).

mod construction;
mod document_linker;
mod document_part;
mod query_document;
mod query_document_builder;

pub use construction::ConstructionContext;
pub use construction::ConstructionStep;
pub use construction::DirectiveArgumentStep;
pub use construction::DirectiveStep;
pub use construction::DocumentConstructionError;
pub use construction::DocumentConstructor;
pub use construction::DocumentStep;
pub use construction::FieldArgumentStep;
pub use construction::FieldSelectionSetStep;
pub use construction::FieldStep;
pub use construction::FragmentSpreadStep;
pub use construction::InlineFragmentStep;
pub use construction::InputObjectFieldStep;
pub use construction::NamedFragmentStep;
pub use construction::OperationStep;
pub use construction::SuppliedValueStep;
pub use construction::TypeNameStep;
pub use construction::VariableReferenceStep;
pub use construction::VariableStep;
pub use document_linker::DocumentLinker;
pub use document_part::DocumentPart;
pub use document_part::PartId;
pub use document_part::PartKind;
pub use document_part::SuppliedValue;
pub use query_document::QueryDocument;
pub use query_document::VariableDeclaration;
pub use query_document::VariableDeclarations;
pub use query_document_builder::QueryDocumentBuildError;
pub use query_document_builder::QueryDocumentBuilder;

#[cfg(test)]
mod tests;
