mod directive_definition;
mod graph_type;
mod schema;
mod schema_builder;
mod type_analysis;
mod type_expression;

pub use directive_definition::DirectiveDefinition;
pub use directive_definition::NamedDirectiveRef;
pub use graph_type::ArgumentDefinition;
pub use graph_type::EnumType;
pub use graph_type::FieldDefinition;
pub use graph_type::GraphType;
pub use graph_type::GraphTypeKind;
pub use graph_type::InputFieldDefinition;
pub use graph_type::InputObjectType;
pub use graph_type::InterfaceType;
pub use graph_type::NamedGraphTypeRef;
pub use graph_type::ObjectType;
pub use graph_type::ScalarType;
pub use graph_type::UnionType;
pub use schema::Schema;
pub use schema_builder::SchemaBuildError;
pub use schema_builder::SchemaBuilder;
pub(crate) use schema_builder::const_value_from_ast;
pub use type_analysis::TypeAnalysisResult;
pub use type_expression::TypeExpression;

#[cfg(test)]
mod tests;
