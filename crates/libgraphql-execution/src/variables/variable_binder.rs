use crate::document::VariableDeclarations;
use crate::schema::Schema;
use crate::schema::TypeExpression;
use crate::variables::ResolvedVariable;
use crate::variables::ResolvedVariableCollection;
use crate::variables::TypeExpressionResolver;
use thiserror::Error;

type Result<T> = std::result::Result<T, Vec<VariableResolutionError>>;

/// Binds a raw variable payload to the variables one operation declares.
///
/// Binding is total: every declared variable gets an entry, taken from the
/// payload, else from the declared default, else `null`. Each value is then
/// resolved against the variable's type expression, and every failure across
/// all variables is reported together.
pub struct VariableBinder<'schema> {
    schema: &'schema Schema,
}
impl<'schema> VariableBinder<'schema> {
    pub fn new(schema: &'schema Schema) -> Self {
        Self { schema }
    }

    pub fn bind(
        &self,
        declarations: &VariableDeclarations,
        raw_variables: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<ResolvedVariableCollection> {
        let mut resolved = ResolvedVariableCollection::new();
        let mut errors = vec![];

        for declaration in declarations.values() {
            let name = declaration.name();
            let (raw_value, is_default) = match (raw_variables.get(name), declaration.default_value()) {
                (Some(raw_value), _) => (raw_value.clone(), false),
                (None, Some(default_value)) => (default_value.to_json(), true),
                (None, None) => (serde_json::Value::Null, false),
            };

            let path = format!("${name}");
            let value =
                TypeExpressionResolver::new(self.schema, declaration.type_expression(), &path)
                    .and_then(|resolver| resolver.resolve(&raw_value, &path));

            match value {
                Ok(value) => resolved.insert(ResolvedVariable {
                    is_default,
                    name: name.to_string(),
                    type_expression: declaration.type_expression().clone(),
                    value,
                }),
                Err(err) => {
                    tracing::debug!(variable = name, error = %err, "variable failed to resolve");
                    errors.push(err);
                },
            }
        }

        if errors.is_empty() {
            Ok(resolved)
        } else {
            Err(errors)
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum VariableResolutionError {
    #[error("`{path}` expected a value of type `{expected}` but got `{value}`")]
    InvalidValue {
        expected: String,
        path: String,
        value: serde_json::Value,
    },

    #[error("`{path}` is missing the required field `{field_name}` of input type `{type_name}`")]
    MissingRequiredInputField {
        field_name: String,
        path: String,
        type_name: String,
    },

    #[error("`{path}` is declared with `{type_name}`, which is not an input type")]
    NonInputType {
        path: String,
        type_name: String,
    },

    #[error("`{path}` is of non-null type `{type_expression}` but no value was provided")]
    NullForNonNullType {
        path: String,
        type_expression: TypeExpression,
    },

    #[error("`{path}` provides the field `{field_name}`, which `{type_name}` does not define")]
    UnknownInputField {
        field_name: String,
        path: String,
        type_name: String,
    },

    #[error("`{path}` is declared with the unknown type `{type_name}`")]
    UnknownType {
        path: String,
        type_name: String,
    },
}
impl VariableResolutionError {
    /// The variable path (e.g. `$filter.tags[1]`) the error applies to.
    pub fn path(&self) -> &str {
        match self {
            Self::InvalidValue { path, .. }
                | Self::MissingRequiredInputField { path, .. }
                | Self::NonInputType { path, .. }
                | Self::NullForNonNullType { path, .. }
                | Self::UnknownInputField { path, .. }
                | Self::UnknownType { path, .. } => path.as_str(),
        }
    }
}
