use crate::document::PartId;
use crate::document::PartKind;
use crate::document::QueryDocument;
use crate::document::SuppliedValue;
use crate::schema::ArgumentDefinition;
use crate::schema::Schema;
use crate::value::Arguments;
use crate::value::InputValue;
use crate::variables::ResolvedVariableCollection;
use crate::variables::TypeExpressionResolver;
use crate::variables::VariableResolutionError;
use indexmap::IndexMap;
use thiserror::Error;

type Result<T> = std::result::Result<T, ArgumentError>;

/// An argument value as written in the document. Variable references are
/// kept unresolved until a request supplies variables.
#[derive(Clone, Debug, PartialEq)]
pub enum ArgumentValue {
    List(Vec<ArgumentValue>),
    Literal(InputValue),
    Object(IndexMap<String, ArgumentValue>),
    Variable(String),
}
impl ArgumentValue {
    /// Read the value owned by a `SuppliedValue` part.
    pub(crate) fn from_part(document: &QueryDocument, id: PartId) -> Self {
        let part = document.part(id);
        let PartKind::SuppliedValue(supplied) = part.kind() else {
            return Self::Literal(InputValue::Null);
        };

        match supplied {
            SuppliedValue::Complex => Self::Object(
                document.children(id)
                    .filter_map(|field_part| match field_part.kind() {
                        PartKind::InputObjectField { name, .. } =>
                            Some((name.to_string(), Self::owned_by(document, field_part.id()))),
                        _ => None,
                    })
                    .collect(),
            ),
            SuppliedValue::Enum(value) => Self::Literal(InputValue::Enum(value.to_string())),
            SuppliedValue::List =>
                Self::List(part.children().iter().map(|item| Self::from_part(document, *item)).collect()),
            SuppliedValue::Null => Self::Literal(InputValue::Null),
            SuppliedValue::Scalar(literal) => Self::Literal(literal.to_input_value()),
            SuppliedValue::VariableRef { name } => Self::Variable(name.to_string()),
        }
    }

    /// The value held by an argument or input-object field part.
    pub(crate) fn owned_by(document: &QueryDocument, owner: PartId) -> Self {
        match document.part(owner).children().first() {
            Some(value) => Self::from_part(document, *value),
            None => Self::Literal(InputValue::Null),
        }
    }

    fn to_json(
        &self,
        argument: &str,
        variables: &ResolvedVariableCollection,
    ) -> Result<serde_json::Value> {
        Ok(match self {
            Self::List(items) => serde_json::Value::Array(
                items.iter()
                    .map(|item| item.to_json(argument, variables))
                    .collect::<Result<_>>()?,
            ),
            Self::Literal(value) => value.to_json(),
            Self::Object(fields) => serde_json::Value::Object(
                fields.iter()
                    .map(|(name, value)| {
                        value.to_json(argument, variables).map(|json| (name.to_string(), json))
                    })
                    .collect::<Result<_>>()?,
            ),
            Self::Variable(name) => match variables.value(name) {
                Some(value) => value.to_json(),
                None => return Err(ArgumentError::UndeclaredVariable {
                    argument: argument.to_string(),
                    variable: name.to_string(),
                }),
            },
        })
    }
}

/// The arguments of one field or directive: what the schema declares and
/// what the document supplied.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArgumentSet {
    pub(crate) definitions: IndexMap<String, ArgumentDefinition>,
    pub(crate) supplied: IndexMap<String, ArgumentValue>,
}
impl ArgumentSet {
    pub fn new(
        definitions: IndexMap<String, ArgumentDefinition>,
        supplied: IndexMap<String, ArgumentValue>,
    ) -> Self {
        Self { definitions, supplied }
    }

    pub fn definitions(&self) -> &IndexMap<String, ArgumentDefinition> {
        &self.definitions
    }

    pub fn supplied(&self) -> &IndexMap<String, ArgumentValue> {
        &self.supplied
    }

    /// Produce the concrete arguments for one request.
    ///
    /// Every declared argument that was supplied, or has a default, is
    /// resolved against its declared type. Variable references take the
    /// request's value for the variable; an explicit `null` is kept and does
    /// not fall back to the argument's default.
    pub fn materialize(
        &self,
        schema: &Schema,
        variables: &ResolvedVariableCollection,
    ) -> Result<Arguments> {
        let mut values = IndexMap::new();
        for (name, definition) in &self.definitions {
            let raw_value = match (self.supplied.get(name), definition.default_value()) {
                (Some(supplied), _) => supplied.to_json(name, variables)?,
                (None, Some(default_value)) => default_value.to_json(),
                (None, None) if definition.type_expression().is_non_null() =>
                    return Err(ArgumentError::MissingRequired {
                        argument: name.to_string(),
                    }),
                (None, None) => continue,
            };

            let value =
                TypeExpressionResolver::new(schema, definition.type_expression(), name)
                    .and_then(|resolver| resolver.resolve(&raw_value, name))
                    .map_err(|source| ArgumentError::Invalid {
                        argument: name.to_string(),
                        source,
                    })?;
            values.insert(name.to_string(), value);
        }
        Ok(Arguments::new(values))
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ArgumentError {
    #[error("Invalid value for the argument `{argument}`: {source}")]
    Invalid {
        argument: String,
        source: VariableResolutionError,
    },

    #[error("The required argument `{argument}` was not supplied")]
    MissingRequired {
        argument: String,
    },

    #[error("The argument `{argument}` refers to the undeclared variable `${variable}`")]
    UndeclaredVariable {
        argument: String,
        variable: String,
    },
}
