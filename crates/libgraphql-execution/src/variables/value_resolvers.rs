use crate::schema::EnumType;
use crate::schema::GraphType;
use crate::schema::InputObjectType;
use crate::schema::Schema;
use crate::schema::TypeExpression;
use crate::value::InputValue;
use crate::variables::VariableResolutionError;
use indexmap::IndexMap;
use inherent::inherent;

type Result<T> = std::result::Result<T, VariableResolutionError>;

/// Coerces one raw JSON value into an [`InputValue`] of a particular input
/// type. `path` names the value being resolved (e.g. `$filter.tags[1]`) for
/// error reporting.
pub trait InputValueResolver {
    fn resolve(&self, value: &serde_json::Value, path: &str) -> Result<InputValue>;
}

/// Resolves a value against a full [`TypeExpression`]: enforces its
/// nullability and delegates non-null values to the resolver for the
/// expression's list or named type.
pub struct TypeExpressionResolver<'schema> {
    inner: Box<dyn InputValueResolver + 'schema>,
    type_expression: TypeExpression,
}
impl<'schema> TypeExpressionResolver<'schema> {
    pub fn new(
        schema: &'schema Schema,
        type_expression: &TypeExpression,
        path: &str,
    ) -> Result<Self> {
        let inner: Box<dyn InputValueResolver + 'schema> = match type_expression {
            TypeExpression::List { inner, .. } =>
                Box::new(ListValueResolver {
                    item_resolver: TypeExpressionResolver::new(schema, inner, path)?,
                }),

            TypeExpression::Named { name, .. } => match schema.find_graph_type(name) {
                Some(GraphType::Enum(enum_t)) => Box::new(EnumValueResolver { enum_type: enum_t }),
                Some(GraphType::InputObject(inputobj_t)) =>
                    Box::new(InputObjectValueResolver { input_type: inputobj_t, schema }),
                Some(graph_type) if graph_type.is_leaf() =>
                    Box::new(ScalarValueResolver { graph_type }),
                Some(_) => return Err(VariableResolutionError::NonInputType {
                    path: path.to_string(),
                    type_name: name.to_string(),
                }),
                None => return Err(VariableResolutionError::UnknownType {
                    path: path.to_string(),
                    type_name: name.to_string(),
                }),
            },
        };

        Ok(Self {
            inner,
            type_expression: type_expression.clone(),
        })
    }
}
#[inherent]
impl<'schema> InputValueResolver for TypeExpressionResolver<'schema> {
    pub fn resolve(&self, value: &serde_json::Value, path: &str) -> Result<InputValue> {
        if value.is_null() {
            return if self.type_expression.nullable() {
                Ok(InputValue::Null)
            } else {
                Err(VariableResolutionError::NullForNonNullType {
                    path: path.to_string(),
                    type_expression: self.type_expression.clone(),
                })
            };
        }
        self.inner.resolve(value, path)
    }
}

/// Built-in and custom scalars. Custom scalars accept any JSON value as-is.
pub struct ScalarValueResolver<'schema> {
    graph_type: &'schema GraphType,
}
#[inherent]
impl<'schema> InputValueResolver for ScalarValueResolver<'schema> {
    pub fn resolve(&self, value: &serde_json::Value, path: &str) -> Result<InputValue> {
        let resolved = match (self.graph_type, value) {
            (GraphType::Boolean, serde_json::Value::Bool(flag)) =>
                Some(InputValue::Boolean(*flag)),

            (GraphType::Float, serde_json::Value::Number(num)) =>
                num.as_f64().map(InputValue::Float),

            (GraphType::Int, serde_json::Value::Number(num)) =>
                num.as_i64()
                    .filter(|num| i32::try_from(*num).is_ok())
                    .map(InputValue::Int),

            (GraphType::String, serde_json::Value::String(text)) =>
                Some(InputValue::String(text.to_string())),

            (GraphType::ID, serde_json::Value::String(text)) =>
                Some(InputValue::String(text.to_string())),

            (GraphType::ID, serde_json::Value::Number(num)) =>
                num.as_i64().map(|num| InputValue::String(num.to_string())),

            (GraphType::Scalar(_), value) => Some(InputValue::from_json(value)),

            _ => None,
        };

        resolved.ok_or_else(|| VariableResolutionError::InvalidValue {
            expected: self.graph_type.name().to_string(),
            path: path.to_string(),
            value: value.clone(),
        })
    }
}

pub struct EnumValueResolver<'schema> {
    enum_type: &'schema EnumType,
}
#[inherent]
impl<'schema> InputValueResolver for EnumValueResolver<'schema> {
    pub fn resolve(&self, value: &serde_json::Value, path: &str) -> Result<InputValue> {
        match value.as_str() {
            Some(name) if self.enum_type.has_value(name) =>
                Ok(InputValue::Enum(name.to_string())),
            _ => Err(VariableResolutionError::InvalidValue {
                expected: self.enum_type.name().to_string(),
                path: path.to_string(),
                value: value.clone(),
            }),
        }
    }
}

/// Lists. A single non-list value is coerced to a list of one item.
pub struct ListValueResolver<'schema> {
    item_resolver: TypeExpressionResolver<'schema>,
}
#[inherent]
impl<'schema> InputValueResolver for ListValueResolver<'schema> {
    pub fn resolve(&self, value: &serde_json::Value, path: &str) -> Result<InputValue> {
        let serde_json::Value::Array(items) = value else {
            return Ok(InputValue::List(vec![
                self.item_resolver.resolve(value, path)?,
            ]));
        };

        let mut resolved = Vec::with_capacity(items.len());
        for (idx, item) in items.iter().enumerate() {
            resolved.push(self.item_resolver.resolve(item, &format!("{path}[{idx}]"))?);
        }
        Ok(InputValue::List(resolved))
    }
}

/// Input objects. Field resolvers are created on demand so that recursive
/// input types resolve lazily.
pub struct InputObjectValueResolver<'schema> {
    input_type: &'schema InputObjectType,
    schema: &'schema Schema,
}
#[inherent]
impl<'schema> InputValueResolver for InputObjectValueResolver<'schema> {
    pub fn resolve(&self, value: &serde_json::Value, path: &str) -> Result<InputValue> {
        let serde_json::Value::Object(raw_fields) = value else {
            return Err(VariableResolutionError::InvalidValue {
                expected: self.input_type.name().to_string(),
                path: path.to_string(),
                value: value.clone(),
            });
        };

        if let Some(unknown) = raw_fields.keys().find(|key| self.input_type.field(key).is_none()) {
            return Err(VariableResolutionError::UnknownInputField {
                field_name: unknown.to_string(),
                path: path.to_string(),
                type_name: self.input_type.name().to_string(),
            });
        }

        let mut fields = IndexMap::new();
        for (field_name, field_def) in self.input_type.fields() {
            let field_path = format!("{path}.{field_name}");
            match (raw_fields.get(field_name), field_def.default_value()) {
                (Some(raw_value), _) => {
                    let resolver = TypeExpressionResolver::new(
                        self.schema,
                        field_def.type_expression(),
                        &field_path,
                    )?;
                    fields.insert(field_name.to_string(), resolver.resolve(raw_value, &field_path)?);
                },

                (None, Some(default_value)) => {
                    fields.insert(field_name.to_string(), default_value.clone());
                },

                (None, None) if field_def.type_expression().is_non_null() =>
                    return Err(VariableResolutionError::MissingRequiredInputField {
                        field_name: field_name.to_string(),
                        path: path.to_string(),
                        type_name: self.input_type.name().to_string(),
                    }),

                (None, None) => (),
            }
        }
        Ok(InputValue::Object(fields))
    }
}
