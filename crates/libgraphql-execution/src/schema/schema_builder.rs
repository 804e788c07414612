use crate::ast;
use crate::execution::ExecutionConfig;
use crate::loc::SourceLocation;
use crate::schema::ArgumentDefinition;
use crate::schema::DirectiveDefinition;
use crate::schema::EnumType;
use crate::schema::FieldDefinition;
use crate::schema::GraphType;
use crate::schema::InputObjectType;
use crate::schema::InterfaceType;
use crate::schema::ObjectType;
use crate::schema::ScalarType;
use crate::schema::Schema;
use crate::schema::TypeExpression;
use crate::schema::UnionType;
use crate::syntax::OperationType;
use crate::value::InputValue;
use indexmap::IndexMap;
use std::collections::HashMap;
use thiserror::Error;

type Result<T> = std::result::Result<T, SchemaBuildError>;

const BUILTIN_SCALAR_NAMES: [&str; 5] = ["Boolean", "Float", "ID", "Int", "String"];

/// Utility for building a [`Schema`] from one or more SDL documents.
///
/// ```
/// use libgraphql_execution::schema::SchemaBuilder;
///
/// let schema = SchemaBuilder::from_str("type Query { hello: String }")
///     .unwrap()
///     .build()
///     .unwrap();
/// assert!(schema.find_field("Query", "hello").is_some());
/// ```
#[derive(Debug)]
pub struct SchemaBuilder {
    directives: HashMap<String, DirectiveDefinition>,
    execution_config: ExecutionConfig,
    extensions: Vec<ast::schema::TypeExtension>,
    mutation_type: Option<(String, SourceLocation)>,
    query_type: Option<(String, SourceLocation)>,
    subscription_type: Option<(String, SourceLocation)>,
    types: HashMap<String, GraphType>,
}
impl SchemaBuilder {
    pub fn new() -> Self {
        let mut types = HashMap::new();
        types.insert("Boolean".to_string(), GraphType::Boolean);
        types.insert("Float".to_string(), GraphType::Float);
        types.insert("ID".to_string(), GraphType::ID);
        types.insert("Int".to_string(), GraphType::Int);
        types.insert("String".to_string(), GraphType::String);

        Self {
            directives: HashMap::new(),
            execution_config: ExecutionConfig::default(),
            extensions: vec![],
            mutation_type: None,
            query_type: None,
            subscription_type: None,
            types,
        }
    }

    /// Produce a [`SchemaBuilder`] with the contents of a single SDL string
    /// already loaded.
    pub fn from_str(content: impl AsRef<str>) -> Result<Self> {
        Self::new().load_str(content)
    }

    /// Set the per-schema execution policy.
    pub fn execution_config(mut self, config: ExecutionConfig) -> Self {
        self.execution_config = config;
        self
    }

    pub fn load_str(mut self, content: impl AsRef<str>) -> Result<Self> {
        let ast_doc = ast::schema::parse(content.as_ref())
            .map_err(|err| SchemaBuildError::ParseError {
                err: err.to_string(),
            })?;

        for def in ast_doc.definitions {
            self.visit_ast_def(def)?;
        }

        Ok(self)
    }

    pub fn build(mut self) -> Result<Schema> {
        for ext in std::mem::take(&mut self.extensions) {
            self.apply_type_extension(ext)?;
        }

        for directive in [
            DirectiveDefinition::builtin_deprecated(),
            DirectiveDefinition::builtin_include(),
            DirectiveDefinition::builtin_skip(),
        ] {
            self.directives.entry(directive.name.to_string()).or_insert(directive);
        }

        let query_type = self.resolve_root_type(OperationType::Query)?
            .ok_or(SchemaBuildError::NoQueryOperationTypeDefined)?;
        let mutation_type = self.resolve_root_type(OperationType::Mutation)?;
        let subscription_type = self.resolve_root_type(OperationType::Subscription)?;

        self.check_type_references()?;

        Ok(Schema {
            directives: self.directives,
            execution_config: self.execution_config,
            mutation_type,
            query_type,
            subscription_type,
            types: self.types,
        })
    }

    fn resolve_root_type(
        &mut self,
        operation_type: OperationType,
    ) -> Result<Option<String>> {
        let (explicit, default_name) = match operation_type {
            OperationType::Query => (self.query_type.take(), "Query"),
            OperationType::Mutation => (self.mutation_type.take(), "Mutation"),
            OperationType::Subscription =>
                (self.subscription_type.take(), "Subscription"),
        };

        match explicit {
            Some((type_name, location)) => match self.types.get(&type_name) {
                Some(GraphType::Object(_)) => Ok(Some(type_name)),
                _ => Err(SchemaBuildError::UndefinedRootOperationType {
                    location,
                    operation_type,
                    type_name,
                }),
            },
            None => match self.types.get(default_name) {
                Some(GraphType::Object(_)) => Ok(Some(default_name.to_string())),
                _ => Ok(None),
            },
        }
    }

    fn check_type_references(&self) -> Result<()> {
        let assert_defined = |type_expr: &TypeExpression, referenced_from: String, location: &SourceLocation| {
            let type_name = type_expr.innermost_type_name();
            if self.types.contains_key(type_name) {
                Ok(())
            } else {
                Err(SchemaBuildError::UndefinedTypeReference {
                    location: *location,
                    referenced_from,
                    type_name: type_name.to_string(),
                })
            }
        };

        for graph_type in self.types.values() {
            if let Some(fields) = graph_type.fields() {
                for field in fields.values() {
                    assert_defined(
                        &field.type_expression,
                        format!("{}.{}", graph_type.name(), field.name),
                        &field.def_location,
                    )?;
                    for arg in field.arguments.values() {
                        assert_defined(
                            &arg.type_expression,
                            format!("{}.{}({}:)", graph_type.name(), field.name, arg.name),
                            &arg.def_location,
                        )?;
                    }
                }
            }

            match graph_type {
                GraphType::InputObject(inputobj_t) => {
                    for field in inputobj_t.fields.values() {
                        assert_defined(
                            &field.type_expression,
                            format!("{}.{}", inputobj_t.name, field.name),
                            &field.def_location,
                        )?;
                    }
                },

                GraphType::Union(union_t) => {
                    for member in &union_t.members {
                        if !matches!(self.types.get(member), Some(GraphType::Object(_))) {
                            return Err(SchemaBuildError::InvalidUnionMember {
                                location: union_t.def_location,
                                member_name: member.to_string(),
                                union_name: union_t.name.to_string(),
                            });
                        }
                    }
                },

                GraphType::Object(ObjectType { interfaces, def_location, name, .. })
                    | GraphType::Interface(InterfaceType { interfaces, def_location, name, .. }) => {
                    for iface in interfaces {
                        if !matches!(self.types.get(iface), Some(GraphType::Interface(_))) {
                            return Err(SchemaBuildError::InvalidInterfaceReference {
                                interface_name: iface.to_string(),
                                location: *def_location,
                                type_name: name.to_string(),
                            });
                        }
                    }
                },

                _ => (),
            }
        }

        for directive in self.directives.values() {
            for arg in directive.arguments.values() {
                assert_defined(
                    &arg.type_expression,
                    format!("@{}({}:)", directive.name, arg.name),
                    &arg.def_location,
                )?;
            }
        }

        Ok(())
    }

    fn visit_ast_def(&mut self, def: ast::schema::Definition) -> Result<()> {
        use graphql_parser::schema::Definition;
        match def {
            Definition::SchemaDefinition(schema_def) =>
                self.visit_ast_schemablock_def(schema_def),
            Definition::TypeDefinition(type_def) =>
                self.visit_ast_type_def(type_def),
            Definition::TypeExtension(type_ext) => {
                self.extensions.push(type_ext);
                Ok(())
            },
            Definition::DirectiveDefinition(directive_def) =>
                self.visit_ast_directive_def(directive_def),
        }
    }

    fn visit_ast_directive_def(
        &mut self,
        def: ast::schema::DirectiveDefinition,
    ) -> Result<()> {
        let location = SourceLocation::from_ast_pos(def.position);

        if matches!(def.name.as_str(), "skip" | "include" | "deprecated") {
            return Err(SchemaBuildError::RedefinitionOfBuiltinDirective {
                directive_name: def.name,
                location,
            });
        }

        if let Some(existing) = self.directives.get(def.name.as_str()) {
            return Err(SchemaBuildError::DuplicateDirectiveDefinition {
                directive_name: def.name.to_string(),
                location1: existing.def_location,
                location2: location,
            });
        }

        self.directives.insert(def.name.to_string(), DirectiveDefinition {
            arguments: arguments_from_ast(&def.arguments),
            builtin: false,
            def_location: location,
            locations: def.locations.iter().map(|loc| loc.as_str().to_string()).collect(),
            name: def.name.to_string(),
            repeatable: def.repeatable,
        });

        Ok(())
    }

    fn visit_ast_schemablock_def(
        &mut self,
        schema_def: ast::schema::SchemaDefinition,
    ) -> Result<()> {
        let location = SourceLocation::from_ast_pos(schema_def.position);
        for (operation_type, type_name, slot) in [
            (OperationType::Query, schema_def.query, &mut self.query_type),
            (OperationType::Mutation, schema_def.mutation, &mut self.mutation_type),
            (OperationType::Subscription, schema_def.subscription, &mut self.subscription_type),
        ] {
            let Some(type_name) = type_name else {
                continue;
            };
            if let Some((_, existing_location)) = slot {
                return Err(SchemaBuildError::DuplicateOperationDefinition {
                    location1: *existing_location,
                    location2: location,
                    operation_type,
                });
            }
            *slot = Some((type_name, location));
        }

        Ok(())
    }

    fn visit_ast_type_def(
        &mut self,
        type_def: ast::schema::TypeDefinition,
    ) -> Result<()> {
        use graphql_parser::schema::TypeDefinition;
        let (name, location, graph_type) = match type_def {
            TypeDefinition::Scalar(def) => {
                let location = SourceLocation::from_ast_pos(def.position);
                (def.name.to_string(), location, GraphType::Scalar(ScalarType {
                    def_location: location,
                    name: def.name,
                }))
            },

            TypeDefinition::Object(def) => {
                let location = SourceLocation::from_ast_pos(def.position);
                (def.name.to_string(), location, GraphType::Object(ObjectType {
                    def_location: location,
                    description: def.description,
                    fields: fields_from_ast(&def.name, &def.fields)?,
                    interfaces: def.implements_interfaces,
                    name: def.name,
                }))
            },

            TypeDefinition::Interface(def) => {
                let location = SourceLocation::from_ast_pos(def.position);
                (def.name.to_string(), location, GraphType::Interface(InterfaceType {
                    def_location: location,
                    description: def.description,
                    fields: fields_from_ast(&def.name, &def.fields)?,
                    interfaces: def.implements_interfaces,
                    name: def.name,
                }))
            },

            TypeDefinition::Union(def) => {
                let location = SourceLocation::from_ast_pos(def.position);
                (def.name.to_string(), location, GraphType::Union(UnionType {
                    def_location: location,
                    members: def.types,
                    name: def.name,
                }))
            },

            TypeDefinition::Enum(def) => {
                let location = SourceLocation::from_ast_pos(def.position);
                (def.name.to_string(), location, GraphType::Enum(EnumType {
                    def_location: location,
                    name: def.name,
                    values: def.values.into_iter().map(|value| value.name).collect(),
                }))
            },

            TypeDefinition::InputObject(def) => {
                let location = SourceLocation::from_ast_pos(def.position);
                (def.name.to_string(), location, GraphType::InputObject(InputObjectType {
                    def_location: location,
                    fields: arguments_from_ast(&def.fields),
                    name: def.name,
                }))
            },
        };

        if BUILTIN_SCALAR_NAMES.contains(&name.as_str()) {
            return Err(SchemaBuildError::RedefinitionOfBuiltinType {
                location,
                type_name: name,
            });
        }

        if let Some(existing) = self.types.get(&name) {
            return Err(SchemaBuildError::DuplicateTypeDefinition {
                location1: type_def_location(existing),
                location2: location,
                type_name: name,
            });
        }

        self.types.insert(name, graph_type);
        Ok(())
    }

    fn apply_type_extension(&mut self, ext: ast::schema::TypeExtension) -> Result<()> {
        use graphql_parser::schema::TypeExtension;
        let (name, position) = match &ext {
            TypeExtension::Scalar(ext) => (ext.name.to_string(), ext.position),
            TypeExtension::Object(ext) => (ext.name.to_string(), ext.position),
            TypeExtension::Interface(ext) => (ext.name.to_string(), ext.position),
            TypeExtension::Union(ext) => (ext.name.to_string(), ext.position),
            TypeExtension::Enum(ext) => (ext.name.to_string(), ext.position),
            TypeExtension::InputObject(ext) => (ext.name.to_string(), ext.position),
        };
        let location = SourceLocation::from_ast_pos(position);

        let Some(graph_type) = self.types.get_mut(&name) else {
            return Err(SchemaBuildError::ExtensionOfUndefinedType {
                location,
                type_name: name,
            });
        };

        match (graph_type, ext) {
            (GraphType::Scalar(_), TypeExtension::Scalar(_)) => (),

            (GraphType::Object(obj_t), TypeExtension::Object(ext)) => {
                merge_fields(&name, &mut obj_t.fields, fields_from_ast(&name, &ext.fields)?)?;
                obj_t.interfaces.extend(ext.implements_interfaces);
            },

            (GraphType::Interface(iface_t), TypeExtension::Interface(ext)) => {
                merge_fields(&name, &mut iface_t.fields, fields_from_ast(&name, &ext.fields)?)?;
                iface_t.interfaces.extend(ext.implements_interfaces);
            },

            (GraphType::Union(union_t), TypeExtension::Union(ext)) =>
                union_t.members.extend(ext.types),

            (GraphType::Enum(enum_t), TypeExtension::Enum(ext)) =>
                enum_t.values.extend(ext.values.into_iter().map(|value| value.name)),

            (GraphType::InputObject(inputobj_t), TypeExtension::InputObject(ext)) =>
                inputobj_t.fields.extend(arguments_from_ast(&ext.fields)),

            _ => return Err(SchemaBuildError::InvalidExtensionType {
                location,
                type_name: name,
            }),
        }

        Ok(())
    }
}
impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn type_def_location(graph_type: &GraphType) -> SourceLocation {
    match graph_type {
        GraphType::Enum(t) => t.def_location,
        GraphType::InputObject(t) => t.def_location,
        GraphType::Interface(t) => t.def_location,
        GraphType::Object(t) => t.def_location,
        GraphType::Scalar(t) => t.def_location,
        GraphType::Union(t) => t.def_location,
        GraphType::Boolean
            | GraphType::Float
            | GraphType::ID
            | GraphType::Int
            | GraphType::String => SourceLocation::synthetic(),
    }
}

fn merge_fields(
    type_name: &str,
    fields: &mut IndexMap<String, FieldDefinition>,
    new_fields: IndexMap<String, FieldDefinition>,
) -> Result<()> {
    for (field_name, field) in new_fields {
        if fields.contains_key(&field_name) {
            return Err(SchemaBuildError::DuplicateFieldDefinition {
                field_name,
                location: field.def_location,
                type_name: type_name.to_string(),
            });
        }
        fields.insert(field_name, field);
    }
    Ok(())
}

fn fields_from_ast(
    owner_type_name: &str,
    ast_fields: &[ast::schema::Field],
) -> Result<IndexMap<String, FieldDefinition>> {
    let mut fields = IndexMap::new();
    for ast_field in ast_fields {
        let location = SourceLocation::from_ast_pos(ast_field.position);
        if fields.contains_key(&ast_field.name) {
            return Err(SchemaBuildError::DuplicateFieldDefinition {
                field_name: ast_field.name.to_string(),
                location,
                type_name: owner_type_name.to_string(),
            });
        }
        fields.insert(ast_field.name.to_string(), FieldDefinition {
            arguments: arguments_from_ast(&ast_field.arguments),
            def_location: location,
            description: ast_field.description.clone(),
            name: ast_field.name.to_string(),
            owner_type_name: owner_type_name.to_string(),
            type_expression: TypeExpression::from_ast_type(&ast_field.field_type),
        });
    }
    Ok(fields)
}

fn arguments_from_ast(
    ast_args: &[ast::schema::InputValue],
) -> IndexMap<String, ArgumentDefinition> {
    ast_args.iter().map(|ast_arg| (
        ast_arg.name.to_string(),
        ArgumentDefinition {
            def_location: SourceLocation::from_ast_pos(ast_arg.position),
            default_value: ast_arg.default_value.as_ref().map(const_value_from_ast),
            name: ast_arg.name.to_string(),
            type_expression: TypeExpression::from_ast_type(&ast_arg.value_type),
        },
    )).collect()
}

/// Convert a constant (variable-free) AST value into an [`InputValue`].
/// Variables cannot appear in SDL defaults and are treated as `null`.
pub(crate) fn const_value_from_ast(ast_value: &ast::Value) -> InputValue {
    use graphql_parser::query::Value;
    match ast_value {
        Value::Variable(_) | Value::Null => InputValue::Null,
        Value::Int(num) => num.as_i64().map(InputValue::Int).unwrap_or(InputValue::Null),
        Value::Float(value) => InputValue::Float(*value),
        Value::String(value) => InputValue::String(value.to_string()),
        Value::Boolean(value) => InputValue::Boolean(*value),
        Value::Enum(value) => InputValue::Enum(value.to_string()),
        Value::List(values) =>
            InputValue::List(values.iter().map(const_value_from_ast).collect()),
        Value::Object(entries) =>
            InputValue::Object(
                entries.iter()
                    .map(|(key, value)| (key.to_string(), const_value_from_ast(value)))
                    .collect(),
            ),
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum SchemaBuildError {
    #[error("Found multiple definitions of the `@{directive_name}` directive")]
    DuplicateDirectiveDefinition {
        directive_name: String,
        location1: SourceLocation,
        location2: SourceLocation,
    },

    #[error("The `{field_name}` field is defined more than once on `{type_name}`")]
    DuplicateFieldDefinition {
        field_name: String,
        location: SourceLocation,
        type_name: String,
    },

    #[error("The {operation_type} root operation type is declared more than once")]
    DuplicateOperationDefinition {
        location1: SourceLocation,
        location2: SourceLocation,
        operation_type: OperationType,
    },

    #[error("Found multiple definitions of the `{type_name}` type")]
    DuplicateTypeDefinition {
        location1: SourceLocation,
        location2: SourceLocation,
        type_name: String,
    },

    #[error("Attempted to extend the `{type_name}` type, but no such type is defined")]
    ExtensionOfUndefinedType {
        location: SourceLocation,
        type_name: String,
    },

    #[error("`{type_name}` implements `{interface_name}`, which is not an interface type")]
    InvalidInterfaceReference {
        interface_name: String,
        location: SourceLocation,
        type_name: String,
    },

    #[error("The extension of `{type_name}` does not match the kind of the extended type")]
    InvalidExtensionType {
        location: SourceLocation,
        type_name: String,
    },

    #[error("Union `{union_name}` lists `{member_name}`, which is not an object type")]
    InvalidUnionMember {
        location: SourceLocation,
        member_name: String,
        union_name: String,
    },

    #[error("No Query root operation type is defined")]
    NoQueryOperationTypeDefined,

    #[error("Error parsing schema document: {err}")]
    ParseError {
        err: String,
    },

    #[error("The built-in `@{directive_name}` directive cannot be redefined")]
    RedefinitionOfBuiltinDirective {
        directive_name: String,
        location: SourceLocation,
    },

    #[error("The built-in `{type_name}` scalar cannot be redefined")]
    RedefinitionOfBuiltinType {
        location: SourceLocation,
        type_name: String,
    },

    #[error("The {operation_type} root operation type `{type_name}` is not a defined object type")]
    UndefinedRootOperationType {
        location: SourceLocation,
        operation_type: OperationType,
        type_name: String,
    },

    #[error("`{referenced_from}` references the `{type_name}` type, which is not defined")]
    UndefinedTypeReference {
        location: SourceLocation,
        referenced_from: String,
        type_name: String,
    },
}
