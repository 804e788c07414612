use crate::execution::ExecutionConfig;
use crate::schema::ArgumentDefinition;
use crate::schema::DirectiveDefinition;
use crate::schema::FieldDefinition;
use crate::schema::GraphType;
use crate::schema::SchemaBuilder;
use crate::schema::TypeAnalysisResult;
use crate::syntax::OperationType;
use std::collections::HashMap;
use std::collections::HashSet;

/// Represents a fully built and immutable schema: the index of named types,
/// fields, arguments and directives that query documents are bound against.
#[derive(Clone, Debug, PartialEq)]
pub struct Schema {
    pub(crate) directives: HashMap<String, DirectiveDefinition>,
    pub(crate) execution_config: ExecutionConfig,
    pub(crate) mutation_type: Option<String>,
    pub(crate) query_type: String,
    pub(crate) subscription_type: Option<String>,
    pub(crate) types: HashMap<String, GraphType>,
}
impl Schema {
    /// Helper function that just delegates to [`SchemaBuilder::new()`].
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// Returns a [`HashMap<String, GraphType>`] containing all types defined
    /// within this [`Schema`], including the built-in scalars.
    pub fn all_types(&self) -> &HashMap<String, GraphType> {
        &self.types
    }

    /// Returns all directives known to this [`Schema`], including built-in
    /// directives like `@skip`.
    pub fn all_directives(&self) -> &HashMap<String, DirectiveDefinition> {
        &self.directives
    }

    /// The per-schema execution policy.
    pub fn execution_config(&self) -> &ExecutionConfig {
        &self.execution_config
    }

    pub fn find_graph_type(&self, name: &str) -> Option<&GraphType> {
        self.types.get(name)
    }

    pub fn find_directive(&self, name: &str) -> Option<&DirectiveDefinition> {
        self.directives.get(name)
    }

    /// Look up a field by the name of the type that declares it and the field
    /// name. Only object and interface types declare fields.
    pub fn find_field(
        &self,
        owner_type_name: &str,
        field_name: &str,
    ) -> Option<&FieldDefinition> {
        self.find_graph_type(owner_type_name)
            .and_then(|graph_type| graph_type.field(field_name))
    }

    pub fn find_argument(
        &self,
        owner_type_name: &str,
        field_name: &str,
        argument_name: &str,
    ) -> Option<&ArgumentDefinition> {
        self.find_field(owner_type_name, field_name)
            .and_then(|field| field.argument(argument_name))
    }

    pub fn query_type(&self) -> &GraphType {
        self.types.get(self.query_type.as_str())
            .expect("query type is validated by SchemaBuilder::build()")
    }

    pub fn mutation_type(&self) -> Option<&GraphType> {
        self.mutation_type.as_ref()
            .and_then(|name| self.types.get(name.as_str()))
    }

    pub fn subscription_type(&self) -> Option<&GraphType> {
        self.subscription_type.as_ref()
            .and_then(|name| self.types.get(name.as_str()))
    }

    /// The root type for the given kind of operation, if the schema defines
    /// one.
    pub fn root_type(&self, operation_type: OperationType) -> Option<&GraphType> {
        match operation_type {
            OperationType::Query => Some(self.query_type()),
            OperationType::Mutation => self.mutation_type(),
            OperationType::Subscription => self.subscription_type(),
        }
    }

    /// The object types that values of `type_name` may be at runtime. For an
    /// object type this is the type itself; for a union its (known) members;
    /// for an interface every object type implementing it, directly or
    /// through another interface.
    pub fn possible_types(&self, type_name: &str) -> Vec<&str> {
        match self.types.get(type_name) {
            Some(GraphType::Object(obj_t)) => vec![obj_t.name()],
            Some(GraphType::Union(union_t)) =>
                union_t.members.iter()
                    .filter(|member| matches!(
                        self.types.get(member.as_str()),
                        Some(GraphType::Object(_)),
                    ))
                    .map(String::as_str)
                    .collect(),
            Some(GraphType::Interface(_)) => {
                let mut names: Vec<&str> =
                    self.types.values()
                        .filter_map(|graph_type| match graph_type {
                            GraphType::Object(obj_t)
                                if self.implements(obj_t.name(), type_name)
                                => Some(obj_t.name()),
                            _ => None,
                        })
                        .collect();
                names.sort_unstable();
                names
            },
            _ => vec![],
        }
    }

    /// Determine whether a value whose concrete runtime type is
    /// `concrete_type_name` can be used where `expected_type_name` is
    /// expected.
    pub fn analyze_runtime_concrete_type(
        &self,
        expected_type_name: &str,
        concrete_type_name: &str,
    ) -> TypeAnalysisResult {
        let Some(GraphType::Object(_)) = self.types.get(concrete_type_name) else {
            return TypeAnalysisResult::no_match();
        };

        if expected_type_name == concrete_type_name {
            return TypeAnalysisResult {
                exact_match_found: true,
                found_types: vec![concrete_type_name.to_string()],
            };
        }

        let compatible = match self.types.get(expected_type_name) {
            Some(GraphType::Union(union_t)) =>
                union_t.members.iter().any(|member| member == concrete_type_name),
            Some(GraphType::Interface(_)) =>
                self.implements(concrete_type_name, expected_type_name),
            _ => false,
        };

        if compatible {
            TypeAnalysisResult {
                exact_match_found: false,
                found_types: vec![concrete_type_name.to_string()],
            }
        } else {
            TypeAnalysisResult::no_match()
        }
    }

    /// Whether the object or interface named `type_name` implements the
    /// interface named `interface_name`, directly or transitively.
    pub fn implements(&self, type_name: &str, interface_name: &str) -> bool {
        let mut visited = HashSet::new();
        self.implements_impl(type_name, interface_name, &mut visited)
    }

    fn implements_impl<'a>(
        &'a self,
        type_name: &'a str,
        interface_name: &str,
        visited: &mut HashSet<&'a str>,
    ) -> bool {
        if !visited.insert(type_name) {
            return false;
        }

        let interfaces = match self.types.get(type_name) {
            Some(GraphType::Object(obj_t)) => &obj_t.interfaces,
            Some(GraphType::Interface(iface_t)) => &iface_t.interfaces,
            _ => return false,
        };

        interfaces.iter().any(|iface| {
            iface == interface_name
                || self.implements_impl(iface.as_str(), interface_name, visited)
        })
    }
}
