use crate::document::DocumentPart;
use crate::document::PartId;
use crate::document::PartKind;
use crate::document::QueryDocument;
use crate::error_codes;
use crate::loc::SourceLocation;
use crate::messages::GraphMessage;
use crate::messages::MessageCollection;
use crate::messages::SourceOrigin;
use crate::plan::ArgumentSet;
use crate::plan::ArgumentValue;
use crate::plan::DirectiveInvocation;
use crate::plan::ExecutionPlan;
use crate::plan::FieldInvocationContext;
use crate::resolvers::DirectiveRegistry;
use crate::resolvers::FieldResolverKind;
use crate::resolvers::ResolverRegistry;
use crate::schema::ArgumentDefinition;
use crate::schema::FieldDefinition;
use crate::schema::Schema;
use crate::schema::TypeExpression;
use indexmap::IndexMap;

type Result<T> = std::result::Result<T, MessageCollection>;

const TYPENAME_FIELD: &str = "__typename";

/// Compiles one operation of a linked [`QueryDocument`] into an
/// [`ExecutionPlan`].
///
/// Fragments are flattened: every field a fragment contributes becomes a
/// child invocation of the enclosing selection whose source type is the
/// fragment's type condition, and the fragment's directives run before the
/// field's own. Anything the document could not bind to the schema is
/// reported as a critical message and fails the build.
pub struct ExecutionPlanBuilder<'schema> {
    directives: DirectiveRegistry,
    resolvers: ResolverRegistry,
    schema: &'schema Schema,
}
impl<'schema> ExecutionPlanBuilder<'schema> {
    pub fn new(schema: &'schema Schema) -> Self {
        Self {
            directives: DirectiveRegistry::new(),
            resolvers: ResolverRegistry::new(),
            schema,
        }
    }

    pub fn with_directives(mut self, directives: DirectiveRegistry) -> Self {
        self.directives = directives;
        self
    }

    pub fn with_resolvers(mut self, resolvers: ResolverRegistry) -> Self {
        self.resolvers = resolvers;
        self
    }

    /// Build the plan for the operation named `operation_name` (or the
    /// document's only operation). Fails with every message recorded so far
    /// if any of them, including the document's own, is critical.
    pub fn build(
        &self,
        document: &QueryDocument,
        operation_name: Option<&str>,
    ) -> Result<ExecutionPlan<'schema>> {
        let mut walk = PlanWalk {
            builder: self,
            depth_exceeded: false,
            document,
            fragment_stack: vec![],
            messages: document.messages().clone(),
        };

        let Some(operation_id) = document.operation(operation_name) else {
            walk.messages.add(GraphMessage::critical(
                error_codes::UNKNOWN_OPERATION,
                match operation_name {
                    Some(name) => format!("The document contains no operation named `{name}`"),
                    None => format!(
                        "An operation name is required to pick one of the {} operations in \
                        the document",
                        document.operations().len(),
                    ),
                },
                SourceOrigin::none(),
            ));
            return Err(walk.messages);
        };

        let operation = document.part(operation_id);
        let PartKind::Operation { name, operation_type } = operation.kind() else {
            return Err(walk.messages);
        };
        let Some(root_type) = self.schema.root_type(*operation_type) else {
            walk.messages.add(GraphMessage::critical(
                error_codes::UNKNOWN_TYPE,
                format!("The schema does not support {operation_type} operations"),
                SourceOrigin::at_location(*operation.location()),
            ));
            return Err(walk.messages);
        };
        let root_type_name = root_type.name().to_string();

        let fields = match selection_set_of(document, operation_id) {
            Some(selection_set) => walk.collect_fields(selection_set, &root_type_name, &[], 1),
            None => vec![],
        };

        if walk.messages.has_critical() {
            tracing::debug!(
                operation = name.as_deref().unwrap_or("<anonymous>"),
                critical = walk.messages.critical().count(),
                "execution plan rejected",
            );
            return Err(walk.messages);
        }

        tracing::debug!(
            operation = name.as_deref().unwrap_or("<anonymous>"),
            root_fields = fields.len(),
            "built execution plan",
        );
        Ok(ExecutionPlan {
            fields,
            messages: walk.messages,
            operation_name: name.clone(),
            operation_type: *operation_type,
            root_type_name,
            schema: self.schema,
            variables: document.variable_declarations(operation_id).cloned().unwrap_or_default(),
        })
    }

    fn find_resolver(
        &self,
        source_type: &str,
        definition: &FieldDefinition,
    ) -> FieldResolverKind {
        self.resolvers.find(source_type, definition.name())
            .or_else(|| self.resolvers.find(definition.owner_type_name(), definition.name()))
            .cloned()
            .unwrap_or_else(|| FieldResolverKind::Property {
                property: definition.name().to_string(),
            })
    }
}

fn selection_set_of(document: &QueryDocument, owner: PartId) -> Option<PartId> {
    document.children(owner)
        .find(|part| matches!(part.kind(), PartKind::FieldSelectionSet))
        .map(DocumentPart::id)
}

struct PlanWalk<'a, 'schema> {
    builder: &'a ExecutionPlanBuilder<'schema>,
    depth_exceeded: bool,
    document: &'a QueryDocument,
    fragment_stack: Vec<PartId>,
    messages: MessageCollection,
}
impl<'a, 'schema> PlanWalk<'a, 'schema> {
    fn collect_fields(
        &mut self,
        selection_set: PartId,
        source_type: &str,
        inherited: &[DirectiveInvocation],
        depth: usize,
    ) -> Vec<FieldInvocationContext> {
        let document = self.document;
        let mut fields = vec![];

        for part in document.children(selection_set) {
            match part.kind() {
                PartKind::Field { alias, definition, name } => {
                    let Some(definition) = definition else {
                        self.critical(
                            error_codes::UNKNOWN_FIELD,
                            format!("The type `{source_type}` has no field named `{name}`"),
                            part.location(),
                        );
                        continue;
                    };
                    fields.push(self.field_invocation(
                        part,
                        alias.as_deref(),
                        definition,
                        source_type,
                        inherited,
                        depth,
                    ));
                },

                PartKind::FieldTypeName { alias, owner_type_name } => {
                    let mut directives = inherited.to_vec();
                    directives.extend(self.directives_of(part.id()));
                    self.reject_arguments(part.id(), TYPENAME_FIELD, &IndexMap::new());
                    fields.push(FieldInvocationContext {
                        arguments: ArgumentSet::default(),
                        children: vec![],
                        directives,
                        field_name: TYPENAME_FIELD.to_string(),
                        location: *part.location(),
                        resolver: FieldResolverKind::TypeName,
                        response_key: alias.as_deref().unwrap_or(TYPENAME_FIELD).to_string(),
                        return_type: TypeExpression::named("String", false),
                        source_type: owner_type_name.as_deref().unwrap_or(source_type).to_string(),
                    });
                },

                PartKind::InlineFragment { type_condition } => {
                    let Some(fragment_type) = part.graph_type_name() else {
                        self.critical(
                            error_codes::UNKNOWN_TYPE,
                            format!(
                                "The inline fragment's type condition `{}` is not a type in \
                                the schema",
                                type_condition.as_deref().unwrap_or(source_type),
                            ),
                            part.location(),
                        );
                        continue;
                    };
                    let mut directives = inherited.to_vec();
                    directives.extend(self.directives_of(part.id()));
                    if let Some(nested) = selection_set_of(document, part.id()) {
                        fields.extend(self.collect_fields(nested, fragment_type, &directives, depth));
                    }
                },

                PartKind::FragmentSpread { name, target } => {
                    // The linker reports unknown and cyclic spreads.
                    let Some(target) = *target else {
                        continue;
                    };
                    if self.fragment_stack.contains(&target) {
                        tracing::trace!(fragment = name.as_str(), "not re-entering fragment");
                        continue;
                    }

                    let fragment = document.part(target);
                    let Some(fragment_type) = fragment.graph_type_name() else {
                        let type_condition = match fragment.kind() {
                            PartKind::NamedFragment { type_condition, .. } => type_condition.as_str(),
                            _ => "",
                        };
                        self.critical(
                            error_codes::UNKNOWN_TYPE,
                            format!(
                                "The type condition `{type_condition}` of the fragment `{name}` \
                                is not a type in the schema",
                            ),
                            fragment.location(),
                        );
                        continue;
                    };

                    let mut directives = inherited.to_vec();
                    directives.extend(self.directives_of(part.id()));
                    directives.extend(self.directives_of(target));
                    if let Some(nested) = selection_set_of(document, target) {
                        self.fragment_stack.push(target);
                        fields.extend(self.collect_fields(nested, fragment_type, &directives, depth));
                        self.fragment_stack.pop();
                    }
                },

                _ => (),
            }
        }

        fields
    }

    fn field_invocation(
        &mut self,
        part: &DocumentPart,
        alias: Option<&str>,
        definition: &FieldDefinition,
        source_type: &str,
        inherited: &[DirectiveInvocation],
        depth: usize,
    ) -> FieldInvocationContext {
        let mut directives = inherited.to_vec();
        directives.extend(self.directives_of(part.id()));
        let supplied = self.reject_arguments(part.id(), definition.name(), definition.arguments());

        let return_type = definition.type_expression().clone();
        let mut children = vec![];
        if let Some(selection_set) = selection_set_of(self.document, part.id()) {
            if self.within_depth(depth + 1, part.location()) {
                children = self.collect_fields(
                    selection_set,
                    return_type.innermost_type_name(),
                    &[],
                    depth + 1,
                );
            }
        }

        FieldInvocationContext {
            arguments: ArgumentSet::new(definition.arguments().clone(), supplied),
            children,
            directives,
            field_name: definition.name().to_string(),
            location: *part.location(),
            resolver: self.builder.find_resolver(source_type, definition),
            response_key: alias.unwrap_or(definition.name()).to_string(),
            return_type,
            source_type: source_type.to_string(),
        }
    }

    /// The arguments supplied on `owner`. Arguments with no declaration are
    /// reported and dropped.
    fn reject_arguments(
        &mut self,
        owner: PartId,
        owner_name: &str,
        declared: &IndexMap<String, ArgumentDefinition>,
    ) -> IndexMap<String, ArgumentValue> {
        let document = self.document;
        let mut supplied = IndexMap::new();
        for part in document.children(owner) {
            let PartKind::InputArgument { name, .. } = part.kind() else {
                continue;
            };
            if !declared.contains_key(name) {
                self.critical(
                    error_codes::INVALID_ARGUMENT,
                    format!("`{owner_name}` has no argument named `{name}`"),
                    part.location(),
                );
                continue;
            }
            supplied.insert(name.to_string(), ArgumentValue::owned_by(document, part.id()));
        }
        supplied
    }

    fn directives_of(&mut self, owner: PartId) -> Vec<DirectiveInvocation> {
        let builder = self.builder;
        let document = self.document;
        let mut directives = vec![];
        for part in document.children(owner) {
            let PartKind::Directive { definition, name } = part.kind() else {
                continue;
            };
            let Some(definition) = definition else {
                self.critical(
                    error_codes::UNKNOWN_DIRECTIVE,
                    format!("The schema defines no directive named `@{name}`"),
                    part.location(),
                );
                continue;
            };
            let Some(registered) = builder.directives.find(name) else {
                self.critical(
                    error_codes::UNKNOWN_DIRECTIVE,
                    format!("No resolver is registered for the directive `@{name}`"),
                    part.location(),
                );
                continue;
            };

            let supplied =
                self.reject_arguments(part.id(), &format!("@{name}"), definition.arguments());
            directives.push(DirectiveInvocation {
                arguments: ArgumentSet::new(definition.arguments().clone(), supplied),
                location: *part.location(),
                name: name.to_string(),
                phase: registered.phase,
                resolver: registered.resolver.clone(),
            });
        }
        directives
    }

    fn within_depth(&mut self, depth: usize, location: &SourceLocation) -> bool {
        let Some(max_depth) = self.builder.schema.execution_config().max_query_depth else {
            return true;
        };
        if depth <= max_depth {
            return true;
        }
        if !self.depth_exceeded {
            self.depth_exceeded = true;
            self.critical(
                error_codes::MAX_DEPTH_EXCEEDED,
                format!("The query is nested deeper than the maximum depth of {max_depth}"),
                location,
            );
        }
        false
    }

    fn critical(&mut self, code: &str, message: String, location: &SourceLocation) {
        self.messages.add(GraphMessage::critical(
            code,
            message,
            SourceOrigin::at_location(*location),
        ));
    }
}
