use crate::document::ConstructionContext;
use crate::document::ConstructionStep;
use crate::document::PartKind;
use crate::schema::GraphType;
use crate::syntax::SyntaxNodeKind;

const TYPENAME_FIELD: &str = "__typename";

/// Produces a selection-set part bound to the same type as its owner (an
/// operation's root type, a field's return type or a fragment's type
/// condition).
pub struct FieldSelectionSetStep;
impl ConstructionStep for FieldSelectionSetStep {
    fn name(&self) -> &'static str {
        "field_selection_set"
    }

    fn should_execute(&self, ctx: &ConstructionContext<'_>) -> bool {
        matches!(ctx.node.kind, SyntaxNodeKind::FieldCollection)
            && ctx.parent.is_some()
    }

    fn execute(&self, ctx: &mut ConstructionContext<'_>) -> bool {
        let owner_type_name =
            ctx.parent_part()
                .and_then(|part| part.graph_type_name())
                .map(str::to_string);
        let id = ctx.add_part(PartKind::FieldSelectionSet);
        ctx.bind_graph_type(id, owner_type_name.as_deref());
        true
    }
}

/// Special-cases the `__typename` meta-field.
///
/// On an object or interface this produces a single part. On a union it
/// produces one part per member type currently known to the schema, all
/// attached to the same selection set. Every part is bound to `String`.
pub struct TypeNameStep;
impl ConstructionStep for TypeNameStep {
    fn name(&self) -> &'static str {
        "typename"
    }

    fn should_execute(&self, ctx: &ConstructionContext<'_>) -> bool {
        matches!(&ctx.node.kind, SyntaxNodeKind::Field { name, .. } if name == TYPENAME_FIELD)
            && matches!(ctx.parent_kind(), Some(PartKind::FieldSelectionSet))
    }

    fn execute(&self, ctx: &mut ConstructionContext<'_>) -> bool {
        let node = ctx.node;
        let SyntaxNodeKind::Field { alias, .. } = &node.kind else {
            return false;
        };

        let owner_type_names: Vec<Option<String>> = match ctx.parent_graph_type() {
            Some(GraphType::Union(union_t)) => {
                let members = ctx.schema.possible_types(union_t.name());
                if members.is_empty() {
                    vec![Some(union_t.name().to_string())]
                } else {
                    members.into_iter().map(|name| Some(name.to_string())).collect()
                }
            },
            Some(graph_type) => vec![Some(graph_type.name().to_string())],
            None => vec![None],
        };

        for owner_type_name in owner_type_names {
            let id = ctx.add_part(PartKind::FieldTypeName {
                alias: alias.clone(),
                owner_type_name,
            });
            ctx.bind_graph_type(id, Some("String"));
        }
        true
    }
}

/// Produces a field part, binding the schema field by name on the parent
/// selection set's type when that type declares fields. Unknown fields are
/// left unbound.
pub struct FieldStep;
impl ConstructionStep for FieldStep {
    fn name(&self) -> &'static str {
        "field"
    }

    fn should_execute(&self, ctx: &ConstructionContext<'_>) -> bool {
        matches!(ctx.node.kind, SyntaxNodeKind::Field { .. })
            && matches!(ctx.parent_kind(), Some(PartKind::FieldSelectionSet))
    }

    fn execute(&self, ctx: &mut ConstructionContext<'_>) -> bool {
        let node = ctx.node;
        let SyntaxNodeKind::Field { alias, name } = &node.kind else {
            return false;
        };

        let definition =
            ctx.parent_graph_type()
                .and_then(|graph_type| graph_type.field(name))
                .cloned();
        let return_type_name =
            definition.as_ref()
                .map(|field| field.type_expression().innermost_type_name().to_string());

        if definition.is_none() {
            tracing::trace!(field = name.as_str(), "leaving field unbound");
        }

        let id = ctx.add_part(PartKind::Field {
            alias: alias.clone(),
            definition,
            name: name.to_string(),
        });
        ctx.bind_graph_type(id, return_type_name.as_deref());
        true
    }
}

/// Produces a directive part bound to the schema's directive definition, if
/// the schema defines one of that name.
pub struct DirectiveStep;
impl ConstructionStep for DirectiveStep {
    fn name(&self) -> &'static str {
        "directive"
    }

    fn should_execute(&self, ctx: &ConstructionContext<'_>) -> bool {
        matches!(ctx.node.kind, SyntaxNodeKind::Directive { .. })
            && ctx.parent.is_some()
    }

    fn execute(&self, ctx: &mut ConstructionContext<'_>) -> bool {
        let node = ctx.node;
        let SyntaxNodeKind::Directive { name } = &node.kind else {
            return false;
        };
        let definition = ctx.schema.find_directive(name).cloned();
        ctx.add_part(PartKind::Directive {
            definition,
            name: name.to_string(),
        });
        true
    }
}
