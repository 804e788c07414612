use crate::document::ConstructionContext;
use crate::document::ConstructionStep;
use crate::document::PartKind;
use crate::error_codes;
use crate::messages::GraphMessage;
use crate::messages::SourceOrigin;
use crate::syntax::SyntaxNodeKind;

/// Produces a named fragment bound to its type condition and registers it
/// by name on the document.
pub struct NamedFragmentStep;
impl ConstructionStep for NamedFragmentStep {
    fn name(&self) -> &'static str {
        "named_fragment"
    }

    fn should_execute(&self, ctx: &ConstructionContext<'_>) -> bool {
        matches!(ctx.node.kind, SyntaxNodeKind::NamedFragment { .. })
            && matches!(ctx.parent_kind(), Some(PartKind::Document))
    }

    fn execute(&self, ctx: &mut ConstructionContext<'_>) -> bool {
        let node = ctx.node;
        let SyntaxNodeKind::NamedFragment { name, type_condition } = &node.kind else {
            return false;
        };

        ctx.active_operation = None;
        let id = ctx.add_part(PartKind::NamedFragment {
            name: name.to_string(),
            type_condition: type_condition.to_string(),
        });
        ctx.bind_graph_type(id, Some(type_condition.as_str()));

        if let Some(existing) = ctx.document.named_fragment(name) {
            let first_location = *ctx.document.part(existing).location();
            ctx.add_message(GraphMessage::critical(
                error_codes::DUPLICATE_FRAGMENT,
                format!(
                    "The fragment `{name}` is defined more than once (first defined at \
                    {first_location})",
                ),
                SourceOrigin::at_location(node.location),
            ));
        } else {
            ctx.document.fragments.insert(name.to_string(), id);
        }
        true
    }
}

/// Produces an inline fragment bound to its type condition, or to the type
/// of the enclosing selection set when it has none.
pub struct InlineFragmentStep;
impl ConstructionStep for InlineFragmentStep {
    fn name(&self) -> &'static str {
        "inline_fragment"
    }

    fn should_execute(&self, ctx: &ConstructionContext<'_>) -> bool {
        matches!(ctx.node.kind, SyntaxNodeKind::InlineFragment { .. })
            && matches!(ctx.parent_kind(), Some(PartKind::FieldSelectionSet))
    }

    fn execute(&self, ctx: &mut ConstructionContext<'_>) -> bool {
        let node = ctx.node;
        let SyntaxNodeKind::InlineFragment { type_condition } = &node.kind else {
            return false;
        };

        let bound_type_name = match type_condition {
            Some(type_condition) => Some(type_condition.to_string()),
            None => ctx.parent_part()
                .and_then(|part| part.graph_type_name())
                .map(str::to_string),
        };
        let id = ctx.add_part(PartKind::InlineFragment {
            type_condition: type_condition.clone(),
        });
        ctx.bind_graph_type(id, bound_type_name.as_deref());
        true
    }
}

/// Records a fragment spread by name. The target fragment may be defined
/// later in the document, so binding happens during linking.
pub struct FragmentSpreadStep;
impl ConstructionStep for FragmentSpreadStep {
    fn name(&self) -> &'static str {
        "fragment_spread"
    }

    fn should_execute(&self, ctx: &ConstructionContext<'_>) -> bool {
        matches!(ctx.node.kind, SyntaxNodeKind::FragmentSpread { .. })
            && matches!(ctx.parent_kind(), Some(PartKind::FieldSelectionSet))
    }

    fn execute(&self, ctx: &mut ConstructionContext<'_>) -> bool {
        let node = ctx.node;
        let SyntaxNodeKind::FragmentSpread { name } = &node.kind else {
            return false;
        };
        ctx.add_part(PartKind::FragmentSpread {
            name: name.to_string(),
            target: None,
        });
        true
    }
}
