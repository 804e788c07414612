use crate::document::ConstructionContext;
use crate::document::ConstructionStep;
use crate::document::PartKind;
use crate::document::VariableDeclaration;
use crate::error_codes;
use crate::messages::GraphMessage;
use crate::messages::SourceOrigin;
use crate::syntax::SyntaxNode;
use crate::syntax::SyntaxNodeKind;
use crate::value::InputValue;

/// Produces the root [`PartKind::Document`] part.
pub struct DocumentStep;
impl ConstructionStep for DocumentStep {
    fn name(&self) -> &'static str {
        "document"
    }

    fn should_execute(&self, ctx: &ConstructionContext<'_>) -> bool {
        matches!(ctx.node.kind, SyntaxNodeKind::Document) && ctx.parent.is_none()
    }

    fn execute(&self, ctx: &mut ConstructionContext<'_>) -> bool {
        if !ctx.document.is_empty() {
            return false;
        }
        ctx.add_part(PartKind::Document);
        true
    }
}

/// Produces an operation part bound to the schema's root type for its
/// operation type, and makes it the active operation for its subtree.
pub struct OperationStep;
impl ConstructionStep for OperationStep {
    fn name(&self) -> &'static str {
        "operation"
    }

    fn should_execute(&self, ctx: &ConstructionContext<'_>) -> bool {
        matches!(ctx.node.kind, SyntaxNodeKind::Operation { .. })
            && matches!(ctx.parent_kind(), Some(PartKind::Document))
    }

    fn execute(&self, ctx: &mut ConstructionContext<'_>) -> bool {
        let node = ctx.node;
        let SyntaxNodeKind::Operation { name, operation_type } = &node.kind else {
            return false;
        };
        let operation_type = *operation_type;

        let id = ctx.add_part(PartKind::Operation {
            name: name.clone(),
            operation_type,
        });
        let root_type_name = ctx.schema.root_type(operation_type).map(|t| t.name());
        ctx.bind_graph_type(id, root_type_name);

        ctx.document.operations.push(id);
        ctx.document.variables_mut(id);
        ctx.active_operation = Some(id);
        true
    }
}

/// Produces a variable-declaration part and registers the declaration with
/// the active operation.
pub struct VariableStep;
impl ConstructionStep for VariableStep {
    fn name(&self) -> &'static str {
        "variable"
    }

    fn should_execute(&self, ctx: &ConstructionContext<'_>) -> bool {
        matches!(ctx.node.kind, SyntaxNodeKind::Variable { .. })
            && ctx.active_operation.is_some()
    }

    fn execute(&self, ctx: &mut ConstructionContext<'_>) -> bool {
        let node = ctx.node;
        let SyntaxNodeKind::Variable { name, type_expression } = &node.kind else {
            return false;
        };
        let Some(operation) = ctx.active_operation else {
            return false;
        };

        let id = ctx.add_part(PartKind::Variable { name: name.to_string() });
        ctx.bind_graph_type(id, Some(type_expression.innermost_type_name()));

        let declarations = ctx.document.variables_mut(operation);
        if let Some(existing) = declarations.get(name) {
            let message = GraphMessage::critical(
                error_codes::DUPLICATE_VARIABLE,
                format!(
                    "The variable `${name}` is declared more than once (first declared at {})",
                    existing.def_location,
                ),
                SourceOrigin::at_location(node.location),
            );
            ctx.add_message(message);
            return true;
        }

        declarations.insert(name.to_string(), VariableDeclaration {
            def_location: node.location,
            default_value: node.children.first().map(const_input_value),
            name: name.to_string(),
            part: id,
            referenced_count: 0,
            type_expression: type_expression.clone(),
        });
        true
    }
}

/// Convert a value node that cannot contain variables (a variable default)
/// into an [`InputValue`].
pub(crate) fn const_input_value(node: &SyntaxNode) -> InputValue {
    match &node.kind {
        SyntaxNodeKind::ScalarValue { value } => value.to_input_value(),
        SyntaxNodeKind::EnumValue { value } => InputValue::Enum(value.to_string()),
        SyntaxNodeKind::ListValue =>
            InputValue::List(node.children.iter().map(const_input_value).collect()),
        SyntaxNodeKind::ComplexValue => InputValue::Object(
            node.children.iter()
                .filter_map(|item| match (&item.kind, item.children.first()) {
                    (SyntaxNodeKind::InputItem { name }, Some(value)) =>
                        Some((name.to_string(), const_input_value(value))),
                    _ => None,
                })
                .collect(),
        ),
        _ => InputValue::Null,
    }
}
