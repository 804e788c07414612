use crate::document::ConstructionContext;
use crate::document::ConstructionStep;
use crate::document::PartKind;
use crate::document::SuppliedValue;
use crate::schema::ArgumentDefinition;
use crate::schema::GraphType;
use crate::syntax::SyntaxNodeKind;

fn input_item_name<'a>(ctx: &ConstructionContext<'a>) -> Option<&'a str> {
    match &ctx.node().kind {
        SyntaxNodeKind::InputItem { name } => Some(name.as_str()),
        _ => None,
    }
}

fn add_input_part(
    ctx: &mut ConstructionContext<'_>,
    definition: Option<ArgumentDefinition>,
    kind: impl FnOnce(Option<ArgumentDefinition>) -> PartKind,
) {
    let type_name =
        definition.as_ref()
            .map(|arg| arg.type_expression().innermost_type_name().to_string());
    let id = ctx.add_part(kind(definition));
    ctx.bind_graph_type(id, type_name.as_deref());
}

/// Binds an argument written on a field against the field's declared
/// arguments.
pub struct FieldArgumentStep;
impl ConstructionStep for FieldArgumentStep {
    fn name(&self) -> &'static str {
        "field_argument"
    }

    fn should_execute(&self, ctx: &ConstructionContext<'_>) -> bool {
        input_item_name(ctx).is_some()
            && matches!(
                ctx.parent_kind(),
                Some(PartKind::Field { .. } | PartKind::FieldTypeName { .. }),
            )
    }

    fn execute(&self, ctx: &mut ConstructionContext<'_>) -> bool {
        let Some(name) = input_item_name(ctx) else {
            return false;
        };
        let definition = match ctx.parent_kind() {
            Some(PartKind::Field { definition: Some(field), .. }) =>
                field.argument(name).cloned(),
            _ => None,
        };
        add_input_part(ctx, definition, |definition| PartKind::InputArgument {
            definition,
            name: name.to_string(),
        });
        true
    }
}

/// Binds an argument written on a directive against the directive
/// definition's arguments.
pub struct DirectiveArgumentStep;
impl ConstructionStep for DirectiveArgumentStep {
    fn name(&self) -> &'static str {
        "directive_argument"
    }

    fn should_execute(&self, ctx: &ConstructionContext<'_>) -> bool {
        input_item_name(ctx).is_some()
            && matches!(ctx.parent_kind(), Some(PartKind::Directive { .. }))
    }

    fn execute(&self, ctx: &mut ConstructionContext<'_>) -> bool {
        let Some(name) = input_item_name(ctx) else {
            return false;
        };
        let definition = match ctx.parent_kind() {
            Some(PartKind::Directive { definition: Some(directive), .. }) =>
                directive.argument(name).cloned(),
            _ => None,
        };
        add_input_part(ctx, definition, |definition| PartKind::InputArgument {
            definition,
            name: name.to_string(),
        });
        true
    }
}

/// Binds a field of an input-object literal against the fields of the input
/// object type the literal is bound to.
pub struct InputObjectFieldStep;
impl ConstructionStep for InputObjectFieldStep {
    fn name(&self) -> &'static str {
        "input_object_field"
    }

    fn should_execute(&self, ctx: &ConstructionContext<'_>) -> bool {
        input_item_name(ctx).is_some()
            && matches!(
                ctx.parent_kind(),
                Some(PartKind::SuppliedValue(SuppliedValue::Complex)),
            )
    }

    fn execute(&self, ctx: &mut ConstructionContext<'_>) -> bool {
        let Some(name) = input_item_name(ctx) else {
            return false;
        };
        let definition = match ctx.parent_graph_type() {
            Some(GraphType::InputObject(inputobj_t)) => inputobj_t.field(name).cloned(),
            _ => None,
        };
        add_input_part(ctx, definition, |definition| PartKind::InputObjectField {
            definition,
            name: name.to_string(),
        });
        true
    }
}

/// Produces a variable-reference value. Unlike other values it is bound to
/// the referenced variable's declared type rather than its owner's type,
/// and it marks the declaration on the active operation as referenced.
/// Outside of an operation the reference is left for the linker.
pub struct VariableReferenceStep;
impl ConstructionStep for VariableReferenceStep {
    fn name(&self) -> &'static str {
        "variable_reference"
    }

    fn should_execute(&self, ctx: &ConstructionContext<'_>) -> bool {
        matches!(ctx.node.kind, SyntaxNodeKind::VariableValue { .. })
            && ctx.parent.is_some()
    }

    fn execute(&self, ctx: &mut ConstructionContext<'_>) -> bool {
        let node = ctx.node;
        let SyntaxNodeKind::VariableValue { name } = &node.kind else {
            return false;
        };

        let id = ctx.add_part(PartKind::SuppliedValue(SuppliedValue::VariableRef {
            name: name.to_string(),
        }));

        let Some(operation) = ctx.active_operation else {
            tracing::trace!(variable = name.as_str(), "deferring variable reference");
            return true;
        };

        let declared_type_name =
            ctx.document.variables_mut(operation)
                .get_mut(name)
                .map(|declaration| {
                    declaration.referenced_count += 1;
                    declaration.type_expression.innermost_type_name().to_string()
                });
        ctx.bind_graph_type(id, declared_type_name.as_deref());
        true
    }
}

/// Produces every other kind of supplied value, bound to the same type as
/// the part that owns it.
pub struct SuppliedValueStep;
impl ConstructionStep for SuppliedValueStep {
    fn name(&self) -> &'static str {
        "supplied_value"
    }

    fn should_execute(&self, ctx: &ConstructionContext<'_>) -> bool {
        ctx.node.kind.is_value() && ctx.parent.is_some()
    }

    fn execute(&self, ctx: &mut ConstructionContext<'_>) -> bool {
        let node = ctx.node;
        let value = match &node.kind {
            SyntaxNodeKind::ComplexValue => SuppliedValue::Complex,
            SyntaxNodeKind::EnumValue { value } => SuppliedValue::Enum(value.to_string()),
            SyntaxNodeKind::ListValue => SuppliedValue::List,
            SyntaxNodeKind::NullValue => SuppliedValue::Null,
            SyntaxNodeKind::ScalarValue { value } => SuppliedValue::Scalar(value.clone()),
            _ => return false,
        };

        let owner_type_name =
            ctx.parent_part()
                .and_then(|part| part.graph_type_name())
                .map(str::to_string);
        let id = ctx.add_part(PartKind::SuppliedValue(value));
        ctx.bind_graph_type(id, owner_type_name.as_deref());
        true
    }
}
