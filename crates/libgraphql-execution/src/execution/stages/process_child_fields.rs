use crate::error_codes;
use crate::execution::ChildExecutionMode;
use crate::execution::ExecutionRequest;
use crate::execution::FieldMiddleware;
use crate::execution::FieldResolutionContext;
use crate::execution::GraphDataItem;
use crate::execution::InternalError;
use crate::execution::Next;
use crate::messages::GraphMessage;
use crate::messages::MessageCollection;
use crate::plan::FieldInvocationContext;
use crate::resolvers::FieldResolverKind;
use crate::schema::Schema;
use crate::value::DataValue;
use async_trait::async_trait;
use futures::FutureExt;
use futures::future::BoxFuture;

type Result<T> = std::result::Result<T, InternalError>;

/// Substitutes virtual placeholders and then resolves the field's child
/// selections against every value it produced.
pub struct ProcessChildFieldsStage;
#[async_trait]
impl FieldMiddleware for ProcessChildFieldsStage {
    fn name(&self) -> &'static str {
        "process_child_fields"
    }

    async fn invoke(
        &self,
        ctx: &mut FieldResolutionContext<'_>,
        next: Next<'_>,
    ) -> Result<()> {
        let invocation = ctx.invocation();
        let request = ctx.request();

        for item in ctx.items.iter_mut() {
            if item.result.as_ref().is_some_and(DataValue::is_virtual) {
                let value = match invocation.resolver() {
                    FieldResolverKind::Virtual { default: Some(default) } => default.clone(),
                    _ => item.source.clone(),
                };
                item.result = Some(value);
            }
        }

        if !invocation.children().is_empty() {
            let mut value_nodes = vec![];
            for item in ctx.items.iter_mut() {
                item.expand_list();
                item.collect_value_nodes(&mut value_nodes);
            }

            let (messages, outcome) = resolve_child_fields(
                request,
                invocation.children(),
                invocation.return_type().innermost_type_name(),
                value_nodes,
                request.config().child_execution,
            ).await;
            ctx.messages.append(messages);

            if let Err(err) = outcome {
                let origin = ctx.origin();
                ctx.add_message(GraphMessage::critical(
                    error_codes::EXECUTION_ERROR,
                    format!("A child field of `{}` faulted: {err}", invocation.field_name()),
                    origin,
                ));
                return Err(err);
            }
        }

        next.run(ctx).await
    }
}

/// Run one field pipeline over `items` and settle the items' status.
pub(crate) async fn execute_field<'a>(
    request: &'a ExecutionRequest<'a>,
    invocation: &'a FieldInvocationContext,
    items: Vec<&'a mut GraphDataItem>,
) -> (MessageCollection, Result<()>) {
    let mut ctx = FieldResolutionContext::new(request, invocation, items);
    let outcome = Next::new(request.stages).run(&mut ctx).await;
    (ctx.finish(), outcome)
}

/// Resolve `children` against every value node of a parent field.
///
/// Each node gets one item per child invocation that applies to its value.
/// Items are then grouped per invocation: a batch invocation runs once over
/// its whole group, any other invocation once per item. Every pipeline is
/// awaited before this returns; the first fault, if any, is returned after
/// all messages have been collected.
pub(crate) async fn resolve_child_fields<'a>(
    request: &'a ExecutionRequest<'a>,
    children: &'a [FieldInvocationContext],
    parent_type_name: &str,
    mut value_nodes: Vec<&'a mut GraphDataItem>,
    mode: ChildExecutionMode,
) -> (MessageCollection, Result<()>) {
    for node in value_nodes.iter_mut() {
        let Some(value) = node.result.clone() else {
            continue;
        };
        for (field_index, child) in children.iter().enumerate() {
            if !applies_to(request.schema(), child, parent_type_name, &value) {
                continue;
            }
            let path = node.path.child_field(child.response_key());
            node.children.push(GraphDataItem::new(
                field_index,
                child.response_key(),
                path,
                value.clone(),
            ));
        }
    }

    let mut groups: Vec<Vec<&'a mut GraphDataItem>> = children.iter().map(|_| vec![]).collect();
    for node in value_nodes {
        for child_item in node.children.iter_mut() {
            groups[child_item.field_index].push(child_item);
        }
    }

    let mut pipelines: Vec<BoxFuture<'a, (MessageCollection, Result<()>)>> = vec![];
    for (child, group) in children.iter().zip(groups) {
        if group.is_empty() {
            continue;
        }
        if child.is_batch() {
            pipelines.push(execute_field(request, child, group).boxed());
        } else {
            for item in group {
                pipelines.push(execute_field(request, child, vec![item]).boxed());
            }
        }
    }

    let mut messages = MessageCollection::new();
    let mut fault = None;
    for (child_messages, outcome) in mode.execute_all(pipelines).await {
        messages.append(child_messages);
        if let Err(err) = outcome {
            tracing::warn!(error = %err, "child field pipeline faulted");
            fault.get_or_insert(err);
        }
    }

    (messages, fault.map_or(Ok(()), Err))
}

/// Whether a child invocation applies to a value. Selections made directly on
/// the parent's type always apply (validation reports unusable values);
/// fragment selections apply when the value's concrete type satisfies the
/// fragment's type condition.
fn applies_to(
    schema: &Schema,
    child: &FieldInvocationContext,
    parent_type_name: &str,
    value: &DataValue,
) -> bool {
    if child.source_type() == parent_type_name {
        return true;
    }
    value.concrete_type_name().is_some_and(|type_name| {
        schema.analyze_runtime_concrete_type(child.source_type(), type_name).is_match()
    })
}
