use crate::action_result::ActionResult;
use crate::action_result::ResolutionTarget;
use crate::error_codes;
use crate::execution::FieldMiddleware;
use crate::execution::FieldResolutionContext;
use crate::execution::InternalError;
use crate::execution::Next;
use crate::messages::GraphMessage;
use crate::messages::SourceOrigin;
use crate::resolvers::BatchResolverContext;
use crate::resolvers::FieldResolverKind;
use crate::resolvers::ResolverContext;
use crate::value::DataValue;
use async_trait::async_trait;
use futures::FutureExt;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

/// Materializes the field's arguments and produces a result for every item
/// according to the field's resolver kind.
pub struct InvokeResolverStage;
#[async_trait]
impl FieldMiddleware for InvokeResolverStage {
    fn name(&self) -> &'static str {
        "invoke_resolver"
    }

    async fn invoke(
        &self,
        ctx: &mut FieldResolutionContext<'_>,
        next: Next<'_>,
    ) -> Result<(), InternalError> {
        let invocation = ctx.invocation();
        let request = ctx.request();

        let arguments = match invocation.arguments().materialize(request.schema(), request.variables()) {
            Ok(arguments) => arguments,
            Err(err) => {
                let origin = ctx.origin();
                ctx.add_message(GraphMessage::critical(
                    error_codes::INVALID_ARGUMENT,
                    err.to_string(),
                    origin,
                ));
                return Ok(());
            },
        };

        match invocation.resolver() {
            FieldResolverKind::Property { property } => {
                for item in ctx.items.iter_mut() {
                    let value =
                        item.source.as_object()
                            .and_then(|obj| obj.property(property))
                            .cloned()
                            .unwrap_or_default();
                    item.set_result(value);
                }
            },

            FieldResolverKind::TypeName => {
                for item in ctx.items.iter_mut() {
                    let value = DataValue::from(item.source.concrete_type_name());
                    item.set_result(value);
                }
            },

            FieldResolverKind::Virtual { .. } => {
                for item in ctx.items.iter_mut() {
                    item.set_result(DataValue::Virtual);
                }
            },

            FieldResolverKind::Method(resolver) => {
                let (source, path) = match ctx.items.as_slice() {
                    [item] => (item.source.clone(), item.path.clone()),
                    items => return Err(InternalError::SourceItemCount {
                        count: items.len(),
                        field: invocation.field_name().to_string(),
                    }),
                };
                let resolver_ctx = ResolverContext {
                    arguments: &arguments,
                    field: invocation,
                    path: &path,
                    source: &source,
                    variables: request.variables(),
                };
                let outcome = guarded(resolver.resolve(&resolver_ctx)).await;
                complete(ctx, outcome);
            },

            FieldResolverKind::Batch(resolver) => {
                let sources: Vec<DataValue> =
                    ctx.items.iter()
                        .map(|item| item.source.clone())
                        .collect();
                let resolver_ctx = BatchResolverContext {
                    arguments: &arguments,
                    field: invocation,
                    sources: &sources,
                    variables: request.variables(),
                };
                let outcome = guarded(resolver.resolve_batch(&resolver_ctx)).await;
                complete(ctx, outcome);
            },
        }

        next.run(ctx).await
    }
}

fn complete(ctx: &mut FieldResolutionContext<'_>, outcome: anyhow::Result<ActionResult>) {
    match outcome {
        Ok(action_result) => action_result.complete(ResolutionTarget::Field(ctx)),
        Err(err) => {
            let message = unhandled_exception(
                err,
                ctx.invocation().field_name(),
                ctx.origin(),
                ctx.request().config().debug_messages,
            );
            ctx.add_message(message);
        },
    }
}

/// Await a resolver, turning a panic into an error.
pub(crate) async fn guarded<F>(resolution: F) -> anyhow::Result<ActionResult>
where
    F: Future<Output = anyhow::Result<ActionResult>>,
{
    match AssertUnwindSafe(resolution).catch_unwind().await {
        Ok(outcome) => outcome,
        Err(panic) => Err(anyhow::anyhow!("resolver panicked: {}", panic_message(&*panic))),
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    panic.downcast_ref::<&str>()
        .copied()
        .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("<non-string panic payload>")
}

/// The critical message reporting an error raised by resolver code. The
/// error's own text is only exposed when `debug_messages` is set.
pub(crate) fn unhandled_exception(
    err: anyhow::Error,
    resolving: &str,
    origin: SourceOrigin,
    debug_messages: bool,
) -> GraphMessage {
    tracing::warn!(resolving, origin = %origin, error = %err, "unhandled resolver error");
    let text = if debug_messages {
        format!("An unhandled error occurred while resolving `{resolving}`: {err:#}")
    } else {
        format!("An unhandled error occurred while resolving `{resolving}`")
    };
    GraphMessage::critical(error_codes::UNHANDLED_EXCEPTION, text, origin)
        .with_exception(Arc::new(err))
}
