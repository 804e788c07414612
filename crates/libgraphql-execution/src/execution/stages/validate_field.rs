use crate::error_codes;
use crate::execution::FieldMiddleware;
use crate::execution::FieldResolutionContext;
use crate::execution::InternalError;
use crate::execution::Next;
use crate::messages::GraphMessage;
use crate::messages::SourceOrigin;
use async_trait::async_trait;

/// Checks the number of source items against the field's resolution mode
/// and that every source can stand in for the field's declared source type.
pub struct ValidateFieldStage;
#[async_trait]
impl FieldMiddleware for ValidateFieldStage {
    fn name(&self) -> &'static str {
        "validate_field"
    }

    async fn invoke(
        &self,
        ctx: &mut FieldResolutionContext<'_>,
        next: Next<'_>,
    ) -> Result<(), InternalError> {
        let invocation = ctx.invocation();
        let count = ctx.items.len();
        if invocation.is_batch() {
            if count == 0 {
                return Err(InternalError::EmptyBatch {
                    field: invocation.field_name().to_string(),
                });
            }
        } else if count != 1 {
            return Err(InternalError::SourceItemCount {
                count,
                field: invocation.field_name().to_string(),
            });
        }

        let schema = ctx.request().schema();
        let mismatched: Vec<GraphMessage> =
            ctx.items.iter()
                .filter_map(|item| {
                    let concrete_type_name = item.source.concrete_type_name();
                    let is_match = concrete_type_name.is_some_and(|type_name| {
                        schema.analyze_runtime_concrete_type(invocation.source_type(), type_name)
                            .is_match()
                    });
                    (!is_match).then(|| GraphMessage::critical(
                        error_codes::INVALID_SOURCE_DATA,
                        format!(
                            "The field `{}` expects a source of type `{}` but was given {}",
                            invocation.field_name(),
                            invocation.source_type(),
                            match concrete_type_name {
                                Some(type_name) => format!("a `{type_name}`"),
                                None => "a value that is not an object".to_string(),
                            },
                        ),
                        SourceOrigin::at_path(item.path.clone(), Some(*invocation.location())),
                    ))
                })
                .collect();

        if !mismatched.is_empty() {
            for message in mismatched {
                ctx.add_message(message);
            }
            return Ok(());
        }

        next.run(ctx).await
    }
}
