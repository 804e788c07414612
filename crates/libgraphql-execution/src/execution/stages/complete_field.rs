use crate::execution::FieldMiddleware;
use crate::execution::FieldResolutionContext;
use crate::execution::InternalError;
use crate::execution::ItemStatus;
use crate::execution::Next;
use async_trait::async_trait;

/// Marks every item of a field that made it through the pipeline as
/// complete.
pub struct CompleteFieldStage;
#[async_trait]
impl FieldMiddleware for CompleteFieldStage {
    fn name(&self) -> &'static str {
        "complete_field"
    }

    async fn invoke(
        &self,
        ctx: &mut FieldResolutionContext<'_>,
        next: Next<'_>,
    ) -> Result<(), InternalError> {
        for item in ctx.items.iter_mut() {
            item.status = ItemStatus::Complete;
        }
        tracing::trace!(
            field = ctx.invocation().field_name(),
            items = ctx.items.len(),
            "field complete",
        );
        next.run(ctx).await
    }
}
