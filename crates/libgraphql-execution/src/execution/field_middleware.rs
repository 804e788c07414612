use crate::execution::CompleteFieldStage;
use crate::execution::DirectiveStage;
use crate::execution::FieldResolutionContext;
use crate::execution::InternalError;
use crate::execution::InvokeResolverStage;
use crate::execution::ProcessChildFieldsStage;
use crate::execution::ValidateFieldStage;
use crate::resolvers::DirectivePhase;
use async_trait::async_trait;
use std::sync::Arc;

type Result<T> = std::result::Result<T, InternalError>;

/// One stage of the field pipeline.
///
/// A stage does its work and then calls `next` exactly once, unless it
/// decides the field must stop here. Cancelled contexts never reach later
/// stages.
#[async_trait]
pub trait FieldMiddleware: Send + Sync {
    fn name(&self) -> &'static str;

    async fn invoke(
        &self,
        ctx: &mut FieldResolutionContext<'_>,
        next: Next<'_>,
    ) -> Result<()>;
}

/// The remainder of the pipeline after the current stage.
pub struct Next<'a> {
    stages: &'a [Arc<dyn FieldMiddleware>],
}
impl<'a> Next<'a> {
    pub fn new(stages: &'a [Arc<dyn FieldMiddleware>]) -> Self {
        Self { stages }
    }

    pub async fn run(self, ctx: &mut FieldResolutionContext<'_>) -> Result<()> {
        let Some((stage, remaining)) = self.stages.split_first() else {
            return Ok(());
        };
        if ctx.is_cancelled() {
            tracing::trace!(
                field = ctx.invocation().field_name(),
                stage = stage.name(),
                "skipping stage of cancelled field",
            );
            return Ok(());
        }
        tracing::trace!(
            field = ctx.invocation().field_name(),
            stage = stage.name(),
            "entering stage",
        );
        stage.invoke(ctx, Next::new(remaining)).await
    }
}

/// Validate, directives before, resolve, child fields, directives after,
/// complete.
pub fn default_stages() -> Vec<Arc<dyn FieldMiddleware>> {
    vec![
        Arc::new(ValidateFieldStage),
        Arc::new(DirectiveStage::new(DirectivePhase::Before)),
        Arc::new(InvokeResolverStage),
        Arc::new(ProcessChildFieldsStage),
        Arc::new(DirectiveStage::new(DirectivePhase::After)),
        Arc::new(CompleteFieldStage),
    ]
}
