use crate::action_result::ResolutionTarget;
use crate::error_codes;
use crate::execution::FieldMiddleware;
use crate::execution::FieldResolutionContext;
use crate::execution::InternalError;
use crate::execution::Next;
use crate::execution::stages::guarded;
use crate::execution::stages::unhandled_exception;
use crate::messages::GraphMessage;
use crate::messages::SourceOrigin;
use crate::resolvers::DirectivePhase;
use crate::resolvers::DirectiveResolutionContext;
use async_trait::async_trait;

/// Runs the field's directives registered for one phase.
///
/// Directives run one at a time in document order. Every directive of the
/// phase runs even if an earlier one asked to cancel; the field is cancelled
/// once they have all finished.
pub struct DirectiveStage {
    phase: DirectivePhase,
}
impl DirectiveStage {
    pub fn new(phase: DirectivePhase) -> Self {
        Self { phase }
    }
}
#[async_trait]
impl FieldMiddleware for DirectiveStage {
    fn name(&self) -> &'static str {
        match self.phase {
            DirectivePhase::Before => "directives_before",
            DirectivePhase::After => "directives_after",
        }
    }

    async fn invoke(
        &self,
        ctx: &mut FieldResolutionContext<'_>,
        next: Next<'_>,
    ) -> Result<(), InternalError> {
        let invocation = ctx.invocation();
        let request = ctx.request();
        let mut cancel_pipeline = false;

        for directive in invocation.directives().iter().filter(|d| d.phase() == self.phase) {
            let origin = match ctx.items.first() {
                Some(item) => SourceOrigin::at_path(item.path.clone(), Some(*directive.location())),
                None => SourceOrigin::at_location(*directive.location()),
            };

            let arguments = match directive.arguments().materialize(request.schema(), request.variables()) {
                Ok(arguments) => arguments,
                Err(err) => {
                    ctx.add_message(GraphMessage::critical(
                        error_codes::INVALID_ARGUMENT,
                        format!("@{}: {err}", directive.name()),
                        origin,
                    ));
                    cancel_pipeline = true;
                    continue;
                },
            };

            let mut directive_ctx = DirectiveResolutionContext {
                arguments,
                cancelled: false,
                directive,
                field: invocation,
                messages: Default::default(),
                origin: origin.clone(),
                phase: self.phase,
                results: ctx.items.iter().map(|item| item.result.clone()).collect(),
                sources: ctx.items.iter().map(|item| item.source.clone()).collect(),
                variables: request.variables(),
            };

            let outcome = guarded(directive.resolver().resolve(&mut directive_ctx)).await;
            match outcome {
                Ok(action_result) =>
                    action_result.complete(ResolutionTarget::Directive(&mut directive_ctx)),
                Err(err) => {
                    let message = unhandled_exception(
                        err,
                        &format!("@{}", directive.name()),
                        origin,
                        request.config().debug_messages,
                    );
                    directive_ctx.add_message(message);
                },
            }

            cancel_pipeline |= directive_ctx.cancelled;
            let mut rejected_rewrite = false;
            if self.phase == DirectivePhase::After {
                let has_selections = !invocation.children().is_empty();
                for (item, result) in ctx.items.iter_mut().zip(directive_ctx.results) {
                    if result == item.result {
                        continue;
                    }
                    // Child fields were resolved against the old value.
                    if has_selections && result.as_ref().is_some_and(|value| !value.is_null()) {
                        rejected_rewrite = true;
                        continue;
                    }
                    item.replace_result(result);
                }
            }
            for message in directive_ctx.messages {
                ctx.add_message(message);
            }
            if rejected_rewrite {
                ctx.add_message(GraphMessage::critical(
                    error_codes::EXECUTION_ERROR,
                    format!(
                        "@{}: `{}` has a selection set, so its result may only be replaced \
                        with null",
                        directive.name(),
                        invocation.field_name(),
                    ),
                    directive_ctx.origin,
                ));
                cancel_pipeline = true;
            }
        }

        if cancel_pipeline {
            tracing::debug!(
                field = invocation.field_name(),
                phase = ?self.phase,
                "directive cancelled field",
            );
            // A field cancelled after it resolved is nulled, not dropped.
            if self.phase == DirectivePhase::After {
                ctx.failed = true;
            }
            ctx.cancel();
            return Ok(());
        }

        next.run(ctx).await
    }
}
