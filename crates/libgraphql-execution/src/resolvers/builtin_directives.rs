use crate::action_result::ActionResult;
use crate::resolvers::DirectiveResolutionContext;
use crate::resolvers::DirectiveResolver;
use async_trait::async_trait;

/// `@skip(if: Boolean!)`: drops the field when `if` is true.
pub struct SkipDirective;
#[async_trait]
impl DirectiveResolver for SkipDirective {
    async fn resolve(
        &self,
        ctx: &mut DirectiveResolutionContext<'_>,
    ) -> anyhow::Result<ActionResult> {
        Ok(match ctx.arguments().get_bool("if") {
            Some(true) => ActionResult::cancel(),
            _ => ActionResult::ok(),
        })
    }
}

/// `@include(if: Boolean!)`: drops the field unless `if` is true.
pub struct IncludeDirective;
#[async_trait]
impl DirectiveResolver for IncludeDirective {
    async fn resolve(
        &self,
        ctx: &mut DirectiveResolutionContext<'_>,
    ) -> anyhow::Result<ActionResult> {
        Ok(match ctx.arguments().get_bool("if") {
            Some(true) => ActionResult::ok(),
            _ => ActionResult::cancel(),
        })
    }
}
