use crate::action_result::ActionResult;
use crate::messages::GraphMessage;
use crate::messages::MessageCollection;
use crate::messages::SourceOrigin;
use crate::plan::DirectiveInvocation;
use crate::plan::FieldInvocationContext;
use crate::value::Arguments;
use crate::value::DataValue;
use crate::variables::ResolvedVariableCollection;
use async_trait::async_trait;

/// When, relative to the field's own resolver, a directive runs.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DirectivePhase {
    Before,
    After,
}

/// Runs one directive applied to one field.
#[async_trait]
pub trait DirectiveResolver: Send + Sync {
    async fn resolve(
        &self,
        ctx: &mut DirectiveResolutionContext<'_>,
    ) -> anyhow::Result<ActionResult>;
}

/// The state one directive runs against.
///
/// `sources` and `results` hold one entry per source item of the field, in
/// the same order. Results are `None` until the field has been resolved, so
/// only directives of the [`DirectivePhase::After`] phase see (and may
/// rewrite) them.
pub struct DirectiveResolutionContext<'a> {
    pub(crate) arguments: Arguments,
    pub(crate) cancelled: bool,
    pub(crate) directive: &'a DirectiveInvocation,
    pub(crate) field: &'a FieldInvocationContext,
    pub(crate) messages: MessageCollection,
    pub(crate) origin: SourceOrigin,
    pub(crate) phase: DirectivePhase,
    pub(crate) results: Vec<Option<DataValue>>,
    pub(crate) sources: Vec<DataValue>,
    pub(crate) variables: &'a ResolvedVariableCollection,
}
impl<'a> DirectiveResolutionContext<'a> {
    /// Record a message. A critical message cancels the field.
    pub fn add_message(&mut self, message: GraphMessage) {
        if message.is_critical() {
            self.cancelled = true;
        }
        self.messages.add(message);
    }

    /// Cancel the field this directive is applied to. Cancelling without a
    /// message drops the field from the response.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn arguments(&self) -> &Arguments {
        &self.arguments
    }

    pub fn directive(&self) -> &'a DirectiveInvocation {
        self.directive
    }

    pub fn directive_name(&self) -> &'a str {
        self.directive.name()
    }

    pub fn field(&self) -> &'a FieldInvocationContext {
        self.field
    }

    pub fn origin(&self) -> &SourceOrigin {
        &self.origin
    }

    pub fn phase(&self) -> DirectivePhase {
        self.phase
    }

    pub fn results(&self) -> &[Option<DataValue>] {
        &self.results
    }

    pub fn results_mut(&mut self) -> &mut [Option<DataValue>] {
        &mut self.results
    }

    pub fn sources(&self) -> &[DataValue] {
        &self.sources
    }

    pub fn variables(&self) -> &'a ResolvedVariableCollection {
        self.variables
    }
}
