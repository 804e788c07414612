use crate::execution::ExecutionCancelHandle;
use crate::execution::ExecutionConfig;
use crate::execution::FieldMiddleware;
use crate::execution::GraphDataItem;
use crate::execution::ItemStatus;
use crate::messages::GraphMessage;
use crate::messages::MessageCollection;
use crate::messages::SourceOrigin;
use crate::plan::FieldInvocationContext;
use crate::schema::Schema;
use crate::variables::ResolvedVariableCollection;
use std::sync::Arc;

/// Everything shared, read-only, by every field pipeline of one request.
pub struct ExecutionRequest<'a> {
    pub(crate) cancel_handle: ExecutionCancelHandle,
    pub(crate) config: &'a ExecutionConfig,
    pub(crate) schema: &'a Schema,
    pub(crate) stages: &'a [Arc<dyn FieldMiddleware>],
    pub(crate) variables: ResolvedVariableCollection,
}
impl<'a> ExecutionRequest<'a> {
    pub fn cancel_handle(&self) -> &ExecutionCancelHandle {
        &self.cancel_handle
    }

    pub fn config(&self) -> &'a ExecutionConfig {
        self.config
    }

    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    pub fn variables(&self) -> &ResolvedVariableCollection {
        &self.variables
    }
}

/// The mutable state of one run of the field pipeline: one invocation
/// context applied to the source items it resolves.
///
/// Per-source-item fields run with exactly one item; batch fields run with
/// every item of the batch. Recording a critical message cancels the
/// context.
pub struct FieldResolutionContext<'a> {
    pub(crate) cancelled: bool,
    pub(crate) failed: bool,
    pub(crate) invocation: &'a FieldInvocationContext,
    pub(crate) items: Vec<&'a mut GraphDataItem>,
    pub(crate) messages: MessageCollection,
    pub(crate) request: &'a ExecutionRequest<'a>,
}
impl<'a> FieldResolutionContext<'a> {
    pub(crate) fn new(
        request: &'a ExecutionRequest<'a>,
        invocation: &'a FieldInvocationContext,
        items: Vec<&'a mut GraphDataItem>,
    ) -> Self {
        Self {
            cancelled: false,
            failed: false,
            invocation,
            items,
            messages: MessageCollection::new(),
            request,
        }
    }

    pub fn add_message(&mut self, message: GraphMessage) {
        if message.is_critical() {
            tracing::debug!(
                field = self.invocation.field_name(),
                code = message.code(),
                "critical message cancels field",
            );
            self.cancelled = true;
            self.failed = true;
        }
        self.messages.add(message);
    }

    /// Cancel this field without a message.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Whether this field, or the whole request, has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled || self.request.cancel_handle.is_cancelled()
    }

    pub fn invocation(&self) -> &'a FieldInvocationContext {
        self.invocation
    }

    pub fn items(&self) -> &[&'a mut GraphDataItem] {
        &self.items
    }

    pub fn messages(&self) -> &MessageCollection {
        &self.messages
    }

    pub fn request(&self) -> &'a ExecutionRequest<'a> {
        self.request
    }

    /// Where messages about this field are reported: the path of its first
    /// item and the field's location in the document.
    pub fn origin(&self) -> SourceOrigin {
        match self.items.first() {
            Some(item) => SourceOrigin::at_path(item.path.clone(), Some(self.invocation.location)),
            None => SourceOrigin::at_location(self.invocation.location),
        }
    }

    /// Settle the status of every item and hand back the messages.
    pub(crate) fn finish(self) -> MessageCollection {
        if self.is_cancelled() {
            let status = if self.failed {
                ItemStatus::Failed
            } else {
                ItemStatus::Cancelled
            };
            for item in self.items {
                item.status = status;
            }
        }
        self.messages
    }
}
