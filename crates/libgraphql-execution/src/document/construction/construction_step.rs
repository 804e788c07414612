use crate::document::ConstructionContext;

/// One rule of the document construction engine.
///
/// Each step is scoped to a kind of syntax node (and usually to the kind of
/// the part it would be attached to). The
/// [`DocumentConstructor`](crate::document::DocumentConstructor) applies the
/// first step whose [`should_execute`](ConstructionStep::should_execute)
/// accepts the current node.
pub trait ConstructionStep: Send + Sync {
    fn name(&self) -> &'static str;

    /// A cheap guard over the node kind and the structure around it.
    fn should_execute(&self, ctx: &ConstructionContext<'_>) -> bool;

    /// Produce zero or more parts for the current node.
    ///
    /// Problems with the query itself are recorded as messages on the
    /// document and construction continues. Returning `false` aborts
    /// construction and is reserved for internal inconsistencies.
    fn execute(&self, ctx: &mut ConstructionContext<'_>) -> bool;
}
