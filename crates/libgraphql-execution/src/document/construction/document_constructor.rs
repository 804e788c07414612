use crate::document::ConstructionContext;
use crate::document::ConstructionStep;
use crate::document::DirectiveArgumentStep;
use crate::document::DirectiveStep;
use crate::document::DocumentStep;
use crate::document::FieldArgumentStep;
use crate::document::FieldSelectionSetStep;
use crate::document::FieldStep;
use crate::document::FragmentSpreadStep;
use crate::document::InlineFragmentStep;
use crate::document::InputObjectFieldStep;
use crate::document::NamedFragmentStep;
use crate::document::OperationStep;
use crate::document::QueryDocument;
use crate::document::SuppliedValueStep;
use crate::document::TypeNameStep;
use crate::document::VariableReferenceStep;
use crate::document::VariableStep;
use crate::loc::SourceLocation;
use crate::schema::Schema;
use crate::syntax::SyntaxNode;
use crate::syntax::SyntaxTree;
use thiserror::Error;

type Result<T> = std::result::Result<T, DocumentConstructionError>;

/// Walks a [`SyntaxTree`] in document order and applies construction steps
/// to produce a [`QueryDocument`].
///
/// Every node that is not a pass-through node produces its parts through
/// exactly one step. Children of a node are then constructed beneath each
/// part the step produced.
pub struct DocumentConstructor {
    steps: Vec<Box<dyn ConstructionStep>>,
}
impl DocumentConstructor {
    pub fn new() -> Self {
        Self::with_steps(vec![
            Box::new(DocumentStep),
            Box::new(OperationStep),
            Box::new(VariableStep),
            Box::new(NamedFragmentStep),
            Box::new(InlineFragmentStep),
            Box::new(FragmentSpreadStep),
            Box::new(FieldSelectionSetStep),
            Box::new(TypeNameStep),
            Box::new(FieldStep),
            Box::new(DirectiveStep),
            Box::new(FieldArgumentStep),
            Box::new(DirectiveArgumentStep),
            Box::new(InputObjectFieldStep),
            Box::new(VariableReferenceStep),
            Box::new(SuppliedValueStep),
        ])
    }

    /// Use a custom, ordered set of steps. The first step that accepts a node
    /// is the one applied to it.
    pub fn with_steps(steps: Vec<Box<dyn ConstructionStep>>) -> Self {
        Self { steps }
    }

    pub fn construct(
        &self,
        schema: &Schema,
        tree: &SyntaxTree,
    ) -> Result<QueryDocument> {
        let mut ctx = ConstructionContext::new(schema, tree.root());
        self.visit(&mut ctx, tree.root())?;

        tracing::debug!(
            parts = ctx.document.len(),
            operations = ctx.document.operations.len(),
            fragments = ctx.document.fragments.len(),
            messages = ctx.document.messages.len(),
            "constructed query document",
        );
        Ok(ctx.document)
    }

    fn visit<'a>(
        &self,
        ctx: &mut ConstructionContext<'a>,
        node: &'a SyntaxNode,
    ) -> Result<()> {
        if node.kind.is_pass_through() {
            tracing::trace!(node = node.kind.name(), "passing through");
            for child in &node.children {
                self.visit(ctx, child)?;
            }
            return Ok(());
        }

        let saved_parent = ctx.parent;
        let saved_operation = ctx.active_operation;

        ctx.node = node;
        ctx.produced.clear();
        let step = self.steps.iter()
            .find(|step| step.should_execute(ctx))
            .ok_or(DocumentConstructionError::UnhandledNode {
                location: node.location,
                node_kind: node.kind.name(),
            })?;

        tracing::trace!(step = step.name(), node = node.kind.name(), "applying step");
        if !step.execute(ctx) {
            return Err(DocumentConstructionError::StepFailed {
                location: node.location,
                node_kind: node.kind.name(),
                step: step.name(),
            });
        }

        let produced = std::mem::take(&mut ctx.produced);
        let child_parents: Vec<_> =
            if produced.is_empty() {
                vec![saved_parent]
            } else {
                produced.into_iter().map(Some).collect()
            };

        for child_parent in child_parents {
            ctx.parent = child_parent;
            for child in &node.children {
                self.visit(ctx, child)?;
            }
        }

        ctx.parent = saved_parent;
        ctx.active_operation = saved_operation;
        Ok(())
    }
}
impl Default for DocumentConstructor {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum DocumentConstructionError {
    #[error("Construction step `{step}` failed on a {node_kind} node at {location}")]
    StepFailed {
        location: SourceLocation,
        node_kind: &'static str,
        step: &'static str,
    },

    #[error("No construction step applies to a {node_kind} node at {location}")]
    UnhandledNode {
        location: SourceLocation,
        node_kind: &'static str,
    },
}
