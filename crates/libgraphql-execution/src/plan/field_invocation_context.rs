use crate::loc::SourceLocation;
use crate::plan::ArgumentSet;
use crate::resolvers::DirectivePhase;
use crate::resolvers::DirectiveResolver;
use crate::resolvers::FieldResolverKind;
use crate::schema::TypeExpression;
use std::sync::Arc;

/// One field selection of a plan, specialized to the type it is selected
/// on. Built once per plan and shared, read-only, by every request.
#[derive(Clone, Debug)]
pub struct FieldInvocationContext {
    pub(crate) arguments: ArgumentSet,
    pub(crate) children: Vec<FieldInvocationContext>,
    pub(crate) directives: Vec<DirectiveInvocation>,
    pub(crate) field_name: String,
    pub(crate) location: SourceLocation,
    pub(crate) resolver: FieldResolverKind,
    pub(crate) response_key: String,
    pub(crate) return_type: TypeExpression,
    pub(crate) source_type: String,
}
impl FieldInvocationContext {
    pub fn arguments(&self) -> &ArgumentSet {
        &self.arguments
    }

    /// Invocations for the field's own selection set, in document order.
    pub fn children(&self) -> &[FieldInvocationContext] {
        &self.children
    }

    /// Directives in document order. Directives of an enclosing fragment come
    /// before the field's own.
    pub fn directives(&self) -> &[DirectiveInvocation] {
        &self.directives
    }

    pub fn field_name(&self) -> &str {
        self.field_name.as_str()
    }

    pub fn is_batch(&self) -> bool {
        self.resolver.is_batch()
    }

    pub fn location(&self) -> &SourceLocation {
        &self.location
    }

    pub fn resolver(&self) -> &FieldResolverKind {
        &self.resolver
    }

    /// The alias if one was given, else the field name.
    pub fn response_key(&self) -> &str {
        self.response_key.as_str()
    }

    pub fn return_type(&self) -> &TypeExpression {
        &self.return_type
    }

    /// The type a source value must be (or implement) for this invocation to
    /// apply to it: the enclosing selection set's type or the type condition
    /// of the fragment that contributed the field.
    pub fn source_type(&self) -> &str {
        self.source_type.as_str()
    }
}

/// A directive applied to a field, with the resolver registered for it.
#[derive(Clone)]
pub struct DirectiveInvocation {
    pub(crate) arguments: ArgumentSet,
    pub(crate) location: SourceLocation,
    pub(crate) name: String,
    pub(crate) phase: DirectivePhase,
    pub(crate) resolver: Arc<dyn DirectiveResolver>,
}
impl DirectiveInvocation {
    pub fn arguments(&self) -> &ArgumentSet {
        &self.arguments
    }

    pub fn location(&self) -> &SourceLocation {
        &self.location
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn phase(&self) -> DirectivePhase {
        self.phase
    }

    pub fn resolver(&self) -> &Arc<dyn DirectiveResolver> {
        &self.resolver
    }
}
impl std::fmt::Debug for DirectiveInvocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectiveInvocation")
            .field("arguments", &self.arguments)
            .field("location", &self.location)
            .field("name", &self.name)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}
