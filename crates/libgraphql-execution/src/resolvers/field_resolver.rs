use crate::action_result::ActionResult;
use crate::plan::FieldInvocationContext;
use crate::response_path::ResponsePath;
use crate::value::Arguments;
use crate::value::DataValue;
use crate::variables::ResolvedVariableCollection;
use async_trait::async_trait;
use std::sync::Arc;

/// What a per-source-item resolver is given.
pub struct ResolverContext<'a> {
    pub(crate) arguments: &'a Arguments,
    pub(crate) field: &'a FieldInvocationContext,
    pub(crate) path: &'a ResponsePath,
    pub(crate) source: &'a DataValue,
    pub(crate) variables: &'a ResolvedVariableCollection,
}
impl<'a> ResolverContext<'a> {
    pub fn arguments(&self) -> &'a Arguments {
        self.arguments
    }

    pub fn field(&self) -> &'a FieldInvocationContext {
        self.field
    }

    pub fn path(&self) -> &'a ResponsePath {
        self.path
    }

    /// The value of the parent field this field is resolved on.
    pub fn source(&self) -> &'a DataValue {
        self.source
    }

    pub fn variables(&self) -> &'a ResolvedVariableCollection {
        self.variables
    }
}

/// What a batch resolver is given: every source of the batch at once.
pub struct BatchResolverContext<'a> {
    pub(crate) arguments: &'a Arguments,
    pub(crate) field: &'a FieldInvocationContext,
    pub(crate) sources: &'a [DataValue],
    pub(crate) variables: &'a ResolvedVariableCollection,
}
impl<'a> BatchResolverContext<'a> {
    pub fn arguments(&self) -> &'a Arguments {
        self.arguments
    }

    pub fn field(&self) -> &'a FieldInvocationContext {
        self.field
    }

    pub fn sources(&self) -> &'a [DataValue] {
        self.sources
    }

    pub fn variables(&self) -> &'a ResolvedVariableCollection {
        self.variables
    }
}

/// Resolves a field one source item at a time.
///
/// Returning `Err` (or panicking) is reported as a critical
/// `UNHANDLED_EXCEPTION` message on the field; it never fails the request.
#[async_trait]
pub trait FieldResolver: Send + Sync {
    async fn resolve(&self, ctx: &ResolverContext<'_>) -> anyhow::Result<ActionResult>;
}

/// Resolves a field for every source item of a batch in one call. The
/// resolver is expected to return [`ActionResult::BatchComplete`].
#[async_trait]
pub trait BatchFieldResolver: Send + Sync {
    async fn resolve_batch(&self, ctx: &BatchResolverContext<'_>) -> anyhow::Result<ActionResult>;
}

/// A [`FieldResolver`] backed by a synchronous function.
pub struct FnFieldResolver<F>(pub F);
#[async_trait]
impl<F> FieldResolver for FnFieldResolver<F>
where
    F: Fn(&ResolverContext<'_>) -> anyhow::Result<ActionResult> + Send + Sync,
{
    async fn resolve(&self, ctx: &ResolverContext<'_>) -> anyhow::Result<ActionResult> {
        (self.0)(ctx)
    }
}

/// A [`BatchFieldResolver`] backed by a synchronous function.
pub struct FnBatchResolver<F>(pub F);
#[async_trait]
impl<F> BatchFieldResolver for FnBatchResolver<F>
where
    F: Fn(&BatchResolverContext<'_>) -> anyhow::Result<ActionResult> + Send + Sync,
{
    async fn resolve_batch(&self, ctx: &BatchResolverContext<'_>) -> anyhow::Result<ActionResult> {
        (self.0)(ctx)
    }
}

/// How a field produces its value. Chosen once, when the plan is built.
#[derive(Clone)]
pub enum FieldResolverKind {
    /// Read the property of the same name from the source object.
    Property {
        property: String,
    },
    Method(Arc<dyn FieldResolver>),
    Batch(Arc<dyn BatchFieldResolver>),
    /// The concrete type name of the source (`__typename`).
    TypeName,
    /// Not resolved: the value is supplied from outside. `default` replaces
    /// the placeholder when given, otherwise the source itself does.
    Virtual {
        default: Option<DataValue>,
    },
}
impl FieldResolverKind {
    pub fn is_batch(&self) -> bool {
        matches!(self, Self::Batch(_))
    }
}
impl std::fmt::Debug for FieldResolverKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Property { property } =>
                f.debug_struct("Property").field("property", property).finish(),
            Self::Method(_) => f.write_str("Method(..)"),
            Self::Batch(_) => f.write_str("Batch(..)"),
            Self::TypeName => f.write_str("TypeName"),
            Self::Virtual { default } =>
                f.debug_struct("Virtual").field("default", default).finish(),
        }
    }
}
