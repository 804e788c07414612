use crate::action_result::ActionResult;
use crate::resolvers::BatchFieldResolver;
use crate::resolvers::BatchResolverContext;
use crate::resolvers::DirectivePhase;
use crate::resolvers::DirectiveResolver;
use crate::resolvers::FieldResolver;
use crate::resolvers::FieldResolverKind;
use crate::resolvers::FnBatchResolver;
use crate::resolvers::FnFieldResolver;
use crate::resolvers::IncludeDirective;
use crate::resolvers::ResolverContext;
use crate::resolvers::SkipDirective;
use crate::value::DataValue;
use std::collections::HashMap;
use std::sync::Arc;

/// Field resolvers keyed by the name of the type that owns the field and the
/// field name.
///
/// Fields with no registered resolver read the property of the same name
/// from their source object.
#[derive(Clone, Debug, Default)]
pub struct ResolverRegistry {
    resolvers: HashMap<String, HashMap<String, FieldResolverKind>>,
}
impl ResolverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(mut self, type_name: &str, field_name: &str, kind: FieldResolverKind) -> Self {
        let previous =
            self.resolvers.entry(type_name.to_string())
                .or_default()
                .insert(field_name.to_string(), kind);
        if previous.is_some() {
            tracing::debug!(type_name, field_name, "replaced registered field resolver");
        }
        self
    }

    pub fn register(
        self,
        type_name: &str,
        field_name: &str,
        resolver: impl FieldResolver + 'static,
    ) -> Self {
        self.insert(type_name, field_name, FieldResolverKind::Method(Arc::new(resolver)))
    }

    pub fn register_fn<F>(self, type_name: &str, field_name: &str, resolver: F) -> Self
    where
        F: Fn(&ResolverContext<'_>) -> anyhow::Result<ActionResult> + Send + Sync + 'static,
    {
        self.register(type_name, field_name, FnFieldResolver(resolver))
    }

    pub fn register_batch(
        self,
        type_name: &str,
        field_name: &str,
        resolver: impl BatchFieldResolver + 'static,
    ) -> Self {
        self.insert(type_name, field_name, FieldResolverKind::Batch(Arc::new(resolver)))
    }

    pub fn register_batch_fn<F>(self, type_name: &str, field_name: &str, resolver: F) -> Self
    where
        F: Fn(&BatchResolverContext<'_>) -> anyhow::Result<ActionResult> + Send + Sync + 'static,
    {
        self.register_batch(type_name, field_name, FnBatchResolver(resolver))
    }

    /// Mark a field as virtual: it is never resolved, and its value is
    /// `default` (or the source item itself when there is none).
    pub fn register_virtual(
        self,
        type_name: &str,
        field_name: &str,
        default: Option<DataValue>,
    ) -> Self {
        self.insert(type_name, field_name, FieldResolverKind::Virtual { default })
    }

    pub fn find(&self, type_name: &str, field_name: &str) -> Option<&FieldResolverKind> {
        self.resolvers.get(type_name)
            .and_then(|fields| fields.get(field_name))
    }
}

#[derive(Clone)]
pub(crate) struct RegisteredDirective {
    pub(crate) phase: DirectivePhase,
    pub(crate) resolver: Arc<dyn DirectiveResolver>,
}

/// Directive resolvers keyed by directive name.
///
/// [`DirectiveRegistry::new()`] registers `@skip` and `@include`, both run
/// before the field is resolved.
#[derive(Clone)]
pub struct DirectiveRegistry {
    directives: HashMap<String, RegisteredDirective>,
}
impl DirectiveRegistry {
    pub fn new() -> Self {
        Self::empty()
            .register("skip", DirectivePhase::Before, SkipDirective)
            .register("include", DirectivePhase::Before, IncludeDirective)
    }

    /// A registry without the built-in directives.
    pub fn empty() -> Self {
        Self {
            directives: HashMap::new(),
        }
    }

    pub fn register(
        mut self,
        name: &str,
        phase: DirectivePhase,
        resolver: impl DirectiveResolver + 'static,
    ) -> Self {
        self.directives.insert(name.to_string(), RegisteredDirective {
            phase,
            resolver: Arc::new(resolver),
        });
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.directives.contains_key(name)
    }

    pub(crate) fn find(&self, name: &str) -> Option<&RegisteredDirective> {
        self.directives.get(name)
    }
}
impl Default for DirectiveRegistry {
    fn default() -> Self {
        Self::new()
    }
}
impl std::fmt::Debug for DirectiveRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.directives.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("DirectiveRegistry").field("directives", &names).finish()
    }
}
