//! The contracts application code implements to take part in execution,
//! and the registries that attach implementations to fields and directives.

mod builtin_directives;
mod directive_resolver;
mod field_resolver;
mod resolver_registry;

pub use builtin_directives::IncludeDirective;
pub use builtin_directives::SkipDirective;
pub use directive_resolver::DirectivePhase;
pub use directive_resolver::DirectiveResolutionContext;
pub use directive_resolver::DirectiveResolver;
pub use field_resolver::BatchFieldResolver;
pub use field_resolver::BatchResolverContext;
pub use field_resolver::FieldResolver;
pub use field_resolver::FieldResolverKind;
pub use field_resolver::FnBatchResolver;
pub use field_resolver::FnFieldResolver;
pub use field_resolver::ResolverContext;
pub use resolver_registry::DirectiveRegistry;
pub use resolver_registry::ResolverRegistry;
