//! Binding of raw (JSON) variable payloads to an operation's declared
//! variables.

mod resolved_variable;
mod value_resolvers;
mod variable_binder;

pub use resolved_variable::ResolvedVariable;
pub use resolved_variable::ResolvedVariableCollection;
pub use value_resolvers::EnumValueResolver;
pub use value_resolvers::InputObjectValueResolver;
pub use value_resolvers::InputValueResolver;
pub use value_resolvers::ListValueResolver;
pub use value_resolvers::ScalarValueResolver;
pub use value_resolvers::TypeExpressionResolver;
pub use variable_binder::VariableBinder;
pub use variable_binder::VariableResolutionError;

#[cfg(test)]
mod tests;
