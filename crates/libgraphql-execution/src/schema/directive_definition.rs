use crate::loc::SourceLocation;
use crate::named_ref::DerefByName;
use crate::named_ref::DerefByNameError;
use crate::named_ref::NamedRef;
use crate::schema::ArgumentDefinition;
use crate::schema::Schema;
use crate::schema::TypeExpression;
use crate::value::InputValue;
use indexmap::IndexMap;

/// A directive definition known to a [`Schema`], either declared in SDL or
/// one of the built-in directives (`@skip`, `@include`, `@deprecated`).
#[derive(Clone, Debug, PartialEq)]
pub struct DirectiveDefinition {
    pub(crate) arguments: IndexMap<String, ArgumentDefinition>,
    pub(crate) builtin: bool,
    pub(crate) def_location: SourceLocation,
    pub(crate) locations: Vec<String>,
    pub(crate) name: String,
    pub(crate) repeatable: bool,
}
impl DirectiveDefinition {
    pub fn argument(&self, name: &str) -> Option<&ArgumentDefinition> {
        self.arguments.get(name)
    }

    pub fn arguments(&self) -> &IndexMap<String, ArgumentDefinition> {
        &self.arguments
    }

    pub fn is_builtin(&self) -> bool {
        self.builtin
    }

    pub fn is_repeatable(&self) -> bool {
        self.repeatable
    }

    /// The names of the locations this directive may be applied to, as
    /// written in SDL (e.g. `FIELD`, `FRAGMENT_SPREAD`).
    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub(crate) fn builtin_skip() -> Self {
        Self::builtin_conditional("skip")
    }

    pub(crate) fn builtin_include() -> Self {
        Self::builtin_conditional("include")
    }

    pub(crate) fn builtin_deprecated() -> Self {
        let mut arguments = IndexMap::new();
        arguments.insert("reason".to_string(), ArgumentDefinition {
            def_location: SourceLocation::synthetic(),
            default_value: Some(InputValue::String("No longer supported".to_string())),
            name: "reason".to_string(),
            type_expression: TypeExpression::named("String", true),
        });
        Self {
            arguments,
            builtin: true,
            def_location: SourceLocation::synthetic(),
            locations: vec![
                "FIELD_DEFINITION".to_string(),
                "ARGUMENT_DEFINITION".to_string(),
                "INPUT_FIELD_DEFINITION".to_string(),
                "ENUM_VALUE".to_string(),
            ],
            name: "deprecated".to_string(),
            repeatable: false,
        }
    }

    fn builtin_conditional(name: &str) -> Self {
        let mut arguments = IndexMap::new();
        arguments.insert("if".to_string(), ArgumentDefinition {
            def_location: SourceLocation::synthetic(),
            default_value: None,
            name: "if".to_string(),
            type_expression: TypeExpression::named("Boolean", false),
        });
        Self {
            arguments,
            builtin: true,
            def_location: SourceLocation::synthetic(),
            locations: vec![
                "FIELD".to_string(),
                "FRAGMENT_SPREAD".to_string(),
                "INLINE_FRAGMENT".to_string(),
            ],
            name: name.to_string(),
            repeatable: false,
        }
    }
}
impl DerefByName for DirectiveDefinition {
    type Source = Schema;

    fn deref_name<'a>(
        schema: &'a Schema,
        name: &str,
    ) -> Result<&'a Self, DerefByNameError> {
        schema.directives.get(name).ok_or_else(
            || DerefByNameError::DanglingReference(name.to_string()),
        )
    }
}

pub type NamedDirectiveRef = NamedRef<Schema, DirectiveDefinition>;
