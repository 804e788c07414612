use crate::schema::TypeExpression;
use crate::value::InputValue;
use indexmap::IndexMap;

/// A declared variable after binding: its final, type-checked value.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedVariable {
    pub(crate) is_default: bool,
    pub(crate) name: String,
    pub(crate) type_expression: TypeExpression,
    pub(crate) value: InputValue,
}
impl ResolvedVariable {
    /// Whether the value came from the declaration's default rather than
    /// from the request.
    pub fn is_default(&self) -> bool {
        self.is_default
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn type_expression(&self) -> &TypeExpression {
        &self.type_expression
    }

    pub fn value(&self) -> &InputValue {
        &self.value
    }
}

/// Every declared variable of one operation, bound for one request.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResolvedVariableCollection {
    variables: IndexMap<String, ResolvedVariable>,
}
impl ResolvedVariableCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, variable: ResolvedVariable) {
        self.variables.insert(variable.name.to_string(), variable);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&ResolvedVariable> {
        self.variables.get(name)
    }

    pub fn value(&self, name: &str) -> Option<&InputValue> {
        self.get(name).map(|variable| &variable.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedVariable> {
        self.variables.values()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }
}
