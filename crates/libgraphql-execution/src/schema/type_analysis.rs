/// The outcome of [`Schema::analyze_runtime_concrete_type()`](crate::schema::Schema::analyze_runtime_concrete_type).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TypeAnalysisResult {
    /// True when the concrete type *is* the expected type.
    pub exact_match_found: bool,
    /// Every schema type the concrete type can stand in for while satisfying
    /// the expected type. Empty when the concrete type is not compatible.
    pub found_types: Vec<String>,
}
impl TypeAnalysisResult {
    pub fn is_match(&self) -> bool {
        self.exact_match_found || !self.found_types.is_empty()
    }

    pub(crate) fn no_match() -> Self {
        Self::default()
    }
}
