/// A line/column position within a query or schema document.
///
/// Very similar to graphql_parser's [Pos](graphql_parser::Pos). Lines and
/// columns are 1-based; a position of `0:0` marks a location that was
/// synthesized rather than read from a document.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    Hash,
    PartialEq,
    serde::Deserialize,
    serde::Serialize,
)]
pub struct SourceLocation {
    pub col: usize,
    pub line: usize,
}
impl SourceLocation {
    pub fn new(line: usize, col: usize) -> Self {
        Self { col, line }
    }

    /// A location for parts that have no corresponding text in a document
    /// (e.g. the synthetic `String` binding of a `__typename` field).
    pub fn synthetic() -> Self {
        Self::default()
    }

    pub fn is_synthetic(&self) -> bool {
        self.line == 0 && self.col == 0
    }

    pub(crate) fn from_ast_pos(pos: graphql_parser::Pos) -> Self {
        Self {
            col: pos.column,
            line: pos.line,
        }
    }
}
impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}
