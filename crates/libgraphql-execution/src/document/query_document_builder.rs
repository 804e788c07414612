use crate::document::DocumentConstructionError;
use crate::document::DocumentConstructor;
use crate::document::DocumentLinker;
use crate::document::QueryDocument;
use crate::schema::Schema;
use crate::syntax::SyntaxError;
use crate::syntax::SyntaxTree;
use thiserror::Error;

type Result<T> = std::result::Result<T, QueryDocumentBuildError>;

/// Parses, constructs and links a [`QueryDocument`] against a [`Schema`].
///
/// Problems with the query itself are reported through
/// [`QueryDocument::messages()`]; only unparseable text and internal
/// construction failures are returned as errors.
pub struct QueryDocumentBuilder<'schema> {
    constructor: DocumentConstructor,
    linker: DocumentLinker,
    schema: &'schema Schema,
}
impl<'schema> QueryDocumentBuilder<'schema> {
    pub fn new(schema: &'schema Schema) -> Self {
        Self {
            constructor: DocumentConstructor::new(),
            linker: DocumentLinker::new(),
            schema,
        }
    }

    pub fn with_constructor(mut self, constructor: DocumentConstructor) -> Self {
        self.constructor = constructor;
        self
    }

    pub fn build_from_str(&self, content: impl AsRef<str>) -> Result<QueryDocument> {
        let tree = SyntaxTree::parse(content)?;
        self.build_from_tree(&tree)
    }

    pub fn build_from_tree(&self, tree: &SyntaxTree) -> Result<QueryDocument> {
        let mut document = self.constructor.construct(self.schema, tree)?;
        self.linker.link(&mut document);
        Ok(document)
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum QueryDocumentBuildError {
    #[error(transparent)]
    Construction(#[from] DocumentConstructionError),

    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}
