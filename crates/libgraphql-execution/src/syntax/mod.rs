//! The syntax tree consumed by document construction.
//!
//! Lexing and parsing are delegated to `graphql_parser`; this module only
//! reshapes its AST into an ordered tree of kind-tagged [`SyntaxNode`]s.

mod operation_type;
mod syntax_node;
mod syntax_tree;

pub use operation_type::OperationType;
pub use syntax_node::ScalarLiteral;
pub use syntax_node::SyntaxNode;
pub use syntax_node::SyntaxNodeKind;
pub use syntax_tree::SyntaxError;
pub use syntax_tree::SyntaxTree;
