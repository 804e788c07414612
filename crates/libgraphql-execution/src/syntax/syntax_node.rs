use crate::loc::SourceLocation;
use crate::schema::TypeExpression;
use crate::syntax::OperationType;
use crate::value::InputValue;

/// A literal scalar written directly in a query document.
#[derive(Clone, Debug, PartialEq)]
pub enum ScalarLiteral {
    Boolean(bool),
    Float(f64),
    Int(i64),
    String(String),
}
impl ScalarLiteral {
    pub fn to_input_value(&self) -> InputValue {
        match self {
            Self::Boolean(value) => InputValue::Boolean(*value),
            Self::Float(value) => InputValue::Float(*value),
            Self::Int(value) => InputValue::Int(*value),
            Self::String(value) => InputValue::String(value.to_string()),
        }
    }
}

/// The type tag (and kind-specific payload) of a [`SyntaxNode`].
#[derive(Clone, Debug, PartialEq)]
pub enum SyntaxNodeKind {
    /// An input-object literal. Its children are [`SyntaxNodeKind::InputItem`]
    /// nodes.
    ComplexValue,
    Directive {
        name: String,
    },
    Document,
    EnumValue {
        value: String,
    },
    Field {
        alias: Option<String>,
        name: String,
    },
    FieldCollection,
    FragmentSpread {
        name: String,
    },
    InlineFragment {
        type_condition: Option<String>,
    },
    /// A named argument of a field or directive, or a named field of an
    /// input-object literal. Its only child is the supplied value.
    InputItem {
        name: String,
    },
    InputItemCollection,
    ListValue,
    NamedFragment {
        name: String,
        type_condition: String,
    },
    NullValue,
    Operation {
        name: Option<String>,
        operation_type: OperationType,
    },
    ScalarValue {
        value: ScalarLiteral,
    },
    /// A variable declaration. Its only (optional) child is the default value.
    Variable {
        name: String,
        type_expression: TypeExpression,
    },
    VariableCollection,
    /// A reference to a variable (`$name`) in value position.
    VariableValue {
        name: String,
    },
}
impl SyntaxNodeKind {
    /// Whether nodes of this kind only group their children and produce no
    /// document part of their own.
    pub fn is_pass_through(&self) -> bool {
        matches!(self, Self::InputItemCollection | Self::VariableCollection)
    }

    /// Whether this node appears in value position.
    pub fn is_value(&self) -> bool {
        matches!(
            self,
            Self::ComplexValue
                | Self::EnumValue { .. }
                | Self::ListValue
                | Self::NullValue
                | Self::ScalarValue { .. }
                | Self::VariableValue { .. }
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::ComplexValue => "ComplexValue",
            Self::Directive { .. } => "Directive",
            Self::Document => "Document",
            Self::EnumValue { .. } => "EnumValue",
            Self::Field { .. } => "Field",
            Self::FieldCollection => "FieldCollection",
            Self::FragmentSpread { .. } => "FragmentSpread",
            Self::InlineFragment { .. } => "InlineFragment",
            Self::InputItem { .. } => "InputItem",
            Self::InputItemCollection => "InputItemCollection",
            Self::ListValue => "ListValue",
            Self::NamedFragment { .. } => "NamedFragment",
            Self::NullValue => "NullValue",
            Self::Operation { .. } => "Operation",
            Self::ScalarValue { .. } => "ScalarValue",
            Self::Variable { .. } => "Variable",
            Self::VariableCollection => "VariableCollection",
            Self::VariableValue { .. } => "VariableValue",
        }
    }
}

/// One node of a [`SyntaxTree`](crate::syntax::SyntaxTree).
#[derive(Clone, Debug, PartialEq)]
pub struct SyntaxNode {
    pub(crate) children: Vec<SyntaxNode>,
    pub(crate) kind: SyntaxNodeKind,
    pub(crate) location: SourceLocation,
}
impl SyntaxNode {
    pub fn new(kind: SyntaxNodeKind, location: SourceLocation) -> Self {
        Self {
            children: vec![],
            kind,
            location,
        }
    }

    pub fn with_children(mut self, children: Vec<SyntaxNode>) -> Self {
        self.children = children;
        self
    }

    pub fn children(&self) -> &[SyntaxNode] {
        &self.children
    }

    pub fn kind(&self) -> &SyntaxNodeKind {
        &self.kind
    }

    pub fn location(&self) -> &SourceLocation {
        &self.location
    }

    /// Total number of nodes in the subtree rooted at this node (inclusive).
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(SyntaxNode::subtree_len).sum::<usize>()
    }

    /// Depth-first, pre-order traversal of this subtree.
    pub fn walk(&self) -> Vec<&SyntaxNode> {
        let mut nodes = vec![];
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            nodes.push(node);
            stack.extend(node.children.iter().rev());
        }
        nodes
    }
}
