use crate::loc::SourceLocation;
use crate::schema::ArgumentDefinition;
use crate::schema::DirectiveDefinition;
use crate::schema::FieldDefinition;
use crate::schema::NamedGraphTypeRef;
use crate::syntax::OperationType;
use crate::syntax::ScalarLiteral;

/// Index of a [`DocumentPart`] within its
/// [`QueryDocument`](crate::document::QueryDocument).
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct PartId(pub(crate) usize);
impl PartId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A value written into the document, owned by an argument, an input-object
/// field, a variable declaration (as its default) or a list value.
#[derive(Clone, Debug, PartialEq)]
pub enum SuppliedValue {
    /// An input-object literal; its children are
    /// [`PartKind::InputObjectField`] parts.
    Complex,
    Enum(String),
    /// Its children are the list's items.
    List,
    Null,
    Scalar(ScalarLiteral),
    /// Defers to the variable named `name`. Resolved when arguments are
    /// materialized for a request.
    VariableRef {
        name: String,
    },
}

/// The kind discriminator of a [`DocumentPart`] plus its kind-specific
/// payload.
#[derive(Clone, Debug, PartialEq)]
pub enum PartKind {
    Directive {
        /// `None` when the schema does not define a directive of this name.
        definition: Option<DirectiveDefinition>,
        name: String,
    },
    Document,
    Field {
        alias: Option<String>,
        /// `None` when the field could not be bound: the parent type is a
        /// union, is not a field container, or declares no such field.
        definition: Option<FieldDefinition>,
        name: String,
    },
    FieldSelectionSet,
    /// A `__typename` selection. `owner_type_name` is the concrete member
    /// type this part was produced for.
    FieldTypeName {
        alias: Option<String>,
        owner_type_name: Option<String>,
    },
    FragmentSpread {
        name: String,
        /// Bound by [`DocumentLinker`](crate::document::DocumentLinker).
        target: Option<PartId>,
    },
    InlineFragment {
        type_condition: Option<String>,
    },
    InputArgument {
        definition: Option<ArgumentDefinition>,
        name: String,
    },
    InputObjectField {
        definition: Option<ArgumentDefinition>,
        name: String,
    },
    NamedFragment {
        name: String,
        type_condition: String,
    },
    Operation {
        name: Option<String>,
        operation_type: OperationType,
    },
    SuppliedValue(SuppliedValue),
    Variable {
        name: String,
    },
}
impl PartKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Directive { .. } => "Directive",
            Self::Document => "Document",
            Self::Field { .. } => "Field",
            Self::FieldSelectionSet => "FieldSelectionSet",
            Self::FieldTypeName { .. } => "FieldTypeName",
            Self::FragmentSpread { .. } => "FragmentSpread",
            Self::InlineFragment { .. } => "InlineFragment",
            Self::InputArgument { .. } => "InputArgument",
            Self::InputObjectField { .. } => "InputObjectField",
            Self::NamedFragment { .. } => "NamedFragment",
            Self::Operation { .. } => "Operation",
            Self::SuppliedValue(_) => "SuppliedValue",
            Self::Variable { .. } => "Variable",
        }
    }

    /// The argument or input-field definition an input part is bound to.
    pub fn input_definition(&self) -> Option<&ArgumentDefinition> {
        match self {
            Self::InputArgument { definition, .. }
                | Self::InputObjectField { definition, .. } => definition.as_ref(),
            _ => None,
        }
    }
}

/// One bound, schema-aware node in a [`QueryDocument`](crate::document::QueryDocument).
#[derive(Clone, Debug, PartialEq)]
pub struct DocumentPart {
    pub(crate) children: Vec<PartId>,
    pub(crate) graph_type: Option<NamedGraphTypeRef>,
    pub(crate) id: PartId,
    pub(crate) kind: PartKind,
    pub(crate) location: SourceLocation,
    pub(crate) parent: Option<PartId>,
}
impl DocumentPart {
    /// Bind this part to a graph type. A part's graph type never changes once
    /// assigned, so this returns `false` (and does nothing) if one already
    /// was.
    pub(crate) fn assign_graph_type(&mut self, graph_type: NamedGraphTypeRef) -> bool {
        if self.graph_type.is_some() {
            return false;
        }
        self.graph_type = Some(graph_type);
        true
    }

    pub fn children(&self) -> &[PartId] {
        &self.children
    }

    pub fn graph_type(&self) -> Option<&NamedGraphTypeRef> {
        self.graph_type.as_ref()
    }

    pub fn graph_type_name(&self) -> Option<&str> {
        self.graph_type.as_ref().map(|type_ref| type_ref.name())
    }

    pub fn id(&self) -> PartId {
        self.id
    }

    pub fn kind(&self) -> &PartKind {
        &self.kind
    }

    pub fn location(&self) -> &SourceLocation {
        &self.location
    }

    pub fn parent(&self) -> Option<PartId> {
        self.parent
    }
}
