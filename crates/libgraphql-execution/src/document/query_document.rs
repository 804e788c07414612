use crate::document::DocumentPart;
use crate::document::PartId;
use crate::document::PartKind;
use crate::loc::SourceLocation;
use crate::messages::GraphMessage;
use crate::messages::MessageCollection;
use crate::schema::TypeExpression;
use crate::value::InputValue;
use indexmap::IndexMap;
use std::collections::HashMap;

/// A variable declared by an operation.
#[derive(Clone, Debug, PartialEq)]
pub struct VariableDeclaration {
    pub(crate) def_location: SourceLocation,
    /// `None` means "no default", which is distinct from a default of `null`.
    pub(crate) default_value: Option<InputValue>,
    pub(crate) name: String,
    pub(crate) part: PartId,
    pub(crate) referenced_count: usize,
    pub(crate) type_expression: TypeExpression,
}
impl VariableDeclaration {
    pub fn def_location(&self) -> &SourceLocation {
        &self.def_location
    }

    pub fn default_value(&self) -> Option<&InputValue> {
        self.default_value.as_ref()
    }

    pub fn is_referenced(&self) -> bool {
        self.referenced_count > 0
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn part(&self) -> PartId {
        self.part
    }

    pub fn referenced_count(&self) -> usize {
        self.referenced_count
    }

    pub fn type_expression(&self) -> &TypeExpression {
        &self.type_expression
    }
}

/// The per-operation index of declared variables, in declaration order.
pub type VariableDeclarations = IndexMap<String, VariableDeclaration>;

/// The bound document-part tree for one query document.
///
/// Parts live in an arena and refer to each other by [`PartId`]. The root
/// [`PartKind::Document`] part always has id `0`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryDocument {
    pub(crate) fragments: IndexMap<String, PartId>,
    pub(crate) messages: MessageCollection,
    pub(crate) operations: Vec<PartId>,
    pub(crate) parts: Vec<DocumentPart>,
    pub(crate) variables: HashMap<PartId, VariableDeclarations>,
}
impl QueryDocument {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append a new part as the last child of `parent`.
    pub(crate) fn add_part(
        &mut self,
        parent: Option<PartId>,
        kind: PartKind,
        location: SourceLocation,
    ) -> PartId {
        let id = PartId(self.parts.len());
        self.parts.push(DocumentPart {
            children: vec![],
            graph_type: None,
            id,
            kind,
            location,
            parent,
        });
        if let Some(parent) = parent {
            self.parts[parent.0].children.push(id);
        }
        id
    }

    pub(crate) fn add_message(&mut self, message: GraphMessage) {
        self.messages.add(message);
    }

    pub(crate) fn part_mut(&mut self, id: PartId) -> &mut DocumentPart {
        &mut self.parts[id.0]
    }

    pub(crate) fn variables_mut(&mut self, operation: PartId) -> &mut VariableDeclarations {
        self.variables.entry(operation).or_default()
    }

    pub fn part(&self, id: PartId) -> &DocumentPart {
        &self.parts[id.0]
    }

    pub fn parts(&self) -> &[DocumentPart] {
        &self.parts
    }

    pub fn root(&self) -> Option<&DocumentPart> {
        self.parts.first()
    }

    pub fn children(&self, id: PartId) -> impl Iterator<Item = &DocumentPart> {
        self.parts[id.0].children.iter().map(|child| &self.parts[child.0])
    }

    /// Every part in the subtree rooted at `id` (exclusive), depth-first and
    /// in document order.
    pub fn descendants(&self, id: PartId) -> Vec<PartId> {
        let mut found = vec![];
        let mut stack: Vec<PartId> = self.parts[id.0].children.iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            found.push(next);
            stack.extend(self.parts[next.0].children.iter().rev().copied());
        }
        found
    }

    pub fn messages(&self) -> &MessageCollection {
        &self.messages
    }

    pub fn named_fragment(&self, name: &str) -> Option<PartId> {
        self.fragments.get(name).copied()
    }

    pub fn named_fragments(&self) -> &IndexMap<String, PartId> {
        &self.fragments
    }

    pub fn operations(&self) -> &[PartId] {
        &self.operations
    }

    /// Find an operation by name. With no name this only succeeds when the
    /// document contains exactly one operation.
    pub fn operation(&self, name: Option<&str>) -> Option<PartId> {
        match name {
            Some(name) => self.operations.iter().copied().find(|op| {
                matches!(
                    &self.parts[op.0].kind,
                    PartKind::Operation { name: Some(op_name), .. } if op_name == name,
                )
            }),
            None if self.operations.len() == 1 => self.operations.first().copied(),
            None => None,
        }
    }

    pub fn variable_declarations(&self, operation: PartId) -> Option<&VariableDeclarations> {
        self.variables.get(&operation)
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}
