use crate::document::DocumentPart;
use crate::document::PartId;
use crate::document::PartKind;
use crate::document::QueryDocument;
use crate::messages::GraphMessage;
use crate::schema::GraphType;
use crate::schema::NamedGraphTypeRef;
use crate::schema::Schema;
use crate::syntax::SyntaxNode;

/// The state shared by every [`ConstructionStep`](crate::document::ConstructionStep)
/// while one document is being built.
pub struct ConstructionContext<'a> {
    pub(crate) active_operation: Option<PartId>,
    pub(crate) document: QueryDocument,
    pub(crate) node: &'a SyntaxNode,
    pub(crate) parent: Option<PartId>,
    pub(crate) produced: Vec<PartId>,
    pub(crate) schema: &'a Schema,
}
impl<'a> ConstructionContext<'a> {
    pub(crate) fn new(schema: &'a Schema, root: &'a SyntaxNode) -> Self {
        Self {
            active_operation: None,
            document: QueryDocument::new(),
            node: root,
            parent: None,
            produced: vec![],
            schema,
        }
    }

    /// The operation whose subtree is being constructed, if any. Named
    /// fragments are defined outside of any operation.
    pub fn active_operation(&self) -> Option<PartId> {
        self.active_operation
    }

    pub fn document(&self) -> &QueryDocument {
        &self.document
    }

    pub fn node(&self) -> &'a SyntaxNode {
        self.node
    }

    pub fn parent_part(&self) -> Option<&DocumentPart> {
        self.parent.map(|id| self.document.part(id))
    }

    pub fn parent_kind(&self) -> Option<&PartKind> {
        self.parent_part().map(|part| part.kind())
    }

    /// The schema type bound to the part new parts will be attached to.
    pub fn parent_graph_type(&self) -> Option<&'a GraphType> {
        self.parent_part()
            .and_then(|part| part.graph_type())
            .and_then(|type_ref| type_ref.deref(self.schema).ok())
    }

    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    /// Attach a new part for the current node to the current parent.
    pub(crate) fn add_part(&mut self, kind: PartKind) -> PartId {
        let id = self.document.add_part(self.parent, kind, self.node.location);
        self.produced.push(id);
        id
    }

    /// Bind `part` to the named schema type. Names the schema does not define
    /// leave the part unbound.
    pub(crate) fn bind_graph_type(&mut self, part: PartId, type_name: Option<&str>) {
        let Some(type_name) = type_name else {
            return;
        };
        if self.schema.find_graph_type(type_name).is_none() {
            tracing::trace!(type_name, "leaving part unbound: unknown type");
            return;
        }
        let location = self.node.location;
        self.document
            .part_mut(part)
            .assign_graph_type(NamedGraphTypeRef::new(type_name, location));
    }

    pub(crate) fn add_message(&mut self, message: GraphMessage) {
        self.document.add_message(message);
    }
}
