use crate::document::VariableDeclarations;
use crate::messages::MessageCollection;
use crate::plan::FieldInvocationContext;
use crate::schema::Schema;
use crate::syntax::OperationType;

/// One operation of a document, compiled against a schema and ready to be
/// executed any number of times.
#[derive(Clone, Debug)]
pub struct ExecutionPlan<'schema> {
    pub(crate) fields: Vec<FieldInvocationContext>,
    pub(crate) messages: MessageCollection,
    pub(crate) operation_name: Option<String>,
    pub(crate) operation_type: OperationType,
    pub(crate) root_type_name: String,
    pub(crate) schema: &'schema Schema,
    pub(crate) variables: VariableDeclarations,
}
impl<'schema> ExecutionPlan<'schema> {
    /// The operation's root field invocations.
    pub fn fields(&self) -> &[FieldInvocationContext] {
        &self.fields
    }

    /// Non-critical messages recorded while the document and plan were
    /// built. Every execution of the plan reports them.
    pub fn messages(&self) -> &MessageCollection {
        &self.messages
    }

    pub fn operation_name(&self) -> Option<&str> {
        self.operation_name.as_deref()
    }

    pub fn operation_type(&self) -> OperationType {
        self.operation_type
    }

    pub fn root_type_name(&self) -> &str {
        self.root_type_name.as_str()
    }

    pub fn schema(&self) -> &'schema Schema {
        self.schema
    }

    pub fn variables(&self) -> &VariableDeclarations {
        &self.variables
    }
}
