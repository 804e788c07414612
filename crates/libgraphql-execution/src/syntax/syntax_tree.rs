use crate::ast;
use crate::loc::SourceLocation;
use crate::schema::TypeExpression;
use crate::syntax::OperationType;
use crate::syntax::ScalarLiteral;
use crate::syntax::SyntaxNode;
use crate::syntax::SyntaxNodeKind;
use thiserror::Error;

/// An immutable, ordered tree of [`SyntaxNode`]s for one query document.
#[derive(Clone, Debug, PartialEq)]
pub struct SyntaxTree {
    root: SyntaxNode,
}
impl SyntaxTree {
    pub fn new(root: SyntaxNode) -> Self {
        Self { root }
    }

    /// Parse query text into a [`SyntaxTree`].
    pub fn parse(content: impl AsRef<str>) -> Result<Self, SyntaxError> {
        let ast_doc = ast::query::parse(content.as_ref())
            .map_err(|err| SyntaxError::ParseError(err.to_string()))?;
        Ok(Self::from_ast(&ast_doc))
    }

    pub fn from_ast(ast_doc: &ast::query::Document) -> Self {
        let children = ast_doc.definitions.iter().map(|def| match def {
            graphql_parser::query::Definition::Operation(op) => operation_node(op),
            graphql_parser::query::Definition::Fragment(frag) => fragment_node(frag),
        }).collect();

        Self {
            root: SyntaxNode::new(SyntaxNodeKind::Document, SourceLocation::new(1, 1))
                .with_children(children),
        }
    }

    pub fn root(&self) -> &SyntaxNode {
        &self.root
    }

    /// Total number of nodes in the tree, pass-through nodes included.
    pub fn len(&self) -> usize {
        self.root.subtree_len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum SyntaxError {
    #[error("Error parsing query document: {0}")]
    ParseError(String),
}

fn operation_node(op: &ast::query::OperationDefinition) -> SyntaxNode {
    use graphql_parser::query::OperationDefinition;
    let (operation_type, name, position, var_defs, directives, selection_set) = match op {
        OperationDefinition::SelectionSet(selection_set) =>
            (OperationType::Query, None, selection_set.span.0, &[][..], &[][..], selection_set),
        OperationDefinition::Query(query) => (
            OperationType::Query,
            query.name.clone(),
            query.position,
            &query.variable_definitions[..],
            &query.directives[..],
            &query.selection_set,
        ),
        OperationDefinition::Mutation(mutation) => (
            OperationType::Mutation,
            mutation.name.clone(),
            mutation.position,
            &mutation.variable_definitions[..],
            &mutation.directives[..],
            &mutation.selection_set,
        ),
        OperationDefinition::Subscription(subscription) => (
            OperationType::Subscription,
            subscription.name.clone(),
            subscription.position,
            &subscription.variable_definitions[..],
            &subscription.directives[..],
            &subscription.selection_set,
        ),
    };
    let location = SourceLocation::from_ast_pos(position);

    let mut children = vec![];
    if !var_defs.is_empty() {
        children.push(
            SyntaxNode::new(SyntaxNodeKind::VariableCollection, location)
                .with_children(var_defs.iter().map(variable_node).collect()),
        );
    }
    children.extend(directives.iter().map(directive_node));
    children.push(selection_set_node(selection_set));

    SyntaxNode::new(SyntaxNodeKind::Operation { name, operation_type }, location)
        .with_children(children)
}

fn fragment_node(frag: &ast::query::FragmentDefinition) -> SyntaxNode {
    let graphql_parser::query::TypeCondition::On(type_condition) = &frag.type_condition;
    let mut children: Vec<SyntaxNode> =
        frag.directives.iter().map(directive_node).collect();
    children.push(selection_set_node(&frag.selection_set));

    SyntaxNode::new(
        SyntaxNodeKind::NamedFragment {
            name: frag.name.to_string(),
            type_condition: type_condition.to_string(),
        },
        SourceLocation::from_ast_pos(frag.position),
    ).with_children(children)
}

fn variable_node(var_def: &ast::query::VariableDefinition) -> SyntaxNode {
    let location = SourceLocation::from_ast_pos(var_def.position);
    let children = var_def.default_value.iter()
        .map(|value| value_node(value, location))
        .collect();

    SyntaxNode::new(
        SyntaxNodeKind::Variable {
            name: var_def.name.to_string(),
            type_expression: TypeExpression::from_ast_type(&var_def.var_type),
        },
        location,
    ).with_children(children)
}

fn directive_node(directive: &ast::query::Directive) -> SyntaxNode {
    let location = SourceLocation::from_ast_pos(directive.position);
    let mut children = vec![];
    if !directive.arguments.is_empty() {
        children.push(input_items_node(&directive.arguments, location));
    }

    SyntaxNode::new(
        SyntaxNodeKind::Directive { name: directive.name.to_string() },
        location,
    ).with_children(children)
}

fn selection_set_node(selection_set: &ast::query::SelectionSet) -> SyntaxNode {
    use graphql_parser::query::Selection;
    let children = selection_set.items.iter().map(|selection| match selection {
        Selection::Field(field) => field_node(field),

        Selection::FragmentSpread(spread) => SyntaxNode::new(
            SyntaxNodeKind::FragmentSpread { name: spread.fragment_name.to_string() },
            SourceLocation::from_ast_pos(spread.position),
        ).with_children(spread.directives.iter().map(directive_node).collect()),

        Selection::InlineFragment(inline) => {
            let type_condition = inline.type_condition.as_ref().map(
                |graphql_parser::query::TypeCondition::On(name)| name.to_string(),
            );
            let mut children: Vec<SyntaxNode> =
                inline.directives.iter().map(directive_node).collect();
            children.push(selection_set_node(&inline.selection_set));
            SyntaxNode::new(
                SyntaxNodeKind::InlineFragment { type_condition },
                SourceLocation::from_ast_pos(inline.position),
            ).with_children(children)
        },
    }).collect();

    SyntaxNode::new(
        SyntaxNodeKind::FieldCollection,
        SourceLocation::from_ast_pos(selection_set.span.0),
    ).with_children(children)
}

fn field_node(field: &ast::query::Field) -> SyntaxNode {
    let location = SourceLocation::from_ast_pos(field.position);
    let mut children = vec![];
    if !field.arguments.is_empty() {
        children.push(input_items_node(&field.arguments, location));
    }
    children.extend(field.directives.iter().map(directive_node));
    if !field.selection_set.items.is_empty() {
        children.push(selection_set_node(&field.selection_set));
    }

    SyntaxNode::new(
        SyntaxNodeKind::Field {
            alias: field.alias.clone(),
            name: field.name.to_string(),
        },
        location,
    ).with_children(children)
}

fn input_items_node(
    arguments: &[(String, ast::Value)],
    location: SourceLocation,
) -> SyntaxNode {
    SyntaxNode::new(SyntaxNodeKind::InputItemCollection, location)
        .with_children(
            arguments.iter()
                .map(|(name, value)| input_item_node(name, value, location))
                .collect(),
        )
}

fn input_item_node(
    name: &str,
    value: &ast::Value,
    location: SourceLocation,
) -> SyntaxNode {
    SyntaxNode::new(SyntaxNodeKind::InputItem { name: name.to_string() }, location)
        .with_children(vec![value_node(value, location)])
}

// graphql_parser does not track positions for values, so value nodes inherit
// the location of the node that owns them.
fn value_node(value: &ast::Value, location: SourceLocation) -> SyntaxNode {
    use graphql_parser::query::Value;
    let scalar = |value: ScalarLiteral| SyntaxNode::new(
        SyntaxNodeKind::ScalarValue { value },
        location,
    );

    match value {
        Value::Variable(name) => SyntaxNode::new(
            SyntaxNodeKind::VariableValue { name: name.to_string() },
            location,
        ),
        Value::Int(num) => match num.as_i64() {
            Some(num) => scalar(ScalarLiteral::Int(num)),
            None => SyntaxNode::new(SyntaxNodeKind::NullValue, location),
        },
        Value::Float(num) => scalar(ScalarLiteral::Float(*num)),
        Value::String(text) => scalar(ScalarLiteral::String(text.to_string())),
        Value::Boolean(flag) => scalar(ScalarLiteral::Boolean(*flag)),
        Value::Null => SyntaxNode::new(SyntaxNodeKind::NullValue, location),
        Value::Enum(value) => SyntaxNode::new(
            SyntaxNodeKind::EnumValue { value: value.to_string() },
            location,
        ),
        Value::List(values) => SyntaxNode::new(SyntaxNodeKind::ListValue, location)
            .with_children(
                values.iter().map(|value| value_node(value, location)).collect(),
            ),
        Value::Object(fields) => SyntaxNode::new(SyntaxNodeKind::ComplexValue, location)
            .with_children(
                fields.iter()
                    .map(|(name, value)| input_item_node(name, value, location))
                    .collect(),
            ),
    }
}
