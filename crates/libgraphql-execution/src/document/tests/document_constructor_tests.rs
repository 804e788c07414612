use crate::document::DocumentConstructor;
use crate::document::PartId;
use crate::document::PartKind;
use crate::document::QueryDocument;
use crate::document::SuppliedValue;
use crate::error_codes;
use crate::schema::Schema;
use crate::syntax::OperationType;
use crate::syntax::ScalarLiteral;
use crate::syntax::SyntaxNode;
use crate::syntax::SyntaxNodeKind;
use crate::syntax::SyntaxTree;
use crate::tests::test_utils::build_document;
use crate::tests::test_utils::init_test_logging;
use crate::tests::test_utils::starwars_schema;
use crate::value::InputValue;

fn construct(schema: &Schema, query: &str) -> QueryDocument {
    init_test_logging();
    let tree = SyntaxTree::parse(query).unwrap();
    DocumentConstructor::new().construct(schema, &tree).unwrap()
}

fn find_parts<'a>(
    doc: &'a QueryDocument,
    pred: impl Fn(&PartKind) -> bool + 'a,
) -> Vec<PartId> {
    doc.parts().iter().filter(|part| pred(part.kind())).map(|part| part.id()).collect()
}

fn field_named(doc: &QueryDocument, field_name: &str) -> PartId {
    let found = find_parts(doc, |kind| matches!(
        kind,
        PartKind::Field { name, .. } if name == field_name,
    ));
    assert_eq!(found.len(), 1, "expected exactly one `{field_name}` field");
    found[0]
}

fn expected_part_kind(node: &SyntaxNodeKind) -> &'static str {
    match node {
        SyntaxNodeKind::Document => "Document",
        SyntaxNodeKind::Operation { .. } => "Operation",
        SyntaxNodeKind::FieldCollection => "FieldSelectionSet",
        SyntaxNodeKind::Field { name, .. } if name == "__typename" => "FieldTypeName",
        SyntaxNodeKind::Field { .. } => "Field",
        SyntaxNodeKind::Directive { .. } => "Directive",
        SyntaxNodeKind::Variable { .. } => "Variable",
        SyntaxNodeKind::NamedFragment { .. } => "NamedFragment",
        SyntaxNodeKind::InlineFragment { .. } => "InlineFragment",
        SyntaxNodeKind::FragmentSpread { .. } => "FragmentSpread",
        SyntaxNodeKind::InputItem { .. } => "Input",
        _ => "SuppliedValue",
    }
}

fn non_pass_through_children(node: &SyntaxNode) -> Vec<&SyntaxNode> {
    node.children().iter().flat_map(|child| {
        if child.kind().is_pass_through() {
            non_pass_through_children(child)
        } else {
            vec![child]
        }
    }).collect()
}

fn assert_mirrors_syntax(doc: &QueryDocument, node: &SyntaxNode, part_id: PartId) {
    let part = doc.part(part_id);
    let expected = expected_part_kind(node.kind());
    if expected == "Input" {
        assert!(matches!(
            part.kind(),
            PartKind::InputArgument { .. } | PartKind::InputObjectField { .. },
        ));
    } else {
        assert_eq!(part.kind().name(), expected);
    }
    assert_eq!(part.location(), node.location());

    let syntax_children = non_pass_through_children(node);
    assert_eq!(part.children().len(), syntax_children.len());
    for (child_node, child_id) in syntax_children.into_iter().zip(part.children()) {
        assert_eq!(doc.part(*child_id).parent(), Some(part_id));
        assert_mirrors_syntax(doc, child_node, *child_id);
    }
}

#[test]
fn one_part_per_node_with_matching_parents() {
    let schema = starwars_schema();
    let query = concat!(
        "query Hero($ep: Episode = JEDI, $withFriends: Boolean!) @upper {\n",
        "  hero(episode: $ep) {\n",
        "    id\n",
        "    __typename\n",
        "    friends @include(if: $withFriends) { name }\n",
        "    ... on Human { height(unit: FOOT) }\n",
        "    ...CharBits\n",
        "  }\n",
        "  search(filter: { text: \"x\", tags: [\"a\", \"b\"], nested: { text: \"y\" } }, limit: null) {\n",
        "    ... on Droid { __typename }\n",
        "  }\n",
        "}\n",
        "fragment CharBits on Character { name }\n",
    );
    let tree = SyntaxTree::parse(query).unwrap();
    let doc = construct(&schema, query);

    let expected_parts =
        tree.root().walk().into_iter()
            .filter(|node| !node.kind().is_pass_through())
            .count();
    assert_eq!(doc.len(), expected_parts);
    assert_eq!(doc.root().map(|root| root.parent()), Some(None));
    assert_mirrors_syntax(&doc, tree.root(), PartId(0));
    assert!(doc.messages().is_empty(), "{:?}", doc.messages());
}

#[test]
fn construction_is_idempotent() {
    let schema = starwars_schema();
    let query = concat!(
        "query Q($id: ID!) { node(id: $id) { id ...F } pets { __typename } }\n",
        "fragment F on Node { __typename }\n",
    );
    let tree = SyntaxTree::parse(query).unwrap();
    let constructor = DocumentConstructor::new();

    let first = constructor.construct(&schema, &tree).unwrap();
    let second = constructor.construct(&schema, &tree).unwrap();
    assert_eq!(first, second);
}

#[test]
fn operation_binds_root_type() {
    let schema = starwars_schema();
    let doc = construct(&schema, "mutation M { rename(id: 1, name: \"x\") { id } }");

    let op = doc.operation(Some("M")).unwrap();
    assert_eq!(doc.part(op).kind(), &PartKind::Operation {
        name: Some("M".to_string()),
        operation_type: OperationType::Mutation,
    });
    assert_eq!(doc.part(op).graph_type_name(), Some("Mutation"));

    let rename = field_named(&doc, "rename");
    assert_eq!(doc.part(rename).graph_type_name(), Some("Human"));
}

#[test]
fn operation_lookup() {
    let schema = starwars_schema();
    let single = construct(&schema, "{ pets { __typename } }");
    assert!(single.operation(None).is_some());

    let multi = construct(&schema, "query A { pets { __typename } } query B { human(id: 1) { id } }");
    assert!(multi.operation(None).is_none());
    assert!(multi.operation(Some("B")).is_some());
    assert!(multi.operation(Some("C")).is_none());
}

mod typename {
    use super::*;

    #[test]
    fn typename_on_object_produces_single_part() {
        let schema = starwars_schema();
        let doc = construct(&schema, "{ human(id: 1) { __typename } }");

        let parts = find_parts(&doc, |kind| matches!(kind, PartKind::FieldTypeName { .. }));
        assert_eq!(parts.len(), 1);
        let part = doc.part(parts[0]);
        assert_eq!(part.graph_type_name(), Some("String"));
        assert_eq!(part.kind(), &PartKind::FieldTypeName {
            alias: None,
            owner_type_name: Some("Human".to_string()),
        });
    }

    #[test]
    fn typename_on_union_fans_out_per_member() {
        let schema = starwars_schema();
        let doc = construct(&schema, "{ pets { kind: __typename } }");

        let parts = find_parts(&doc, |kind| matches!(kind, PartKind::FieldTypeName { .. }));
        assert_eq!(parts.len(), 2);

        let owners: Vec<_> = parts.iter().map(|id| doc.part(*id).kind().clone()).collect();
        assert_eq!(owners, vec![
            PartKind::FieldTypeName {
                alias: Some("kind".to_string()),
                owner_type_name: Some("Cat".to_string()),
            },
            PartKind::FieldTypeName {
                alias: Some("kind".to_string()),
                owner_type_name: Some("Dog".to_string()),
            },
        ]);

        // All of them are siblings under the same selection set.
        let parent = doc.part(parts[0]).parent();
        assert!(parts.iter().all(|id| doc.part(*id).parent() == parent));
        assert_eq!(doc.part(parent.unwrap()).children(), &parts[..]);
        assert!(parts.iter().all(|id| doc.part(*id).graph_type_name() == Some("String")));
    }

    #[test]
    fn typename_children_are_built_under_every_fanned_out_part() {
        let schema = starwars_schema();
        let doc = construct(&schema, "{ pets { __typename @upper } }");

        let parts = find_parts(&doc, |kind| matches!(kind, PartKind::FieldTypeName { .. }));
        assert_eq!(parts.len(), 2);
        for id in parts {
            assert_eq!(doc.part(id).children().len(), 1);
        }
    }
}

mod fields {
    use super::*;

    #[test]
    fn field_on_union_is_left_unbound() {
        let schema = starwars_schema();
        let doc = construct(&schema, "{ pets { name } }");

        let name = doc.part(field_named(&doc, "name"));
        assert!(matches!(name.kind(), PartKind::Field { definition: None, .. }));
        assert!(name.graph_type().is_none());
        assert!(doc.messages().is_empty());
    }

    #[test]
    fn field_on_interface_is_bound() {
        let schema = starwars_schema();
        let doc = construct(&schema, "{ hero { friends { name } } }");

        let friends = doc.part(field_named(&doc, "friends"));
        let PartKind::Field { definition: Some(definition), .. } = friends.kind() else {
            panic!("`friends` should be bound");
        };
        assert_eq!(definition.owner_type_name(), "Character");
        assert_eq!(friends.graph_type_name(), Some("Character"));
    }

    #[test]
    fn unknown_field_is_left_unbound() {
        let schema = starwars_schema();
        let doc = construct(&schema, "{ hero { bogus { deeper } } }");

        let bogus = doc.part(field_named(&doc, "bogus"));
        assert!(matches!(bogus.kind(), PartKind::Field { definition: None, .. }));
        let deeper = doc.part(field_named(&doc, "deeper"));
        assert!(deeper.graph_type().is_none());
    }

    #[test]
    fn inline_fragment_without_condition_takes_parent_type() {
        let schema = starwars_schema();
        let doc = construct(&schema, "{ hero { ... { id } ... on Droid { primaryFunction } } }");

        let inlines = find_parts(&doc, |kind| matches!(kind, PartKind::InlineFragment { .. }));
        assert_eq!(doc.part(inlines[0]).graph_type_name(), Some("Character"));
        assert_eq!(doc.part(inlines[1]).graph_type_name(), Some("Droid"));

        let primary = doc.part(field_named(&doc, "primaryFunction"));
        assert_eq!(primary.graph_type_name(), Some("String"));
    }

    #[test]
    fn unknown_directive_is_left_unbound() {
        let schema = starwars_schema();
        let doc = construct(&schema, "{ hero @nope { id } }");

        let directives = find_parts(&doc, |kind| matches!(kind, PartKind::Directive { .. }));
        assert!(matches!(
            doc.part(directives[0]).kind(),
            PartKind::Directive { definition: None, name } if name == "nope",
        ));
    }
}

mod inputs {
    use super::*;

    #[test]
    fn field_arguments_bind_against_field_definition() {
        let schema = starwars_schema();
        let doc = construct(&schema, "{ human(id: 1) { height(unit: FOOT) } }");

        let args = find_parts(&doc, |kind| matches!(kind, PartKind::InputArgument { .. }));
        assert_eq!(args.len(), 2);

        let unit = doc.part(args[1]);
        assert!(matches!(
            unit.kind(),
            PartKind::InputArgument { definition: Some(_), name } if name == "unit",
        ));
        assert_eq!(unit.graph_type_name(), Some("Unit"));

        let value = doc.part(unit.children()[0]);
        assert_eq!(value.kind(), &PartKind::SuppliedValue(SuppliedValue::Enum("FOOT".to_string())));
        assert_eq!(value.graph_type_name(), Some("Unit"));
    }

    #[test]
    fn directive_arguments_bind_against_directive_definition() {
        let schema = starwars_schema();
        let doc = construct(&schema, "{ hero @skip(if: true) { id } }");

        let args = find_parts(&doc, |kind| matches!(kind, PartKind::InputArgument { .. }));
        let if_arg = doc.part(args[0]);
        assert!(matches!(
            doc.part(if_arg.parent().unwrap()).kind(),
            PartKind::Directive { .. },
        ));
        assert_eq!(if_arg.graph_type_name(), Some("Boolean"));
        assert_eq!(
            doc.part(if_arg.children()[0]).kind(),
            &PartKind::SuppliedValue(SuppliedValue::Scalar(ScalarLiteral::Boolean(true))),
        );
    }

    #[test]
    fn input_object_fields_bind_against_input_type() {
        let schema = starwars_schema();
        let doc = construct(
            &schema,
            "{ search(filter: { text: \"x\", nested: { text: \"y\", bogus: 1 } }) { __typename } }",
        );

        let fields = find_parts(&doc, |kind| matches!(kind, PartKind::InputObjectField { .. }));
        let described: Vec<(String, bool, Option<String>)> =
            fields.iter().map(|id| {
                let part = doc.part(*id);
                let PartKind::InputObjectField { name, definition } = part.kind() else {
                    unreachable!()
                };
                (
                    name.to_string(),
                    definition.is_some(),
                    part.graph_type_name().map(str::to_string),
                )
            }).collect();

        assert_eq!(described, vec![
            ("nested".to_string(), true, Some("SearchFilter".to_string())),
            ("bogus".to_string(), false, None),
            ("text".to_string(), true, Some("String".to_string())),
            ("text".to_string(), true, Some("String".to_string())),
        ]);
    }

    #[test]
    fn list_items_inherit_owner_type() {
        let schema = starwars_schema();
        let doc = construct(&schema, "{ search(filter: { text: \"x\", tags: [\"a\", \"b\"] }) { __typename } }");

        let lists = find_parts(&doc, |kind| matches!(kind, PartKind::SuppliedValue(SuppliedValue::List)));
        let list = doc.part(lists[0]);
        assert_eq!(list.children().len(), 2);
        for item in list.children() {
            assert_eq!(doc.part(*item).graph_type_name(), Some("String"));
        }
    }
}

mod variables {
    use super::*;

    #[test]
    fn variable_reference_marks_declaration_referenced() {
        let schema = starwars_schema();
        let doc = construct(&schema, "query Q($ep: Episode) { hero(episode: $ep) { id } }");

        let op = doc.operation(Some("Q")).unwrap();
        let declaration = &doc.variable_declarations(op).unwrap()["ep"];
        assert_eq!(declaration.referenced_count(), 1);

        let refs = find_parts(&doc, |kind| matches!(
            kind,
            PartKind::SuppliedValue(SuppliedValue::VariableRef { .. }),
        ));
        // Bound to the declared type, not inherited from the argument.
        assert_eq!(doc.part(refs[0]).graph_type_name(), Some("Episode"));
    }

    #[test]
    fn variable_reference_outside_operation_is_deferred() {
        let schema = starwars_schema();
        let doc = construct(&schema, "fragment F on Query { human(id: $id) { id } }");

        let refs = find_parts(&doc, |kind| matches!(
            kind,
            PartKind::SuppliedValue(SuppliedValue::VariableRef { .. }),
        ));
        assert_eq!(refs.len(), 1);
        assert!(doc.part(refs[0]).graph_type().is_none());
    }

    #[test]
    fn defaults_distinguish_null_from_absent() {
        let schema = starwars_schema();
        let doc = construct(
            &schema,
            "query Q($a: Int = 3, $b: Int = null, $c: Int, $d: Episode = JEDI) { pets { __typename } }",
        );

        let op = doc.operation(Some("Q")).unwrap();
        let declarations = doc.variable_declarations(op).unwrap();
        let names: Vec<&str> = declarations.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["a", "b", "c", "d"]);
        assert_eq!(declarations["a"].default_value(), Some(&InputValue::Int(3)));
        assert_eq!(declarations["b"].default_value(), Some(&InputValue::Null));
        assert_eq!(declarations["c"].default_value(), None);
        assert_eq!(declarations["d"].default_value(), Some(&InputValue::Enum("JEDI".to_string())));
    }

    #[test]
    fn duplicate_variable_is_critical() {
        let schema = starwars_schema();
        let doc = construct(&schema, "query Q($a: Int, $a: String) { human(id: $a) { id } }");

        let duplicates: Vec<_> = doc.messages().with_code(error_codes::DUPLICATE_VARIABLE).collect();
        assert_eq!(duplicates.len(), 1);
        assert!(duplicates[0].is_critical());

        // Both declarations still produce parts; the first one wins the index.
        let vars = find_parts(&doc, |kind| matches!(kind, PartKind::Variable { .. }));
        assert_eq!(vars.len(), 2);
        let op = doc.operation(Some("Q")).unwrap();
        assert_eq!(
            doc.variable_declarations(op).unwrap()["a"].type_expression().to_string(),
            "Int",
        );
    }
}

#[test]
fn built_document_has_no_messages_for_valid_query() {
    let schema = starwars_schema();
    let doc = build_document(&schema, "query Q($id: ID!) { human(id: $id) { name } }");
    assert!(doc.messages().is_empty());
}
