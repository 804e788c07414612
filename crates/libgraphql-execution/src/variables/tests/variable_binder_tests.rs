use crate::document::QueryDocument;
use crate::document::VariableDeclarations;
use crate::schema::Schema;
use crate::tests::test_utils::build_document;
use crate::tests::test_utils::starwars_schema;
use crate::value::InputValue;
use crate::variables::ResolvedVariableCollection;
use crate::variables::VariableBinder;
use crate::variables::VariableResolutionError;
use indexmap::IndexMap;
use serde_json::json;

fn declarations(doc: &QueryDocument) -> &VariableDeclarations {
    let op = doc.operation(None).unwrap();
    doc.variable_declarations(op).unwrap()
}

fn bind(
    schema: &Schema,
    query: &str,
    raw: serde_json::Value,
) -> Result<ResolvedVariableCollection, Vec<VariableResolutionError>> {
    let doc = build_document(schema, query);
    let serde_json::Value::Object(raw) = raw else {
        panic!("raw variables must be an object");
    };
    VariableBinder::new(schema).bind(declarations(&doc), &raw)
}

#[test]
fn binding_uses_default_when_absent() {
    let schema = starwars_schema();
    let resolved = bind(
        &schema,
        "query($x: Int = 5, $y: String!) { human(id: $y) { height(unit: METER) } pets { __typename } }",
        json!({ "y": "hi" }),
    ).unwrap();

    let x = resolved.get("x").unwrap();
    assert_eq!(x.value(), &InputValue::Int(5));
    assert!(x.is_default());

    let y = resolved.get("y").unwrap();
    assert_eq!(y.value(), &InputValue::String("hi".to_string()));
    assert!(!y.is_default());
}

#[test]
fn missing_non_null_variable_is_an_error() {
    let schema = starwars_schema();
    let errors = bind(&schema, "query($y: String!) { human(id: $y) { id } }", json!({}))
        .unwrap_err();

    assert_eq!(errors.len(), 1);
    assert!(matches!(
        &errors[0],
        VariableResolutionError::NullForNonNullType { path, .. } if path == "$y",
    ));
}

#[test]
fn binding_is_total() {
    let schema = starwars_schema();
    let resolved = bind(
        &schema,
        "query($a: Int, $b: Int = null) { hero(id: $a, episode: $b) { id } }",
        json!({}),
    ).unwrap();

    assert_eq!(resolved.len(), 2);
    assert_eq!(resolved.value("a"), Some(&InputValue::Null));
    assert!(!resolved.get("a").unwrap().is_default());
    assert_eq!(resolved.value("b"), Some(&InputValue::Null));
    assert!(resolved.get("b").unwrap().is_default());
}

#[test]
fn explicit_null_overrides_default() {
    let schema = starwars_schema();
    let resolved = bind(
        &schema,
        "query($ep: Episode = JEDI) { hero(episode: $ep) { id } }",
        json!({ "ep": null }),
    ).unwrap();

    assert_eq!(resolved.value("ep"), Some(&InputValue::Null));
    assert!(!resolved.get("ep").unwrap().is_default());
}

#[test]
fn scalars_are_type_checked() {
    let schema = starwars_schema();
    let query = "query($i: Int, $f: Float, $b: Boolean, $id: ID) { hero(id: $id) { id } pets { __typename } }";

    let resolved = bind(&schema, query, json!({ "i": 3, "f": 2, "b": true, "id": 7 })).unwrap();
    assert_eq!(resolved.value("i"), Some(&InputValue::Int(3)));
    assert_eq!(resolved.value("f"), Some(&InputValue::Float(2.0)));
    assert_eq!(resolved.value("b"), Some(&InputValue::Boolean(true)));
    assert_eq!(resolved.value("id"), Some(&InputValue::String("7".to_string())));

    let errors = bind(
        &schema,
        query,
        json!({ "i": "3", "f": "x", "b": 1, "id": true }),
    ).unwrap_err();
    let paths: Vec<&str> = errors.iter().map(|err| err.path()).collect();
    assert_eq!(paths, vec!["$i", "$f", "$b", "$id"]);
}

#[test]
fn int_out_of_32_bit_range_is_rejected() {
    let schema = starwars_schema();
    let errors = bind(
        &schema,
        "query($i: Int) { search(limit: $i) { __typename } }",
        json!({ "i": 4_294_967_296_i64 }),
    ).unwrap_err();
    assert!(matches!(errors[0], VariableResolutionError::InvalidValue { .. }));
}

#[test]
fn enums_are_checked_against_declared_values() {
    let schema = starwars_schema();
    let query = "query($ep: Episode) { hero(episode: $ep) { id } }";

    let resolved = bind(&schema, query, json!({ "ep": "EMPIRE" })).unwrap();
    assert_eq!(resolved.value("ep"), Some(&InputValue::Enum("EMPIRE".to_string())));

    let errors = bind(&schema, query, json!({ "ep": "PHANTOM" })).unwrap_err();
    assert!(matches!(
        &errors[0],
        VariableResolutionError::InvalidValue { expected, .. } if expected == "Episode",
    ));
}

#[test]
fn lists_coerce_single_values() {
    let schema = starwars_schema();
    let query = "query($f: SearchFilter) { search(filter: $f) { __typename } }";

    let resolved = bind(&schema, query, json!({ "f": { "text": "x", "tags": "solo" } })).unwrap();
    let InputValue::Object(filter) = resolved.value("f").unwrap() else {
        panic!("expected an input object");
    };
    assert_eq!(
        filter.get("tags"),
        Some(&InputValue::List(vec![InputValue::String("solo".to_string())])),
    );

    let errors = bind(&schema, query, json!({ "f": { "text": "x", "tags": ["a", null] } }))
        .unwrap_err();
    assert!(matches!(
        &errors[0],
        VariableResolutionError::NullForNonNullType { path, .. } if path == "$f.tags[1]",
    ));
}

#[test]
fn input_objects_resolve_recursively() {
    let schema = starwars_schema();
    let resolved = bind(
        &schema,
        "query($f: SearchFilter) { search(filter: $f) { __typename } }",
        json!({ "f": { "text": "outer", "nested": { "text": "inner" } } }),
    ).unwrap();

    let mut nested = IndexMap::new();
    nested.insert("text".to_string(), InputValue::String("inner".to_string()));
    let mut expected = IndexMap::new();
    expected.insert("text".to_string(), InputValue::String("outer".to_string()));
    expected.insert("nested".to_string(), InputValue::Object(nested));

    assert_eq!(resolved.value("f"), Some(&InputValue::Object(expected)));
}

#[test]
fn input_object_field_errors() {
    let schema = starwars_schema();
    let query = "query($f: SearchFilter) { search(filter: $f) { __typename } }";

    let missing = bind(&schema, query, json!({ "f": { "tags": [] } })).unwrap_err();
    assert!(matches!(
        &missing[0],
        VariableResolutionError::MissingRequiredInputField { field_name, .. } if field_name == "text",
    ));

    let unknown = bind(&schema, query, json!({ "f": { "text": "x", "bogus": 1 } })).unwrap_err();
    assert!(matches!(
        &unknown[0],
        VariableResolutionError::UnknownInputField { field_name, .. } if field_name == "bogus",
    ));

    let not_object = bind(&schema, query, json!({ "f": 12 })).unwrap_err();
    assert!(matches!(&not_object[0], VariableResolutionError::InvalidValue { .. }));
}

#[test]
fn unknown_and_output_types_are_rejected() {
    let schema = starwars_schema();

    let unknown = bind(&schema, "query($x: Nope) { pets { __typename } }", json!({ "x": 1 }))
        .unwrap_err();
    assert!(matches!(&unknown[0], VariableResolutionError::UnknownType { .. }));

    let output = bind(&schema, "query($x: Human) { pets { __typename } }", json!({ "x": {} }))
        .unwrap_err();
    assert!(matches!(&output[0], VariableResolutionError::NonInputType { .. }));
}
