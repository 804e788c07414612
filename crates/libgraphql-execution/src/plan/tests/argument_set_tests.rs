use crate::plan::ArgumentError;
use crate::plan::ExecutionPlan;
use crate::plan::ExecutionPlanBuilder;
use crate::plan::FieldInvocationContext;
use crate::schema::Schema;
use crate::tests::test_utils::build_document;
use crate::tests::test_utils::starwars_schema;
use crate::value::Arguments;
use crate::value::InputValue;
use crate::variables::ResolvedVariableCollection;
use crate::variables::VariableBinder;
use crate::variables::VariableResolutionError;
use indexmap::IndexMap;
use serde_json::json;

fn build_plan<'schema>(schema: &'schema Schema, query: &str) -> ExecutionPlan<'schema> {
    let document = build_document(schema, query);
    ExecutionPlanBuilder::new(schema).build(&document, None).unwrap()
}

fn bind(plan: &ExecutionPlan<'_>, raw: serde_json::Value) -> ResolvedVariableCollection {
    let serde_json::Value::Object(raw) = raw else {
        panic!("raw variables must be an object");
    };
    VariableBinder::new(plan.schema()).bind(plan.variables(), &raw).unwrap()
}

fn materialize(
    plan: &ExecutionPlan<'_>,
    field: &FieldInvocationContext,
    raw: serde_json::Value,
) -> Result<Arguments, ArgumentError> {
    let variables = bind(plan, raw);
    field.arguments().materialize(plan.schema(), &variables)
}

#[test]
fn literals_are_coerced_to_the_declared_type() {
    let schema = starwars_schema();
    let plan = build_plan(
        &schema,
        r#"{ search(filter: { text: "wing", tags: "x" }, limit: 3) { __typename } }"#,
    );

    let arguments = materialize(&plan, &plan.fields()[0], json!({})).unwrap();
    assert_eq!(arguments.get_i64("limit"), Some(3));
    assert_eq!(arguments.get("filter"), Some(&InputValue::Object(IndexMap::from([
        ("text".to_string(), InputValue::String("wing".to_string())),
        ("tags".to_string(), InputValue::List(vec![InputValue::String("x".to_string())])),
    ]))));
}

#[test]
fn declared_defaults_fill_absent_arguments() {
    let schema = starwars_schema();
    let plan = build_plan(&schema, r#"{ human(id: 7) { height } search { __typename } }"#);

    let human = materialize(&plan, &plan.fields()[0], json!({})).unwrap();
    assert_eq!(human.get_str("id"), Some("7"));

    let height = materialize(&plan, &plan.fields()[0].children()[0], json!({})).unwrap();
    assert_eq!(height.get("unit"), Some(&InputValue::Enum("METER".to_string())));

    let search = materialize(&plan, &plan.fields()[1], json!({})).unwrap();
    assert_eq!(search.get_i64("limit"), Some(10));
    assert!(search.get("filter").is_none());
}

#[test]
fn variables_are_substituted_per_request() {
    let schema = starwars_schema();
    let plan = build_plan(
        &schema,
        "query($unit: Unit, $limit: Int) { human(id: 1) { height(unit: $unit) } search(limit: $limit) { __typename } }",
    );
    let height = &plan.fields()[0].children()[0];

    let arguments = materialize(&plan, height, json!({ "unit": "FOOT" })).unwrap();
    assert_eq!(arguments.get("unit"), Some(&InputValue::Enum("FOOT".to_string())));

    let arguments = materialize(&plan, &plan.fields()[1], json!({ "limit": null })).unwrap();
    assert_eq!(arguments.get("limit"), Some(&InputValue::Null));
}

#[test]
fn missing_required_arguments_are_rejected() {
    let schema = starwars_schema();
    let plan = build_plan(&schema, "{ human { name } }");

    let err = materialize(&plan, &plan.fields()[0], json!({})).unwrap_err();
    assert_eq!(err, ArgumentError::MissingRequired { argument: "id".to_string() });
}

#[test]
fn undeclared_variables_are_rejected() {
    let schema = starwars_schema();
    let plan = build_plan(&schema, "{ human(id: $nope) { name } }");

    let err = materialize(&plan, &plan.fields()[0], json!({ "nope": "1" })).unwrap_err();
    assert_eq!(err, ArgumentError::UndeclaredVariable {
        argument: "id".to_string(),
        variable: "nope".to_string(),
    });
}

#[test]
fn invalid_literals_are_rejected() {
    let schema = starwars_schema();
    let plan = build_plan(&schema, r#"{ search(limit: "ten") { __typename } }"#);

    let err = materialize(&plan, &plan.fields()[0], json!({})).unwrap_err();
    assert!(matches!(
        err,
        ArgumentError::Invalid {
            ref argument,
            source: VariableResolutionError::InvalidValue { .. },
        } if argument == "limit",
    ));
}
