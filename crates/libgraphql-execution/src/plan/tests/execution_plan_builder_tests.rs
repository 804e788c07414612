use crate::ActionResult;
use crate::error_codes;
use crate::execution::ExecutionConfig;
use crate::messages::MessageCollection;
use crate::plan::ExecutionPlan;
use crate::plan::ExecutionPlanBuilder;
use crate::plan::FieldInvocationContext;
use crate::resolvers::DirectivePhase;
use crate::resolvers::DirectiveRegistry;
use crate::resolvers::FieldResolverKind;
use crate::resolvers::ResolverRegistry;
use crate::resolvers::SkipDirective;
use crate::schema::Schema;
use crate::schema::SchemaBuilder;
use crate::syntax::OperationType;
use crate::tests::test_utils::STARWARS_SCHEMA;
use crate::tests::test_utils::build_document;
use crate::tests::test_utils::starwars_schema;

fn build_plan<'schema>(
    schema: &'schema Schema,
    query: &str,
) -> Result<ExecutionPlan<'schema>, MessageCollection> {
    let document = build_document(schema, query);
    ExecutionPlanBuilder::new(schema).build(&document, None)
}

fn response_keys(fields: &[FieldInvocationContext]) -> Vec<&str> {
    fields.iter().map(|field| field.response_key()).collect()
}

#[test]
fn root_fields_keep_document_order() {
    let schema = starwars_schema();
    let plan = build_plan(&schema, "{ pets { __typename } villain: hero { name } }").unwrap();

    assert_eq!(plan.operation_type(), OperationType::Query);
    assert_eq!(plan.root_type_name(), "Query");
    assert_eq!(response_keys(plan.fields()), vec!["pets", "villain"]);

    let villain = &plan.fields()[1];
    assert_eq!(villain.field_name(), "hero");
    assert_eq!(villain.source_type(), "Query");
    assert_eq!(villain.return_type().innermost_type_name(), "Character");

    let name = &villain.children()[0];
    assert_eq!(name.source_type(), "Character");
    assert!(matches!(
        name.resolver(),
        FieldResolverKind::Property { property } if property == "name",
    ));
}

#[test]
fn fragments_are_flattened_under_their_type_condition() {
    let schema = starwars_schema();
    let plan = build_plan(&schema, concat!(
        "{ hero { id ...HumanBits ... on Droid { primaryFunction } } }\n",
        "fragment HumanBits on Human { height }\n",
    )).unwrap();

    let hero = &plan.fields()[0];
    let children: Vec<(&str, &str)> =
        hero.children().iter()
            .map(|child| (child.response_key(), child.source_type()))
            .collect();
    assert_eq!(children, vec![
        ("id", "Character"),
        ("height", "Human"),
        ("primaryFunction", "Droid"),
    ]);
}

#[test]
fn fragment_directives_run_before_field_directives() {
    let schema = starwars_schema();
    let plan = build_plan(
        &schema,
        "{ hero { ... @skip(if: false) { name @include(if: true) } } }",
    ).unwrap();

    let name = &plan.fields()[0].children()[0];
    let directives: Vec<&str> = name.directives().iter().map(|d| d.name()).collect();
    assert_eq!(directives, vec!["skip", "include"]);
    assert!(name.directives().iter().all(|d| d.phase() == DirectivePhase::Before));
}

#[test]
fn typename_on_a_union_fans_out_per_member() {
    let schema = starwars_schema();
    let plan = build_plan(&schema, "{ pets { kind: __typename } }").unwrap();

    let pets = &plan.fields()[0];
    let source_types: Vec<&str> =
        pets.children().iter()
            .map(|child| child.source_type())
            .collect();
    assert_eq!(source_types, vec!["Cat", "Dog"]);
    assert!(pets.children().iter().all(|child| {
        child.response_key() == "kind"
            && matches!(child.resolver(), FieldResolverKind::TypeName)
    }));
}

#[test]
fn registered_resolvers_are_found_by_selection_type_then_owner() {
    let schema = starwars_schema();
    let resolvers =
        ResolverRegistry::new()
            .register_fn("Character", "name", |_| Ok(ActionResult::value("R2-D2")))
            .register_batch_fn("Human", "friends", |_| Ok(ActionResult::cancel()))
            .register_virtual("Droid", "primaryFunction", None);
    let document = build_document(
        &schema,
        "{ hero { name ... on Human { friends { id } } ... on Droid { primaryFunction } } }",
    );
    let plan =
        ExecutionPlanBuilder::new(&schema)
            .with_resolvers(resolvers)
            .build(&document, None)
            .unwrap();

    let hero = &plan.fields()[0];
    assert!(matches!(hero.resolver(), FieldResolverKind::Property { .. }));
    assert!(matches!(hero.children()[0].resolver(), FieldResolverKind::Method(_)));
    assert!(hero.children()[1].is_batch());
    assert!(matches!(
        hero.children()[2].resolver(),
        FieldResolverKind::Virtual { default: None },
    ));
}

#[test]
fn unknown_fields_are_critical() {
    let schema = starwars_schema();
    let messages = build_plan(&schema, "{ hero { name bogus } }").unwrap_err();

    let unknown: Vec<_> = messages.with_code(error_codes::UNKNOWN_FIELD).collect();
    assert_eq!(unknown.len(), 1);
    assert!(unknown[0].message().contains("bogus"));
}

#[test]
fn undeclared_arguments_are_critical() {
    let schema = starwars_schema();
    let messages = build_plan(&schema, r#"{ human(id: "1", bogus: 2) { name } }"#).unwrap_err();

    assert_eq!(messages.with_code(error_codes::INVALID_ARGUMENT).count(), 1);
}

#[test]
fn directives_need_a_registered_resolver() {
    let schema = starwars_schema();
    let document = build_document(&schema, "{ hero { name @upper } }");

    let messages = ExecutionPlanBuilder::new(&schema).build(&document, None).unwrap_err();
    assert_eq!(messages.with_code(error_codes::UNKNOWN_DIRECTIVE).count(), 1);

    let plan =
        ExecutionPlanBuilder::new(&schema)
            .with_directives(DirectiveRegistry::new().register(
                "upper",
                DirectivePhase::After,
                SkipDirective,
            ))
            .build(&document, None)
            .unwrap();
    let name = &plan.fields()[0].children()[0];
    assert_eq!(name.directives()[0].phase(), DirectivePhase::After);
}

#[test]
fn directives_missing_from_the_schema_are_critical() {
    let schema = starwars_schema();
    let messages = build_plan(&schema, "{ hero @shout { name } }").unwrap_err();

    assert_eq!(messages.with_code(error_codes::UNKNOWN_DIRECTIVE).count(), 1);
}

#[test]
fn operation_must_be_selectable() {
    let schema = starwars_schema();
    let document = build_document(&schema, "query A { pets { __typename } } query B { hero { id } }");

    let messages = ExecutionPlanBuilder::new(&schema).build(&document, None).unwrap_err();
    assert_eq!(messages.with_code(error_codes::UNKNOWN_OPERATION).count(), 1);

    let messages = ExecutionPlanBuilder::new(&schema).build(&document, Some("C")).unwrap_err();
    assert_eq!(messages.with_code(error_codes::UNKNOWN_OPERATION).count(), 1);

    let plan = ExecutionPlanBuilder::new(&schema).build(&document, Some("B")).unwrap();
    assert_eq!(plan.operation_name(), Some("B"));
    assert_eq!(response_keys(plan.fields()), vec!["hero"]);
}

#[test]
fn mutations_plan_against_the_mutation_root() {
    let schema = starwars_schema();
    let plan = build_plan(&schema, r#"mutation { rename(id: "1", name: "Luke") { name } }"#).unwrap();

    assert_eq!(plan.operation_type(), OperationType::Mutation);
    assert_eq!(plan.root_type_name(), "Mutation");
    assert_eq!(plan.fields()[0].source_type(), "Mutation");
}

#[test]
fn subscriptions_need_a_subscription_root() {
    let schema = starwars_schema();
    let messages = build_plan(&schema, "subscription { pets { __typename } }").unwrap_err();

    assert_eq!(messages.with_code(error_codes::UNKNOWN_TYPE).count(), 1);
}

#[test]
fn queries_deeper_than_the_limit_are_rejected_once() {
    let schema =
        SchemaBuilder::from_str(STARWARS_SCHEMA)
            .map(|builder| builder.execution_config(ExecutionConfig {
                max_query_depth: Some(2),
                ..Default::default()
            }))
            .and_then(|builder| builder.build())
            .unwrap();

    assert!(build_plan(&schema, "{ hero { friends { id } } }").is_err());
    let messages =
        build_plan(&schema, "{ hero { friends { friends { id } } } human(id: 1) { friends { name } } }")
            .unwrap_err();
    assert_eq!(messages.with_code(error_codes::MAX_DEPTH_EXCEEDED).count(), 1);

    assert!(build_plan(&schema, "{ hero { friends } }").is_ok());
}

#[test]
fn document_warnings_are_carried_by_the_plan() {
    let schema = starwars_schema();
    let plan = build_plan(&schema, "query($unused: Int) { pets { __typename } }").unwrap();

    assert_eq!(plan.messages().with_code(error_codes::UNUSED_VARIABLE).count(), 1);
    assert!(plan.variables().contains_key("unused"));
}
