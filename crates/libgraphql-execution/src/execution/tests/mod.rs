mod directive_tests;

use crate::DataValue;
use crate::execution::ExecutionConfig;
use crate::execution::ExecutionResult;
use crate::execution::QueryExecutor;
use crate::plan::ExecutionPlanBuilder;
use crate::resolvers::DirectiveRegistry;
use crate::resolvers::ResolverRegistry;
use crate::schema::Schema;
use crate::schema::SchemaBuilder;
use crate::tests::test_utils::build_document;

pub(super) fn schema(sdl: &str) -> Schema {
    schema_with_config(sdl, ExecutionConfig::default())
}

pub(super) fn schema_with_config(sdl: &str, config: ExecutionConfig) -> Schema {
    SchemaBuilder::from_str(sdl)
        .map(|builder| builder.execution_config(config))
        .and_then(|builder| builder.build())
        .unwrap()
}

pub(super) fn object(type_name: &str, properties: Vec<(&str, DataValue)>) -> DataValue {
    DataValue::object(type_name, properties)
}

pub(super) async fn execute(
    schema: &Schema,
    resolvers: ResolverRegistry,
    query: &str,
    variables: serde_json::Value,
    root: DataValue,
) -> ExecutionResult {
    execute_with_directives(schema, resolvers, DirectiveRegistry::new(), query, variables, root)
        .await
}

pub(super) async fn execute_with_directives(
    schema: &Schema,
    resolvers: ResolverRegistry,
    directives: DirectiveRegistry,
    query: &str,
    variables: serde_json::Value,
    root: DataValue,
) -> ExecutionResult {
    let document = build_document(schema, query);
    let plan =
        ExecutionPlanBuilder::new(schema)
            .with_resolvers(resolvers)
            .with_directives(directives)
            .build(&document, None)
            .unwrap();
    let serde_json::Value::Object(variables) = variables else {
        panic!("variables must be an object");
    };
    QueryExecutor::new()
        .execute(&plan, &variables, root)
        .await
        .unwrap()
}
