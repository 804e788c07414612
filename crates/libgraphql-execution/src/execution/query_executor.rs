use crate::error_codes;
use crate::execution::ChildExecutionMode;
use crate::execution::ExecutionCancelHandle;
use crate::execution::ExecutionRequest;
use crate::execution::FieldMiddleware;
use crate::execution::GraphDataItem;
use crate::execution::InternalError;
use crate::execution::ItemStatus;
use crate::execution::default_stages;
use crate::execution::stages::resolve_child_fields;
use crate::messages::GraphMessage;
use crate::messages::MessageCollection;
use crate::messages::SourceOrigin;
use crate::plan::ExecutionPlan;
use crate::plan::FieldInvocationContext;
use crate::syntax::OperationType;
use crate::value::DataValue;
use crate::value::ObjectValue;
use crate::variables::VariableBinder;
use crate::variables::VariableResolutionError;
use std::sync::Arc;

type Result<T> = std::result::Result<T, InternalError>;

/// The response to one request: the data assembled in document order (absent
/// when the request could not start) plus every message recorded.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ExecutionResult {
    pub data: Option<serde_json::Value>,
    pub messages: MessageCollection,
}
impl ExecutionResult {
    pub fn has_critical(&self) -> bool {
        self.messages.has_critical()
    }
}

/// Runs [`ExecutionPlan`]s.
///
/// ```
/// use libgraphql_execution::DataValue;
/// use libgraphql_execution::document::QueryDocumentBuilder;
/// use libgraphql_execution::execution::QueryExecutor;
/// use libgraphql_execution::plan::ExecutionPlanBuilder;
/// use libgraphql_execution::schema::SchemaBuilder;
///
/// let schema = SchemaBuilder::from_str("type Query { greeting: String }")
///     .and_then(|builder| builder.build())
///     .unwrap();
/// let document = QueryDocumentBuilder::new(&schema)
///     .build_from_str("{ greeting }")
///     .unwrap();
/// let plan = ExecutionPlanBuilder::new(&schema)
///     .build(&document, None)
///     .unwrap();
///
/// let root = DataValue::object("Query", [("greeting", DataValue::from("hello"))]);
/// let result = futures::executor::block_on(
///     QueryExecutor::new().execute(&plan, &serde_json::Map::new(), root),
/// ).unwrap();
///
/// assert_eq!(result.data, Some(serde_json::json!({ "greeting": "hello" })));
/// ```
pub struct QueryExecutor {
    stages: Vec<Arc<dyn FieldMiddleware>>,
}
impl QueryExecutor {
    pub fn new() -> Self {
        Self::with_stages(default_stages())
    }

    /// Use a custom field pipeline in place of [`default_stages()`].
    pub fn with_stages(stages: Vec<Arc<dyn FieldMiddleware>>) -> Self {
        Self { stages }
    }

    pub async fn execute(
        &self,
        plan: &ExecutionPlan<'_>,
        raw_variables: &serde_json::Map<String, serde_json::Value>,
        root_value: DataValue,
    ) -> Result<ExecutionResult> {
        self.execute_with_cancel(plan, raw_variables, root_value, ExecutionCancelHandle::new())
            .await
    }

    pub async fn execute_with_cancel(
        &self,
        plan: &ExecutionPlan<'_>,
        raw_variables: &serde_json::Map<String, serde_json::Value>,
        root_value: DataValue,
        cancel_handle: ExecutionCancelHandle,
    ) -> Result<ExecutionResult> {
        let mut messages = plan.messages().clone();
        let schema = plan.schema();

        let variables = match VariableBinder::new(schema).bind(plan.variables(), raw_variables) {
            Ok(variables) => variables,
            Err(errors) => {
                for err in errors {
                    messages.add(invalid_variable_message(plan, &err));
                }
                return Ok(ExecutionResult {
                    data: None,
                    messages,
                });
            },
        };

        let config = schema.execution_config();
        let mode = match plan.operation_type() {
            OperationType::Mutation => ChildExecutionMode::Sequential,
            OperationType::Query | OperationType::Subscription => config.child_execution,
        };
        let root_value = match root_value {
            DataValue::Object(_) => root_value,
            _ => DataValue::Object(ObjectValue::new(
                plan.root_type_name(),
                std::iter::empty::<(String, DataValue)>(),
            )),
        };

        tracing::debug!(
            operation = plan.operation_name().unwrap_or("<anonymous>"),
            operation_type = %plan.operation_type(),
            ?mode,
            "executing operation",
        );

        let request = ExecutionRequest {
            cancel_handle,
            config,
            schema,
            stages: &self.stages,
            variables,
        };
        let mut root = GraphDataItem::root(root_value);
        let (field_messages, outcome) = resolve_child_fields(
            &request,
            plan.fields(),
            plan.root_type_name(),
            vec![&mut root],
            mode,
        ).await;
        messages.append(field_messages);
        outcome?;

        Ok(ExecutionResult {
            data: Some(render_object(&root, plan.fields())),
            messages,
        })
    }
}
impl Default for QueryExecutor {
    fn default() -> Self {
        Self::new()
    }
}

fn invalid_variable_message(
    plan: &ExecutionPlan<'_>,
    err: &VariableResolutionError,
) -> GraphMessage {
    let variable_name =
        err.path()
            .trim_start_matches('$')
            .split(['.', '['])
            .next()
            .unwrap_or_default();
    let origin = match plan.variables().get(variable_name) {
        Some(declaration) => SourceOrigin::at_location(*declaration.def_location()),
        None => SourceOrigin::none(),
    };
    GraphMessage::critical(error_codes::INVALID_VARIABLE_VALUE, err.to_string(), origin)
}

fn render_object(node: &GraphDataItem, fields: &[FieldInvocationContext]) -> serde_json::Value {
    let mut object = serde_json::Map::new();
    for child in &node.children {
        if child.status == ItemStatus::Cancelled {
            continue;
        }
        let invocation = &fields[child.field_index];
        let value = if child.status == ItemStatus::Failed {
            serde_json::Value::Null
        } else {
            render_value(child, invocation)
        };
        object.insert(child.response_key.to_string(), value);
    }
    serde_json::Value::Object(object)
}

fn render_value(node: &GraphDataItem, invocation: &FieldInvocationContext) -> serde_json::Value {
    if let Some(list_items) = &node.list_items {
        return serde_json::Value::Array(
            list_items.iter()
                .map(|list_item| render_value(list_item, invocation))
                .collect(),
        );
    }
    match &node.result {
        None | Some(DataValue::Null) => serde_json::Value::Null,
        Some(value) if invocation.children().is_empty() => value.to_json(),
        Some(_) => render_object(node, invocation.children()),
    }
}
