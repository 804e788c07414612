use futures::future::BoxFuture;

/// Per-schema execution policy.
///
/// ```
/// use libgraphql_execution::execution::ChildExecutionMode;
/// use libgraphql_execution::execution::ExecutionConfig;
///
/// let config: ExecutionConfig = serde_json::from_str(
///     r#"{ "child_execution": "sequential", "max_query_depth": 8 }"#,
/// ).unwrap();
/// assert_eq!(config.child_execution, ChildExecutionMode::Sequential);
/// assert!(!config.debug_messages);
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct ExecutionConfig {
    pub child_execution: ChildExecutionMode,
    /// When true, unhandled resolver errors are reported with the error's own
    /// text rather than a generic message.
    pub debug_messages: bool,
    pub max_query_depth: Option<usize>,
}

/// How the child field pipelines of one parent field are awaited.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    Hash,
    PartialEq,
    serde::Deserialize,
    serde::Serialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ChildExecutionMode {
    /// Start every child and wait for all of them to finish.
    #[default]
    Concurrent,
    /// Run each child to completion before starting the next.
    Sequential,
}
impl ChildExecutionMode {
    /// Drive every future to completion according to this mode. Outputs are
    /// returned in input order either way.
    pub async fn execute_all<'a, T: Send + 'a>(
        &self,
        futures: Vec<BoxFuture<'a, T>>,
    ) -> Vec<T> {
        match self {
            Self::Concurrent => futures::future::join_all(futures).await,
            Self::Sequential => {
                let mut outputs = Vec::with_capacity(futures.len());
                for future in futures {
                    outputs.push(future.await);
                }
                outputs
            },
        }
    }
}
