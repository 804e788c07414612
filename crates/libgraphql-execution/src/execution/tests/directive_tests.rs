use super::execute;
use super::execute_with_directives;
use super::object;
use super::schema;
use crate::ActionResult;
use crate::DataValue;
use crate::error_codes;
use crate::messages::GraphMessage;
use crate::messages::MessageSeverity;
use crate::resolvers::DirectivePhase;
use crate::resolvers::DirectiveRegistry;
use crate::resolvers::DirectiveResolutionContext;
use crate::resolvers::DirectiveResolver;
use crate::resolvers::ResolverRegistry;
use async_trait::async_trait;
use serde_json::json;

const SCHEMA: &str = r#"
type Query { a: String b: String c: String }
directive @upper on FIELD
directive @gate on FIELD
directive @audit on FIELD
directive @deny on FIELD
directive @seal on FIELD
"#;

const NESTED_SCHEMA: &str = r#"
type Query { items: [Item] one: Item }
type Item { n: Int }
directive @hide on FIELD
directive @swap on FIELD
"#;

fn root() -> DataValue {
    object("Query", vec![
        ("a", DataValue::from("alpha")),
        ("b", DataValue::from("beta")),
        ("c", DataValue::from("gamma")),
    ])
}

/// Uppercases every resolved string.
struct Upper;
#[async_trait]
impl DirectiveResolver for Upper {
    async fn resolve(
        &self,
        ctx: &mut DirectiveResolutionContext<'_>,
    ) -> anyhow::Result<ActionResult> {
        for result in ctx.results_mut().iter_mut() {
            let upper =
                result.as_ref()
                    .and_then(|value| value.as_leaf()?.as_str())
                    .map(str::to_uppercase);
            if let Some(upper) = upper {
                *result = Some(DataValue::from(upper));
            }
        }
        Ok(ActionResult::ok())
    }
}

/// Always cancels.
struct Gate;
#[async_trait]
impl DirectiveResolver for Gate {
    async fn resolve(
        &self,
        _ctx: &mut DirectiveResolutionContext<'_>,
    ) -> anyhow::Result<ActionResult> {
        Ok(ActionResult::cancel())
    }
}

/// Records a warning and lets the field through.
struct Audit;
#[async_trait]
impl DirectiveResolver for Audit {
    async fn resolve(
        &self,
        ctx: &mut DirectiveResolutionContext<'_>,
    ) -> anyhow::Result<ActionResult> {
        let origin = ctx.origin().clone();
        ctx.add_message(GraphMessage::warning("AUDITED", "field was read", origin));
        Ok(ActionResult::ok())
    }
}

struct Deny;
#[async_trait]
impl DirectiveResolver for Deny {
    async fn resolve(
        &self,
        _ctx: &mut DirectiveResolutionContext<'_>,
    ) -> anyhow::Result<ActionResult> {
        Ok(ActionResult::unauthorized())
    }
}

/// Replaces every result with null.
struct Hide;
#[async_trait]
impl DirectiveResolver for Hide {
    async fn resolve(
        &self,
        ctx: &mut DirectiveResolutionContext<'_>,
    ) -> anyhow::Result<ActionResult> {
        for result in ctx.results_mut().iter_mut() {
            *result = Some(DataValue::Null);
        }
        Ok(ActionResult::ok())
    }
}

/// Replaces every result with a different `Item`.
struct Swap;
#[async_trait]
impl DirectiveResolver for Swap {
    async fn resolve(
        &self,
        ctx: &mut DirectiveResolutionContext<'_>,
    ) -> anyhow::Result<ActionResult> {
        for result in ctx.results_mut().iter_mut() {
            *result = Some(item(99));
        }
        Ok(ActionResult::ok())
    }
}

fn item(n: i64) -> DataValue {
    object("Item", vec![("n", DataValue::from(n))])
}

fn nested_root() -> DataValue {
    object("Query", vec![
        ("items", DataValue::list([item(1), item(2)])),
        ("one", item(3)),
    ])
}

fn directives() -> DirectiveRegistry {
    DirectiveRegistry::new()
        .register("upper", DirectivePhase::After, Upper)
        .register("gate", DirectivePhase::Before, Gate)
        .register("audit", DirectivePhase::Before, Audit)
        .register("deny", DirectivePhase::Before, Deny)
        .register("seal", DirectivePhase::After, Gate)
        .register("hide", DirectivePhase::After, Hide)
        .register("swap", DirectivePhase::After, Swap)
}

#[tokio::test]
async fn skip_and_include_drop_fields_silently() {
    let schema = schema(SCHEMA);
    let query = "query($show: Boolean!) { a @include(if: $show) b @skip(if: true) c @skip(if: false) }";

    let hidden = execute(&schema, ResolverRegistry::new(), query, json!({ "show": false }), root())
        .await;
    assert_eq!(hidden.data, Some(json!({ "c": "gamma" })));
    assert!(hidden.messages.is_empty());

    let shown = execute(&schema, ResolverRegistry::new(), query, json!({ "show": true }), root())
        .await;
    assert_eq!(shown.data, Some(json!({ "a": "alpha", "c": "gamma" })));
}

#[tokio::test]
async fn fragment_directives_apply_to_every_field_of_the_fragment() {
    let schema = schema(SCHEMA);
    let result = execute(
        &schema,
        ResolverRegistry::new(),
        "{ ... @skip(if: true) { a b } c }",
        json!({}),
        root(),
    ).await;

    assert_eq!(result.data, Some(json!({ "c": "gamma" })));
}

#[tokio::test]
async fn after_phase_directives_rewrite_results() {
    let schema = schema(SCHEMA);
    let result = execute_with_directives(
        &schema,
        ResolverRegistry::new(),
        directives(),
        "{ a @upper b }",
        json!({}),
        root(),
    ).await;

    assert_eq!(result.data, Some(json!({ "a": "ALPHA", "b": "beta" })));
}

#[tokio::test]
async fn every_directive_of_a_phase_runs_before_the_field_is_cancelled() {
    let schema = schema(SCHEMA);
    let resolvers =
        ResolverRegistry::new()
            .register_fn("Query", "a", |_| panic!("cancelled fields are not resolved"));

    let result = execute_with_directives(
        &schema,
        resolvers,
        directives(),
        "{ a @gate @audit b }",
        json!({}),
        root(),
    ).await;

    assert_eq!(result.data, Some(json!({ "b": "beta" })));
    let audited: Vec<_> = result.messages.with_code("AUDITED").collect();
    assert_eq!(audited.len(), 1);
    assert_eq!(audited[0].severity(), MessageSeverity::Warning);
    assert_eq!(audited[0].origin().path.as_ref().unwrap().to_string(), "a");
}

#[tokio::test]
async fn directive_failures_null_the_field() {
    let schema = schema(SCHEMA);
    let result = execute_with_directives(
        &schema,
        ResolverRegistry::new(),
        directives(),
        "{ a @deny b }",
        json!({}),
        root(),
    ).await;

    assert_eq!(result.data, Some(json!({ "a": null, "b": "beta" })));
    assert_eq!(result.messages.with_code(error_codes::ACCESS_DENIED).count(), 1);
}

#[tokio::test]
async fn directive_argument_errors_null_the_field() {
    let schema = schema(SCHEMA);
    let result = execute(
        &schema,
        ResolverRegistry::new(),
        "{ a @skip(if: $undeclared) b }",
        json!({}),
        root(),
    ).await;

    assert_eq!(result.data, Some(json!({ "a": null, "b": "beta" })));
    let errors: Vec<_> = result.messages.with_code(error_codes::INVALID_ARGUMENT).collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message().starts_with("@skip:"), "{}", errors[0].message());
}

#[tokio::test]
async fn after_phase_cancellation_nulls_the_resolved_field() {
    let schema = schema(SCHEMA);
    let result = execute_with_directives(
        &schema,
        ResolverRegistry::new(),
        directives(),
        "{ a @seal b }",
        json!({}),
        root(),
    ).await;

    assert_eq!(result.data, Some(json!({ "a": null, "b": "beta" })));
    assert!(result.messages.is_empty());
}

#[tokio::test]
async fn after_phase_directives_may_null_fields_with_selections() {
    let schema = schema(NESTED_SCHEMA);
    let result = execute_with_directives(
        &schema,
        ResolverRegistry::new(),
        directives(),
        "{ items @hide { n } one @hide { n } }",
        json!({}),
        nested_root(),
    ).await;

    assert_eq!(result.data, Some(json!({ "items": null, "one": null })));
    assert!(result.messages.is_empty());
}

#[tokio::test]
async fn after_phase_rewrites_of_fields_with_selections_are_rejected() {
    let schema = schema(NESTED_SCHEMA);
    let result = execute_with_directives(
        &schema,
        ResolverRegistry::new(),
        directives(),
        "{ one @swap { n } items { n } }",
        json!({}),
        nested_root(),
    ).await;

    assert_eq!(result.data, Some(json!({ "one": null, "items": [{ "n": 1 }, { "n": 2 }] })));
    let errors: Vec<_> = result.messages.with_code(error_codes::EXECUTION_ERROR).collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message().starts_with("@swap:"), "{}", errors[0].message());
    assert_eq!(errors[0].origin().path.as_ref().unwrap().to_string(), "one");
}
