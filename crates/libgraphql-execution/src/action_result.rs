use crate::batch::BatchAssignment;
use crate::batch::BatchReconciler;
use crate::batch::BatchResult;
use crate::error_codes;
use crate::execution::FieldResolutionContext;
use crate::messages::GraphMessage;
use crate::messages::MessageSeverity;
use crate::messages::SourceOrigin;
use crate::resolvers::DirectiveResolutionContext;
use crate::value::DataValue;
use std::sync::Arc;

const DEFAULT_BAD_REQUEST_MESSAGE: &str = "The request was not valid.";
const DEFAULT_INTERNAL_ERROR_MESSAGE: &str = "An internal server error occurred.";
const DEFAULT_NOT_FOUND_MESSAGE: &str = "The requested resource was not found.";
const DEFAULT_PATH_NOT_FOUND_MESSAGE: &str = "The requested path was not found.";
const DEFAULT_UNAUTHORIZED_MESSAGE: &str = "Access denied.";

/// One field-level failure carried by [`ActionResult::BadRequest`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ModelValidationFailure {
    pub field: String,
    pub message: String,
}
impl ModelValidationFailure {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// The outcome of a field or directive resolver.
///
/// Resolvers never touch the execution context directly; they return one of
/// these and the pipeline applies it with [`ActionResult::complete()`].
#[derive(Clone, Debug)]
pub enum ActionResult {
    /// The resolved value of a per-source-item field. Directives may return
    /// it (see [`ActionResult::ok()`]) to signal success.
    Value(DataValue),

    /// Records a message. Only [`MessageSeverity::Critical`] cancels.
    Error {
        code: String,
        exception: Option<Arc<anyhow::Error>>,
        message: String,
        severity: MessageSeverity,
    },

    BadRequest {
        failures: Vec<ModelValidationFailure>,
        message: Option<String>,
    },

    Unauthorized {
        message: Option<String>,
    },

    InternalError {
        message: Option<String>,
    },

    NotFound {
        message: Option<String>,
    },

    PathNotFound {
        message: Option<String>,
    },

    /// The result set of a batch resolver, joined back onto each source by
    /// the [`BatchReconciler`].
    BatchComplete(BatchResult),

    /// Cancel without any message.
    Cancelled,
}
impl ActionResult {
    pub fn value(value: impl Into<DataValue>) -> Self {
        Self::Value(value.into())
    }

    /// Success with no value. Used by directives.
    pub fn ok() -> Self {
        Self::Value(DataValue::Null)
    }

    /// A critical error with the given code.
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::error_with_severity(MessageSeverity::Critical, code, message)
    }

    pub fn error_with_severity(
        severity: MessageSeverity,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Error {
            code: code.into(),
            exception: None,
            message: message.into(),
            severity,
        }
    }

    /// A critical error caused by `exception`. The exception travels with the
    /// message for logging.
    pub fn exception(message: impl Into<String>, exception: anyhow::Error) -> Self {
        Self::Error {
            code: error_codes::EXECUTION_ERROR.to_string(),
            exception: Some(Arc::new(exception)),
            message: message.into(),
            severity: MessageSeverity::Critical,
        }
    }

    pub fn bad_request(failures: Vec<ModelValidationFailure>) -> Self {
        Self::BadRequest {
            failures,
            message: None,
        }
    }

    pub fn unauthorized() -> Self {
        Self::Unauthorized { message: None }
    }

    pub fn internal_error() -> Self {
        Self::InternalError { message: None }
    }

    pub fn not_found() -> Self {
        Self::NotFound { message: None }
    }

    pub fn path_not_found() -> Self {
        Self::PathNotFound { message: None }
    }

    pub fn batch(batch: BatchResult) -> Self {
        Self::BatchComplete(batch)
    }

    pub fn cancel() -> Self {
        Self::Cancelled
    }

    /// Apply this result to the context it was produced for.
    pub fn complete(self, target: ResolutionTarget<'_, '_>) {
        match target {
            ResolutionTarget::Directive(ctx) => self.complete_directive(ctx),
            ResolutionTarget::Field(ctx) => self.complete_field(ctx),
        }
    }

    fn complete_field(self, ctx: &mut FieldResolutionContext<'_>) {
        match self {
            Self::Value(_) if ctx.invocation().is_batch() => {
                let field_name = ctx.invocation().field_name().to_string();
                ctx.add_message(GraphMessage::critical(
                    error_codes::INVALID_BATCH_RESULT,
                    format!(
                        "The batch field `{field_name}` must complete with a batch result \
                        rather than a single value",
                    ),
                    ctx.origin(),
                ));
            },

            Self::Value(value) => {
                if let Some(item) = ctx.items.first_mut() {
                    item.set_result(value);
                }
            },

            Self::BatchComplete(batch) => reconcile_batch(ctx, &batch),

            Self::Cancelled => ctx.cancel(),

            failure => {
                for message in failure.into_messages(ctx.origin()) {
                    ctx.add_message(message);
                }
            },
        }
    }

    fn complete_directive(self, ctx: &mut DirectiveResolutionContext<'_>) {
        match self {
            Self::Value(_) => (),

            Self::BatchComplete(_) => {
                let directive_name = ctx.directive_name().to_string();
                ctx.add_message(GraphMessage::critical(
                    error_codes::INVALID_BATCH_RESULT,
                    format!(
                        "The directive `@{directive_name}` completed with a batch result, \
                        which only field resolvers may produce",
                    ),
                    ctx.origin().clone(),
                ));
            },

            Self::Cancelled => ctx.cancel(),

            failure => {
                let origin = ctx.origin().clone();
                for message in failure.into_messages(origin) {
                    ctx.add_message(message);
                }
            },
        }
    }

    /// The messages a failure variant reports.
    fn into_messages(self, origin: SourceOrigin) -> Vec<GraphMessage> {
        match self {
            Self::Error { code, exception, message, severity } => {
                let mut graph_message = GraphMessage::new(severity, code, message, origin);
                if let Some(exception) = exception {
                    graph_message = graph_message.with_exception(exception);
                }
                vec![graph_message]
            },

            Self::BadRequest { failures, message } => {
                let mut messages = vec![GraphMessage::critical(
                    error_codes::BAD_REQUEST,
                    message.unwrap_or_else(|| DEFAULT_BAD_REQUEST_MESSAGE.to_string()),
                    origin.clone(),
                )];
                messages.extend(failures.into_iter().map(|failure| GraphMessage::critical(
                    error_codes::MODEL_VALIDATION_ERROR,
                    format!("{}: {}", failure.field, failure.message),
                    origin.clone(),
                )));
                messages
            },

            Self::Unauthorized { message } => vec![fixed_critical(
                error_codes::ACCESS_DENIED,
                message,
                DEFAULT_UNAUTHORIZED_MESSAGE,
                origin,
            )],

            Self::InternalError { message } => vec![fixed_critical(
                error_codes::INTERNAL_SERVER_ERROR,
                message,
                DEFAULT_INTERNAL_ERROR_MESSAGE,
                origin,
            )],

            Self::NotFound { message } => vec![fixed_critical(
                error_codes::NOT_FOUND,
                message,
                DEFAULT_NOT_FOUND_MESSAGE,
                origin,
            )],

            Self::PathNotFound { message } => vec![fixed_critical(
                error_codes::PATH_NOT_FOUND,
                message,
                DEFAULT_PATH_NOT_FOUND_MESSAGE,
                origin,
            )],

            Self::Value(_) | Self::BatchComplete(_) | Self::Cancelled => vec![],
        }
    }
}

fn fixed_critical(
    code: &str,
    message: Option<String>,
    default_message: &str,
    origin: SourceOrigin,
) -> GraphMessage {
    GraphMessage::critical(
        code,
        message.unwrap_or_else(|| default_message.to_string()),
        origin,
    )
}

fn reconcile_batch(ctx: &mut FieldResolutionContext<'_>, batch: &BatchResult) {
    let returns_list = ctx.invocation().return_type().is_list();
    let assignments =
        BatchReconciler::new(batch)
            .reconcile(ctx.items.iter().map(|item| &item.source), returns_list);

    let mut ambiguous = vec![];
    for (item, assignment) in ctx.items.iter_mut().zip(assignments) {
        match assignment {
            BatchAssignment::Assigned(value) => item.set_result(value),
            BatchAssignment::Ambiguous { key, match_count } =>
                ambiguous.push((item.path.clone(), key, match_count)),
        }
    }

    let field_name = ctx.invocation().field_name().to_string();
    let location = *ctx.invocation().location();
    for (path, key, match_count) in ambiguous {
        ctx.add_message(GraphMessage::critical(
            error_codes::INVALID_BATCH_RESULT,
            format!(
                "The field `{field_name}` returns a single item but the batch result \
                matched {match_count} items for the key {key}",
            ),
            SourceOrigin::at_path(path, Some(location)),
        ));
    }
}

/// The context an [`ActionResult`] is completed against.
pub enum ResolutionTarget<'a, 'ctx> {
    Directive(&'a mut DirectiveResolutionContext<'ctx>),
    Field(&'a mut FieldResolutionContext<'ctx>),
}
