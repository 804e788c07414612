//! Stable error codes attached to every [`GraphMessage`](crate::GraphMessage).

pub const ACCESS_DENIED: &str = "ACCESS_DENIED";
pub const BAD_REQUEST: &str = "BAD_REQUEST";
pub const DUPLICATE_FRAGMENT: &str = "DUPLICATE_FRAGMENT";
pub const DUPLICATE_VARIABLE: &str = "DUPLICATE_VARIABLE";
pub const EXECUTION_ERROR: &str = "EXECUTION_ERROR";
pub const FRAGMENT_CYCLE: &str = "FRAGMENT_CYCLE";
pub const INTERNAL_SERVER_ERROR: &str = "INTERNAL_SERVER_ERROR";
pub const INVALID_ARGUMENT: &str = "INVALID_ARGUMENT";
pub const INVALID_BATCH_RESULT: &str = "INVALID_BATCH_RESULT";
pub const INVALID_SOURCE_DATA: &str = "INVALID_SOURCE_DATA";
pub const INVALID_VARIABLE_VALUE: &str = "INVALID_VARIABLE_VALUE";
pub const MAX_DEPTH_EXCEEDED: &str = "MAX_DEPTH_EXCEEDED";
pub const MODEL_VALIDATION_ERROR: &str = "MODEL_VALIDATION_ERROR";
pub const NOT_FOUND: &str = "NOT_FOUND";
pub const PATH_NOT_FOUND: &str = "PATH_NOT_FOUND";
pub const UNHANDLED_EXCEPTION: &str = "UNHANDLED_EXCEPTION";
pub const UNKNOWN_DIRECTIVE: &str = "UNKNOWN_DIRECTIVE";
pub const UNKNOWN_FIELD: &str = "UNKNOWN_FIELD";
pub const UNKNOWN_FRAGMENT: &str = "UNKNOWN_FRAGMENT";
pub const UNKNOWN_OPERATION: &str = "UNKNOWN_OPERATION";
pub const UNKNOWN_TYPE: &str = "UNKNOWN_TYPE";
pub const UNUSED_VARIABLE: &str = "UNUSED_VARIABLE";
