//! Uniform result envelope returned by service calls.

use serde::Serialize;

/// `{data, success, message}` wrapper handed to the controller.
///
/// Expected failures (unknown id, rejected input) are reported here with
/// `success = false`; they are never raised as errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
    pub success: bool,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub(crate) fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            success: true,
            message: message.into(),
        }
    }

    pub(crate) fn failure(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            success: false,
            message: message.into(),
        }
    }
}
