//! The shop API's response envelope.

use serde::Serialize;

/// Uniform envelope for shop-API responses.
///
/// Success: `{"error":"","result":…}`. Failure: `{"error":"<code>"}`
/// with the result omitted. Failure codes are the protocol's literal
/// strings: `invalid_token`, `invalid_request`, `flood_limit`,
/// `invalid_id`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Builds a success envelope around a result value.
    pub fn success(result: T) -> Self {
        Self {
            error: "",
            result: Some(result),
        }
    }

    /// Builds a failure envelope with a protocol error code.
    pub fn failure(code: &'static str) -> Self {
        Self {
            error: code,
            result: None,
        }
    }
}
