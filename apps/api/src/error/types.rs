use serde::Serialize;
use serde_json::Value;
use ts_rs::TS;

/// API error payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/error-response.ts"
)]
pub struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(type = "{ errors: Array<{ path: string, rule: string, message: string }>, warnings: Array<{ path: string, rule: string, message: string }> } | null")]
    validation: Option<Value>,
}

impl ErrorResponse {
    pub(super) fn new(error: String, validation: Option<Value>) -> Self {
        Self { error, validation }
    }
}
