use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use ccs_application::ComponentSettingsOutcome;
use serde_json::Value;
use tracing::debug;

use crate::dto::{ComponentSettingsQuery, UnsupportedLanguageResponse, ValidationReportResponse};
use crate::error::ApiResult;
use crate::state::AppState;


pub async fn component_settings_handler(
    State(state): State<AppState>,
    Path(entity): Path<String>,
    Query(query): Query<ComponentSettingsQuery>,
) -> ApiResult<Response> {
    let request = query.into_request(entity)?;
    debug!(entity = %request.entity, selector = ?request.selector, "component settings requested");

    let response = match state
        .component_settings_service
        .resolve(&request)
        .await?
    {
        ComponentSettingsOutcome::Settings(settings) => Json(Value::Object(settings)).into_response(),
        ComponentSettingsOutcome::UnsupportedLanguage { message } => {
            Json(UnsupportedLanguageResponse {
                message,
                data: Vec::new(),
            })
            .into_response()
        }
    };

    Ok(response)
}

pub async fn validate_view_config_handler(
    State(state): State<AppState>,
    Path(entity): Path<String>,
) -> ApiResult<Json<ValidationReportResponse>> {
    let report = state
        .component_settings_service
        .validate_entity(entity.as_str())
        .await?;

    Ok(Json(ValidationReportResponse::new(entity, &report)))
}
