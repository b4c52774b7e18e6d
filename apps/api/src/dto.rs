use ccs_application::{ComponentSettingsRequest, SettingsSelector};
use ccs_core::AppError;
use ccs_domain::{ValidationIssue, ValidationReport};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Query string of a component settings request.
#[derive(Debug, Default, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/component-settings-query.ts"
)]
pub struct ComponentSettingsQuery {
    pub view: Option<String>,
    pub component: Option<String>,
    pub lang: Option<String>,
    pub columns: Option<String>,
    /// Kept as text so a non-numeric value is reported as a JSON error.
    pub per_page: Option<String>,
    #[serde(rename = "componentSettings")]
    pub component_settings: Option<String>,
}

impl ComponentSettingsQuery {
    /// Builds the engine request for `entity`. `view` wins when both
    /// selectors are present.
    pub fn into_request(self, entity: String) -> Result<ComponentSettingsRequest, AppError> {
        let non_blank = |value: Option<String>| value.filter(|value| !value.trim().is_empty());

        let selector = match (non_blank(self.view), non_blank(self.component)) {
            (Some(view), _) => SettingsSelector::View(view.trim().to_owned()),
            (None, Some(component)) => SettingsSelector::Component(component.trim().to_owned()),
            (None, None) => {
                return Err(AppError::InvalidRequest(
                    "Either 'view' or 'component' query parameter is required".to_owned(),
                ));
            }
        };

        let mut request = ComponentSettingsRequest::new(entity, selector);
        request.lang = non_blank(self.lang);
        request.columns = non_blank(self.columns);
        request.per_page = non_blank(self.per_page)
            .map(|raw| {
                raw.trim().parse::<u32>().map_err(|_| {
                    AppError::InvalidRequest(format!(
                        "per_page must be a non-negative integer, got '{raw}'"
                    ))
                })
            })
            .transpose()?
            .filter(|per_page| *per_page > 0);
        request.component_settings = non_blank(self.component_settings);
        Ok(request)
    }
}

/// Response for a language the view config does not support.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/unsupported-language-response.ts"
)]
pub struct UnsupportedLanguageResponse {
    pub message: String,
    #[ts(type = "never[]")]
    pub data: Vec<Value>,
}

/// One validator finding.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/validation-issue-response.ts"
)]
pub struct ValidationIssueResponse {
    pub path: String,
    pub rule: String,
    pub message: String,
}

impl From<&ValidationIssue> for ValidationIssueResponse {
    fn from(value: &ValidationIssue) -> Self {
        Self {
            path: value.path.clone(),
            rule: value.rule.as_str().to_owned(),
            message: value.message.clone(),
        }
    }
}

/// Validator report of one entity's view config.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/validation-report-response.ts"
)]
pub struct ValidationReportResponse {
    pub entity: String,
    pub valid: bool,
    pub errors: Vec<ValidationIssueResponse>,
    pub warnings: Vec<ValidationIssueResponse>,
}

impl ValidationReportResponse {
    pub fn new(entity: String, report: &ValidationReport) -> Self {
        Self {
            entity,
            valid: report.is_valid(),
            errors: report.errors().iter().map(ValidationIssueResponse::from).collect(),
            warnings: report
                .warnings()
                .iter()
                .map(ValidationIssueResponse::from)
                .collect(),
        }
    }
}
