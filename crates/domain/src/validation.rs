use serde::Serialize;

/// Whether a finding blocks a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Blocks when the caller enforces validation.
    Error,
    /// Never blocks.
    Warning,
}

/// Stable identifiers of view-config validation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ValidationRule {
    /// `lang` missing or not a non-empty array.
    #[serde(rename = "lang.required")]
    LangRequired,
    /// A table component without `columns` anywhere.
    #[serde(rename = "columns.required")]
    ColumnsRequired,
    /// `noModel: true` without a `columnsSchema`.
    #[serde(rename = "no_model.columns_schema_required")]
    NoModelColumnsSchemaRequired,
    /// `inputType: select` without a `select`/`filterable` block.
    #[serde(rename = "select.config_required")]
    SelectConfigRequired,
    /// Object function definition without `file` or `function`.
    #[serde(rename = "functions.definition_incomplete")]
    FunctionDefinitionIncomplete,
    /// `inputType: search` without `submitUrl`.
    #[serde(rename = "search.submit_url_required")]
    SearchSubmitUrlRequired,
    /// `per_page` is zero or negative.
    #[serde(rename = "per_page.non_positive")]
    PerPageNonPositive,
    /// Filter allow-list names an unknown column.
    #[serde(rename = "filters.unknown_column")]
    FilterUnknownColumn,
    /// Customization names an unknown column.
    #[serde(rename = "customizations.unknown_column")]
    CustomizationUnknownColumn,
    /// Column selection names an unknown column.
    #[serde(rename = "columns.unknown_column")]
    ColumnUnknown,
    /// Select mode `self` without `items`.
    #[serde(rename = "select.self_without_items")]
    SelectSelfWithoutItems,
    /// Select mode `relation` without `relationship`.
    #[serde(rename = "select.relation_without_relationship")]
    SelectRelationWithoutRelationship,
    /// `displayType` chip/select without its sub-config.
    #[serde(rename = "display_type.config_missing")]
    DisplayTypeConfigMissing,
    /// Field `group` names no declared group.
    #[serde(rename = "groups.unknown_group")]
    UnknownGroup,
    /// Group name declared twice.
    #[serde(rename = "groups.duplicate_name")]
    DuplicateGroup,
    /// Group without `title`.
    #[serde(rename = "groups.title_missing")]
    GroupTitleMissing,
    /// Group `title` is a plain string.
    #[serde(rename = "groups.title_not_localized")]
    GroupTitleNotLocalized,
    /// Group `title` lacks a declared language.
    #[serde(rename = "groups.title_language_missing")]
    GroupTitleLanguageMissing,
    /// Event handler names an undefined function.
    #[serde(rename = "events.unknown_function")]
    EventUnknownFunction,
    /// Component alias with no template file.
    #[serde(rename = "components.template_missing")]
    ComponentTemplateMissing,
}

impl ValidationRule {
    /// Returns the stable rule identifier.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LangRequired => "lang.required",
            Self::ColumnsRequired => "columns.required",
            Self::NoModelColumnsSchemaRequired => "no_model.columns_schema_required",
            Self::SelectConfigRequired => "select.config_required",
            Self::FunctionDefinitionIncomplete => "functions.definition_incomplete",
            Self::SearchSubmitUrlRequired => "search.submit_url_required",
            Self::PerPageNonPositive => "per_page.non_positive",
            Self::FilterUnknownColumn => "filters.unknown_column",
            Self::CustomizationUnknownColumn => "customizations.unknown_column",
            Self::ColumnUnknown => "columns.unknown_column",
            Self::SelectSelfWithoutItems => "select.self_without_items",
            Self::SelectRelationWithoutRelationship => "select.relation_without_relationship",
            Self::DisplayTypeConfigMissing => "display_type.config_missing",
            Self::UnknownGroup => "groups.unknown_group",
            Self::DuplicateGroup => "groups.duplicate_name",
            Self::GroupTitleMissing => "groups.title_missing",
            Self::GroupTitleNotLocalized => "groups.title_not_localized",
            Self::GroupTitleLanguageMissing => "groups.title_language_missing",
            Self::EventUnknownFunction => "events.unknown_function",
            Self::ComponentTemplateMissing => "components.template_missing",
        }
    }

    /// Returns whether the rule reports errors or warnings.
    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            Self::LangRequired
            | Self::ColumnsRequired
            | Self::NoModelColumnsSchemaRequired
            | Self::SelectConfigRequired
            | Self::FunctionDefinitionIncomplete
            | Self::SearchSubmitUrlRequired => Severity::Error,
            _ => Severity::Warning,
        }
    }
}

/// One validator finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Dot-notation location, e.g. `listView.columnsSchema.country_id`.
    pub path: String,
    /// Stable rule identifier.
    pub rule: ValidationRule,
    /// Human-readable explanation.
    pub message: String,
}

/// Errors and warnings produced by one validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ValidationReport {
    errors: Vec<ValidationIssue>,
    warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a finding under the list matching the rule's severity.
    pub fn push(&mut self, rule: ValidationRule, path: impl Into<String>, message: impl Into<String>) {
        let issue = ValidationIssue {
            path: path.into(),
            rule,
            message: message.into(),
        };
        match rule.severity() {
            Severity::Error => self.errors.push(issue),
            Severity::Warning => self.warnings.push(issue),
        }
    }

    /// Returns blocking findings.
    #[must_use]
    pub fn errors(&self) -> &[ValidationIssue] {
        &self.errors
    }

    /// Returns non-blocking findings.
    #[must_use]
    pub fn warnings(&self) -> &[ValidationIssue] {
        &self.warnings
    }

    /// Returns whether no errors were found.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}
