use std::collections::BTreeMap;
use std::str::FromStr;

use ccs_core::{AppError, AppResult, studly_case};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::localized::LocalizedText;

/// Semantic value type declared by a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// UTF-8 string field.
    String,
    /// Numeric field.
    Number,
    /// Boolean field.
    Boolean,
    /// Date or date-time field.
    Date,
    /// Arbitrary JSON field.
    Json,
}

impl FieldType {
    /// Returns a stable storage value for the field type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Json => "json",
        }
    }

    /// Returns the form/filter control implied by the type.
    #[must_use]
    pub fn default_input(&self) -> InputKind {
        match self {
            Self::String | Self::Json => InputKind::Text,
            Self::Number => InputKind::Number,
            Self::Boolean => InputKind::Checkbox,
            Self::Date => InputKind::Date,
        }
    }
}

impl FromStr for FieldType {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "string" | "text" => Ok(Self::String),
            "number" | "integer" | "float" | "decimal" => Ok(Self::Number),
            "boolean" | "bool" => Ok(Self::Boolean),
            "date" | "datetime" => Ok(Self::Date),
            "json" => Ok(Self::Json),
            _ => Err(AppError::MalformedConfig(format!(
                "unknown field type '{value}'"
            ))),
        }
    }
}

/// Form or filter control for a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKind {
    /// Free text input.
    Text,
    /// Numeric input.
    Number,
    /// Checkbox toggle.
    Checkbox,
    /// Date picker.
    Date,
    /// Option list.
    Select,
    /// Remote search box.
    Search,
    /// Any other control name, kept as declared.
    Other(String),
}

impl InputKind {
    /// Parses a declared `inputType` value.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" | "string" => Self::Text,
            "number" => Self::Number,
            "checkbox" | "boolean" => Self::Checkbox,
            "date" => Self::Date,
            "select" => Self::Select,
            "search" => Self::Search,
            _ => Self::Other(value.trim().to_owned()),
        }
    }

    /// Returns the token advertised to the front end.
    #[must_use]
    pub fn as_token(&self) -> String {
        match self {
            Self::Text => "Text".to_owned(),
            Self::Number => "Number".to_owned(),
            Self::Checkbox => "Checkbox".to_owned(),
            Self::Date => "Date".to_owned(),
            Self::Select => "Select".to_owned(),
            Self::Search => "Search".to_owned(),
            Self::Other(value) => studly_case(value),
        }
    }

    /// Returns the control name used by form fields.
    #[must_use]
    pub fn as_input_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Checkbox => "checkbox",
            Self::Date => "date",
            Self::Select => "select",
            Self::Search => "search",
            Self::Other(value) => value.as_str(),
        }
    }
}

/// Strategy for populating select-style options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectMode {
    /// Inline `items` list.
    Inline,
    /// External URL used verbatim.
    Url,
    /// URL constructed from a related entity.
    Relation,
}

impl SelectMode {
    /// Parses a declared mode; unrecognized or missing modes mean `Relation`.
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(|mode| mode.trim().to_ascii_lowercase()).as_deref() {
            Some("self") => Self::Inline,
            Some("url") => Self::Url,
            _ => Self::Relation,
        }
    }
}

/// Select/filter option configuration attached to a column.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectConfig {
    /// Declared mode (`self`, `url`, `relation`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    /// Inline option items for `self` mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<Value>>,
    /// Endpoint for `url` mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Relation or related entity name for `relation` mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,
    /// Option property holding the display text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_title: Option<String>,
    /// Option property holding the submitted value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_value: Option<String>,
    /// Label override for the filter or field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<LocalizedText>,
    /// Key override for the filter or field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl SelectConfig {
    /// Returns the parsed option mode.
    #[must_use]
    pub fn select_mode(&self) -> SelectMode {
        SelectMode::parse(self.mode.as_deref())
    }
}

/// The legacy `filterable` property: a flag or a select configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterableSetting {
    /// Plain on/off marker.
    Flag(bool),
    /// Select configuration declared under the legacy key.
    Config(SelectConfig),
}

/// Schema entry describing one field.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDefinition {
    #[serde(skip)]
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<LocalizedText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lang: Option<Vec<String>>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    field_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    display_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    input_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sortable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hidden: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    form_field: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_editable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    select: Option<SelectConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    filterable: Option<FilterableSetting>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl ColumnDefinition {
    /// Parses a definition declared under `name` in a schema object.
    pub fn from_value(name: impl Into<String>, value: &Value) -> AppResult<Self> {
        let name = name.into();
        let mut definition: Self = serde_json::from_value(value.clone()).map_err(|error| {
            AppError::MalformedConfig(format!("invalid column definition '{name}': {error}"))
        })?;
        definition.name = name;
        Ok(definition)
    }

    /// Returns the schema key (the token that selects this column).
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the storage key, falling back to the schema key.
    #[must_use]
    pub fn storage_key(&self) -> &str {
        self.key.as_deref().unwrap_or(self.name.as_str())
    }

    /// Returns the declared label.
    #[must_use]
    pub fn label(&self) -> Option<&LocalizedText> {
        self.label.as_ref()
    }

    /// Returns the declared language set; `None` means every language.
    #[must_use]
    pub fn languages(&self) -> Option<&[String]> {
        self.lang
            .as_deref()
            .filter(|languages| !languages.is_empty())
    }

    /// Returns the raw semantic type.
    #[must_use]
    pub fn field_type(&self) -> Option<&str> {
        self.field_type.as_deref()
    }

    /// Returns the parsed semantic type when recognized.
    #[must_use]
    pub fn semantic_type(&self) -> Option<FieldType> {
        self.field_type.as_deref().and_then(|value| value.parse().ok())
    }

    /// Returns the rendering hint.
    #[must_use]
    pub fn display_type(&self) -> Option<&str> {
        self.display_type.as_deref()
    }

    /// Returns the configuration block keyed by the display type name.
    #[must_use]
    pub fn display_config(&self) -> Option<&Value> {
        self.display_type
            .as_deref()
            .and_then(|display_type| self.extra.get(display_type))
    }

    /// Returns the declared input control.
    #[must_use]
    pub fn input_type(&self) -> Option<&str> {
        self.input_type.as_deref()
    }

    /// Returns the effective input control, defaulted from the semantic type.
    #[must_use]
    pub fn input_kind(&self) -> InputKind {
        match self.input_type.as_deref() {
            Some(input_type) => InputKind::parse(input_type),
            None => self
                .semantic_type()
                .map_or(InputKind::Text, |field_type| field_type.default_input()),
        }
    }

    /// Returns whether the column is sortable.
    #[must_use]
    pub fn is_sortable(&self) -> bool {
        self.sortable.unwrap_or(false)
    }

    /// Returns whether the column is hidden.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.hidden.unwrap_or(false)
    }

    /// Returns whether the column participates in create/edit forms.
    #[must_use]
    pub fn is_form_field(&self) -> bool {
        self.form_field.unwrap_or(false)
    }

    /// Returns the declared inline-edit flag.
    #[must_use]
    pub fn inline_editable(&self) -> Option<bool> {
        self.inline_editable
    }

    /// Returns the select configuration (`select`, else legacy `filterable`).
    #[must_use]
    pub fn select_config(&self) -> Option<&SelectConfig> {
        self.select.as_ref().or(match &self.filterable {
            Some(FilterableSetting::Config(config)) => Some(config),
            _ => None,
        })
    }

    /// Returns whether the column may appear as a filter.
    #[must_use]
    pub fn is_filterable(&self) -> bool {
        !matches!(self.filterable, Some(FilterableSetting::Flag(false)))
    }

    /// Returns properties not modelled explicitly.
    #[must_use]
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Returns a copy with `overrides` shallow-merged over the declaration.
    pub fn merged_with(&self, overrides: &Map<String, Value>) -> AppResult<Self> {
        let mut value = serde_json::to_value(self).map_err(|error| {
            AppError::Internal(format!(
                "failed to serialize column definition '{}': {error}",
                self.name
            ))
        })?;
        if let Value::Object(declared) = &mut value {
            for (key, override_value) in overrides {
                declared.insert(key.clone(), override_value.clone());
            }
        }

        Self::from_value(self.name.clone(), &value)
    }
}

/// Ordered column schema of one entity or schema-less block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnSchema {
    columns: Vec<ColumnDefinition>,
}

impl ColumnSchema {
    /// Creates a schema from already-parsed definitions.
    #[must_use]
    pub fn new(columns: Vec<ColumnDefinition>) -> Self {
        Self { columns }
    }

    /// Parses a `{fieldKey: definition}` object, keeping declaration order.
    pub fn from_value(value: &Value) -> AppResult<Self> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(entries) => entries
                .iter()
                .map(|(name, definition)| ColumnDefinition::from_value(name.as_str(), definition))
                .collect::<AppResult<Vec<_>>>()
                .map(Self::new),
            _ => Err(AppError::MalformedConfig(
                "column schema must be a JSON object keyed by field".to_owned(),
            )),
        }
    }

    /// Looks up a definition by schema key.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|column| column.name() == name)
    }

    /// Returns whether the schema declares `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns definitions in declaration order.
    #[must_use]
    pub fn columns(&self) -> &[ColumnDefinition] {
        &self.columns
    }

    /// Returns schema keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(ColumnDefinition::name)
    }

    /// Returns whether the schema has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Returns a copy where each column's customization object is merged over
    /// its declaration.
    pub fn with_customizations(&self, customizations: &Map<String, Value>) -> AppResult<Self> {
        self.columns
            .iter()
            .map(|column| match customizations.get(column.name()) {
                Some(Value::Object(overrides)) => column.merged_with(overrides),
                _ => Ok(column.clone()),
            })
            .collect::<AppResult<Vec<_>>>()
            .map(Self::new)
    }
}

#[derive(Debug, Deserialize)]
struct EntitySchemaDocument {
    #[serde(default)]
    columns: Value,
    #[serde(default)]
    searchable: Vec<String>,
    #[serde(default)]
    relations: BTreeMap<String, String>,
}

/// Schema registered for a model-backed entity.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EntitySchema {
    columns: ColumnSchema,
    searchable: Vec<String>,
    relations: BTreeMap<String, String>,
}

impl EntitySchema {
    /// Creates an entity schema.
    #[must_use]
    pub fn new(
        columns: ColumnSchema,
        searchable: Vec<String>,
        relations: BTreeMap<String, String>,
    ) -> Self {
        Self {
            columns,
            searchable,
            relations,
        }
    }

    /// Parses `{"columns": {...}, "searchable": [...], "relations": {...}}`.
    pub fn from_value(value: &Value) -> AppResult<Self> {
        let document: EntitySchemaDocument =
            serde_json::from_value(value.clone()).map_err(|error| {
                AppError::MalformedConfig(format!("invalid entity schema document: {error}"))
            })?;

        Ok(Self::new(
            ColumnSchema::from_value(&document.columns)?,
            document.searchable,
            document.relations,
        ))
    }

    /// Returns the column schema.
    #[must_use]
    pub fn columns(&self) -> &ColumnSchema {
        &self.columns
    }

    /// Returns searchable field keys.
    #[must_use]
    pub fn searchable(&self) -> &[String] {
        &self.searchable
    }

    /// Returns the declared relation name to related entity map.
    #[must_use]
    pub fn relations(&self) -> &BTreeMap<String, String> {
        &self.relations
    }
}
