use ccs_core::{AppError, AppResult};
use serde_json::{Map, Value};

/// The `"on"`/`"off"` switch used by component templates and overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// Compute the value.
    On,
    /// Omit the key.
    Off,
}

impl Toggle {
    /// Parses `"on"`/`"off"` (case-insensitive).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            value if value.eq_ignore_ascii_case("on") => Some(Self::On),
            value if value.eq_ignore_ascii_case("off") => Some(Self::Off),
            _ => None,
        }
    }

    /// Parses a JSON string value as a toggle.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_str().and_then(Self::parse)
    }

    /// Returns the canonical text.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
        }
    }
}

/// Interpretation of a reserved template key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Directive<'a> {
    /// Invoke the matching builder.
    Compute,
    /// Drop the key from the payload.
    Omit,
    /// Pass the node through unchanged.
    Literal(&'a TemplateNode),
}

/// Component template parsed into a tagged tree.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateNode {
    /// `"on"` or `"off"`.
    Toggle(Toggle),
    /// Any scalar or non-toggle string.
    Leaf(Value),
    /// Nested object, in declaration order.
    Object(Vec<(String, TemplateNode)>),
    /// Array of nodes.
    Array(Vec<TemplateNode>),
}

impl TemplateNode {
    /// Parses a JSON value.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(text) => {
                Toggle::parse(text).map_or_else(|| Self::Leaf(value.clone()), Self::Toggle)
            }
            Value::Object(entries) => Self::Object(
                entries
                    .iter()
                    .map(|(key, nested)| (key.clone(), Self::from_value(nested)))
                    .collect(),
            ),
            Value::Array(items) => Self::Array(items.iter().map(Self::from_value).collect()),
            scalar => Self::Leaf(scalar.clone()),
        }
    }

    /// Renders the node back to JSON.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Toggle(toggle) => Value::String(toggle.as_str().to_owned()),
            Self::Leaf(value) => value.clone(),
            Self::Object(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(key, nested)| (key.clone(), nested.to_value()))
                    .collect::<Map<String, Value>>(),
            ),
            Self::Array(items) => Value::Array(items.iter().map(Self::to_value).collect()),
        }
    }

    /// Interprets the node as the value of a reserved key.
    #[must_use]
    pub fn directive(&self) -> Directive<'_> {
        match self {
            Self::Toggle(Toggle::On) => Directive::Compute,
            Self::Toggle(Toggle::Off) => Directive::Omit,
            other => Directive::Literal(other),
        }
    }
}

/// A named component template (`table`, `form`, `toolbar`, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentTemplate {
    name: String,
    root: Vec<(String, TemplateNode)>,
}

impl ComponentTemplate {
    /// Parses a template document; the root must be a JSON object.
    pub fn from_value(name: impl Into<String>, value: &Value) -> AppResult<Self> {
        let name = name.into();
        match TemplateNode::from_value(value) {
            TemplateNode::Object(root) => Ok(Self { name, root }),
            _ => Err(AppError::MalformedConfig(format!(
                "component template '{name}' must be a JSON object"
            ))),
        }
    }

    /// Returns the template name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the root entries in declaration order.
    #[must_use]
    pub fn root(&self) -> &[(String, TemplateNode)] {
        &self.root
    }
}
