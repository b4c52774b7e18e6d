use ccs_core::{AppError, AppResult};
use serde_json::{Map, Value};

/// Keys consumed by the engine at block level; they never reach payloads.
pub const INTERNAL_KEYS: [&str; 5] = ["columns", "columnCustomizations", "per_page", "filters", "lang"];

/// Keys describing how a block is wired rather than what it renders.
pub const STRUCTURAL_KEYS: [&str; 6] = [
    "components",
    "noModel",
    "columnsSchema",
    "template",
    "component",
    "groups",
];

/// Whether a block aggregates components or is one itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// Key contains `View`; declares `components`.
    View,
    /// Directly addressable component block.
    Component,
}

impl BlockKind {
    /// Classifies a top-level block key.
    #[must_use]
    pub fn of_key(key: &str) -> Self {
        if key.contains("View") {
            Self::View
        } else {
            Self::Component
        }
    }
}

/// A reference from a view's `components` map to a component.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentReference {
    alias: String,
    entity: Option<String>,
    component: String,
    body: Map<String, Value>,
}

impl ComponentReference {
    /// Parses one `alias: reference` entry.
    ///
    /// Strings name a template or an `entity/component` pair; objects name
    /// their template via `component` (defaulting to the alias) and carry
    /// overrides in their remaining keys.
    #[must_use]
    pub fn parse(alias: &str, value: &Value) -> Option<Self> {
        match value {
            Value::String(target) => Some(Self::from_target(alias, target, Map::new())),
            Value::Object(body) => {
                let target = body
                    .get("component")
                    .and_then(Value::as_str)
                    .unwrap_or(alias)
                    .to_owned();
                let body = body
                    .iter()
                    .filter(|(key, _)| key.as_str() != "component")
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect();
                Some(Self::from_target(alias, target.as_str(), body))
            }
            _ => None,
        }
    }

    /// Builds a reference to a standalone component block.
    #[must_use]
    pub fn standalone(component: &str) -> Self {
        Self::from_target(component, component, Map::new())
    }

    fn from_target(alias: &str, target: &str, body: Map<String, Value>) -> Self {
        let (entity, component) = match target.split_once('/') {
            Some((entity, component)) if !entity.trim().is_empty() => (
                Some(entity.trim().to_owned()),
                component.trim().to_owned(),
            ),
            _ => (None, target.trim().to_owned()),
        };

        Self {
            alias: alias.to_owned(),
            entity,
            component,
            body,
        }
    }

    /// Returns the alias used as the `componentSettings` key.
    #[must_use]
    pub fn alias(&self) -> &str {
        self.alias.as_str()
    }

    /// Returns the cross-referenced entity, if any.
    #[must_use]
    pub fn entity(&self) -> Option<&str> {
        self.entity.as_deref()
    }

    /// Returns the referenced component name.
    #[must_use]
    pub fn component(&self) -> &str {
        self.component.as_str()
    }

    /// Returns component-level settings (`columns`, `lang`, ...) of an inline
    /// reference.
    #[must_use]
    pub fn settings(&self) -> ConfigBlock<'_> {
        ConfigBlock::new(self.alias.as_str(), &self.body)
    }

    /// Returns the payload overrides of an inline reference.
    #[must_use]
    pub fn overrides(&self) -> Map<String, Value> {
        override_entries(&self.body)
    }
}

/// Read-only accessor over a view or component block body.
#[derive(Debug, Clone, Copy)]
pub struct ConfigBlock<'a> {
    key: &'a str,
    body: &'a Map<String, Value>,
}

impl<'a> ConfigBlock<'a> {
    /// Wraps a block body.
    #[must_use]
    pub fn new(key: &'a str, body: &'a Map<String, Value>) -> Self {
        Self { key, body }
    }

    /// Returns the block key.
    #[must_use]
    pub fn key(&self) -> &'a str {
        self.key
    }

    /// Returns the raw block body.
    #[must_use]
    pub fn body(&self) -> &'a Map<String, Value> {
        self.body
    }

    /// Returns whether this block is a view or a component.
    #[must_use]
    pub fn kind(&self) -> BlockKind {
        BlockKind::of_key(self.key)
    }

    /// Returns the declared language codes, if `lang` is an array.
    #[must_use]
    pub fn languages(&self) -> Option<Vec<String>> {
        self.body.get("lang").and_then(Value::as_array).map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect()
        })
    }

    /// Returns the column selection as CSV (`columns` may be CSV or an array).
    #[must_use]
    pub fn columns(&self) -> Option<String> {
        columns_csv(self.body)
    }

    /// Returns per-column customizations.
    #[must_use]
    pub fn column_customizations(&self) -> Option<&'a Map<String, Value>> {
        self.body
            .get("columnCustomizations")
            .and_then(Value::as_object)
    }

    /// Returns the filter allow-list.
    #[must_use]
    pub fn filters(&self) -> Option<Vec<String>> {
        string_list(self.body.get("filters"))
    }

    /// Returns the declared page size.
    #[must_use]
    pub fn per_page(&self) -> Option<i64> {
        self.body.get("per_page").and_then(Value::as_i64)
    }

    /// Returns whether the block is schema-less.
    #[must_use]
    pub fn is_no_model(&self) -> bool {
        self.body
            .get("noModel")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Returns the inline column schema of a schema-less block.
    #[must_use]
    pub fn columns_schema(&self) -> Option<&'a Value> {
        self.body.get("columnsSchema")
    }

    /// Returns declared functions.
    #[must_use]
    pub fn functions(&self) -> Option<&'a Map<String, Value>> {
        self.body.get("functions").and_then(Value::as_object)
    }

    /// Returns the template name of a component block.
    #[must_use]
    pub fn template_name(&self) -> &'a str {
        self.body
            .get("template")
            .and_then(Value::as_str)
            .unwrap_or(self.key)
    }

    /// Returns parsed component references in declaration order.
    #[must_use]
    pub fn components(&self) -> Vec<ComponentReference> {
        self.body
            .get("components")
            .and_then(Value::as_object)
            .map(|components| {
                components
                    .iter()
                    .filter_map(|(alias, value)| ComponentReference::parse(alias, value))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns the non-internal, non-structural keys used as payload overrides.
    #[must_use]
    pub fn overrides(&self) -> Map<String, Value> {
        override_entries(self.body)
    }
}

/// Returns `columns` of an object as CSV.
#[must_use]
pub fn columns_csv(body: &Map<String, Value>) -> Option<String> {
    match body.get("columns")? {
        Value::String(csv) => Some(csv.clone()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(","),
        ),
        _ => None,
    }
}

/// Returns an optional array of strings.
#[must_use]
pub fn string_list(value: Option<&Value>) -> Option<Vec<String>> {
    value.and_then(Value::as_array).map(|items| {
        items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_owned)
            .collect()
    })
}

/// Strips internal and structural keys, leaving payload overrides.
///
/// `filters` stays: as a toggle it switches the section, as a list it also
/// filters the compiled filter entries.
#[must_use]
pub fn override_entries(body: &Map<String, Value>) -> Map<String, Value> {
    body.iter()
        .filter(|(key, _)| {
            let key = key.as_str();
            let consumed = key != "filters" && INTERNAL_KEYS.contains(&key);
            !consumed && !STRUCTURAL_KEYS.contains(&key)
        })
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Per-entity view configuration document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewConfigDocument {
    entity: String,
    blocks: Map<String, Value>,
}

impl ViewConfigDocument {
    /// Wraps a parsed document; `null` means an empty document.
    pub fn from_value(entity: impl Into<String>, value: Value) -> AppResult<Self> {
        let entity = entity.into();
        match value {
            Value::Null => Ok(Self {
                entity,
                blocks: Map::new(),
            }),
            Value::Object(blocks) => Ok(Self { entity, blocks }),
            _ => Err(AppError::MalformedConfig(format!(
                "view config for '{entity}' must be a JSON object"
            ))),
        }
    }

    /// Returns the entity this document configures.
    #[must_use]
    pub fn entity(&self) -> &str {
        self.entity.as_str()
    }

    /// Returns whether the document has no blocks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Returns one block by key, if it is an object.
    #[must_use]
    pub fn block(&self, key: &str) -> Option<ConfigBlock<'_>> {
        self.blocks
            .get_key_value(key)
            .and_then(|(key, body)| body.as_object().map(|body| ConfigBlock::new(key, body)))
    }

    /// Returns every object block in declaration order.
    pub fn blocks(&self) -> impl Iterator<Item = ConfigBlock<'_>> {
        self.blocks.iter().filter_map(|(key, body)| {
            body.as_object()
                .map(|body| ConfigBlock::new(key.as_str(), body))
        })
    }

    /// Returns the raw document.
    #[must_use]
    pub fn raw(&self) -> &Map<String, Value> {
        &self.blocks
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{BlockKind, ComponentReference, ViewConfigDocument};

    fn document() -> ViewConfigDocument {
        ViewConfigDocument::from_value(
            "person",
            json!({
                "listView": {
                    "lang": ["en", "dv"],
                    "columns": ["id", "name"],
                    "filters": ["status"],
                    "components": {
                        "table": "table",
                        "details": "country/form",
                        "toolbar": {"component": "toolbar", "search": "off"}
                    }
                },
                "table": {"lang": ["en"], "columns": "id,name", "headers": "off", "template": "grid"}
            }),
        )
        .unwrap_or_else(|error| panic!("{error}"))
    }

    #[test]
    fn blocks_are_classified_by_view_substring() {
        let document = document();
        let kinds: Vec<BlockKind> = document.blocks().map(|block| block.kind()).collect();
        assert_eq!(kinds, vec![BlockKind::View, BlockKind::Component]);
    }

    #[test]
    fn view_blocks_expose_settings_and_references() {
        let document = document();
        let Some(view) = document.block("listView") else {
            panic!("listView missing");
        };

        assert_eq!(view.columns().as_deref(), Some("id,name"));
        assert_eq!(view.languages(), Some(vec!["en".to_owned(), "dv".to_owned()]));
        assert_eq!(view.filters(), Some(vec!["status".to_owned()]));

        let references = view.components();
        assert_eq!(references.len(), 3);
        assert_eq!(references[1].entity(), Some("country"));
        assert_eq!(references[1].component(), "form");
        assert_eq!(references[2].component(), "toolbar");
        assert_eq!(references[2].overrides().get("search"), Some(&json!("off")));
    }

    #[test]
    fn component_blocks_split_overrides_from_internal_keys() {
        let document = document();
        let Some(table) = document.block("table") else {
            panic!("table missing");
        };

        assert_eq!(table.template_name(), "grid");
        let overrides = table.overrides();
        assert_eq!(overrides.len(), 1);
        assert_eq!(overrides.get("headers"), Some(&json!("off")));
    }

    #[test]
    fn cross_reference_strings_split_on_slash() {
        let reference = ComponentReference::parse("details", &json!("country/form"));
        assert_eq!(
            reference.as_ref().and_then(|reference| reference.entity()),
            Some("country")
        );
    }
}
