//! Structural checks over a whole view-config document.

use std::sync::Arc;

use ccs_domain::{
    BlockKind, ColumnSchema, ComponentReference, ConfigBlock, SelectMode, ValidationReport,
    ValidationRule, ViewConfigDocument, split_column_tokens,
};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::component_ports::{ConfigStore, SchemaProvider};
use crate::component_service::relation_candidates;

mod column_rules;
mod group_rules;

/// Template name whose components must declare `columns`.
const TABLE_TEMPLATE: &str = "table";

/// Read-only validator for view-config documents.
///
/// Findings are data: the validator never fails and never mutates the
/// document it inspects.
#[derive(Clone)]
pub struct ViewConfigValidator {
    schema_provider: Arc<dyn SchemaProvider>,
    config_store: Arc<dyn ConfigStore>,
}

/// Column schema a block's cross-reference rules check against.
struct BlockSchema {
    columns: ColumnSchema,
    model_entity: Option<String>,
}

impl ViewConfigValidator {
    /// Creates a validator over the engine's ports.
    #[must_use]
    pub fn new(schema_provider: Arc<dyn SchemaProvider>, config_store: Arc<dyn ConfigStore>) -> Self {
        Self {
            schema_provider,
            config_store,
        }
    }

    /// Validates every block of `document`.
    pub async fn validate(&self, document: &ViewConfigDocument, entity: &str) -> ValidationReport {
        let mut report = ValidationReport::new();

        for block in document.blocks() {
            self.validate_block(document, entity, block, &mut report)
                .await;
        }

        debug!(
            entity = %entity,
            errors = report.errors().len(),
            warnings = report.warnings().len(),
            "view config validated"
        );
        report
    }

    async fn validate_block(
        &self,
        document: &ViewConfigDocument,
        entity: &str,
        block: ConfigBlock<'_>,
        report: &mut ValidationReport,
    ) {
        let key = block.key();
        let body = block.body();

        let has_languages = body
            .get("lang")
            .and_then(Value::as_array)
            .is_some_and(|languages| !languages.is_empty());
        if !has_languages {
            report.push(
                ValidationRule::LangRequired,
                format!("{key}.lang"),
                "lang must be a non-empty array of language codes",
            );
        }

        if let Some(per_page) = body.get("per_page").and_then(Value::as_f64)
            && per_page <= 0.0
        {
            report.push(
                ValidationRule::PerPageNonPositive,
                format!("{key}.per_page"),
                format!("per_page should be positive, found {per_page}"),
            );
        }

        if block.is_no_model() && inline_schema_is_empty(block.columns_schema()) {
            report.push(
                ValidationRule::NoModelColumnsSchemaRequired,
                format!("{key}.columnsSchema"),
                "noModel blocks require a non-empty columnsSchema",
            );
        }

        self.check_function_definitions(block.functions(), key, report);

        let references = match block.kind() {
            BlockKind::View => block.components(),
            BlockKind::Component => Vec::new(),
        };
        self.check_table_columns(document, block, &references, report);
        for reference in &references {
            self.check_reference(document, key, reference, report).await;
        }

        let schema = self.block_schema(entity, block);
        column_rules::check_column_schema(block, report);
        group_rules::check_groups(block, report);
        if let Some(schema) = schema {
            self.check_cross_references(block, &references, &schema, report);
        }
    }

    /// Resolves the schema of a block, or `None` to disable cross-reference
    /// rules.
    fn block_schema(&self, entity: &str, block: ConfigBlock<'_>) -> Option<BlockSchema> {
        if block.is_no_model() {
            let columns = block
                .columns_schema()
                .and_then(|schema| ColumnSchema::from_value(schema).ok())
                .filter(|schema| !schema.is_empty())?;
            return Some(BlockSchema {
                columns,
                model_entity: None,
            });
        }

        match self.schema_provider.resolve_schema(entity) {
            Ok(Some(schema)) => Some(BlockSchema {
                columns: schema.columns().clone(),
                model_entity: Some(entity.to_owned()),
            }),
            Ok(None) => None,
            Err(error) => {
                warn!(entity = %entity, error = %error, "schema lookup failed during validation");
                None
            }
        }
    }

    fn check_function_definitions(
        &self,
        functions: Option<&Map<String, Value>>,
        path: &str,
        report: &mut ValidationReport,
    ) {
        for (name, definition) in functions.into_iter().flatten() {
            let Value::Object(definition) = definition else {
                continue;
            };
            let complete = ["file", "function"].iter().all(|required| {
                definition
                    .get(*required)
                    .and_then(Value::as_str)
                    .is_some_and(|value| !value.trim().is_empty())
            });
            if !complete {
                report.push(
                    ValidationRule::FunctionDefinitionIncomplete,
                    format!("{path}.functions.{name}"),
                    format!("function '{name}' must name both 'file' and 'function'"),
                );
            }
        }
    }

    fn check_table_columns(
        &self,
        document: &ViewConfigDocument,
        block: ConfigBlock<'_>,
        references: &[ComponentReference],
        report: &mut ValidationReport,
    ) {
        let key = block.key();
        if block.columns().is_some() {
            return;
        }

        if block.kind() == BlockKind::Component {
            if block.template_name() == TABLE_TEMPLATE {
                report.push(
                    ValidationRule::ColumnsRequired,
                    format!("{key}.columns"),
                    "table components require columns",
                );
            }
            return;
        }

        for reference in references {
            let component_block = reference
                .entity()
                .is_none()
                .then(|| document.block(reference.component()))
                .flatten()
                .filter(|component| component.kind() == BlockKind::Component);
            let template = component_block
                .map(|component| component.template_name())
                .unwrap_or(reference.component());
            if template != TABLE_TEMPLATE {
                continue;
            }

            let component_columns = reference.settings().columns().is_some()
                || component_block.is_some_and(|component| component.columns().is_some());
            if !component_columns {
                report.push(
                    ValidationRule::ColumnsRequired,
                    format!("{key}.components.{}", reference.alias()),
                    format!(
                        "table component '{}' requires columns on the view or the component",
                        reference.alias()
                    ),
                );
            }
        }
    }

    async fn check_reference(
        &self,
        document: &ViewConfigDocument,
        view_key: &str,
        reference: &ComponentReference,
        report: &mut ValidationReport,
    ) {
        let path = format!("{view_key}.components.{}", reference.alias());
        self.check_function_definitions(reference.settings().functions(), &path, report);

        let template = match reference.entity() {
            Some(other_entity) => match self.config_store.load_view_config(other_entity).await {
                Ok(Some(Value::Object(blocks))) => blocks
                    .get(reference.component())
                    .and_then(|block| block.get("template"))
                    .and_then(Value::as_str)
                    .unwrap_or(reference.component())
                    .to_owned(),
                _ => reference.component().to_owned(),
            },
            None => document
                .block(reference.component())
                .filter(|block| block.kind() == BlockKind::Component)
                .map_or(reference.component(), |block| block.template_name())
                .to_owned(),
        };

        match self.config_store.load_component_template(&template).await {
            Ok(Some(_)) => {}
            Ok(None) => report.push(
                ValidationRule::ComponentTemplateMissing,
                path,
                format!(
                    "component '{}' has no template file '{template}'",
                    reference.alias()
                ),
            ),
            Err(error) => {
                warn!(template = %template, error = %error, "template lookup failed during validation");
            }
        }
    }

    fn check_cross_references(
        &self,
        block: ConfigBlock<'_>,
        references: &[ComponentReference],
        schema: &BlockSchema,
        report: &mut ValidationReport,
    ) {
        let key = block.key();

        let mut selections = vec![(format!("{key}.columns"), block.columns())];
        for reference in references.iter().filter(|reference| reference.entity().is_none()) {
            selections.push((
                format!("{key}.components.{}.columns", reference.alias()),
                reference.settings().columns(),
            ));
        }
        for (path, columns) in selections {
            let Some(columns) = columns else {
                continue;
            };
            for token in split_column_tokens(Some(columns.as_str())) {
                if !self.token_is_known(schema, token.relation(), token.field()) {
                    report.push(
                        ValidationRule::ColumnUnknown,
                        path.clone(),
                        format!("column '{}' is not defined in the schema", token.as_str()),
                    );
                }
            }
        }

        for filter in block.filters().unwrap_or_default() {
            if !schema.columns.contains(&filter) {
                report.push(
                    ValidationRule::FilterUnknownColumn,
                    format!("{key}.filters"),
                    format!("filter '{filter}' is not defined in the schema"),
                );
            }
        }

        for (column, customization) in block.column_customizations().into_iter().flatten() {
            let custom_marker = customization
                .get("custom")
                .and_then(Value::as_bool)
                .unwrap_or(false);
            if !custom_marker && !schema.columns.contains(column) {
                report.push(
                    ValidationRule::CustomizationUnknownColumn,
                    format!("{key}.columnCustomizations.{column}"),
                    format!("customization '{column}' matches no schema column"),
                );
            }
        }

        column_rules::check_customized_columns(block, &schema.columns, report);
    }

    fn token_is_known(&self, schema: &BlockSchema, relation: Option<&str>, field: &str) -> bool {
        let Some(relation) = relation else {
            return schema.columns.contains(field);
        };
        let Some(entity) = schema.model_entity.as_deref() else {
            return true;
        };

        relation_candidates(relation).iter().any(|candidate| {
            self.schema_provider
                .resolve_relation(entity, candidate)
                .ok()
                .flatten()
                .and_then(|target| self.schema_provider.resolve_schema(&target).ok().flatten())
                .is_some_and(|target| target.columns().contains(field))
        })
    }
}

fn inline_schema_is_empty(schema: Option<&Value>) -> bool {
    match schema {
        Some(Value::Object(columns)) => columns.is_empty(),
        Some(Value::Array(columns)) => columns.is_empty(),
        _ => true,
    }
}

/// Returns the select mode declared by a column property bag, if it has
/// select configuration.
fn select_block(properties: &Map<String, Value>) -> Option<(&Map<String, Value>, SelectMode)> {
    let config = properties
        .get("select")
        .and_then(Value::as_object)
        .or_else(|| properties.get("filterable").and_then(Value::as_object))?;
    let mode = SelectMode::parse(config.get("mode").and_then(Value::as_str));
    Some((config, mode))
}
