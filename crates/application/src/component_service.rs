//! Component settings resolution.
//!
//! Turns a view-config document, a component template, and a column schema
//! into the JSON payload rendered by the front end.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use ccs_core::{AppError, AppResult, camel_case, pluralize, singularize, studly_case, title_case};
use ccs_domain::{
    BlockKind, ColumnDefinition, ColumnSchema, ColumnToken, ComponentReference, ComponentTemplate,
    ConfigBlock, Directive, INTERNAL_KEYS, InputKind, PRIMARY_FALLBACK_LANGUAGE,
    SECONDARY_FALLBACK_LANGUAGE, SelectConfig, SelectMode, TemplateNode, Toggle, ValidationReport,
    ViewConfigDocument, collapse_localized, resolve_localized_map, split_column_tokens,
};
use serde_json::{Map, Value, json};
use tracing::{debug, warn};

use crate::component_ports::{ConfigStore, SchemaProvider, ScriptStore};
use crate::engine_config::{EngineConfig, FieldsOverridePolicy};
use crate::view_config_validator::ViewConfigValidator;

mod block_settings;
mod column_tokens;
mod filters;
mod form_fields;
mod functions;
mod headers;
mod language;
mod overrides;
mod resolution_context;
mod section;
mod select_options;
#[cfg(test)]
mod tests;

use block_settings::BlockSettings;
pub use column_tokens::ColumnSelection;
pub(crate) use column_tokens::relation_candidates;
use functions::ScriptBundle;
pub use functions::extract_function_body;
pub use language::{
    column_supports_lang, effective_field_language, label_for, pick_header_lang_override,
};
use resolution_context::{RelatedSchema, ResolutionContext, SchemaMode};

/// What a settings request asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsSelector {
    /// Raw `componentSettings` of a view block, without resolution.
    View(String),
    /// Full resolution of a view or component block
    /// (`key` or `otherEntity/key`).
    Component(String),
}

/// Per-request inputs, discarded after the response is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentSettingsRequest {
    /// Target entity name.
    pub entity: String,
    /// View or component selector.
    pub selector: SettingsSelector,
    /// Requested language; the engine default applies when absent.
    pub lang: Option<String>,
    /// Column selection override (CSV).
    pub columns: Option<String>,
    /// Page size override.
    pub per_page: Option<u32>,
    /// Restricts a view resolution to one component alias.
    pub component_settings: Option<String>,
}

impl ComponentSettingsRequest {
    /// Creates a request with only the entity and selector set.
    #[must_use]
    pub fn new(entity: impl Into<String>, selector: SettingsSelector) -> Self {
        Self {
            entity: entity.into(),
            selector,
            lang: None,
            columns: None,
            per_page: None,
            component_settings: None,
        }
    }
}

/// Successful result of a settings request.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentSettingsOutcome {
    /// The response payload.
    Settings(Map<String, Value>),
    /// The block does not allow the requested language.
    UnsupportedLanguage {
        /// Explanation returned alongside empty data.
        message: String,
    },
}

/// Failure of a settings request; no partial payload accompanies it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionFailure {
    /// The failure kind and message.
    pub error: AppError,
    /// Validator report when validation blocked the request.
    pub validation: Option<ValidationReport>,
}

impl From<AppError> for ResolutionFailure {
    fn from(error: AppError) -> Self {
        Self {
            error,
            validation: None,
        }
    }
}

/// Result type of settings resolution.
pub type ResolutionResult<T> = Result<T, ResolutionFailure>;

/// Application service resolving component settings payloads.
#[derive(Clone)]
pub struct ComponentSettingsService {
    schema_provider: Arc<dyn SchemaProvider>,
    config_store: Arc<dyn ConfigStore>,
    script_store: Arc<dyn ScriptStore>,
    validator: ViewConfigValidator,
    config: EngineConfig,
}

/// Component resolved with the context it was compiled against.
struct CompiledComponent {
    alias: String,
    payload: Map<String, Value>,
}

impl ComponentSettingsService {
    /// Creates the service from its ports and engine settings.
    #[must_use]
    pub fn new(
        schema_provider: Arc<dyn SchemaProvider>,
        config_store: Arc<dyn ConfigStore>,
        script_store: Arc<dyn ScriptStore>,
        config: EngineConfig,
    ) -> Self {
        let validator = ViewConfigValidator::new(schema_provider.clone(), config_store.clone());
        Self {
            schema_provider,
            config_store,
            script_store,
            validator,
            config,
        }
    }

    /// Resolves a settings request.
    pub async fn resolve(
        &self,
        request: &ComponentSettingsRequest,
    ) -> ResolutionResult<ComponentSettingsOutcome> {
        let language = self.request_language(request);
        match &request.selector {
            SettingsSelector::View(view_key) => {
                self.view_settings(request.entity.as_str(), view_key.as_str(), language.as_str())
                    .await
            }
            SettingsSelector::Component(component_key) => {
                self.component_settings(request, component_key.as_str(), language.as_str())
                    .await
            }
        }
    }

    /// Loads and validates the view-config document of an entity.
    pub async fn validate_entity(&self, entity: &str) -> AppResult<ValidationReport> {
        let document = self.load_document(entity).await?;
        Ok(self.validator.validate(&document, entity).await)
    }

    fn request_language(&self, request: &ComponentSettingsRequest) -> String {
        request
            .lang
            .as_deref()
            .map(str::trim)
            .filter(|lang| !lang.is_empty())
            .unwrap_or(self.config.default_language.as_str())
            .to_ascii_lowercase()
    }

    async fn load_document(&self, entity: &str) -> AppResult<ViewConfigDocument> {
        let raw = self
            .config_store
            .load_view_config(entity)
            .await?
            .unwrap_or(Value::Null);
        ViewConfigDocument::from_value(entity, raw)
    }

    async fn load_template(&self, name: &str) -> AppResult<(ComponentTemplate, Value)> {
        let raw = self
            .config_store
            .load_component_template(name)
            .await?
            .filter(|raw| raw.as_object().is_some_and(|object| !object.is_empty()))
            .ok_or_else(|| {
                AppError::ComponentConfigNotFound(format!(
                    "Component config '{name}' not found"
                ))
            })?;

        Ok((ComponentTemplate::from_value(name, &raw)?, raw))
    }

    async fn view_settings(
        &self,
        entity: &str,
        view_key: &str,
        language: &str,
    ) -> ResolutionResult<ComponentSettingsOutcome> {
        let document = self.load_document(entity).await?;
        let block = document.block(view_key).ok_or_else(|| {
            AppError::ViewNotFound(format!(
                "View '{view_key}' not found in view config for '{entity}'"
            ))
        })?;

        if let Some(outcome) = language_gate(&BlockSettings::from_block(block), language) {
            return Ok(outcome);
        }

        let components = block
            .body()
            .get("components")
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new()));

        let mut payload = Map::new();
        payload.insert("componentSettings".to_owned(), components);
        Ok(ComponentSettingsOutcome::Settings(payload))
    }

    async fn component_settings(
        &self,
        request: &ComponentSettingsRequest,
        component_key: &str,
        language: &str,
    ) -> ResolutionResult<ComponentSettingsOutcome> {
        let (entity, block_key) = match component_key.split_once('/') {
            Some((entity, key)) if !entity.trim().is_empty() => (entity.trim(), key.trim()),
            _ => (request.entity.as_str(), component_key),
        };

        let document = self.load_document(entity).await?;
        let block = document.block(block_key);
        if block.is_none() && BlockKind::of_key(block_key) == BlockKind::View {
            return Err(AppError::ViewNotFound(format!(
                "View '{block_key}' not found in view config for '{entity}'"
            ))
            .into());
        }

        let block_settings = block.map(BlockSettings::from_block).unwrap_or_default();
        if let Some(outcome) = language_gate(&block_settings, language) {
            return Ok(outcome);
        }

        if self.config.enforces_validation() {
            let report = self.validator.validate(&document, entity).await;
            if !report.is_valid() {
                warn!(
                    entity = %entity,
                    errors = report.errors().len(),
                    "view config failed validation"
                );
                return Err(ResolutionFailure {
                    error: AppError::MalformedConfig(format!(
                        "View config for '{entity}' failed validation"
                    )),
                    validation: Some(report),
                });
            }
        }

        debug!(
            entity = %entity,
            block = %block_key,
            lang = %language,
            "resolving component settings"
        );

        let mut compiled = Vec::new();
        match block {
            Some(view) if view.kind() == BlockKind::View => {
                let references = select_references(view, request.component_settings.as_deref())?;
                for reference in &references {
                    compiled.push(
                        self.compile_reference(
                            &document,
                            &block_settings,
                            reference,
                            request,
                            language,
                        )
                        .await?,
                    );
                }
            }
            _ => {
                let reference = ComponentReference::standalone(block_key);
                compiled.push(
                    self.compile_reference(
                        &document,
                        &BlockSettings::default(),
                        &reference,
                        request,
                        language,
                    )
                    .await?,
                );
            }
        }

        let mut component_settings = Map::new();
        for component in compiled {
            component_settings.insert(component.alias, Value::Object(component.payload));
        }

        let mut payload = Map::new();
        payload.insert("component".to_owned(), Value::String(component_key.to_owned()));

        if self.config.inject_meta
            || self.config.inject_headers
            || self.config.inject_filters
            || self.config.inject_pagination
        {
            let context = self.context_for(entity, &block_settings, request, language)?;
            if self.config.inject_meta {
                component_settings.insert("meta".to_owned(), context.meta());
            }
            if self.config.inject_headers {
                payload.insert("headers".to_owned(), Value::Array(context.build_headers()));
            }
            if self.config.inject_filters {
                payload.insert("filters".to_owned(), Value::Array(context.build_filters()?));
            }
            if self.config.inject_pagination {
                payload.insert("pagination".to_owned(), context.pagination());
            }
        }

        payload.insert(
            "componentSettings".to_owned(),
            Value::Object(component_settings),
        );

        let mut payload = Value::Object(payload);
        collapse_localized(
            &mut payload,
            language,
            block_settings.languages.as_deref().unwrap_or_default(),
        );
        match payload {
            Value::Object(payload) => Ok(ComponentSettingsOutcome::Settings(payload)),
            _ => Err(AppError::Internal("component payload lost its object shape".to_owned()).into()),
        }
    }

    /// Compiles one referenced component: template, context, overrides.
    async fn compile_reference(
        &self,
        document: &ViewConfigDocument,
        view_settings: &BlockSettings,
        reference: &ComponentReference,
        request: &ComponentSettingsRequest,
        language: &str,
    ) -> ResolutionResult<CompiledComponent> {
        let foreign_document = match reference.entity() {
            Some(other_entity) => Some(self.load_document(other_entity).await?),
            None => None,
        };
        let (owner, base_settings) = match &foreign_document {
            Some(other) => (other, BlockSettings::default()),
            None => (document, view_settings.clone()),
        };
        let entity = owner.entity();

        let component_block = owner
            .block(reference.component())
            .filter(|block| block.kind() == BlockKind::Component);
        let template_name = component_block
            .map(|block| block.template_name())
            .unwrap_or(reference.component());

        let mut component_settings = component_block
            .map(BlockSettings::from_block)
            .unwrap_or_default();
        component_settings = component_settings.layered(&BlockSettings::from_block(reference.settings()));
        let settings = base_settings.layered(&component_settings);

        let mut overrides = component_block
            .map(|block| block.overrides())
            .unwrap_or_default();
        for (key, value) in reference.overrides() {
            overrides.insert(key, value);
        }

        let (template, raw_template) = self.load_template(template_name).await?;
        let context = self.context_for(entity, &settings, request, language)?;

        let mut script_files = BTreeSet::new();
        functions::collect_script_files(&raw_template, &mut script_files);
        functions::collect_script_files(&Value::Object(overrides.clone()), &mut script_files);
        functions::collect_declared_files(&settings.functions, &mut script_files);
        let scripts = ScriptBundle::load(self.script_store.as_ref(), script_files).await?;

        let mut payload = context.compile_section(template.root(), &scripts)?;
        context.merge_overrides(&mut payload, &overrides, &scripts)?;

        debug!(
            entity = %entity,
            alias = %reference.alias(),
            template = %template.name(),
            "compiled component"
        );

        Ok(CompiledComponent {
            alias: reference.alias().to_owned(),
            payload,
        })
    }

    fn context_for<'a>(
        &'a self,
        entity: &str,
        settings: &BlockSettings,
        request: &ComponentSettingsRequest,
        language: &str,
    ) -> AppResult<ResolutionContext<'a>> {
        ResolutionContext::acquire(
            &self.config,
            self.schema_provider.as_ref(),
            entity,
            settings,
            request,
            language,
        )
    }
}

fn language_gate(settings: &BlockSettings, language: &str) -> Option<ComponentSettingsOutcome> {
    let declared = settings.languages.as_ref()?;
    if declared
        .iter()
        .any(|code| code.eq_ignore_ascii_case(language))
    {
        return None;
    }

    Some(ComponentSettingsOutcome::UnsupportedLanguage {
        message: format!("Language '{language}' not supported by view config"),
    })
}

fn select_references(
    view: ConfigBlock<'_>,
    component_settings: Option<&str>,
) -> AppResult<Vec<ComponentReference>> {
    let references = view.components();
    let Some(alias) = component_settings.map(str::trim).filter(|alias| !alias.is_empty()) else {
        return Ok(references);
    };

    let selected: Vec<ComponentReference> = references
        .into_iter()
        .filter(|reference| reference.alias() == alias)
        .collect();
    if selected.is_empty() {
        return Err(AppError::ComponentConfigNotFound(format!(
            "Component '{alias}' is not declared in view '{}'",
            view.key()
        )));
    }

    Ok(selected)
}
