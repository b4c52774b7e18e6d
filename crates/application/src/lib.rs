//! Application services and ports.

#![forbid(unsafe_code)]

mod component_ports;
mod component_service;
mod engine_config;
#[cfg(test)]
mod test_support;
mod view_config_validator;

pub use component_ports::{ConfigStore, SchemaProvider, ScriptStore};
pub use component_service::{
    ColumnSelection, ComponentSettingsOutcome, ComponentSettingsRequest, ComponentSettingsService,
    ResolutionFailure, ResolutionResult, SettingsSelector, column_supports_lang,
    effective_field_language, extract_function_body, label_for, pick_header_lang_override,
};
pub use engine_config::{EngineConfig, FieldsOverridePolicy};
pub use view_config_validator::ViewConfigValidator;
