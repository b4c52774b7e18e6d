use std::sync::Arc;

use ccs_application::ComponentSettingsService;
use ccs_core::AppError;
use ccs_infrastructure::{FileConfigStore, FileScriptStore, SchemaRegistry};
use tracing::info;

use crate::api_config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub component_settings_service: ComponentSettingsService,
}

impl AppState {
    /// Wires the engine to the filesystem adapters named by `config`.
    pub async fn from_config(config: &ApiConfig) -> Result<Self, AppError> {
        let schema_registry = SchemaRegistry::from_directory(&config.schema_dir).await?;
        let config_store = FileConfigStore::new(
            config.view_config_dir.clone(),
            config.component_dir.clone(),
            config.engine.debug_level,
        );
        let script_store = FileScriptStore::new(config.script_dir.clone());

        info!(
            views = %config.view_config_dir.display(),
            components = %config.component_dir.display(),
            scripts = %script_store.script_dir().display(),
            debug_level = config.engine.debug_level,
            "component settings engine configured"
        );

        Ok(Self {
            component_settings_service: ComponentSettingsService::new(
                Arc::new(schema_registry),
                Arc::new(config_store),
                Arc::new(script_store),
                config.engine.clone(),
            ),
        })
    }
}
