use async_trait::async_trait;
use ccs_core::AppResult;
use ccs_domain::EntitySchema;
use serde_json::Value;

/// Port resolving model-backed entity schemas.
///
/// Lookups are plain registry reads and never suspend.
pub trait SchemaProvider: Send + Sync {
    /// Returns the schema registered for an entity.
    fn resolve_schema(&self, entity_name: &str) -> AppResult<Option<EntitySchema>>;

    /// Returns the entity a named relation of `entity_name` points to.
    fn resolve_relation(
        &self,
        entity_name: &str,
        relation_name: &str,
    ) -> AppResult<Option<String>>;
}

/// Port reading view-config documents and component templates.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Loads the view-config document of an entity.
    async fn load_view_config(&self, entity_name: &str) -> AppResult<Option<Value>>;

    /// Loads a component template by basename.
    async fn load_component_template(&self, component_name: &str) -> AppResult<Option<Value>>;
}

/// Port reading script files referenced by `functions` entries.
#[async_trait]
pub trait ScriptStore: Send + Sync {
    /// Reads a script file by basename.
    async fn read_script(&self, file_name: &str) -> AppResult<Option<String>>;
}
