use std::collections::HashMap;
use std::path::Path;

use ccs_application::SchemaProvider;
use ccs_core::{AppError, AppResult};
use ccs_domain::EntitySchema;
use serde_json::Value;
use tracing::{info, warn};

use crate::file_names::normalize_entity_name;

/// Schema provider backed by schemas registered at process start.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, EntitySchema>,
}

impl SchemaRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers or replaces the schema of an entity.
    pub fn register(&mut self, entity_name: &str, schema: EntitySchema) {
        self.schemas
            .insert(normalize_entity_name(entity_name), schema);
    }

    /// Returns the number of registered entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Returns whether no entity is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Loads every `*.json` file of `directory` as one entity schema named
    /// after the file stem.
    ///
    /// Unreadable or invalid files are skipped with a warning.
    pub async fn from_directory(directory: &Path) -> AppResult<Self> {
        let mut entries = tokio::fs::read_dir(directory).await.map_err(|error| {
            AppError::Internal(format!(
                "failed to read schema directory '{}': {error}",
                directory.display()
            ))
        })?;

        let mut registry = Self::new();
        while let Some(entry) = entries.next_entry().await.map_err(|error| {
            AppError::Internal(format!(
                "failed to list schema directory '{}': {error}",
                directory.display()
            ))
        })? {
            let path = entry.path();
            if path.extension().and_then(|extension| extension.to_str()) != Some("json") {
                continue;
            }
            let Some(entity_name) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };

            match load_schema_file(&path).await {
                Ok(schema) => registry.register(entity_name, schema),
                Err(error) => {
                    warn!(path = %path.display(), error = %error, "skipping unreadable schema file");
                }
            }
        }

        info!(
            directory = %directory.display(),
            entities = registry.len(),
            "schema registry loaded"
        );
        Ok(registry)
    }
}

async fn load_schema_file(path: &Path) -> AppResult<EntitySchema> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|error| AppError::Internal(format!("failed to read schema file: {error}")))?;
    let document: Value = serde_json::from_str(&contents)
        .map_err(|error| AppError::MalformedConfig(format!("invalid schema JSON: {error}")))?;
    EntitySchema::from_value(&document)
}

impl SchemaProvider for SchemaRegistry {
    fn resolve_schema(&self, entity_name: &str) -> AppResult<Option<EntitySchema>> {
        Ok(self
            .schemas
            .get(&normalize_entity_name(entity_name))
            .cloned())
    }

    fn resolve_relation(
        &self,
        entity_name: &str,
        relation_name: &str,
    ) -> AppResult<Option<String>> {
        Ok(self
            .schemas
            .get(&normalize_entity_name(entity_name))
            .and_then(|schema| schema.relations().get(relation_name))
            .cloned())
    }
}
