use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use ccs_core::AppResult;
use ccs_domain::EntitySchema;
use serde_json::Value;

use crate::{ConfigStore, SchemaProvider, ScriptStore};

#[derive(Default)]
pub(crate) struct FakeSchemaProvider {
    schemas: HashMap<String, EntitySchema>,
    lookups: AtomicUsize,
}

impl FakeSchemaProvider {
    pub(crate) fn with_entity(mut self, entity: &str, document: Value) -> Self {
        let schema = EntitySchema::from_value(&document).unwrap_or_else(|error| panic!("{error}"));
        self.schemas.insert(entity.to_owned(), schema);
        self
    }

    pub(crate) fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl SchemaProvider for FakeSchemaProvider {
    fn resolve_schema(&self, entity_name: &str) -> AppResult<Option<EntitySchema>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.schemas.get(entity_name).cloned())
    }

    fn resolve_relation(
        &self,
        entity_name: &str,
        relation_name: &str,
    ) -> AppResult<Option<String>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .schemas
            .get(entity_name)
            .and_then(|schema| schema.relations().get(relation_name))
            .cloned())
    }
}

#[derive(Default)]
pub(crate) struct FakeConfigStore {
    views: HashMap<String, Value>,
    templates: HashMap<String, Value>,
}

impl FakeConfigStore {
    pub(crate) fn with_view(mut self, entity: &str, document: Value) -> Self {
        self.views.insert(entity.to_owned(), document);
        self
    }

    pub(crate) fn with_template(mut self, name: &str, template: Value) -> Self {
        self.templates.insert(name.to_owned(), template);
        self
    }
}

#[async_trait]
impl ConfigStore for FakeConfigStore {
    async fn load_view_config(&self, entity_name: &str) -> AppResult<Option<Value>> {
        Ok(self.views.get(entity_name).cloned())
    }

    async fn load_component_template(&self, component_name: &str) -> AppResult<Option<Value>> {
        Ok(self.templates.get(component_name).cloned())
    }
}

#[derive(Default)]
pub(crate) struct FakeScriptStore {
    scripts: HashMap<String, String>,
}

impl FakeScriptStore {
    pub(crate) fn with_script(mut self, file: &str, source: &str) -> Self {
        self.scripts.insert(file.to_owned(), source.to_owned());
        self
    }
}

#[async_trait]
impl ScriptStore for FakeScriptStore {
    async fn read_script(&self, file_name: &str) -> AppResult<Option<String>> {
        Ok(self.scripts.get(file_name).cloned())
    }
}
