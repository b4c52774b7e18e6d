use std::collections::HashMap;

use async_trait::async_trait;
use ccs_application::ConfigStore;
use ccs_core::AppResult;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::file_names::normalize_entity_name;

/// In-memory config store for embedding and tests.
#[derive(Debug, Default)]
pub struct InMemoryConfigStore {
    view_configs: RwLock<HashMap<String, Value>>,
    templates: RwLock<HashMap<String, Value>>,
}

impl InMemoryConfigStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the view-config document of an entity.
    pub async fn put_view_config(&self, entity_name: &str, document: Value) {
        self.view_configs
            .write()
            .await
            .insert(normalize_entity_name(entity_name), document);
    }

    /// Stores a component template under its basename.
    pub async fn put_component_template(&self, component_name: &str, template: Value) {
        self.templates
            .write()
            .await
            .insert(component_name.trim().to_owned(), template);
    }
}

#[async_trait]
impl ConfigStore for InMemoryConfigStore {
    async fn load_view_config(&self, entity_name: &str) -> AppResult<Option<Value>> {
        Ok(self
            .view_configs
            .read()
            .await
            .get(&normalize_entity_name(entity_name))
            .cloned())
    }

    async fn load_component_template(&self, component_name: &str) -> AppResult<Option<Value>> {
        Ok(self
            .templates
            .read()
            .await
            .get(component_name.trim())
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use ccs_application::ConfigStore;
    use serde_json::json;

    use super::InMemoryConfigStore;

    #[tokio::test]
    async fn stored_documents_are_returned_by_normalized_entity() {
        let store = InMemoryConfigStore::new();
        store
            .put_view_config("LeaveRequest", json!({"listView": {"lang": ["en"]}}))
            .await;
        store
            .put_component_template("table", json!({"headers": "on"}))
            .await;

        assert_eq!(
            store.load_view_config("leave_request").await,
            Ok(Some(json!({"listView": {"lang": ["en"]}})))
        );
        assert_eq!(
            store.load_component_template("table").await,
            Ok(Some(json!({"headers": "on"})))
        );
        assert_eq!(store.load_component_template("form").await, Ok(None));
    }
}
