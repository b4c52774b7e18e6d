use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use ccs_application::ConfigStore;
use ccs_core::{AppError, AppResult};
use serde_json::Value;
use serde_json::error::Category;
use tracing::{debug, warn};

use crate::file_names::{normalize_entity_name, safe_basename};


/// Config store reading one JSON file per entity and per component template.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    view_config_dir: PathBuf,
    component_dir: PathBuf,
    debug_level: u8,
}

impl FileConfigStore {
    /// Creates a store over the view-config and component-template
    /// directories. `debug_level` controls malformed-JSON detail.
    #[must_use]
    pub fn new(view_config_dir: PathBuf, component_dir: PathBuf, debug_level: u8) -> Self {
        Self {
            view_config_dir,
            component_dir,
            debug_level,
        }
    }

    async fn read_document(&self, path: &Path) -> AppResult<Option<Value>> {
        let contents = match tokio::fs::read_to_string(path).await {
            Ok(contents) => contents,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "config file not found");
                return Ok(None);
            }
            Err(error) => {
                return Err(AppError::Internal(format!(
                    "failed to read config file '{}': {error}",
                    path.display()
                )));
            }
        };

        if contents.trim().is_empty() {
            return Ok(None);
        }

        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|error| self.malformed(path, &error))
    }

    fn malformed(&self, path: &Path, error: &serde_json::Error) -> AppError {
        warn!(path = %path.display(), error = %error, "malformed JSON config file");

        let mut message = "Malformed JSON in config file".to_owned();
        if self.debug_level >= 1 {
            message.push_str(&format!(
                " ({} error in '{}')",
                category_name(error.classify()),
                path.display()
            ));
        }
        if self.debug_level >= 2 {
            message.push_str(&format!(
                " at line {}, column {}",
                error.line(),
                error.column()
            ));
        }
        AppError::MalformedConfig(message)
    }
}

fn category_name(category: Category) -> &'static str {
    match category {
        Category::Io => "io",
        Category::Syntax => "syntax",
        Category::Data => "data",
        Category::Eof => "unexpected end of input",
    }
}

#[async_trait]
impl ConfigStore for FileConfigStore {
    async fn load_view_config(&self, entity_name: &str) -> AppResult<Option<Value>> {
        let file_name = format!("{}.json", normalize_entity_name(entity_name));
        if safe_basename(&file_name).is_none() {
            return Ok(None);
        }
        self.read_document(&self.view_config_dir.join(file_name))
            .await
    }

    async fn load_component_template(&self, component_name: &str) -> AppResult<Option<Value>> {
        let Some(basename) = safe_basename(component_name) else {
            warn!(component = %component_name, "rejected component template name");
            return Err(AppError::InvalidRequest(format!(
                "Invalid component name '{component_name}'"
            )));
        };
        let stem = basename.strip_suffix(".json").unwrap_or(basename);
        self.read_document(&self.component_dir.join(format!("{stem}.json")))
            .await
    }
}
