use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use ccs_application::ScriptStore;
use ccs_core::{AppError, AppResult};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::file_names::safe_basename;

/// Script store reading files from one directory, caching contents for the
/// lifetime of the process.
#[derive(Debug)]
pub struct FileScriptStore {
    script_dir: PathBuf,
    cache: RwLock<HashMap<String, String>>,
}

impl FileScriptStore {
    /// Creates a store over `script_dir`.
    #[must_use]
    pub fn new(script_dir: PathBuf) -> Self {
        Self {
            script_dir,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the directory scripts are read from.
    #[must_use]
    pub fn script_dir(&self) -> &Path {
        &self.script_dir
    }
}

/// Appends `.js` when the file name has no extension.
fn script_file_name(basename: &str) -> String {
    if Path::new(basename).extension().is_some() {
        basename.to_owned()
    } else {
        format!("{basename}.js")
    }
}

#[async_trait]
impl ScriptStore for FileScriptStore {
    async fn read_script(&self, file_name: &str) -> AppResult<Option<String>> {
        let Some(basename) = safe_basename(file_name) else {
            warn!(file = %file_name, "rejected script file name");
            return Ok(None);
        };
        let file_name = script_file_name(basename);

        if let Some(source) = self.cache.read().await.get(&file_name) {
            return Ok(Some(source.clone()));
        }

        let path = self.script_dir.join(&file_name);
        let source = match tokio::fs::read_to_string(&path).await {
            Ok(source) => source,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => {
                return Err(AppError::Internal(format!(
                    "failed to read script file '{}': {error}",
                    path.display()
                )));
            }
        };

        debug!(file = %file_name, bytes = source.len(), "script file cached");
        self.cache
            .write()
            .await
            .insert(file_name, source.clone());
        Ok(Some(source))
    }
}
