//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod file_config_store;
mod file_names;
mod file_script_store;
mod in_memory_config_store;
mod static_schema_registry;

pub use file_config_store::FileConfigStore;
pub use file_script_store::FileScriptStore;
pub use in_memory_config_store::InMemoryConfigStore;
pub use static_schema_registry::SchemaRegistry;
