pub mod component_settings;
pub mod health;
