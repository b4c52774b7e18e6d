//! Domain types for view configurations, column schemas, and component
//! templates.

#![forbid(unsafe_code)]

mod column;
mod column_token;
mod localized;
mod template;
mod validation;
mod view_config;

pub use column::{
    ColumnDefinition, ColumnSchema, EntitySchema, FieldType, FilterableSetting, InputKind,
    SelectConfig, SelectMode,
};
pub use column_token::{ColumnToken, split_column_tokens};
pub use localized::{
    LocalizedText, PRIMARY_FALLBACK_LANGUAGE, SECONDARY_FALLBACK_LANGUAGE, collapse_localized,
    resolve_localized_map,
};
pub use template::{ComponentTemplate, Directive, TemplateNode, Toggle};
pub use validation::{Severity, ValidationIssue, ValidationReport, ValidationRule};
pub use view_config::{
    BlockKind, ComponentReference, ConfigBlock, INTERNAL_KEYS, STRUCTURAL_KEYS,
    ViewConfigDocument, columns_csv, override_entries, string_list,
};
