use super::*;

/// Engine-consumed settings of one block, detached from the document.
#[derive(Debug, Clone, Default, PartialEq)]
pub(super) struct BlockSettings {
    pub(super) languages: Option<Vec<String>>,
    pub(super) columns: Option<String>,
    pub(super) customizations: Map<String, Value>,
    pub(super) filters: Option<Vec<String>>,
    pub(super) per_page: Option<i64>,
    pub(super) no_model: bool,
    pub(super) columns_schema: Option<Value>,
    pub(super) functions: Map<String, Value>,
}

impl BlockSettings {
    pub(super) fn from_block(block: ConfigBlock<'_>) -> Self {
        Self {
            languages: block.languages().filter(|languages| !languages.is_empty()),
            columns: block.columns(),
            customizations: block.column_customizations().cloned().unwrap_or_default(),
            filters: block.filters(),
            per_page: block.per_page(),
            no_model: block.is_no_model(),
            columns_schema: block.columns_schema().cloned(),
            functions: block.functions().cloned().unwrap_or_default(),
        }
    }

    /// Returns these settings with `inner` layered on top.
    ///
    /// Scalars and lists of `inner` replace outer ones; customizations and
    /// functions merge per key.
    pub(super) fn layered(&self, inner: &Self) -> Self {
        let mut customizations = self.customizations.clone();
        for (column, customization) in &inner.customizations {
            let merged = match (customizations.get(column), customization) {
                (Some(Value::Object(outer)), Value::Object(inner)) => {
                    let mut merged = outer.clone();
                    for (key, value) in inner {
                        merged.insert(key.clone(), value.clone());
                    }
                    Value::Object(merged)
                }
                _ => customization.clone(),
            };
            customizations.insert(column.clone(), merged);
        }

        let mut functions = self.functions.clone();
        for (name, definition) in &inner.functions {
            functions.insert(name.clone(), definition.clone());
        }

        Self {
            languages: inner.languages.clone().or_else(|| self.languages.clone()),
            columns: inner.columns.clone().or_else(|| self.columns.clone()),
            customizations,
            filters: inner.filters.clone().or_else(|| self.filters.clone()),
            per_page: inner.per_page.or(self.per_page),
            no_model: inner.no_model || self.no_model,
            columns_schema: inner
                .columns_schema
                .clone()
                .or_else(|| self.columns_schema.clone()),
            functions,
        }
    }

    /// Returns the positive declared page size.
    pub(super) fn page_size(&self) -> Option<u32> {
        self.per_page
            .filter(|per_page| *per_page > 0)
            .and_then(|per_page| u32::try_from(per_page).ok())
    }
}
