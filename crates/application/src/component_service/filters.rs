use super::*;

impl ResolutionContext<'_> {
    /// Builds filter descriptors.
    ///
    /// Candidates come from the `filters` allow-list when declared, else from
    /// every schema field not marked `filterable: false`. Customizations are
    /// merged into the schema first.
    pub(super) fn build_filters(&self) -> AppResult<Vec<Value>> {
        let schema = self.schema.with_customizations(&self.customizations)?;
        let candidates: Vec<&str> = match &self.filter_allow_list {
            Some(allowed) => allowed.iter().map(String::as_str).collect(),
            None => schema
                .columns()
                .iter()
                .filter(|definition| definition.is_filterable())
                .map(ColumnDefinition::name)
                .collect(),
        };

        let mut filters = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let Some(definition) = schema.get(candidate) else {
                debug!(entity = %self.entity, filter = %candidate, "skipping filter without schema entry");
                continue;
            };
            if !column_supports_lang(definition, &self.language) {
                continue;
            }
            if self.restrict_filters_to_columns
                && !self
                    .active_tokens
                    .iter()
                    .any(|token| token.as_str() == candidate)
            {
                continue;
            }

            filters.push(Value::Object(self.filter_for(definition)?));
        }

        Ok(filters)
    }

    fn filter_for(&self, definition: &ColumnDefinition) -> AppResult<Map<String, Value>> {
        let select_config = definition.select_config();
        let key = select_config
            .and_then(|config| config.key.clone())
            .unwrap_or_else(|| definition.storage_key().to_owned());
        let label = select_config
            .and_then(|config| config.label.as_ref())
            .and_then(|label| label.resolve(&self.language))
            .unwrap_or_else(|| label_for(definition, &self.language));
        let input_kind = definition.input_kind();

        let mut filter = Map::new();
        filter.insert("key".to_owned(), Value::String(key));
        filter.insert("label".to_owned(), Value::String(label));
        filter.insert("type".to_owned(), Value::String(input_kind.as_token()));
        filter.insert(
            "lang".to_owned(),
            Value::String(effective_field_language(definition, &self.language)),
        );

        if input_kind == InputKind::Select {
            filter.extend(self.select_options(definition)?);
        }

        Ok(filter)
    }
}
