use super::*;

impl ResolutionContext<'_> {
    /// Resolves the option source of a select-style field or filter.
    ///
    /// Returns the entries to merge into the descriptor: `mode`, `itemTitle`,
    /// `itemValue`, and either `items` or `url`.
    pub(super) fn select_options(
        &self,
        definition: &ColumnDefinition,
    ) -> AppResult<Map<String, Value>> {
        let config = definition.select_config().ok_or_else(|| {
            AppError::InvalidFilterConfig(format!(
                "Field '{}' uses a select input without select config",
                definition.name()
            ))
        })?;
        let mode = config.select_mode();
        let (default_title, default_value) = match mode {
            SelectMode::Relation => ("name", "id"),
            SelectMode::Inline | SelectMode::Url => ("title", "value"),
        };
        let item_title = config
            .item_title
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .unwrap_or(default_title);
        let item_value = config
            .item_value
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .unwrap_or(default_value);

        let mut options = Map::new();
        options.insert("itemTitle".to_owned(), Value::String(item_title.to_owned()));
        options.insert("itemValue".to_owned(), Value::String(item_value.to_owned()));

        match mode {
            SelectMode::Inline => {
                options.insert("mode".to_owned(), Value::String("self".to_owned()));
                let items = config
                    .items
                    .as_deref()
                    .unwrap_or_default()
                    .iter()
                    .map(|item| project_item(item, item_title, item_value, &self.language))
                    .collect();
                options.insert("items".to_owned(), Value::Array(items));
            }
            SelectMode::Url => {
                options.insert("mode".to_owned(), Value::String("url".to_owned()));
                let url = config
                    .url
                    .as_deref()
                    .map(str::trim)
                    .filter(|url| !url.is_empty())
                    .ok_or_else(|| {
                        AppError::InvalidFilterConfig(format!(
                            "Field '{}' select mode 'url' requires a url",
                            definition.name()
                        ))
                    })?;
                options.insert("url".to_owned(), Value::String(url.to_owned()));
            }
            SelectMode::Relation => {
                options.insert("mode".to_owned(), Value::String("relation".to_owned()));
                let related = self.related_entity_for(definition, config)?;
                options.insert(
                    "url".to_owned(),
                    Value::String(format!(
                        "{}/gapi/{related}?columns={item_value},{item_title}&sort={item_title}&pagination=off&wrap=data",
                        self.config.trimmed_route_prefix()
                    )),
                );
            }
        }

        Ok(options)
    }

    /// Infers the entity a relation-mode select reads its options from.
    fn related_entity_for(
        &self,
        definition: &ColumnDefinition,
        config: &SelectConfig,
    ) -> AppResult<String> {
        if let Some(relationship) = config
            .relationship
            .as_deref()
            .map(str::trim)
            .filter(|relationship| !relationship.is_empty())
        {
            if self.mode == SchemaMode::Model
                && let Some(target) = self.relation_target(relationship)?
            {
                return Ok(studly_case(&target));
            }
            return Ok(studly_case(relationship));
        }

        let name = definition.name();
        if let Some(stem) = name.strip_suffix("_id")
            && !stem.is_empty()
        {
            return Ok(studly_case(stem));
        }

        if self.mode == SchemaMode::Model
            && let Some(target) = self.relation_target(name)?
        {
            return Ok(studly_case(&target));
        }

        Ok(studly_case(name))
    }

    fn relation_target(&self, relation: &str) -> AppResult<Option<String>> {
        for candidate in column_tokens::relation_candidates(relation) {
            if let Some(target) = self
                .schema_provider
                .resolve_relation(&self.entity, candidate.as_str())?
            {
                return Ok(Some(target));
            }
        }
        Ok(None)
    }
}

/// Projects one inline item onto the configured title/value keys.
fn project_item(item: &Value, item_title: &str, item_value: &str, language: &str) -> Value {
    let mut projected = Map::new();
    match item {
        Value::Object(fields) => {
            let value = fields
                .get(item_value)
                .or_else(|| fields.get("id"))
                .cloned()
                .unwrap_or(Value::Null);
            let title = fields
                .get(item_title)
                .or_else(|| fields.get("label"))
                .map(|title| match title {
                    Value::Object(titles) => resolve_localized_map(titles, language)
                        .map_or_else(|| title.clone(), Value::String),
                    _ => title.clone(),
                })
                .unwrap_or_else(|| value.clone());
            projected.insert(item_title.to_owned(), title);
            projected.insert(item_value.to_owned(), value);
        }
        Value::String(text) => {
            projected.insert(item_title.to_owned(), Value::String(text.clone()));
            projected.insert(item_value.to_owned(), Value::String(text.clone()));
        }
        other => {
            projected.insert(item_title.to_owned(), Value::String(other.to_string()));
            projected.insert(item_value.to_owned(), other.clone());
        }
    }
    Value::Object(projected)
}
