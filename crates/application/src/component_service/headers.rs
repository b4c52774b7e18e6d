use super::*;

/// Display types whose config carries option lists with localized labels.
const LOCALIZED_DISPLAY_TYPES: [&str; 2] = ["chip", "select"];

impl ResolutionContext<'_> {
    /// Builds table headers for the active tokens.
    pub(super) fn build_headers(&self) -> Vec<Value> {
        let mut headers: Vec<(String, Map<String, Value>)> = Vec::new();

        for token in &self.active_tokens {
            let Some(definition) = self.definition_for(token) else {
                continue;
            };
            let customization = self.customization_for(token.as_str());
            let hidden = customization
                .and_then(|customization| customization.get("hidden"))
                .and_then(Value::as_bool)
                .unwrap_or(definition.is_hidden());
            if hidden && !self.config.include_hidden_headers {
                continue;
            }

            let mut header = self.header_for(token, definition);
            if let Some(customization) = customization {
                apply_customization(&mut header, customization, &self.language);
            }
            headers.push((token.as_str().to_owned(), header));
        }

        self.append_synthetic_headers(&mut headers);

        reorder_by_customization(headers, &self.customizations)
            .into_iter()
            .map(|(_, header)| Value::Object(header))
            .collect()
    }

    fn header_for(&self, token: &ColumnToken, definition: &ColumnDefinition) -> Map<String, Value> {
        let mut header = Map::new();
        header.insert(
            "title".to_owned(),
            Value::String(label_for(definition, &self.language)),
        );
        let value = if token.is_dotted() {
            token.as_str()
        } else {
            definition.storage_key()
        };
        header.insert("value".to_owned(), Value::String(value.to_owned()));
        header.insert("sortable".to_owned(), Value::Bool(definition.is_sortable()));
        header.insert("hidden".to_owned(), Value::Bool(definition.is_hidden()));

        if let Some(display_type) = definition.display_type() {
            header.insert(
                "displayType".to_owned(),
                Value::String(display_type.to_owned()),
            );
            if let Some(display_config) = definition.display_config() {
                header.insert(
                    display_type.to_owned(),
                    display_config_for(display_type, display_config, &self.language),
                );
            }
        }
        if let Some(inline_editable) = definition.inline_editable() {
            header.insert("inlineEditable".to_owned(), Value::Bool(inline_editable));
        }
        if let Some(language) = pick_header_lang_override(definition, &self.language) {
            header.insert("lang".to_owned(), Value::String(language));
        }

        header
    }

    /// Appends UI-only columns declared purely through customizations.
    fn append_synthetic_headers(&self, headers: &mut Vec<(String, Map<String, Value>)>) {
        for (key, customization) in &self.customizations {
            let Value::Object(customization) = customization else {
                continue;
            };
            let already_listed = headers.iter().any(|(token, _)| token == key)
                || self.active_tokens.iter().any(|token| token.as_str() == key);
            if already_listed || self.definition_for(&ColumnToken::parse(key)).is_some() {
                continue;
            }
            if customization
                .get("hidden")
                .and_then(Value::as_bool)
                .unwrap_or(false)
            {
                continue;
            }

            let mut header = Map::new();
            header.insert("title".to_owned(), Value::String(title_case(key)));
            header.insert("value".to_owned(), Value::String(key.clone()));
            header.insert("sortable".to_owned(), Value::Bool(false));
            header.insert("hidden".to_owned(), Value::Bool(false));
            apply_customization(&mut header, customization, &self.language);
            headers.push((key.clone(), header));
        }
    }
}

fn display_config_for(display_type: &str, config: &Value, language: &str) -> Value {
    let mut config = config.clone();
    if LOCALIZED_DISPLAY_TYPES.contains(&display_type) {
        collapse_localized(&mut config, language, &[]);
    }
    config
}

fn localized_title(value: &Value, language: &str) -> Option<String> {
    match value {
        Value::String(title) => Some(title.clone()),
        Value::Object(titles) => resolve_localized_map(titles, language),
        _ => None,
    }
}

/// Applies one column customization onto a header.
fn apply_customization(
    header: &mut Map<String, Value>,
    customization: &Map<String, Value>,
    language: &str,
) {
    let declared_display = header
        .get("displayType")
        .and_then(Value::as_str)
        .map(str::to_owned);
    let display_type = customization
        .get("displayType")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .or_else(|| declared_display.clone());

    for (key, value) in customization {
        match key.as_str() {
            "order" => {}
            "title" | "label" => {
                if let Some(title) = localized_title(value, language) {
                    header.insert("title".to_owned(), Value::String(title));
                }
            }
            "editable" | "inlineEditable" => {
                header.insert("inlineEditable".to_owned(), value.clone());
            }
            "displayType" => {
                if let Some(previous) = declared_display.as_deref()
                    && value.as_str() != Some(previous)
                    && !customization.contains_key(previous)
                {
                    header.remove(previous);
                }
                header.insert("displayType".to_owned(), value.clone());
            }
            "sortable" | "hidden" | "type" => {
                header.insert(key.clone(), value.clone());
            }
            _ if display_type.as_deref() == Some(key.as_str()) => {
                header.insert(key.clone(), display_config_for(key, value, language));
            }
            _ => {
                if !header.contains_key(key) {
                    header.insert(key.clone(), value.clone());
                }
            }
        }
    }
}

/// Moves customized headers to their `order` positions.
///
/// Entries with an `order` are spliced in ascending order; the rest keep
/// their relative positions.
fn reorder_by_customization(
    headers: Vec<(String, Map<String, Value>)>,
    customizations: &Map<String, Value>,
) -> Vec<(String, Map<String, Value>)> {
    let order_of = |token: &str| {
        customizations
            .get(token)
            .and_then(|customization| customization.get("order"))
            .and_then(Value::as_f64)
    };

    let mut ordered = Vec::new();
    let mut remaining = Vec::with_capacity(headers.len());
    for (token, header) in headers {
        match order_of(token.as_str()) {
            Some(order) => ordered.push((order, token, header)),
            None => remaining.push((token, header)),
        }
    }
    if ordered.is_empty() {
        return remaining;
    }

    ordered.sort_by(|left, right| left.0.total_cmp(&right.0));
    for (order, token, header) in ordered {
        let position = if order <= 0.0 { 0 } else { order as usize };
        let position = position.min(remaining.len());
        remaining.insert(position, (token, header));
    }

    remaining
}
