use super::*;

/// Column properties copied onto form fields when declared.
const FORM_PASSTHROUGH_KEYS: [&str; 10] = [
    "group",
    "submitUrl",
    "events",
    "required",
    "rules",
    "placeholder",
    "default",
    "readonly",
    "multiple",
    "hint",
];

impl ResolutionContext<'_> {
    /// Builds create/edit form fields.
    ///
    /// Model-backed schemas contribute fields flagged `formField`; schema-less
    /// ones contribute every field. Active relation tokens follow as fields
    /// described by their leaf column.
    pub(super) fn build_form_fields(&self) -> AppResult<Vec<Value>> {
        let schema = self.schema.with_customizations(&self.customizations)?;
        let mut fields = Vec::new();

        for definition in schema.columns() {
            if self.mode == SchemaMode::Model && !definition.is_form_field() {
                continue;
            }
            if !column_supports_lang(definition, &self.language) {
                continue;
            }
            fields.push(Value::Object(
                self.form_field_for(definition.storage_key(), definition)?,
            ));
        }

        for token in self.active_tokens.iter().filter(|token| token.is_dotted()) {
            let Some(definition) = self.definition_for(token) else {
                continue;
            };
            fields.push(Value::Object(self.form_field_for(token.as_str(), definition)?));
        }

        Ok(fields)
    }

    fn form_field_for(
        &self,
        key: &str,
        definition: &ColumnDefinition,
    ) -> AppResult<Map<String, Value>> {
        let input_kind = definition.input_kind();

        let mut field = Map::new();
        field.insert("key".to_owned(), Value::String(key.to_owned()));
        field.insert(
            "label".to_owned(),
            Value::String(label_for(definition, &self.language)),
        );
        field.insert(
            "lang".to_owned(),
            Value::String(effective_field_language(definition, &self.language)),
        );
        field.insert(
            "type".to_owned(),
            Value::String(definition.field_type().unwrap_or("string").to_owned()),
        );
        field.insert(
            "inputType".to_owned(),
            Value::String(input_kind.as_input_str().to_owned()),
        );

        for passthrough in FORM_PASSTHROUGH_KEYS {
            if let Some(value) = definition.extra().get(passthrough) {
                field.insert(passthrough.to_owned(), value.clone());
            }
        }

        if input_kind == InputKind::Select {
            field.extend(self.select_options(definition)?);
        }

        Ok(field)
    }
}
