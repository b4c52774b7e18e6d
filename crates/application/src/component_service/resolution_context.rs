use super::*;

/// Where the column schema of a resolution came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum SchemaMode {
    /// Registered entity schema.
    Model,
    /// Inline `columnsSchema` of a `noModel` block.
    NoModel,
}

impl SchemaMode {
    pub(super) fn as_str(self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::NoModel => "noModel",
        }
    }
}

/// Schema of an entity reached through a relation segment.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct RelatedSchema {
    /// Relation method name that matched the segment.
    pub(super) relation: String,
    /// Related entity name.
    pub(super) entity: String,
    pub(super) columns: ColumnSchema,
}

/// Everything the builders read while compiling one component.
pub(super) struct ResolutionContext<'a> {
    pub(super) config: &'a EngineConfig,
    pub(super) schema_provider: &'a dyn SchemaProvider,
    pub(super) entity: String,
    pub(super) mode: SchemaMode,
    pub(super) schema: ColumnSchema,
    pub(super) searchable: Vec<String>,
    pub(super) selection: ColumnSelection,
    pub(super) related: BTreeMap<String, RelatedSchema>,
    pub(super) active_tokens: Vec<ColumnToken>,
    pub(super) customizations: Map<String, Value>,
    pub(super) filter_allow_list: Option<Vec<String>>,
    pub(super) restrict_filters_to_columns: bool,
    pub(super) functions: Map<String, Value>,
    pub(super) language: String,
    pub(super) per_page: u32,
}

impl<'a> ResolutionContext<'a> {
    /// Acquires the schema and resolves columns for one component.
    pub(super) fn acquire(
        config: &'a EngineConfig,
        schema_provider: &'a dyn SchemaProvider,
        entity: &str,
        settings: &BlockSettings,
        request: &ComponentSettingsRequest,
        language: &str,
    ) -> AppResult<Self> {
        let (mode, schema, searchable) = if settings.no_model {
            let schema = match &settings.columns_schema {
                Some(columns_schema) => ColumnSchema::from_value(columns_schema)?,
                None => ColumnSchema::default(),
            };
            if schema.is_empty() {
                return Err(AppError::MissingSchema(
                    "noModel mode requires columnsSchema in view config".to_owned(),
                ));
            }
            (SchemaMode::NoModel, schema, Vec::new())
        } else {
            let entity_schema = schema_provider.resolve_schema(entity)?.ok_or_else(|| {
                AppError::EntityNotFound(format!("Entity '{entity}' not found"))
            })?;
            (
                SchemaMode::Model,
                entity_schema.columns().clone(),
                entity_schema.searchable().to_vec(),
            )
        };

        let requested_columns = request
            .columns
            .as_deref()
            .filter(|columns| !columns.trim().is_empty());
        let columns = requested_columns
            .map(str::to_owned)
            .or_else(|| settings.columns.clone())
            .filter(|columns| !columns.trim().is_empty())
            .unwrap_or_else(|| schema.keys().collect::<Vec<_>>().join(","));

        let (selection, related) = match mode {
            SchemaMode::Model => column_tokens::resolve_column_tokens(
                columns.as_str(),
                &schema,
                Some((entity, schema_provider)),
            )?,
            SchemaMode::NoModel => {
                column_tokens::resolve_column_tokens(columns.as_str(), &schema, None)?
            }
        };

        let mut context = Self {
            config,
            schema_provider,
            entity: entity.to_owned(),
            mode,
            schema,
            searchable,
            selection,
            related,
            active_tokens: Vec::new(),
            customizations: settings.customizations.clone(),
            filter_allow_list: settings.filters.clone(),
            restrict_filters_to_columns: requested_columns.is_some(),
            functions: settings.functions.clone(),
            language: language.to_owned(),
            per_page: request
                .per_page
                .filter(|per_page| *per_page > 0)
                .or_else(|| settings.page_size())
                .unwrap_or(config.default_per_page),
        };
        context.active_tokens = context.filter_tokens_by_language();

        debug!(
            entity = %context.entity,
            mode = context.mode.as_str(),
            columns = context.selection.tokens().len(),
            active = context.active_tokens.len(),
            "resolution context acquired"
        );

        Ok(context)
    }

    /// Returns the definition a token points at, following relations.
    pub(super) fn definition_for(&self, token: &ColumnToken) -> Option<&ColumnDefinition> {
        match (token.relation(), token.field()) {
            (Some(relation), field) => self
                .related
                .get(relation)
                .and_then(|related| related.columns.get(field)),
            (None, field) => self.schema.get(field),
        }
    }

    /// Returns the customization object of a token.
    pub(super) fn customization_for(&self, token: &str) -> Option<&Map<String, Value>> {
        self.customizations.get(token).and_then(Value::as_object)
    }

    /// Returns the `{current_page, per_page}` section.
    pub(super) fn pagination(&self) -> Value {
        json!({
            "current_page": 1,
            "per_page": self.per_page,
        })
    }

    /// Returns the `meta` entry describing this resolution.
    pub(super) fn meta(&self) -> Value {
        json!({
            "entity": self.entity,
            "mode": self.mode.as_str(),
            "lang": self.language,
            "columns": self.selection.tokens().iter().map(ColumnToken::as_str).collect::<Vec<_>>(),
            "relations": self.selection.relations(),
            "searchable": self.searchable,
        })
    }
}
