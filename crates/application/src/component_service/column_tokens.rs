use super::*;

/// Normalized column tokens plus the relations they need eager-loaded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnSelection {
    tokens: Vec<ColumnToken>,
    relations: Vec<String>,
}

impl ColumnSelection {
    /// Returns tokens in request order, duplicates included.
    #[must_use]
    pub fn tokens(&self) -> &[ColumnToken] {
        &self.tokens
    }

    /// Returns matched relation names, first-seen order, without duplicates.
    #[must_use]
    pub fn relations(&self) -> &[String] {
        &self.relations
    }

    fn record_relation(&mut self, relation: &str) {
        if !self.relations.iter().any(|known| known == relation) {
            self.relations.push(relation.to_owned());
        }
    }
}

/// Relation method names tried for a dot-token segment, in order.
pub(crate) fn relation_candidates(segment: &str) -> Vec<String> {
    let mut candidates = vec![segment.to_owned(), camel_case(segment)];
    if let Some(stem) = segment.strip_suffix("_id")
        && !stem.is_empty()
    {
        candidates.push(camel_case(stem));
    }
    let mut unique: Vec<String> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !candidate.is_empty() && !unique.contains(&candidate) {
            unique.push(candidate);
        }
    }
    unique
}

/// Resolves a column CSV against a schema.
///
/// `model` carries the entity and schema provider used to walk relations;
/// without it (schema-less blocks) tokens are accepted as given.
pub(super) fn resolve_column_tokens(
    columns: &str,
    schema: &ColumnSchema,
    model: Option<(&str, &dyn SchemaProvider)>,
) -> AppResult<(ColumnSelection, BTreeMap<String, RelatedSchema>)> {
    let mut selection = ColumnSelection::default();
    let mut related: BTreeMap<String, RelatedSchema> = BTreeMap::new();

    for token in split_column_tokens(Some(columns)) {
        let Some((entity, provider)) = model else {
            if let Some(segment) = token.relation() {
                selection.record_relation(segment);
            }
            selection.tokens.push(token);
            continue;
        };

        match token.relation() {
            None => {
                if !schema.contains(token.field()) {
                    return Err(AppError::InvalidReference(format!(
                        "Column '{}' is not defined in schema for '{entity}'",
                        token.as_str()
                    )));
                }
            }
            Some(segment) => {
                if !related.contains_key(segment) {
                    let relation_schema = resolve_relation(entity, segment, provider)?;
                    related.insert(segment.to_owned(), relation_schema);
                }
                let Some(relation) = related.get(segment) else {
                    return Err(AppError::Internal(format!(
                        "relation '{segment}' vanished during resolution"
                    )));
                };
                if !relation.columns.contains(token.field()) {
                    return Err(AppError::UndefinedColumn(format!(
                        "Column '{}' is not defined on relation '{segment}' of '{entity}'",
                        token.field()
                    )));
                }
                selection.record_relation(relation.relation.as_str());
            }
        }

        selection.tokens.push(token);
    }

    Ok((selection, related))
}

fn resolve_relation(
    entity: &str,
    segment: &str,
    provider: &dyn SchemaProvider,
) -> AppResult<RelatedSchema> {
    for candidate in relation_candidates(segment) {
        let Some(target) = provider.resolve_relation(entity, candidate.as_str())? else {
            continue;
        };
        let target_schema = provider.resolve_schema(target.as_str())?.ok_or_else(|| {
            AppError::EntityNotFound(format!(
                "Entity '{target}' related through '{candidate}' not found"
            ))
        })?;

        return Ok(RelatedSchema {
            relation: candidate,
            entity: target,
            columns: target_schema.columns().clone(),
        });
    }

    Err(AppError::UnknownRelation(format!(
        "Relation '{segment}' not found on '{entity}'"
    )))
}
