use super::*;

/// Returns whether a column is shown for `language`.
///
/// Columns without a declared language set support every language.
#[must_use]
pub fn column_supports_lang(definition: &ColumnDefinition, language: &str) -> bool {
    definition.languages().is_none_or(|declared| {
        declared
            .iter()
            .any(|code| code.eq_ignore_ascii_case(language))
    })
}

/// Returns the alternate language a multi-language header advertises.
///
/// A declared request language pairs `en` with `dv` (else any other declared
/// code); an undeclared one falls back to `en`, `dv`, then the first code.
/// Single-language columns have nothing to offer.
#[must_use]
pub fn pick_header_lang_override(definition: &ColumnDefinition, language: &str) -> Option<String> {
    let declared = definition.languages()?;
    if declared.len() < 2 {
        return None;
    }
    let find = |wanted: &str| {
        declared
            .iter()
            .find(|code| code.eq_ignore_ascii_case(wanted))
            .cloned()
    };

    if find(language).is_some() {
        let paired = if language.eq_ignore_ascii_case(PRIMARY_FALLBACK_LANGUAGE) {
            find(SECONDARY_FALLBACK_LANGUAGE)
        } else if language.eq_ignore_ascii_case(SECONDARY_FALLBACK_LANGUAGE) {
            find(PRIMARY_FALLBACK_LANGUAGE)
        } else {
            None
        };
        return paired.or_else(|| {
            declared
                .iter()
                .find(|code| !code.eq_ignore_ascii_case(language))
                .cloned()
        });
    }

    find(PRIMARY_FALLBACK_LANGUAGE)
        .or_else(|| find(SECONDARY_FALLBACK_LANGUAGE))
        .or_else(|| declared.first().cloned())
}

/// Returns the language a form field or filter operates in.
///
/// Multi-language columns keep the request language when they support it,
/// then fall back to `en`, `dv`, and the first declared code.
#[must_use]
pub fn effective_field_language(definition: &ColumnDefinition, language: &str) -> String {
    let Some(declared) = definition.languages() else {
        return language.to_owned();
    };

    [language, PRIMARY_FALLBACK_LANGUAGE, SECONDARY_FALLBACK_LANGUAGE]
        .into_iter()
        .find_map(|wanted| {
            declared
                .iter()
                .find(|code| code.eq_ignore_ascii_case(wanted))
        })
        .or_else(|| declared.first())
        .cloned()
        .unwrap_or_else(|| language.to_owned())
}

/// Returns the column label in `language`, falling back to the title-cased
/// key.
#[must_use]
pub fn label_for(definition: &ColumnDefinition, language: &str) -> String {
    definition
        .label()
        .and_then(|label| label.resolve(language))
        .filter(|label| !label.trim().is_empty())
        .unwrap_or_else(|| title_case(definition.name()))
}

impl ResolutionContext<'_> {
    /// Keeps tokens whose column exists and supports the request language.
    pub(super) fn filter_tokens_by_language(&self) -> Vec<ColumnToken> {
        self.selection
            .tokens()
            .iter()
            .filter(|token| {
                self.definition_for(token)
                    .is_some_and(|definition| column_supports_lang(definition, &self.language))
            })
            .cloned()
            .collect()
    }
}
