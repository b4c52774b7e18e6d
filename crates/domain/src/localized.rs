use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Language consulted first when the preferred language has no value.
pub const PRIMARY_FALLBACK_LANGUAGE: &str = "en";

/// Language consulted second when the preferred language has no value.
pub const SECONDARY_FALLBACK_LANGUAGE: &str = "dv";

/// A display string that is either fixed or keyed by language code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocalizedText {
    /// Same text for every language.
    Plain(String),
    /// Text keyed by language code, in declaration order.
    Localized(IndexMap<String, String>),
}

impl LocalizedText {
    /// Resolves the best-fit text: preferred language, `en`, `dv`, then the
    /// first non-empty entry.
    #[must_use]
    pub fn resolve(&self, preferred: &str) -> Option<String> {
        match self {
            Self::Plain(value) => Some(value.clone()),
            Self::Localized(values) => pick_localized(
                values
                    .iter()
                    .map(|(language, text)| (language.as_str(), text.as_str())),
                preferred,
            ),
        }
    }
}

fn pick_localized<'a>(
    entries: impl Iterator<Item = (&'a str, &'a str)> + Clone,
    preferred: &str,
) -> Option<String> {
    for candidate in [
        preferred,
        PRIMARY_FALLBACK_LANGUAGE,
        SECONDARY_FALLBACK_LANGUAGE,
    ] {
        if let Some((_, text)) = entries
            .clone()
            .find(|(language, text)| language.eq_ignore_ascii_case(candidate) && !text.is_empty())
        {
            return Some(text.to_owned());
        }
    }

    entries
        .into_iter()
        .find(|(_, text)| !text.is_empty())
        .map(|(_, text)| text.to_owned())
}

/// Resolves a raw JSON `{lang: text}` map with the same fallback order as
/// [`LocalizedText::resolve`].
#[must_use]
pub fn resolve_localized_map(map: &Map<String, Value>, preferred: &str) -> Option<String> {
    let entries: Vec<(&str, &str)> = map
        .iter()
        .filter_map(|(language, text)| text.as_str().map(|text| (language.as_str(), text)))
        .collect();

    pick_localized(entries.iter().copied(), preferred)
}

/// Returns whether a JSON object is a `{lang: text}` map: every key one of
/// `languages` (case-insensitive) and every value a string.
#[must_use]
fn is_localized_map(map: &Map<String, Value>, languages: &[&str]) -> bool {
    !map.is_empty()
        && map.iter().all(|(key, value)| {
            value.is_string()
                && languages
                    .iter()
                    .any(|language| language.eq_ignore_ascii_case(key))
        })
}

/// Collapses every `{lang: text}` map found anywhere in `value` to the text
/// for `language`. Only maps keyed by `declared` languages, `en`, `dv` or
/// `language` itself count as language maps; other objects are left as is.
pub fn collapse_localized(value: &mut Value, language: &str, declared: &[String]) {
    let mut languages: Vec<&str> = declared.iter().map(String::as_str).collect();
    languages.extend([
        PRIMARY_FALLBACK_LANGUAGE,
        SECONDARY_FALLBACK_LANGUAGE,
        language,
    ]);
    collapse_with(value, language, &languages);
}

fn collapse_with(value: &mut Value, language: &str, languages: &[&str]) {
    let collapsed = match value {
        Value::Object(map) => {
            if is_localized_map(map, languages) {
                Some(resolve_localized_map(map, language).unwrap_or_default())
            } else {
                for nested in map.values_mut() {
                    collapse_with(nested, language, languages);
                }
                None
            }
        }
        Value::Array(items) => {
            for nested in items.iter_mut() {
                collapse_with(nested, language, languages);
            }
            None
        }
        _ => None,
    };

    if let Some(text) = collapsed {
        *value = Value::String(text);
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{LocalizedText, collapse_localized};

    fn localized(value: serde_json::Value) -> LocalizedText {
        serde_json::from_value(value).unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn resolve_prefers_requested_then_en_then_dv() {
        let label = localized(json!({"dv": "ނަން", "en": "Name", "ar": "اسم"}));

        assert_eq!(label.resolve("ar").as_deref(), Some("اسم"));
        assert_eq!(label.resolve("fr").as_deref(), Some("Name"));

        let without_en = localized(json!({"ar": "اسم", "dv": "ނަން"}));
        assert_eq!(without_en.resolve("fr").as_deref(), Some("ނަން"));
    }

    #[test]
    fn resolve_skips_empty_entries() {
        let label = localized(json!({"en": "", "fr": "Nom"}));
        assert_eq!(label.resolve("en").as_deref(), Some("Nom"));
    }

    #[test]
    fn collapse_rewrites_nested_language_maps_only() {
        let mut payload = json!({
            "title": {"en": "People", "dv": "މީހުން"},
            "items": [{"title": {"en": "Active"}, "value": "active"}],
            "pagination": {"current_page": 1, "per_page": 10}
        });

        collapse_localized(&mut payload, "dv", &[]);

        assert_eq!(
            payload,
            json!({
                "title": "މީހުން",
                "items": [{"title": "Active", "value": "active"}],
                "pagination": {"current_page": 1, "per_page": 10}
            })
        );
    }

    #[test]
    fn collapse_leaves_objects_with_non_language_keys_alone() {
        let mut payload = json!({
            "link": {"to": "/people"},
            "ids": [{"id": "7"}],
            "handlers": {"on": "submit"},
            "caption": {"ar": "اسم", "fr": "Nom"}
        });

        collapse_localized(&mut payload, "fr", &["ar".to_owned()]);

        assert_eq!(
            payload,
            json!({
                "link": {"to": "/people"},
                "ids": [{"id": "7"}],
                "handlers": {"on": "submit"},
                "caption": "Nom"
            })
        );
    }
}
