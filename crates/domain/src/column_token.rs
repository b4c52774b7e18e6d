use serde::Serialize;

/// One entry of a comma-separated column selection.
///
/// Bare tokens name a field of the target entity; dot tokens
/// (`relation.field`) name a field of a related entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct ColumnToken {
    raw: String,
    dot: Option<usize>,
}

impl ColumnToken {
    /// Parses one already-trimmed token.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim().to_owned();
        let dot = raw.find('.');
        Self { raw, dot }
    }

    /// Returns the token text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.raw.as_str()
    }

    /// Returns whether this is a `relation.field` token.
    #[must_use]
    pub fn is_dotted(&self) -> bool {
        self.dot.is_some()
    }

    /// Returns the relation segment of a dot token.
    #[must_use]
    pub fn relation(&self) -> Option<&str> {
        self.dot.map(|index| &self.raw[..index])
    }

    /// Returns the field segment (the whole token for bare tokens).
    #[must_use]
    pub fn field(&self) -> &str {
        match self.dot {
            Some(index) => &self.raw[index + 1..],
            None => self.raw.as_str(),
        }
    }
}

impl From<ColumnToken> for String {
    fn from(value: ColumnToken) -> Self {
        value.raw
    }
}

/// Splits a comma-separated selection into trimmed, non-empty tokens.
///
/// Input order is preserved and duplicates are kept.
#[must_use]
pub fn split_column_tokens(raw: Option<&str>) -> Vec<ColumnToken> {
    raw.map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(ColumnToken::parse)
            .collect()
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::{ColumnToken, split_column_tokens};

    #[test]
    fn split_trims_and_drops_empty_tokens() {
        let tokens = split_column_tokens(Some(" id, ,title ,,author.name "));
        let texts: Vec<&str> = tokens.iter().map(ColumnToken::as_str).collect();

        assert_eq!(texts, vec!["id", "title", "author.name"]);
        assert_eq!(tokens[2].relation(), Some("author"));
        assert_eq!(tokens[2].field(), "name");
    }

    #[test]
    fn split_keeps_duplicates() {
        let tokens = split_column_tokens(Some("title,title"));
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn missing_selection_yields_no_tokens() {
        assert!(split_column_tokens(None).is_empty());
    }

    proptest! {
        #[test]
        fn split_preserves_order_of_non_empty_tokens(
            tokens in proptest::collection::vec("[a-z_]{1,8}(\\.[a-z_]{1,8})?", 0..8),
            padding in proptest::collection::vec(" {0,2}", 8),
        ) {
            let raw = tokens
                .iter()
                .zip(padding.iter().cycle())
                .map(|(token, pad)| format!("{pad}{token}{pad}"))
                .collect::<Vec<_>>()
                .join(",");

            let parsed = split_column_tokens(Some(raw.as_str()));
            let texts: Vec<String> = parsed.iter().map(|token| token.as_str().to_owned()).collect();

            prop_assert_eq!(texts, tokens.clone());
            for token in &parsed {
                prop_assert_eq!(token.is_dotted(), token.as_str().contains('.'));
            }
        }
    }
}
