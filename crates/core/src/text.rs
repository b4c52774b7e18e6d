use convert_case::{Case, Casing};

/// Converts `country_id` style names to `CountryId`.
#[must_use]
pub fn studly_case(value: &str) -> String {
    value.to_case(Case::Pascal)
}

/// Converts `author_id` style names to `authorId`.
#[must_use]
pub fn camel_case(value: &str) -> String {
    value.to_case(Case::Camel)
}

/// Converts a raw field key such as `first_name` to `First Name`.
#[must_use]
pub fn title_case(value: &str) -> String {
    value.to_case(Case::Title)
}

/// Naive English plural used for override key matching (`field` -> `fields`).
#[must_use]
pub fn pluralize(value: &str) -> String {
    if let Some(stem) = value.strip_suffix('y')
        && !stem.ends_with(['a', 'e', 'i', 'o', 'u'])
        && !stem.is_empty()
    {
        return format!("{stem}ies");
    }
    if value.ends_with('s') || value.ends_with('x') || value.ends_with("ch") || value.ends_with("sh")
    {
        return format!("{value}es");
    }

    format!("{value}s")
}

/// Naive English singular used for override key matching (`filters` -> `filter`).
#[must_use]
pub fn singularize(value: &str) -> String {
    if let Some(stem) = value.strip_suffix("ies")
        && !stem.is_empty()
    {
        return format!("{stem}y");
    }
    for suffix in ["ches", "shes", "sses", "xes"] {
        if value.ends_with(suffix) {
            return value[..value.len() - 2].to_owned();
        }
    }
    if let Some(stem) = value.strip_suffix('s')
        && !stem.is_empty()
        && !stem.ends_with('s')
    {
        return stem.to_owned();
    }

    value.to_owned()
}
