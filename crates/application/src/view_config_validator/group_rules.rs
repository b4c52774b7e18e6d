use super::*;

fn declared_groups<'a>(block: ConfigBlock<'a>) -> &'a [Value] {
    block
        .body()
        .get("groups")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Returns the names of the groups a block declares.
pub(super) fn group_names(block: ConfigBlock<'_>) -> Vec<String> {
    declared_groups(block)
        .iter()
        .filter_map(|group| group.get("name").and_then(Value::as_str))
        .map(str::to_owned)
        .collect()
}

/// Checks form-field group declarations.
pub(super) fn check_groups(block: ConfigBlock<'_>, report: &mut ValidationReport) {
    let languages = block.languages().unwrap_or_default();
    let mut seen: Vec<&str> = Vec::new();

    for (index, group) in declared_groups(block).iter().enumerate() {
        let name = group.get("name").and_then(Value::as_str);
        let path = format!("{}.groups.{}", block.key(), name.unwrap_or(&index.to_string()));

        if let Some(name) = name {
            if seen.contains(&name) {
                report.push(
                    ValidationRule::DuplicateGroup,
                    path.clone(),
                    format!("group '{name}' is declared more than once"),
                );
            }
            seen.push(name);
        }

        match group.get("title") {
            None | Some(Value::Null) => report.push(
                ValidationRule::GroupTitleMissing,
                format!("{path}.title"),
                "groups should declare a title",
            ),
            Some(Value::String(_)) => report.push(
                ValidationRule::GroupTitleNotLocalized,
                format!("{path}.title"),
                "group titles should be keyed by language",
            ),
            Some(Value::Object(titles)) => {
                for language in &languages {
                    if !titles.contains_key(language) {
                        report.push(
                            ValidationRule::GroupTitleLanguageMissing,
                            format!("{path}.title"),
                            format!("group title lacks language '{language}'"),
                        );
                    }
                }
            }
            Some(_) => report.push(
                ValidationRule::GroupTitleNotLocalized,
                format!("{path}.title"),
                "group titles should be keyed by language",
            ),
        }
    }
}
