/// Normalizes an entity name for lookups and file names: lowercase with
/// `_`, `-`, `.` and whitespace removed.
#[must_use]
pub(crate) fn normalize_entity_name(entity_name: &str) -> String {
    entity_name
        .chars()
        .filter(|character| !matches!(character, '_' | '-' | '.') && !character.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Returns `name` if it is a bare file basename, `None` for anything that
/// could leave the configured directory.
pub(crate) fn safe_basename(name: &str) -> Option<&str> {
    let name = name.trim();
    let traverses = name.is_empty()
        || name.starts_with('.')
        || name.contains(['/', '\\', '\0'])
        || name.contains("..");
    (!traverses).then_some(name)
}
