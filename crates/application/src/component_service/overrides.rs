use super::*;

use section::RESERVED_KEYS;

/// Entry properties an allow-list override matches against.
const IDENTITY_KEYS: [&str; 4] = ["key", "name", "type", "label"];

impl ResolutionContext<'_> {
    /// Applies view-config overrides onto a compiled payload.
    pub(super) fn merge_overrides(
        &self,
        payload: &mut Map<String, Value>,
        overrides: &Map<String, Value>,
        scripts: &ScriptBundle,
    ) -> AppResult<()> {
        for (key, value) in overrides {
            self.merge_entry(payload, key, value, scripts)?;
        }

        Ok(())
    }

    /// Re-resolves a `functions` override at any depth instead of merging it.
    fn merge_functions(
        &self,
        target: &mut Map<String, Value>,
        value: &Value,
        scripts: &ScriptBundle,
    ) -> AppResult<()> {
        match value {
            Value::Object(functions) => {
                target.insert(
                    "functions".to_owned(),
                    Value::Object(scripts.resolve_functions(functions)),
                );
            }
            _ => match Toggle::from_value(value) {
                Some(Toggle::Off) => {
                    target.remove("functions");
                }
                Some(Toggle::On) => {
                    target.insert(
                        "functions".to_owned(),
                        self.compute_reserved("functions", scripts)?,
                    );
                }
                None => {}
            },
        }

        Ok(())
    }

    fn merge_entry(
        &self,
        target: &mut Map<String, Value>,
        key: &str,
        value: &Value,
        scripts: &ScriptBundle,
    ) -> AppResult<()> {
        if key == "functions" {
            return self.merge_functions(target, value, scripts);
        }

        let existing = resolve_target_key(target, key);

        match value {
            Value::String(text) if Toggle::parse(text) == Some(Toggle::Off) => {
                if let Some(existing) = existing {
                    target.remove(&existing);
                }
            }
            Value::String(text)
                if Toggle::parse(text) == Some(Toggle::On)
                    && RESERVED_KEYS.contains(&existing.as_deref().unwrap_or(key)) =>
            {
                let name = existing.unwrap_or_else(|| key.to_owned());
                let computed = self.compute_reserved(&name, scripts)?;
                target.insert(name, computed);
            }
            Value::Array(items) if items.iter().all(Value::is_string) => {
                match existing
                    .as_deref()
                    .and_then(|name| target.get_mut(name))
                {
                    Some(Value::Array(entries)) => {
                        let allowed: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
                        entries.retain(|entry| matches_allow_list(entry, &allowed));
                    }
                    _ => self.replace_or_insert(target, existing, key, value),
                }
            }
            Value::Array(items) if items.iter().all(Value::is_object) => {
                let restrict = existing.as_deref() == Some("fields")
                    && self.config.fields_override_policy == FieldsOverridePolicy::RestrictToOverride;
                match existing
                    .as_deref()
                    .and_then(|name| target.get_mut(name))
                {
                    Some(Value::Array(entries)) => {
                        *entries = keyed_merge(entries, items, restrict);
                    }
                    _ => self.replace_or_insert(target, existing, key, value),
                }
            }
            Value::Object(nested) => {
                match existing
                    .as_deref()
                    .and_then(|name| target.get_mut(name))
                {
                    Some(Value::Object(section)) => {
                        for (nested_key, nested_value) in nested {
                            self.merge_entry(section, nested_key, nested_value, scripts)?;
                        }
                    }
                    _ => self.replace_or_insert(target, existing, key, value),
                }
            }
            _ => self.replace_or_insert(target, existing, key, value),
        }

        Ok(())
    }

    fn replace_or_insert(
        &self,
        target: &mut Map<String, Value>,
        existing: Option<String>,
        key: &str,
        value: &Value,
    ) {
        match existing {
            Some(name) => {
                target.insert(name, value.clone());
            }
            None if self.config.allow_custom_override_keys => {
                target.insert(key.to_owned(), value.clone());
            }
            None => {
                debug!(entity = %self.entity, key = %key, "ignoring override without payload key");
            }
        }
    }
}

/// Finds the payload key an override targets: exact, plural, then singular.
fn resolve_target_key(target: &Map<String, Value>, key: &str) -> Option<String> {
    [key.to_owned(), pluralize(key), singularize(key)]
        .into_iter()
        .find(|candidate| target.contains_key(candidate))
}

fn matches_allow_list(entry: &Value, allowed: &[&str]) -> bool {
    let matches = |identity: &str| {
        allowed
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(identity))
    };

    match entry {
        Value::String(identity) => matches(identity.as_str()),
        Value::Object(fields) => IDENTITY_KEYS
            .iter()
            .filter_map(|key| fields.get(*key).and_then(Value::as_str))
            .any(matches),
        _ => false,
    }
}

fn entry_key(entry: &Value) -> Option<&str> {
    entry.get("key").and_then(Value::as_str)
}

fn shallow_merge(original: &Value, changes: &Value) -> Value {
    match (original, changes) {
        (Value::Object(original), Value::Object(changes)) => {
            let mut merged = original.clone();
            for (key, value) in changes {
                merged.insert(key.clone(), value.clone());
            }
            Value::Object(merged)
        }
        _ => changes.clone(),
    }
}

/// Merges object overrides into entries matched by `key`.
///
/// With `restrict`, only overridden entries survive, in override order;
/// otherwise originals keep their positions and unmatched overrides are
/// appended.
fn keyed_merge(entries: &[Value], overrides: &[Value], restrict: bool) -> Vec<Value> {
    if restrict {
        return overrides
            .iter()
            .map(|change| {
                entry_key(change)
                    .and_then(|key| entries.iter().find(|entry| entry_key(entry) == Some(key)))
                    .map_or_else(|| change.clone(), |original| shallow_merge(original, change))
            })
            .collect();
    }

    let mut merged = entries.to_vec();
    for change in overrides {
        let position = entry_key(change)
            .and_then(|key| merged.iter().position(|entry| entry_key(entry) == Some(key)));
        match position {
            Some(position) => merged[position] = shallow_merge(&merged[position], change),
            None => merged.push(change.clone()),
        }
    }
    merged
}
