use regex::Regex;

use super::*;

/// Script sources preloaded for one compilation; `None` marks a missing file.
#[derive(Debug, Default)]
pub(super) struct ScriptBundle {
    sources: HashMap<String, Option<String>>,
}

impl ScriptBundle {
    /// Reads every referenced script once.
    pub(super) async fn load(
        store: &dyn ScriptStore,
        files: BTreeSet<String>,
    ) -> AppResult<Self> {
        let mut sources = HashMap::with_capacity(files.len());
        for file in files {
            let source = store.read_script(file.as_str()).await?;
            if source.is_none() {
                warn!(file = %file, "referenced script file not found");
            }
            sources.insert(file, source);
        }
        Ok(Self { sources })
    }

    /// Resolves a `functions` map: strings pass through, `{file, function}`
    /// entries become the extracted body or an error comment.
    pub(super) fn resolve_functions(&self, entries: &Map<String, Value>) -> Map<String, Value> {
        entries
            .iter()
            .map(|(name, definition)| (name.clone(), self.resolve_function(definition)))
            .collect()
    }

    fn resolve_function(&self, definition: &Value) -> Value {
        let Value::Object(reference) = definition else {
            return definition.clone();
        };
        let file = reference.get("file").and_then(Value::as_str);
        let function = reference.get("function").and_then(Value::as_str);
        let (Some(file), Some(function)) = (file, function) else {
            return Value::String(
                "/* function definition requires 'file' and 'function' */".to_owned(),
            );
        };

        let body = match self.sources.get(file) {
            Some(Some(source)) => extract_function_body(source, function)
                .unwrap_or_else(|| format!("/* function '{function}' not found in '{file}' */")),
            _ => format!("/* function file '{file}' not found */"),
        };
        Value::String(body)
    }
}

/// Collects script files named by `{file, function}` entries under any
/// `functions` key of `value`.
pub(super) fn collect_script_files(value: &Value, files: &mut BTreeSet<String>) {
    match value {
        Value::Object(entries) => {
            for (key, child) in entries {
                if key == "functions"
                    && let Value::Object(functions) = child
                {
                    collect_declared_files(functions, files);
                }
                collect_script_files(child, files);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_script_files(item, files);
            }
        }
        _ => {}
    }
}

/// Collects script files named by the entries of one `functions` map.
pub(super) fn collect_declared_files(functions: &Map<String, Value>, files: &mut BTreeSet<String>) {
    files.extend(
        functions
            .values()
            .filter_map(|definition| definition.get("file"))
            .filter_map(Value::as_str)
            .map(str::to_owned),
    );
}

/// Extracts the body of a named JavaScript function, without its braces.
///
/// Recognizes `function name(...) {`, `name = function (...) {`,
/// `name: function (...) {`, `name = (...) => {`, and method shorthand
/// `name(...) {`.
#[must_use]
pub fn extract_function_body(source: &str, function_name: &str) -> Option<String> {
    let name = regex::escape(function_name);
    let patterns = [
        format!(r"\bfunction\s*\*?\s*{name}\s*\("),
        format!(r"\b{name}\s*[:=]\s*(?:async\s+)?function\b\s*\*?\s*[A-Za-z0-9_$]*\s*\("),
        format!(r"\b{name}\s*[:=]\s*(?:async\s+)?\("),
        format!(r"(?m)^\s*(?:async\s+)?{name}\s*\("),
    ];

    let mut starts: Vec<usize> = Vec::new();
    for pattern in &patterns {
        let Ok(regex) = Regex::new(pattern) else {
            continue;
        };
        starts.extend(regex.find_iter(source).map(|found| found.end()));
    }
    starts.sort_unstable();
    starts.dedup();

    starts
        .into_iter()
        .find_map(|after_paren| body_after_parameters(source, after_paren))
}

/// Given the offset just past a parameter list's `(`, returns the trimmed
/// body of the block that follows it.
fn body_after_parameters(source: &str, after_paren: usize) -> Option<String> {
    let bytes = source.as_bytes();
    let close = matching_close(bytes, after_paren, b'(', b')')?;

    let mut cursor = close + 1;
    while cursor < bytes.len() && bytes[cursor].is_ascii_whitespace() {
        cursor += 1;
    }
    if bytes[cursor..].starts_with(b"=>") {
        cursor += 2;
        while cursor < bytes.len() && bytes[cursor].is_ascii_whitespace() {
            cursor += 1;
        }
    }
    if bytes.get(cursor) != Some(&b'{') {
        return None;
    }

    let end = matching_close(bytes, cursor + 1, b'{', b'}')?;
    source
        .get(cursor + 1..end)
        .map(|body| body.trim().to_owned())
}

/// Finds the byte offset of the delimiter closing one already-open `open`,
/// skipping string literals and comments.
fn matching_close(bytes: &[u8], start: usize, open: u8, close: u8) -> Option<usize> {
    let mut depth = 1usize;
    let mut index = start;

    while index < bytes.len() {
        let byte = bytes[index];
        match byte {
            b'"' | b'\'' | b'`' => {
                index += 1;
                while index < bytes.len() && bytes[index] != byte {
                    if bytes[index] == b'\\' {
                        index += 1;
                    }
                    index += 1;
                }
            }
            b'/' if bytes.get(index + 1) == Some(&b'/') => {
                while index < bytes.len() && bytes[index] != b'\n' {
                    index += 1;
                }
            }
            b'/' if bytes.get(index + 1) == Some(&b'*') => {
                index += 2;
                while index + 1 < bytes.len() && !(bytes[index] == b'*' && bytes[index + 1] == b'/') {
                    index += 1;
                }
                index += 1;
            }
            _ if byte == open => depth += 1,
            _ if byte == close => {
                depth -= 1;
                if depth == 0 {
                    return Some(index);
                }
            }
            _ => {}
        }
        index += 1;
    }

    None
}
