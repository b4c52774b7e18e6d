use super::*;

/// Template keys the compiler computes when toggled on.
pub(super) const RESERVED_KEYS: [&str; 8] = [
    "headers",
    "filters",
    "pagination",
    "datalink",
    "fields",
    "crudLink",
    "createLink",
    "functions",
];

impl ResolutionContext<'_> {
    /// Compiles one template object level.
    pub(super) fn compile_section(
        &self,
        entries: &[(String, TemplateNode)],
        scripts: &ScriptBundle,
    ) -> AppResult<Map<String, Value>> {
        let mut section = Map::new();

        for (key, node) in entries {
            let key = key.as_str();
            let is_filters_toggle = key == "filters" && matches!(node, TemplateNode::Toggle(_));
            if INTERNAL_KEYS.contains(&key) && !is_filters_toggle {
                continue;
            }

            if RESERVED_KEYS.contains(&key) {
                match node.directive() {
                    Directive::Compute => {
                        section.insert(key.to_owned(), self.compute_reserved(key, scripts)?);
                    }
                    Directive::Omit => {}
                    Directive::Literal(TemplateNode::Object(_)) if key == "functions" => {
                        let literal = node.to_value();
                        let resolved = literal
                            .as_object()
                            .map(|functions| scripts.resolve_functions(functions))
                            .unwrap_or_default();
                        section.insert(key.to_owned(), Value::Object(resolved));
                    }
                    Directive::Literal(literal) => {
                        section.insert(key.to_owned(), literal.to_value());
                    }
                }
                continue;
            }

            let value = match node {
                TemplateNode::Object(children) => {
                    Value::Object(self.compile_section(children, scripts)?)
                }
                other => other.to_value(),
            };
            section.insert(key.to_owned(), value);
        }

        Ok(section)
    }

    /// Computes a reserved key toggled `on`.
    pub(super) fn compute_reserved(&self, key: &str, scripts: &ScriptBundle) -> AppResult<Value> {
        let value = match key {
            "headers" => Value::Array(self.build_headers()),
            "filters" => Value::Array(self.build_filters()?),
            "pagination" => self.pagination(),
            "datalink" => Value::String(self.datalink()),
            "crudLink" | "createLink" => {
                Value::String(format!("gapi/{}", studly_case(&self.entity)))
            }
            "fields" => Value::Array(self.build_form_fields()?),
            "functions" => Value::Object(scripts.resolve_functions(&self.functions)),
            _ => {
                return Err(AppError::Internal(format!(
                    "'{key}' is not a computed section"
                )));
            }
        };
        Ok(value)
    }

    /// Returns the list-data URL for this entity.
    pub(super) fn datalink(&self) -> String {
        let columns = self
            .selection
            .tokens()
            .iter()
            .map(ColumnToken::as_str)
            .collect::<Vec<_>>()
            .join(",");
        let with = if self.selection.relations().is_empty() {
            String::new()
        } else {
            format!("&with={}", self.selection.relations().join(","))
        };

        format!(
            "{}/gapi/{}?columns={columns}{with}&per_page={}",
            self.config.trimmed_route_prefix(),
            studly_case(&self.entity),
            self.per_page
        )
    }
}
