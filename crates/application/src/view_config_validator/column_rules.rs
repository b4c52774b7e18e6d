use super::*;

/// Display types that need a sub-config under their own name.
const CONFIGURED_DISPLAY_TYPES: [&str; 2] = ["chip", "select"];

/// Customization keys that can change the outcome of column rules.
const RULE_KEYS: [&str; 7] = [
    "inputType",
    "displayType",
    "select",
    "filterable",
    "submitUrl",
    "group",
    "events",
];

/// Checks every inline `columnsSchema` entry of a block.
pub(super) fn check_column_schema(block: ConfigBlock<'_>, report: &mut ValidationReport) {
    let Some(columns) = block.columns_schema().and_then(Value::as_object) else {
        return;
    };

    for (field, properties) in columns {
        let Value::Object(properties) = properties else {
            continue;
        };
        check_column_properties(
            block,
            &format!("{}.columnsSchema.{field}", block.key()),
            properties,
            report,
        );
    }
}

/// Checks schema columns whose customizations touch rule-relevant keys,
/// using the declaration merged with the customization.
pub(super) fn check_customized_columns(
    block: ConfigBlock<'_>,
    schema: &ColumnSchema,
    report: &mut ValidationReport,
) {
    for (column, customization) in block.column_customizations().into_iter().flatten() {
        let Value::Object(customization) = customization else {
            continue;
        };
        if !RULE_KEYS.iter().any(|key| customization.contains_key(*key)) {
            continue;
        }
        let Some(definition) = schema.get(column) else {
            continue;
        };

        let mut properties = match serde_json::to_value(definition) {
            Ok(Value::Object(properties)) => properties,
            _ => Map::new(),
        };
        for (key, value) in customization {
            properties.insert(key.clone(), value.clone());
        }

        check_column_properties(
            block,
            &format!("{}.columnCustomizations.{column}", block.key()),
            &properties,
            report,
        );
    }
}

fn non_blank(properties: &Map<String, Value>, key: &str) -> bool {
    properties
        .get(key)
        .and_then(Value::as_str)
        .is_some_and(|value| !value.trim().is_empty())
}

fn check_column_properties(
    block: ConfigBlock<'_>,
    path: &str,
    properties: &Map<String, Value>,
    report: &mut ValidationReport,
) {
    let input_type = properties
        .get("inputType")
        .and_then(Value::as_str)
        .map(|input_type| input_type.trim().to_ascii_lowercase());

    match select_block(properties) {
        None if input_type.as_deref() == Some("select") => report.push(
            ValidationRule::SelectConfigRequired,
            path,
            "select inputs require a 'select' or 'filterable' config block",
        ),
        Some((config, SelectMode::Inline)) if !config.get("items").is_some_and(Value::is_array) => {
            report.push(
                ValidationRule::SelectSelfWithoutItems,
                path,
                "select mode 'self' should declare items",
            );
        }
        Some((config, SelectMode::Relation)) if !non_blank(config, "relationship") => report.push(
            ValidationRule::SelectRelationWithoutRelationship,
            path,
            "select mode 'relation' should name a relationship",
        ),
        _ => {}
    }

    if input_type.as_deref() == Some("search") && !non_blank(properties, "submitUrl") {
        report.push(
            ValidationRule::SearchSubmitUrlRequired,
            path,
            "search inputs require a submitUrl",
        );
    }

    if let Some(display_type) = properties.get("displayType").and_then(Value::as_str)
        && CONFIGURED_DISPLAY_TYPES.contains(&display_type)
        && !properties.get(display_type).is_some_and(Value::is_object)
    {
        report.push(
            ValidationRule::DisplayTypeConfigMissing,
            path,
            format!("displayType '{display_type}' should declare a '{display_type}' config"),
        );
    }

    if let Some(group) = properties.get("group").and_then(Value::as_str)
        && !group_rules::group_names(block).iter().any(|name| name == group)
    {
        report.push(
            ValidationRule::UnknownGroup,
            format!("{path}.group"),
            format!("group '{group}' is not declared in groups"),
        );
    }

    let declared_functions = block.functions();
    for (event, handler) in properties
        .get("events")
        .and_then(Value::as_object)
        .into_iter()
        .flatten()
    {
        let Some(handler) = handler.as_str() else {
            continue;
        };
        if !declared_functions.is_some_and(|functions| functions.contains_key(handler)) {
            report.push(
                ValidationRule::EventUnknownFunction,
                format!("{path}.events.{event}"),
                format!("event '{event}' calls undefined function '{handler}'"),
            );
        }
    }
}
