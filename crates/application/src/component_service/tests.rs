use std::sync::Arc;

use ccs_core::AppError;
use ccs_domain::ColumnDefinition;
use serde_json::{Map, Value, json};

use crate::test_support::{FakeConfigStore, FakeSchemaProvider, FakeScriptStore};
use crate::{EngineConfig, FieldsOverridePolicy};

use super::{
    ComponentSettingsOutcome, ComponentSettingsRequest, ComponentSettingsService,
    ResolutionFailure, SettingsSelector, extract_function_body, pick_header_lang_override,
};

fn schema_provider() -> FakeSchemaProvider {
    FakeSchemaProvider::default()
        .with_entity(
            "person",
            json!({
                "columns": {
                    "id": {"type": "number", "hidden": true},
                    "title": {"type": "string", "label": "Title", "sortable": true},
                    "ref_num": {"type": "string", "label": {"en": "Reference", "dv": "ރެފަރެންސް"}},
                    "code": {"key": "code_value", "type": "string", "formField": true},
                    "status": {
                        "type": "string",
                        "label": {"en": "Status"},
                        "inputType": "select",
                        "formField": true,
                        "select": {"mode": "self", "items": ["active", "inactive"]}
                    },
                    "country_id": {
                        "type": "number",
                        "label": "Country",
                        "inputType": "select",
                        "formField": true,
                        "filterable": {"mode": "relation", "relationship": "country"}
                    },
                    "notes": {"type": "string", "lang": ["dv"], "filterable": false}
                },
                "searchable": ["title"],
                "relations": {"country": "country", "author": "user"}
            }),
        )
        .with_entity(
            "country",
            json!({
                "columns": {
                    "id": {"type": "number"},
                    "name": {"type": "string", "label": "Name", "formField": true}
                }
            }),
        )
        .with_entity(
            "user",
            json!({"columns": {"name": {"type": "string", "label": "Author"}}}),
        )
        .with_entity(
            "member",
            json!({
                "columns": {
                    "name": {"type": "string", "label": "Name", "lang": ["en", "dv"]},
                    "bio": {"type": "string", "label": "Bio", "lang": ["dv"]}
                }
            }),
        )
}

fn templates(store: FakeConfigStore) -> FakeConfigStore {
    store
        .with_template(
            "table",
            json!({
                "title": {"en": "People", "dv": "މީހުން"},
                "headers": "on",
                "filters": "on",
                "pagination": "on",
                "datalink": "on",
                "toolbar": {"createLink": "on", "dense": true}
            }),
        )
        .with_template("headers_only", json!({"headers": "on"}))
        .with_template("form", json!({"fields": "on", "crudLink": "on"}))
        .with_template(
            "links",
            json!({
                "link": {"to": "/people"},
                "ids": [{"id": "7"}],
                "handlers": {"on": "submit"},
                "caption": {"en": "People", "dv": "މީހުން"}
            }),
        )
        .with_template("actions", json!({"actions": {"functions": {"keep": "x"}}}))
}

struct Harness {
    service: ComponentSettingsService,
    schema_provider: Arc<FakeSchemaProvider>,
}

fn harness_with(config: EngineConfig, views: Value, scripts: FakeScriptStore) -> Harness {
    let schema_provider = Arc::new(schema_provider());
    let mut store = templates(FakeConfigStore::default());
    if let Value::Object(views) = views {
        for (entity, document) in views {
            store = store.with_view(&entity, document);
        }
    }

    Harness {
        service: ComponentSettingsService::new(
            schema_provider.clone(),
            Arc::new(store),
            Arc::new(scripts),
            config,
        ),
        schema_provider,
    }
}

fn harness(views: Value) -> Harness {
    harness_with(EngineConfig::default(), views, FakeScriptStore::default())
}

fn component_request(entity: &str, component: &str, lang: &str) -> ComponentSettingsRequest {
    let mut request =
        ComponentSettingsRequest::new(entity, SettingsSelector::Component(component.to_owned()));
    request.lang = Some(lang.to_owned());
    request
}

async fn resolve(harness: &Harness, request: &ComponentSettingsRequest) -> Map<String, Value> {
    match harness.service.resolve(request).await {
        Ok(ComponentSettingsOutcome::Settings(payload)) => payload,
        Ok(other) => panic!("expected settings, got {other:?}"),
        Err(failure) => panic!("expected settings, got {:?}", failure.error),
    }
}

async fn resolve_failure(harness: &Harness, request: &ComponentSettingsRequest) -> ResolutionFailure {
    match harness.service.resolve(request).await {
        Err(failure) => failure,
        Ok(outcome) => panic!("expected failure, got {outcome:?}"),
    }
}

fn component<'a>(payload: &'a Map<String, Value>, alias: &str) -> &'a Value {
    payload
        .get("componentSettings")
        .and_then(|settings| settings.get(alias))
        .unwrap_or_else(|| panic!("component '{alias}' missing"))
}

fn header_values(component: &Value) -> Vec<String> {
    component
        .get("headers")
        .and_then(Value::as_array)
        .map(|headers| {
            headers
                .iter()
                .filter_map(|header| header.get("value").and_then(Value::as_str))
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

#[tokio::test]
async fn hidden_columns_are_excluded_from_headers() {
    let harness = harness(json!({
        "person": {"grid": {"template": "headers_only", "columns": "id,title"}}
    }));

    let payload = resolve(&harness, &component_request("person", "grid", "en")).await;
    let headers = component(&payload, "grid")
        .get("headers")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    assert_eq!(
        headers,
        vec![json!({"title": "Title", "value": "title", "sortable": true, "hidden": false})]
    );
}

#[tokio::test]
async fn unsupported_language_short_circuits_before_schema_lookup() {
    let harness = harness(json!({
        "person": {"listView": {"lang": ["en", "dv"], "components": {"table": "table"}}}
    }));

    let outcome = harness
        .service
        .resolve(&component_request("person", "listView", "fr"))
        .await;

    assert_eq!(
        outcome.ok(),
        Some(ComponentSettingsOutcome::UnsupportedLanguage {
            message: "Language 'fr' not supported by view config".to_owned()
        })
    );
    assert_eq!(harness.schema_provider.lookups(), 0);
}

#[tokio::test]
async fn order_customization_splices_header_into_position() {
    let harness = harness(json!({
        "person": {"grid": {
            "template": "headers_only",
            "columns": "title,ref_num,status",
            "columnCustomizations": {"ref_num": {"order": 0}}
        }}
    }));

    let payload = resolve(&harness, &component_request("person", "grid", "en")).await;
    let grid = component(&payload, "grid");

    assert_eq!(header_values(grid), vec!["ref_num", "title", "status"]);
    let first = grid.get("headers").and_then(|headers| headers.get(0));
    assert_eq!(first.and_then(|header| header.get("order")), None);
}

#[tokio::test]
async fn no_model_view_without_columns_schema_fails() {
    let harness = harness(json!({
        "report": {"reportView": {
            "lang": ["en"],
            "noModel": true,
            "columnsSchema": {},
            "components": {"table": "table"}
        }}
    }));

    let failure = resolve_failure(&harness, &component_request("report", "reportView", "en")).await;

    assert_eq!(
        failure.error,
        AppError::MissingSchema("noModel mode requires columnsSchema in view config".to_owned())
    );
    assert!(failure.validation.is_none());
}

#[tokio::test]
async fn filter_allow_list_keeps_only_named_entries() {
    let harness = harness(json!({
        "person": {"listView": {
            "lang": ["en"],
            "columns": "title,status,ref_num",
            "components": {"table": {"component": "table", "filters": ["status"]}}
        }}
    }));

    let payload = resolve(&harness, &component_request("person", "listView", "en")).await;
    let filters = component(&payload, "table")
        .get("filters")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    assert_eq!(filters.len(), 1);
    assert_eq!(filters[0].get("key"), Some(&json!("status")));
    assert_eq!(filters[0].get("type"), Some(&json!("Select")));
    assert_eq!(
        filters[0].get("items"),
        Some(&json!([
            {"title": "active", "value": "active"},
            {"title": "inactive", "value": "inactive"}
        ]))
    );
}

#[tokio::test]
async fn resolution_is_idempotent() {
    let harness = harness(json!({
        "person": {"listView": {
            "lang": ["en", "dv"],
            "columns": "title,ref_num,country_id",
            "components": {"table": "table", "form": "form"}
        }}
    }));
    let request = component_request("person", "listView", "dv");

    let first = resolve(&harness, &request).await;
    let second = resolve(&harness, &request).await;

    let first = serde_json::to_string(&first).unwrap_or_else(|error| panic!("{error}"));
    let second = serde_json::to_string(&second).unwrap_or_else(|error| panic!("{error}"));
    assert_eq!(first, second);
}

#[tokio::test]
async fn duplicate_column_tokens_are_preserved() {
    let config = EngineConfig {
        inject_meta: true,
        ..EngineConfig::default()
    };
    let harness = harness_with(
        config,
        json!({"person": {"grid": {"template": "headers_only"}}}),
        FakeScriptStore::default(),
    );
    let mut request = component_request("person", "grid", "en");
    request.columns = Some("title, title".to_owned());

    let payload = resolve(&harness, &request).await;

    assert_eq!(header_values(component(&payload, "grid")), vec!["title", "title"]);
    assert_eq!(
        component(&payload, "meta").get("columns"),
        Some(&json!(["title", "title"]))
    );
}

#[tokio::test]
async fn dot_tokens_resolve_relations_through_id_stripped_candidate() {
    let harness = harness(json!({
        "person": {"grid": {"template": "table", "columns": "title,author_id.name"}}
    }));

    let payload = resolve(&harness, &component_request("person", "grid", "en")).await;
    let grid = component(&payload, "grid");

    assert_eq!(header_values(grid), vec!["title", "author_id.name"]);
    assert_eq!(
        grid.get("datalink"),
        Some(&json!("/api/gapi/Person?columns=title,author_id.name&with=author&per_page=10"))
    );
}

#[tokio::test]
async fn column_reference_errors_are_typed() {
    let harness = harness(json!({}));
    let cases = [
        ("title,missing", "InvalidReference"),
        ("title,publisher.name", "UnknownRelation"),
        ("title,author.email", "UndefinedColumn"),
    ];

    for (columns, expected) in cases {
        let mut request = component_request("person", "headers_only", "en");
        request.columns = Some(columns.to_owned());
        let failure = resolve_failure(&harness, &request).await;
        let kind = match failure.error {
            AppError::InvalidReference(_) => "InvalidReference",
            AppError::UnknownRelation(_) => "UnknownRelation",
            AppError::UndefinedColumn(_) => "UndefinedColumn",
            other => panic!("unexpected error {other:?}"),
        };
        assert_eq!(kind, expected);
    }
}

#[tokio::test]
async fn language_filter_and_label_fallback_follow_request_language() {
    let harness = harness(json!({}));

    let mut request = component_request("person", "headers_only", "dv");
    request.columns = Some("ref_num,notes".to_owned());
    let dhivehi = resolve(&harness, &request).await;
    assert_eq!(
        header_values(component(&dhivehi, "headers_only")),
        vec!["ref_num", "notes"]
    );

    request.lang = Some("fr".to_owned());
    let french = resolve(&harness, &request).await;
    let headers = component(&french, "headers_only");
    assert_eq!(header_values(headers), vec!["ref_num"]);
    assert_eq!(
        headers
            .get("headers")
            .and_then(|headers| headers.get(0))
            .and_then(|header| header.get("title")),
        Some(&json!("Reference"))
    );
}

#[tokio::test]
async fn storage_keys_become_header_values() {
    let harness = harness(json!({}));
    let mut request = component_request("person", "headers_only", "en");
    request.columns = Some("code".to_owned());

    let payload = resolve(&harness, &request).await;
    let headers = component(&payload, "headers_only");

    assert_eq!(header_values(headers), vec!["code_value"]);
    assert_eq!(
        headers
            .get("headers")
            .and_then(|headers| headers.get(0))
            .and_then(|header| header.get("title")),
        Some(&json!("Code"))
    );
}

#[tokio::test]
async fn relation_select_builds_gapi_url() {
    let harness = harness(json!({
        "person": {"grid": {"template": "table", "columns": "title", "filters": ["country_id"]}}
    }));

    let payload = resolve(&harness, &component_request("person", "grid", "en")).await;
    let filter = component(&payload, "grid")
        .get("filters")
        .and_then(|filters| filters.get(0))
        .cloned()
        .unwrap_or(Value::Null);

    assert_eq!(filter.get("key"), Some(&json!("country_id")));
    assert_eq!(filter.get("itemTitle"), Some(&json!("name")));
    assert_eq!(filter.get("itemValue"), Some(&json!("id")));
    assert_eq!(
        filter.get("url"),
        Some(&json!(
            "/api/gapi/Country?columns=id,name&sort=name&pagination=off&wrap=data"
        ))
    );
}

#[tokio::test]
async fn url_select_without_url_is_invalid() {
    let harness = harness(json!({
        "survey": {"surveyView": {
            "lang": ["en"],
            "noModel": true,
            "columnsSchema": {
                "region": {"inputType": "select", "select": {"mode": "url"}}
            },
            "components": {"table": "table"}
        }}
    }));

    let failure = resolve_failure(&harness, &component_request("survey", "surveyView", "en")).await;

    assert!(matches!(failure.error, AppError::InvalidFilterConfig(_)));
}

#[tokio::test]
async fn no_model_views_accept_unknown_tokens_and_synthetic_columns() {
    let harness = harness(json!({
        "survey": {"surveyView": {
            "lang": ["en"],
            "noModel": true,
            "columns": "question,answer,unknown",
            "columnsSchema": {
                "question": {"label": "Question"},
                "answer": {"label": {"en": "Answer"}, "lang": ["en"]}
            },
            "columnCustomizations": {
                "actions": {"title": {"en": "Actions"}, "width": 80}
            },
            "components": {"grid": "headers_only"}
        }}
    }));

    let payload = resolve(&harness, &component_request("survey", "surveyView", "en")).await;
    let grid = component(&payload, "grid");

    assert_eq!(header_values(grid), vec!["question", "answer", "actions"]);
    let actions = grid.get("headers").and_then(|headers| headers.get(2));
    assert_eq!(actions.and_then(|header| header.get("title")), Some(&json!("Actions")));
    assert_eq!(actions.and_then(|header| header.get("width")), Some(&json!(80)));
}

#[tokio::test]
async fn fields_override_restricts_to_overridden_entries() {
    let views = json!({
        "person": {"editForm": {
            "template": "form",
            "fields": [{"key": "status", "label": "State"}]
        }}
    });

    let restricted = harness(views.clone());
    let payload = resolve(&restricted, &component_request("person", "editForm", "en")).await;
    let fields = component(&payload, "editForm")
        .get("fields")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].get("label"), Some(&json!("State")));
    assert_eq!(fields[0].get("inputType"), Some(&json!("select")));

    let config = EngineConfig {
        fields_override_policy: FieldsOverridePolicy::KeepOriginals,
        ..EngineConfig::default()
    };
    let keep = harness_with(config, views, FakeScriptStore::default());
    let payload = resolve(&keep, &component_request("person", "editForm", "en")).await;
    let keys: Vec<Value> = component(&payload, "editForm")
        .get("fields")
        .and_then(Value::as_array)
        .map(|fields| fields.iter().filter_map(|field| field.get("key")).cloned().collect())
        .unwrap_or_default();
    assert_eq!(keys, vec![json!("code_value"), json!("status"), json!("country_id")]);
}

#[tokio::test]
async fn scalar_overrides_remove_replace_and_respect_custom_key_policy() {
    let views = json!({
        "person": {"grid": {
            "template": "table",
            "columns": "title",
            "header": "off",
            "pagination": {"per_page": 50},
            "title": "Everyone",
            "footer": "Totals"
        }}
    });

    let strict = harness(views.clone());
    let payload = resolve(&strict, &component_request("person", "grid", "en")).await;
    let grid = component(&payload, "grid");
    assert!(grid.get("headers").is_none());
    assert_eq!(grid.get("title"), Some(&json!("Everyone")));
    assert_eq!(
        grid.get("pagination"),
        Some(&json!({"current_page": 1, "per_page": 50}))
    );
    assert!(grid.get("footer").is_none());

    let config = EngineConfig {
        allow_custom_override_keys: true,
        ..EngineConfig::default()
    };
    let permissive = harness_with(config, views, FakeScriptStore::default());
    let payload = resolve(&permissive, &component_request("person", "grid", "en")).await;
    assert_eq!(component(&payload, "grid").get("footer"), Some(&json!("Totals")));
}

#[tokio::test]
async fn functions_are_extracted_from_scripts() {
    let scripts = FakeScriptStore::default().with_script(
        "person.js",
        "function save(record) {\n  if (record.id) { return api.put(record); }\n  return api.post(record);\n}\n",
    );
    let harness = harness_with(
        EngineConfig::default(),
        json!({"person": {"grid": {
            "template": "headers_only",
            "columns": "title",
            "functions": {
                "onSave": {"file": "person.js", "function": "save"},
                "onLoad": {"file": "person.js", "function": "load"},
                "onOpen": {"file": "missing.js", "function": "open"},
                "format": "value => value.trim()"
            }
        }}}),
        scripts,
    );

    let payload = resolve(&harness, &component_request("person", "grid", "en")).await;
    let functions = component(&payload, "grid").get("functions").cloned();

    assert_eq!(
        functions,
        Some(json!({
            "onSave": "if (record.id) { return api.put(record); }\n  return api.post(record);",
            "onLoad": "/* function 'load' not found in 'person.js' */",
            "onOpen": "/* function file 'missing.js' not found */",
            "format": "value => value.trim()"
        }))
    );
}

#[test]
fn function_bodies_are_brace_matched_across_declaration_styles() {
    let source = r#"
const helpers = {
  greet(name) {
    return `hi ${name} }`;
  },
};
var total = function (rows) { return rows.reduce((sum, row) => { return sum + row; }, 0); };
const label = (value) => {
  // closing brace in a comment }
  return "{" + value + "}";
};
"#;

    assert_eq!(
        extract_function_body(source, "greet").as_deref(),
        Some("return `hi ${name} }`;")
    );
    assert_eq!(
        extract_function_body(source, "total").as_deref(),
        Some("return rows.reduce((sum, row) => { return sum + row; }, 0);")
    );
    assert_eq!(
        extract_function_body(source, "label").as_deref(),
        Some("// closing brace in a comment }\n  return \"{\" + value + \"}\";")
    );
    assert_eq!(extract_function_body(source, "absent"), None);
}

#[tokio::test]
async fn view_selector_returns_raw_component_references() {
    let harness = harness(json!({
        "person": {"listView": {
            "lang": ["en"],
            "components": {"table": "table", "details": "country/form"}
        }}
    }));
    let mut request =
        ComponentSettingsRequest::new("person", SettingsSelector::View("listView".to_owned()));
    request.lang = Some("en".to_owned());

    let payload = resolve(&harness, &request).await;

    assert_eq!(
        payload.get("componentSettings"),
        Some(&json!({"table": "table", "details": "country/form"}))
    );
    assert_eq!(harness.schema_provider.lookups(), 0);
}

#[tokio::test]
async fn cross_entity_references_use_the_referenced_schema() {
    let harness = harness(json!({
        "person": {"listView": {
            "lang": ["en"],
            "columns": "title",
            "components": {"table": "headers_only", "countryForm": "country/form"}
        }}
    }));

    let payload = resolve(&harness, &component_request("person", "listView", "en")).await;
    let country_form = component(&payload, "countryForm");

    assert_eq!(country_form.get("crudLink"), Some(&json!("gapi/Country")));
    assert_eq!(
        country_form
            .get("fields")
            .and_then(|fields| fields.get(0))
            .and_then(|field| field.get("key")),
        Some(&json!("name"))
    );
    assert_eq!(header_values(component(&payload, "table")), vec!["title"]);
}

#[tokio::test]
async fn component_settings_selects_a_single_alias() {
    let harness = harness(json!({
        "person": {"listView": {
            "lang": ["en"],
            "columns": "title",
            "components": {"table": "table", "form": "form"}
        }}
    }));
    let mut request = component_request("person", "listView", "en");
    request.component_settings = Some("form".to_owned());

    let payload = resolve(&harness, &request).await;
    let settings = payload
        .get("componentSettings")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();
    assert_eq!(settings.keys().collect::<Vec<_>>(), vec!["form"]);

    request.component_settings = Some("chart".to_owned());
    let failure = resolve_failure(&harness, &request).await;
    assert!(matches!(failure.error, AppError::ComponentConfigNotFound(_)));
}

#[tokio::test]
async fn localized_literals_collapse_and_injection_flags_add_sections() {
    let config = EngineConfig {
        inject_headers: true,
        inject_pagination: true,
        ..EngineConfig::default()
    };
    let harness = harness_with(
        config,
        json!({"person": {"listView": {
            "lang": ["en", "dv"],
            "columns": "title",
            "per_page": 25,
            "components": {"table": "table"}
        }}}),
        FakeScriptStore::default(),
    );

    let payload = resolve(&harness, &component_request("person", "listView", "dv")).await;

    assert_eq!(payload.get("component"), Some(&json!("listView")));
    assert_eq!(component(&payload, "table").get("title"), Some(&json!("މީހުން")));
    assert_eq!(
        payload.get("pagination"),
        Some(&json!({"current_page": 1, "per_page": 25}))
    );
    assert_eq!(
        payload
            .get("headers")
            .and_then(Value::as_array)
            .map(Vec::len),
        Some(1)
    );
}

#[tokio::test]
async fn missing_component_template_is_reported() {
    let harness = harness(json!({
        "person": {"listView": {"lang": ["en"], "components": {"chart": "chart"}}}
    }));

    let failure = resolve_failure(&harness, &component_request("person", "listView", "en")).await;

    assert_eq!(
        failure.error,
        AppError::ComponentConfigNotFound("Component config 'chart' not found".to_owned())
    );
}

#[tokio::test]
async fn unknown_entities_fail_with_entity_not_found() {
    let harness = harness(json!({}));

    let failure = resolve_failure(&harness, &component_request("invoice", "table", "en")).await;

    assert!(matches!(failure.error, AppError::EntityNotFound(_)));
}

#[tokio::test]
async fn validation_errors_block_resolution_at_debug_level_two() {
    let config = EngineConfig {
        debug_level: 2,
        ..EngineConfig::default()
    };
    let harness = harness_with(
        config,
        json!({"person": {
            "listView": {"lang": ["en"], "columns": "title", "components": {"table": "table"}},
            "grid": {"template": "headers_only", "columns": "title"}
        }}),
        FakeScriptStore::default(),
    );

    let failure = resolve_failure(&harness, &component_request("person", "listView", "en")).await;

    let Some(report) = failure.validation else {
        panic!("validation report missing");
    };
    assert_eq!(report.errors().len(), 1);
    assert_eq!(report.errors()[0].path, "grid.lang");
}

#[tokio::test]
async fn literal_objects_with_short_keys_are_not_collapsed() {
    let harness = harness(json!({
        "person": {"grid": {"template": "links", "columns": "title"}}
    }));

    let payload = resolve(&harness, &component_request("person", "grid", "dv")).await;

    assert_eq!(
        component(&payload, "grid"),
        &json!({
            "link": {"to": "/people"},
            "ids": [{"id": "7"}],
            "handlers": {"on": "submit"},
            "caption": "މީހުން"
        })
    );
}

#[tokio::test]
async fn nested_functions_overrides_are_extracted() {
    let scripts = FakeScriptStore::default()
        .with_script("person.js", "function save(a) {\n  return a;\n}\n");
    let harness = harness_with(
        EngineConfig::default(),
        json!({"person": {"grid": {
            "template": "actions",
            "columns": "title",
            "actions": {"functions": {"keep": {"file": "person.js", "function": "save"}}}
        }}}),
        scripts,
    );

    let payload = resolve(&harness, &component_request("person", "grid", "en")).await;

    assert_eq!(
        component(&payload, "grid"),
        &json!({"actions": {"functions": {"keep": "return a;"}}})
    );
}

#[test]
fn header_language_override_pairs_en_and_dv_then_falls_back() {
    let column = |languages: Value| {
        ColumnDefinition::from_value("name", &json!({"lang": languages}))
            .unwrap_or_else(|error| panic!("{error}"))
    };

    let bilingual = column(json!(["en", "dv"]));
    assert_eq!(pick_header_lang_override(&bilingual, "en").as_deref(), Some("dv"));
    assert_eq!(pick_header_lang_override(&bilingual, "dv").as_deref(), Some("en"));

    let arabic_english = column(json!(["ar", "en"]));
    assert_eq!(pick_header_lang_override(&arabic_english, "fr").as_deref(), Some("en"));

    let arabic_french = column(json!(["ar", "fr"]));
    assert_eq!(pick_header_lang_override(&arabic_french, "de").as_deref(), Some("ar"));

    let single = column(json!(["dv"]));
    assert_eq!(pick_header_lang_override(&single, "en"), None);
}

#[tokio::test]
async fn multi_language_headers_advertise_the_paired_language() {
    let harness = harness(json!({
        "member": {"grid": {"template": "headers_only", "columns": "name,bio"}}
    }));

    let payload = resolve(&harness, &component_request("member", "grid", "en")).await;

    assert_eq!(
        component(&payload, "grid").get("headers"),
        Some(&json!([{
            "title": "Name",
            "value": "name",
            "sortable": false,
            "hidden": false,
            "lang": "dv"
        }]))
    );
}

#[tokio::test]
async fn header_type_comes_from_customizations() {
    let harness = harness(json!({
        "person": {"grid": {
            "template": "headers_only",
            "columns": "title",
            "columnCustomizations": {"title": {"type": "link"}}
        }}
    }));

    let payload = resolve(&harness, &component_request("person", "grid", "en")).await;

    assert_eq!(
        component(&payload, "grid").get("headers"),
        Some(&json!([{
            "title": "Title",
            "value": "title",
            "sortable": true,
            "hidden": false,
            "type": "link"
        }]))
    );
}
