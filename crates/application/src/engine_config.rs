/// How a `fields` array override combines with compiled form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldsOverridePolicy {
    /// Keep only the overridden entries.
    #[default]
    RestrictToOverride,
    /// Keep every compiled entry and append unmatched overrides.
    KeepOriginals,
}

/// Settings of the component settings engine, fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Prefix for generated data URLs, e.g. `/api`.
    pub route_prefix: String,
    /// Language used when a request does not name one.
    pub default_language: String,
    /// Page size used when neither request nor config sets one.
    pub default_per_page: u32,
    /// Diagnostics level (0-2); at 2 validation errors block resolution.
    pub debug_level: u8,
    /// Emit hidden columns as headers.
    pub include_hidden_headers: bool,
    /// Add a `meta` entry to `componentSettings`.
    pub inject_meta: bool,
    /// Add top-level `headers` to component responses.
    pub inject_headers: bool,
    /// Add top-level `filters` to component responses.
    pub inject_filters: bool,
    /// Add top-level `pagination` to component responses.
    pub inject_pagination: bool,
    /// Insert override keys that the compiled payload does not have.
    pub allow_custom_override_keys: bool,
    /// Merge policy for `fields` overrides.
    pub fields_override_policy: FieldsOverridePolicy,
}

impl EngineConfig {
    /// Returns whether validation errors block component resolution.
    #[must_use]
    pub fn enforces_validation(&self) -> bool {
        self.debug_level >= 2
    }

    /// Returns `route_prefix` without a trailing slash.
    #[must_use]
    pub fn trimmed_route_prefix(&self) -> &str {
        self.route_prefix.trim_end_matches('/')
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            route_prefix: "/api".to_owned(),
            default_language: "dv".to_owned(),
            default_per_page: 10,
            debug_level: 0,
            include_hidden_headers: false,
            inject_meta: false,
            inject_headers: false,
            inject_filters: false,
            inject_pagination: false,
            allow_custom_override_keys: false,
            fields_override_policy: FieldsOverridePolicy::RestrictToOverride,
        }
    }
}
