use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use ccs_application::EngineConfig;
use ccs_core::AppError;
use tracing_subscriber::EnvFilter;


/// Runtime configuration of the API process.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub api_host: String,
    pub api_port: u16,
    pub view_config_dir: PathBuf,
    pub component_dir: PathBuf,
    pub schema_dir: PathBuf,
    pub script_dir: PathBuf,
    pub engine: EngineConfig,
}

impl ApiConfig {
    /// Reads the configuration from the process environment.
    pub fn load() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads the configuration through `lookup`, which returns the raw value
    /// of a variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let value = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let directory = |name: &str, default: &str| {
            PathBuf::from(value(name).unwrap_or_else(|| default.to_owned()))
        };
        let flag = |name: &str| value(name).map(|raw| parse_flag(name, &raw)).transpose();

        let api_host = value("API_HOST").unwrap_or_else(|| "127.0.0.1".to_owned());
        let api_port = value("API_PORT")
            .map(|raw| {
                raw.trim()
                    .parse::<u16>()
                    .map_err(|error| AppError::InvalidRequest(format!("invalid API_PORT: {error}")))
            })
            .transpose()?
            .unwrap_or(3001);

        let defaults = EngineConfig::default();
        let default_per_page = value("CCS_DEFAULT_PER_PAGE")
            .map(|raw| match raw.trim().parse::<u32>() {
                Ok(per_page) if per_page > 0 => Ok(per_page),
                _ => Err(AppError::InvalidRequest(format!(
                    "CCS_DEFAULT_PER_PAGE must be a positive integer, got '{raw}'"
                ))),
            })
            .transpose()?
            .unwrap_or(defaults.default_per_page);
        let debug_level = value("CCS_DEBUG_LEVEL")
            .map(|raw| match raw.trim().parse::<u8>() {
                Ok(level) if level <= 2 => Ok(level),
                _ => Err(AppError::InvalidRequest(format!(
                    "CCS_DEBUG_LEVEL must be 0, 1 or 2, got '{raw}'"
                ))),
            })
            .transpose()?
            .unwrap_or(defaults.debug_level);

        let engine = EngineConfig {
            route_prefix: value("CCS_ROUTE_PREFIX")
                .map(|prefix| normalize_route_prefix(&prefix))
                .unwrap_or(defaults.route_prefix),
            default_language: value("CCS_DEFAULT_LANG")
                .map(|lang| lang.trim().to_ascii_lowercase())
                .unwrap_or(defaults.default_language),
            default_per_page,
            debug_level,
            include_hidden_headers: flag("CCS_INCLUDE_HIDDEN")?
                .unwrap_or(defaults.include_hidden_headers),
            inject_meta: flag("CCS_INJECT_META")?.unwrap_or(defaults.inject_meta),
            inject_headers: flag("CCS_INJECT_HEADERS")?.unwrap_or(defaults.inject_headers),
            inject_filters: flag("CCS_INJECT_FILTERS")?.unwrap_or(defaults.inject_filters),
            inject_pagination: flag("CCS_INJECT_PAGINATION")?
                .unwrap_or(defaults.inject_pagination),
            allow_custom_override_keys: flag("CCS_ALLOW_CUSTOM_KEYS")?
                .unwrap_or(defaults.allow_custom_override_keys),
            fields_override_policy: defaults.fields_override_policy,
        };

        Ok(Self {
            api_host,
            api_port,
            view_config_dir: directory("CCS_VIEW_CONFIG_DIR", "config/views"),
            component_dir: directory("CCS_COMPONENT_DIR", "config/components"),
            schema_dir: directory("CCS_SCHEMA_DIR", "config/schemas"),
            script_dir: directory("CCS_SCRIPT_DIR", "config/scripts"),
            engine,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::InvalidRequest(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

fn parse_flag(name: &str, raw: &str) -> Result<bool, AppError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(AppError::InvalidRequest(format!(
            "{name} must be a boolean, got '{raw}'"
        ))),
    }
}

/// Returns `prefix` with one leading slash and no trailing slash; an empty
/// prefix stays empty.
fn normalize_route_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}
