//! Configuration loader with layered sources
//!
//! Loads the connection descriptor from multiple sources with the following
//! precedence (highest to lowest):
//! 1. Environment variables (SUPACONF__*)
//! 2. Conventional Supabase variables (SUPABASE_URL, SUPABASE_ANON_KEY)
//! 3. Configuration file (TOML)
//! 4. Default values (auth options only; url and key are never defaulted)
//!
//! All entry points funnel through [`load_from_value`], the single pure
//! validating transform. No partially-valid config ever leaves this module.

use crate::config::types::{AuthOptions, ConnectionConfig};
use crate::error::ConfigError;
use crate::util::secret::AnonKey;
use config::{Config, Environment, File, FileFormat};
use serde_json::Value;
use std::path::Path;
use tracing::debug;
use url::Url;

/// Default configuration file paths to check (in order)
const DEFAULT_CONFIG_PATHS: &[&str] = &[
    "supaconf.toml",
    ".supaconf.toml",
    "~/.config/supaconf/config.toml",
    "/etc/supaconf/config.toml",
];

/// Environment variable naming the active profile.
///
/// Profiles are only ever chosen explicitly, through this variable or the
/// `profile` argument of [`load_config`]. The loader never infers one.
const PROFILE_ENV: &str = "SUPACONF_PROFILE";

/// Validate an already-parsed configuration value.
///
/// This is the pure core: a single-shot, idempotent transform from a source
/// mapping to a [`ConnectionConfig`]. It accepts the key shape used by the
/// Supabase JS client (`url`, `anonKey`, `options.auth.*`) as well as
/// snake_case spellings.
///
/// Validation rules, in order:
/// 1. `url` must be present and parse as an absolute HTTPS URL with a host.
/// 2. `anonKey` must be present, non-empty, and free of whitespace.
/// 3. `options.auth.*` fields must be boolean-typed when present; absent
///    fields default to `true`.
pub fn load_from_value(source: &Value) -> Result<ConnectionConfig, ConfigError> {
    let endpoint_url = validate_endpoint(source)?;
    let anon_key = validate_credential(source)?;
    let auth = validate_auth_options(source)?;

    let config = ConnectionConfig {
        endpoint_url,
        anon_key,
        auth,
    };

    // The host is safe to log; the key never is.
    debug!(host = config.host(), "validated connection config");

    Ok(config)
}

/// Load configuration from a TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<ConnectionConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from_str(toml_str, FileFormat::Toml))
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    let value: Value = config
        .try_deserialize()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    load_from_value(&value)
}

/// Load configuration from files and environment
///
/// When `profile` is `Some` (or `SUPACONF_PROFILE` is set), the file must
/// carry a matching `[profiles.<name>]` table; its contents become the base
/// layer. Environment variables are applied on top either way.
pub fn load_config(
    config_path: Option<&str>,
    profile: Option<&str>,
) -> Result<ConnectionConfig, ConfigError> {
    // Pick up .env before snapshotting the environment
    dotenvy::dotenv().ok();

    let file_value = read_file_value(config_path)?;

    let profile = profile
        .map(str::to_owned)
        .or_else(|| std::env::var(PROFILE_ENV).ok());

    let mut merged = match profile {
        Some(name) => select_profile(&file_value, &name)?,
        None => file_value,
    };

    merge(&mut merged, env_overlay()?);

    load_from_value(&merged)
}

/// Read the configuration file layer into a raw JSON value.
fn read_file_value(config_path: Option<&str>) -> Result<Value, ConfigError> {
    let mut builder = Config::builder();

    if let Some(path) = config_path {
        // Explicit path provided - must exist
        if !Path::new(path).exists() {
            return Err(ConfigError::Load(format!(
                "Configuration file not found: {}",
                path
            )));
        }
        builder = builder.add_source(File::new(path, FileFormat::Toml));
    } else {
        // Try default paths (first existing one wins)
        for path in DEFAULT_CONFIG_PATHS {
            let expanded = shellexpand::tilde(path);
            if Path::new(expanded.as_ref()).exists() {
                builder = builder.add_source(File::new(&expanded, FileFormat::Toml));
                break;
            }
        }
    }

    let config = builder
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    config
        .try_deserialize()
        .map_err(|e| ConfigError::Load(e.to_string()))
}

/// Collect the environment variable layer into a raw JSON value.
///
/// `SUPACONF__*` variables map onto nested keys via double underscore
/// (e.g. `SUPACONF__OPTIONS__AUTH__PERSIST_SESSION`). The conventional
/// `SUPABASE_URL` / `SUPABASE_ANON_KEY` variables fill `url` / `anon_key`
/// when no `SUPACONF__` spelling claimed them.
fn env_overlay() -> Result<Value, ConfigError> {
    let config = Config::builder()
        .add_source(
            Environment::with_prefix("SUPACONF")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    let mut overlay: Value = config
        .try_deserialize()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    if !overlay.is_object() {
        overlay = Value::Object(serde_json::Map::new());
    }

    if let Value::Object(map) = &mut overlay {
        if let Ok(value) = std::env::var("SUPABASE_URL")
            && !value.is_empty()
            && !map.contains_key("url")
        {
            map.insert("url".to_string(), Value::String(value));
        }

        if let Ok(value) = std::env::var("SUPABASE_ANON_KEY")
            && !value.is_empty()
            && !map.contains_key("anon_key")
            && !map.contains_key("anonKey")
        {
            map.insert("anon_key".to_string(), Value::String(value));
        }
    }

    Ok(overlay)
}

/// Pick a `[profiles.<name>]` table out of the file layer.
fn select_profile(file_value: &Value, name: &str) -> Result<Value, ConfigError> {
    file_value
        .get("profiles")
        .and_then(|profiles| profiles.get(name))
        .cloned()
        .ok_or_else(|| ConfigError::MissingField {
            field: format!("profiles.{}", name),
        })
}

/// Deep-merge `overlay` into `base`; overlay wins on conflicts.
fn merge(base: &mut Value, overlay: Value) {
    match overlay {
        Value::Object(overlay_map) => {
            if let Value::Object(base_map) = base {
                for (key, value) in overlay_map {
                    merge(base_map.entry(key).or_insert(Value::Null), value);
                }
            } else {
                *base = Value::Object(overlay_map);
            }
        }
        other => *base = other,
    }
}

/// First value found under any of the given key spellings.
fn field<'a>(source: &'a Value, names: &[&str]) -> Option<&'a Value> {
    names.iter().find_map(|name| source.get(name))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn validate_endpoint(source: &Value) -> Result<Url, ConfigError> {
    let raw = field(source, &["url", "endpoint_url", "endpointUrl"]).ok_or_else(|| {
        ConfigError::MissingField {
            field: "url".to_string(),
        }
    })?;

    let Value::String(raw) = raw else {
        return Err(ConfigError::InvalidEndpoint {
            url: raw.to_string(),
            reason: format!("expected a string, found {}", json_type_name(raw)),
        });
    };

    let parsed = Url::parse(raw).map_err(|e| ConfigError::InvalidEndpoint {
        url: raw.clone(),
        reason: e.to_string(),
    })?;

    if parsed.scheme() != "https" {
        return Err(ConfigError::InvalidEndpoint {
            url: raw.clone(),
            reason: format!("scheme must be https, got {}", parsed.scheme()),
        });
    }

    if parsed.host_str().is_none() {
        return Err(ConfigError::InvalidEndpoint {
            url: raw.clone(),
            reason: "URL has no host".to_string(),
        });
    }

    Ok(parsed)
}

fn validate_credential(source: &Value) -> Result<AnonKey, ConfigError> {
    let raw = field(source, &["anonKey", "anon_key", "apiKey", "api_key"]).ok_or_else(|| {
        ConfigError::MissingField {
            field: "anonKey".to_string(),
        }
    })?;

    // Error variants carry a reason, never the key value
    let Value::String(key) = raw else {
        return Err(ConfigError::InvalidCredential {
            reason: format!("expected a string, found {}", json_type_name(raw)),
        });
    };

    if key.is_empty() {
        return Err(ConfigError::InvalidCredential {
            reason: "key is empty".to_string(),
        });
    }

    if key.chars().any(char::is_whitespace) {
        return Err(ConfigError::InvalidCredential {
            reason: "key contains whitespace".to_string(),
        });
    }

    Ok(AnonKey::new(key.as_str()))
}

fn validate_auth_options(source: &Value) -> Result<AuthOptions, ConfigError> {
    let defaults = AuthOptions::default();

    let Some(options_value) = source.get("options") else {
        return Ok(defaults);
    };

    if !options_value.is_object() {
        return Err(ConfigError::InvalidOption {
            field: "options".to_string(),
            found: json_type_name(options_value).to_string(),
        });
    }

    let Some(auth_value) = options_value.get("auth") else {
        return Ok(defaults);
    };

    if !auth_value.is_object() {
        return Err(ConfigError::InvalidOption {
            field: "options.auth".to_string(),
            found: json_type_name(auth_value).to_string(),
        });
    }

    Ok(AuthOptions {
        auto_refresh_token: optional_bool(
            auth_value,
            "autoRefreshToken",
            &["autoRefreshToken", "auto_refresh_token"],
            defaults.auto_refresh_token,
        )?,
        persist_session: optional_bool(
            auth_value,
            "persistSession",
            &["persistSession", "persist_session"],
            defaults.persist_session,
        )?,
        detect_session_in_url: optional_bool(
            auth_value,
            "detectSessionInUrl",
            &["detectSessionInUrl", "detect_session_in_url"],
            defaults.detect_session_in_url,
        )?,
    })
}

fn optional_bool(
    table: &Value,
    canonical: &str,
    names: &[&str],
    default: bool,
) -> Result<bool, ConfigError> {
    match field(table, names) {
        None => Ok(default),
        Some(Value::Bool(flag)) => Ok(*flag),
        Some(other) => Err(ConfigError::InvalidOption {
            field: format!("options.auth.{}", canonical),
            found: json_type_name(other).to_string(),
        }),
    }
}
