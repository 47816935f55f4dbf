mod loader;
pub mod secrets;
pub mod value;

use std::collections::HashMap;
use std::path::Path;

pub use secrets::{DefaultSecretResolver, SecretResolver};
pub use value::{ConfigValue, FromConfigValue};

/// Environment variable that selects the active profile.
pub const PROFILE_ENV: &str = "CAFES_PROFILE";

/// Prefix of environment variables overlaid onto the config.
pub const ENV_PREFIX: &str = "CAFES_";

/// Error type for configuration operations.
#[derive(Debug)]
pub enum ConfigError {
    /// The requested key was not found in the configuration.
    NotFound(String),
    /// The value could not be converted to the requested type.
    TypeMismatch { key: String, expected: &'static str },
    /// An I/O or YAML parsing error occurred while loading config files.
    Load(String),
    /// A value was present but outside its allowed range.
    Invalid { key: String, message: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotFound(key) => write!(f, "Config key not found: {key}"),
            ConfigError::TypeMismatch { key, expected } => {
                write!(f, "Config type mismatch for '{key}': expected {expected}")
            }
            ConfigError::Load(msg) => write!(f, "Config load error: {msg}"),
            ConfigError::Invalid { key, message } => {
                write!(f, "Invalid config value for '{key}': {message}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Application configuration loaded from YAML files, `.env` files and environment variables.
///
/// Resolution order (lowest to highest priority):
/// 1. `application.yaml`
/// 2. `application-{profile}.yaml`
/// 3. `.env` then `.env.{profile}` (loaded into the process environment, never
///    overwriting variables that are already set)
/// 4. `${...}` placeholders in string values are resolved
/// 5. `CAFES_*` environment variables (`CAFES_DATABASE_URL` overrides `database.url`)
///
/// Profile is determined by: `CAFES_PROFILE` env var > argument > `"dev"`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    values: HashMap<String, ConfigValue>,
    profile: String,
}

impl AppConfig {
    /// Load configuration for the given profile from the current working directory.
    pub fn load(profile: &str) -> Result<Self, ConfigError> {
        Self::load_from_dir(Path::new("."), profile)
    }

    /// Load configuration for the given profile from `dir`.
    pub fn load_from_dir(dir: &Path, profile: &str) -> Result<Self, ConfigError> {
        Self::load_with_resolver(dir, profile, &DefaultSecretResolver)
    }

    /// Load configuration with a custom secret resolver.
    pub fn load_with_resolver(
        dir: &Path,
        profile: &str,
        resolver: &dyn SecretResolver,
    ) -> Result<Self, ConfigError> {
        let active_profile = active_profile(profile);
        let mut values = HashMap::new();

        loader::load_yaml_file(&dir.join("application.yaml"), &mut values)?;
        let profile_file = dir.join(format!("application-{active_profile}.yaml"));
        loader::load_yaml_file(&profile_file, &mut values)?;

        for env_file in [".env".to_string(), format!(".env.{active_profile}")] {
            // Absent files are skipped; variables already set win.
            if let Err(e) = dotenvy::from_path(dir.join(&env_file)) {
                if !e.not_found() {
                    return Err(ConfigError::Load(format!("{env_file}: {e}")));
                }
            }
        }

        resolve_string_values(&mut values, resolver)?;
        overlay_env(&mut values, std::env::vars());

        tracing::debug!(profile = %active_profile, keys = values.len(), "configuration loaded");

        Ok(AppConfig {
            values,
            profile: active_profile,
        })
    }

    /// Create a config from a YAML string (useful for testing).
    pub fn from_yaml_str(yaml: &str, profile: &str) -> Result<Self, ConfigError> {
        let mut values = HashMap::new();
        loader::load_yaml_str(yaml, &mut values)?;
        Ok(AppConfig {
            values,
            profile: profile.to_string(),
        })
    }

    /// Create an empty config (useful for testing).
    pub fn empty() -> Self {
        AppConfig {
            values: HashMap::new(),
            profile: "test".to_string(),
        }
    }

    /// Set a value programmatically.
    pub fn set(&mut self, key: &str, value: ConfigValue) {
        self.values.insert(key.to_string(), value);
    }

    /// Get a typed value for the given dot-separated key.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the key does not exist, or
    /// `ConfigError::TypeMismatch` if the value cannot be converted.
    pub fn get<V: FromConfigValue>(&self, key: &str) -> Result<V, ConfigError> {
        let value = self
            .values
            .get(key)
            .ok_or_else(|| ConfigError::NotFound(key.to_string()))?;
        V::from_config_value(value, key)
    }

    /// Get a typed value, falling back to `default` only when the key is missing.
    ///
    /// A present value of the wrong type is still an error.
    pub fn get_or<V: FromConfigValue>(&self, key: &str, default: V) -> Result<V, ConfigError> {
        match self.get(key) {
            Err(ConfigError::NotFound(_)) => Ok(default),
            other => other,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// The active profile name.
    pub fn profile(&self) -> &str {
        &self.profile
    }
}

/// `CAFES_PROFILE` wins over the caller's choice; an empty choice means `dev`.
fn active_profile(requested: &str) -> String {
    match std::env::var(PROFILE_ENV) {
        Ok(from_env) if !from_env.is_empty() => from_env,
        _ if requested.is_empty() => "dev".to_string(),
        _ => requested.to_string(),
    }
}

/// `CAFES_DATABASE_URL=x` becomes `database.url = "x"`.
fn overlay_env(
    values: &mut HashMap<String, ConfigValue>,
    vars: impl IntoIterator<Item = (String, String)>,
) {
    for (name, value) in vars {
        if name == PROFILE_ENV {
            continue;
        }
        let Some(rest) = name.strip_prefix(ENV_PREFIX) else {
            continue;
        };
        let key = rest.to_ascii_lowercase().replace('_', ".");
        values.insert(key, ConfigValue::String(value));
    }
}

fn resolve_string_values(
    values: &mut HashMap<String, ConfigValue>,
    resolver: &dyn SecretResolver,
) -> Result<(), ConfigError> {
    for value in values.values_mut() {
        if let ConfigValue::String(s) = value {
            if s.contains("${") {
                *s = secrets::resolve_placeholders(s, resolver)?;
            }
        }
    }
    Ok(())
}
