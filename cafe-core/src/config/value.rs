use super::ConfigError;

/// A leaf of the flattened configuration tree.
///
/// Values coming from the environment always arrive as `String`; the typed
/// accessors below parse them on demand.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
    List(Vec<ConfigValue>),
}

impl From<&serde_yaml::Value> for ConfigValue {
    fn from(value: &serde_yaml::Value) -> Self {
        use serde_yaml::Value as Yaml;
        match value {
            Yaml::Null => ConfigValue::Null,
            Yaml::Bool(b) => ConfigValue::Bool(*b),
            Yaml::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => ConfigValue::Integer(i),
                (None, Some(f)) => ConfigValue::Float(f),
                (None, None) => ConfigValue::String(n.to_string()),
            },
            Yaml::String(s) => ConfigValue::String(s.clone()),
            Yaml::Sequence(items) => ConfigValue::List(items.iter().map(Into::into).collect()),
            // Mappings are flattened before they get here; tagged values are kept as text.
            other => ConfigValue::String(format!("{other:?}")),
        }
    }
}

impl ConfigValue {
    /// Scalar rendered as text. Lists and null have no text form.
    fn as_text(&self) -> Option<String> {
        Some(match self {
            ConfigValue::String(s) => s.clone(),
            ConfigValue::Integer(i) => i.to_string(),
            ConfigValue::Float(f) => f.to_string(),
            ConfigValue::Bool(b) => b.to_string(),
            ConfigValue::Null | ConfigValue::List(_) => return None,
        })
    }

    fn as_integer(&self) -> Option<i64> {
        match self {
            ConfigValue::Integer(i) => Some(*i),
            ConfigValue::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    fn as_flag(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            ConfigValue::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => Some(true),
                "false" | "no" | "off" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }
}

fn mismatch(key: &str, expected: &'static str) -> ConfigError {
    ConfigError::TypeMismatch {
        key: key.to_string(),
        expected,
    }
}

/// Typed extraction used by [`AppConfig::get`](super::AppConfig::get).
pub trait FromConfigValue: Sized {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError>;
}

impl FromConfigValue for String {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
        value.as_text().ok_or_else(|| mismatch(key, "string"))
    }
}

impl FromConfigValue for bool {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
        value.as_flag().ok_or_else(|| mismatch(key, "bool"))
    }
}

impl FromConfigValue for i64 {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
        value.as_integer().ok_or_else(|| mismatch(key, "integer"))
    }
}

macro_rules! narrow_integer {
    ($($ty:ty),+) => {$(
        impl FromConfigValue for $ty {
            fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
                value
                    .as_integer()
                    .and_then(|i| <$ty>::try_from(i).ok())
                    .ok_or_else(|| mismatch(key, stringify!($ty)))
            }
        }
    )+};
}

narrow_integer!(u16, u32, u64, usize);

/// `null` reads as `None`; anything else must convert to `T`.
impl<T: FromConfigValue> FromConfigValue for Option<T> {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
        if *value == ConfigValue::Null {
            return Ok(None);
        }
        T::from_config_value(value, key).map(Some)
    }
}

/// A scalar reads as a one-element list.
impl<T: FromConfigValue> FromConfigValue for Vec<T> {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
        let ConfigValue::List(items) = value else {
            return T::from_config_value(value, key).map(|one| vec![one]);
        };
        let mut out = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            out.push(T::from_config_value(item, &format!("{key}[{index}]"))?);
        }
        Ok(out)
    }
}
