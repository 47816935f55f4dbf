use cafe_core::{AppConfig, ConfigError};

pub const DEFAULT_APP_NAME: &str = "Cafe & Wifi";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5003;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://cafes.db";
pub const DEFAULT_CONNECTIONS: u32 = 5;

/// Typed view of the keys the application reads from [`AppConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub app_name: String,
    pub server: ServerSettings,
    pub database: DatabaseSettings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    pub url: String,
    pub connections: u32,
}

impl Settings {
    /// Read `app.name`, `server.*` and `database.*`, defaulting missing keys.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let port: u16 = config.get_or("server.port", DEFAULT_PORT)?;
        if port == 0 {
            return Err(ConfigError::Invalid {
                key: "server.port".into(),
                message: "must be between 1 and 65535".into(),
            });
        }
        let connections: u32 = config.get_or("database.connections", DEFAULT_CONNECTIONS)?;
        if connections == 0 {
            return Err(ConfigError::Invalid {
                key: "database.connections".into(),
                message: "must be at least 1".into(),
            });
        }

        Ok(Settings {
            app_name: config.get_or("app.name", DEFAULT_APP_NAME.to_string())?,
            server: ServerSettings {
                host: config.get_or("server.host", DEFAULT_HOST.to_string())?,
                port,
            },
            database: DatabaseSettings {
                url: config.get_or("database.url", DEFAULT_DATABASE_URL.to_string())?,
                connections,
            },
        })
    }
}
