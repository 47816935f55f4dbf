pub mod config;
pub mod error;
pub mod health;
pub mod layers;
pub mod validation;

pub use config::{
    AppConfig, ConfigError, ConfigValue, DefaultSecretResolver, FromConfigValue, SecretResolver,
};
pub use error::{ErrorDetail, HttpError};
pub use health::{HealthIndicator, HealthStatus};
pub use layers::{default_trace, init_tracing, shutdown_signal};
pub use validation::{FieldError, FieldErrors};
