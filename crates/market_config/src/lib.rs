pub mod models;

pub use models::{AppConfig, AuthConfig, DatabaseConfig, ServerConfig, StripeConfig};

use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use tracing::debug;

static DOTENV_LOADED: OnceCell<()> = OnceCell::new();

/// Loads `.env` at most once per process so secrets referenced by
/// `load_config` and the feature crates are present in the environment.
pub fn ensure_dotenv_loaded() {
    DOTENV_LOADED.get_or_init(|| {
        if dotenv::dotenv().is_ok() {
            debug!("Loaded environment overrides from .env");
        }
    });
}

/// Loads the application configuration.
///
/// Sources are layered: `config/default.toml` (optional, checked in),
/// `config/local.toml` (optional, gitignored), then environment variables
/// with the `MARKET__` prefix (`MARKET__SERVER__PORT=8080` overrides
/// `server.port`). Dependent crates call this so they do not need to know
/// where a value came from.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name("config/local").required(false))
        .add_source(Environment::with_prefix("MARKET").separator("__"))
        .build()?
        .try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_section_defaults_to_24h_ttl() {
        let config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 5000,
            },
            use_stripe: false,
            database: None,
            auth: None,
            stripe: None,
        };
        assert_eq!(config.auth().token_ttl_hours, 24);
    }
}
