// --- File: crates/market_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Database Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub url: String, // e.g. DATABASE_URL loaded via MARKET__DATABASE__URL
}

// --- Auth Config ---
// Holds non-secret token settings. The signing secret is loaded directly
// from the MARKET_TOKEN_SECRET env var, never from the config file.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuthConfig {
    /// Bearer token lifetime in hours. Tokens are never revoked early.
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,
}

fn default_token_ttl_hours() -> i64 {
    24
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_ttl_hours: default_token_ttl_hours(),
        }
    }
}

// --- Stripe Config ---
// Holds non-secret Stripe config. Secret key loaded directly from env var
// STRIPE_SECRET_KEY.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StripeConfig {
    /// The single currency all payment intents are created in.
    pub currency: String,
    /// Payment method types passed through to Stripe.
    #[serde(default = "default_payment_method_types")]
    pub payment_method_types: Vec<String>,
}

fn default_payment_method_types() -> Vec<String> {
    vec!["card".to_string()]
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_stripe: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    #[serde(default)]
    pub auth: Option<AuthConfig>,
    #[serde(default)]
    pub stripe: Option<StripeConfig>,
}

impl AppConfig {
    /// Token settings with defaults applied when the `[auth]` section is
    /// absent from the config file.
    pub fn auth(&self) -> AuthConfig {
        self.auth.clone().unwrap_or_default()
    }
}
