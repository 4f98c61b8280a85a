//! Runtime feature flag handling.
//!
//! Features are toggled two ways: a `use_*` boolean in the config file and
//! the presence of the feature's configuration section. Both must be set
//! for the feature to be live, so a half-configured deployment fails
//! towards "disabled" rather than towards a broken integration.

use market_config::AppConfig;
use std::sync::Arc;

/// Check if a feature is enabled at runtime based on configuration.
pub fn is_feature_enabled<T>(
    _config: &Arc<AppConfig>,
    use_feature: bool,
    feature_config: Option<&T>,
) -> bool {
    use_feature && feature_config.is_some()
}

/// Check if the Stripe payment feature is enabled at runtime.
pub fn is_stripe_enabled(config: &Arc<AppConfig>) -> bool {
    is_feature_enabled(config, config.use_stripe, config.stripe.as_ref())
}
