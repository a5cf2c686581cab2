use crate::app_config::{AppConfig, Environment};
use crate::settings::{BundleSettings, DefaultSelection, JoinMode};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Empty values count as unset so a blank line in `.env` does not
    // produce an unusable store domain.
    let optional = |var: &str| -> Option<String> { lookup(var).ok().filter(|v| !v.is_empty()) };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("BUNDLEBOX_ENV", "development"))?;
    let log_level = or_default("BUNDLEBOX_LOG_LEVEL", "info");

    let store_domain = optional("SHOPIFY_STORE_DOMAIN");
    let storefront_token = optional("SHOPIFY_STOREFRONT_TOKEN");
    let storefront_api_version = or_default("BUNDLEBOX_STOREFRONT_API_VERSION", "2024-01");

    let request_timeout_secs = parse_u64("BUNDLEBOX_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("BUNDLEBOX_USER_AGENT", "bundlebox/0.1 (product-page)");
    let max_retries = parse_u32("BUNDLEBOX_MAX_RETRIES", "3")?;
    let retry_backoff_base_secs = parse_u64("BUNDLEBOX_RETRY_BACKOFF_BASE_SECS", "1")?;

    let namespace = or_default(
        "BUNDLEBOX_METAFIELD_NAMESPACE",
        crate::settings::DEFAULT_METAFIELD_NAMESPACE,
    );
    if namespace.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "BUNDLEBOX_METAFIELD_NAMESPACE".to_string(),
            reason: "namespace must be non-empty".to_string(),
        });
    }

    let default_selection = or_default("BUNDLEBOX_DEFAULT_SELECTION", "first_candidate")
        .parse::<DefaultSelection>()
        .map_err(|reason| ConfigError::InvalidEnvVar {
            var: "BUNDLEBOX_DEFAULT_SELECTION".to_string(),
            reason,
        })?;

    let join_mode = or_default("BUNDLEBOX_JOIN_MODE", "nested")
        .parse::<JoinMode>()
        .map_err(|reason| ConfigError::InvalidEnvVar {
            var: "BUNDLEBOX_JOIN_MODE".to_string(),
            reason,
        })?;

    Ok(AppConfig {
        env,
        log_level,
        store_domain,
        storefront_token,
        storefront_api_version,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_secs,
        bundle: BundleSettings {
            namespace,
            default_selection,
            join_mode,
        },
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "BUNDLEBOX_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
