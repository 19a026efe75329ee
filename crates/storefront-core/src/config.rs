use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Reads `STOREFRONT_*` settings, loading a `.env` file first when one exists.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Same as [`load_app_config`] but reads only the process environment.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Builds the config from an injected variable lookup; unset variables take
/// their defaults.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let var_or = |name: &str, default: &str| lookup(name).unwrap_or_else(|_| default.to_string());

    let env = parse_environment(&var_or("STOREFRONT_ENV", "development"))?;
    let log_level = var_or("STOREFRONT_LOG_LEVEL", "info");
    let collections_path = PathBuf::from(var_or(
        "STOREFRONT_COLLECTIONS_PATH",
        "./config/collections.yaml",
    ));
    let output_dir = PathBuf::from(var_or("STOREFRONT_OUTPUT_DIR", "."));
    let share_link_base = parse_share_link_base(&var_or(
        "STOREFRONT_SHARE_LINK_BASE",
        "https://www.etsy.com/listing",
    ))?;

    Ok(AppConfig {
        env,
        log_level,
        collections_path,
        output_dir,
        share_link_base,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "STOREFRONT_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

/// Validates the share-link prefix and strips trailing slashes so
/// `{base}/{listing_id}` never doubles up.
fn parse_share_link_base(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "STOREFRONT_SHARE_LINK_BASE".to_string(),
            reason: format!("'{raw}' must start with http:// or https://"),
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
