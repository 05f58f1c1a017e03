use std::path::PathBuf;

use crate::error::ConfigError;

/// Application configuration, read once at startup from the environment.
///
/// Every variable has a default; deployments only override what they need.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// Path to the rules file (`platforms.yaml`).
    pub rules_path: PathBuf,
    /// Total timeout for a product-page GET, in seconds.
    pub fetch_timeout_secs: u64,
    /// Timeout for one HEAD hop during shortener expansion, in seconds.
    pub head_timeout_secs: u64,
    /// Bound on the shortener redirect-following loop.
    pub max_redirect_hops: usize,
    /// Browser-like user agent sent with every request.
    pub user_agent: String,
    /// When true, a page screenshot (if the collaborator yields one)
    /// replaces the scraped product image in photo replies.
    pub prefer_screenshot: bool,
}

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (iPhone; CPU iPhone OS 15_0 like Mac OS X) AppleWebKit/605.1.15";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a set variable has an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let log_level = or_default("DEALPOST_LOG_LEVEL", "info");
    let rules_path = PathBuf::from(or_default("DEALPOST_RULES_PATH", "./config/platforms.yaml"));
    let fetch_timeout_secs = parse_u64("DEALPOST_FETCH_TIMEOUT_SECS", "10")?;
    let head_timeout_secs = parse_u64("DEALPOST_HEAD_TIMEOUT_SECS", "5")?;
    let max_redirect_hops = parse_usize("DEALPOST_MAX_REDIRECT_HOPS", "5")?;
    let user_agent = or_default("DEALPOST_USER_AGENT", DEFAULT_USER_AGENT);
    let prefer_screenshot = parse_bool(&or_default("DEALPOST_PREFER_SCREENSHOT", "false"));

    Ok(AppConfig {
        log_level,
        rules_path,
        fetch_timeout_secs,
        head_timeout_secs,
        max_redirect_hops,
        user_agent,
        prefer_screenshot,
    })
}

fn parse_bool(raw: &str) -> bool {
    matches!(raw, "1" | "true" | "TRUE" | "yes" | "YES")
}
