use crate::app_config::{AppConfig, EmailSettings};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a `HashMap`
/// lookup instead of `set_var`/`remove_var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let or_default = |var: &str, default: &str| -> String {
        optional(var).unwrap_or_else(|| default.to_string())
    };

    let parse_u16 = |var: &str, default: &str| -> Result<u16, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u32>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let reddit_client_id = require("REDDIT_CLIENT_ID")?;
    let reddit_client_secret = require("REDDIT_CLIENT_SECRET")?;
    let reddit_user_agent = or_default("REDDIT_USER_AGENT", "WeeklyReportBot/1.0");
    let reddit_oauth = parse_bool(
        "FITWATCH_REDDIT_OAUTH",
        &or_default("FITWATCH_REDDIT_OAUTH", "false"),
    )?;

    let email = EmailSettings {
        from: optional("EMAIL_FROM"),
        password: optional("EMAIL_PASSWORD"),
        to: optional("EMAIL_TO"),
        smtp_server: or_default("SMTP_SERVER", "smtp.office365.com"),
        smtp_port: parse_u16("SMTP_PORT", "587")?,
    };

    let log_level = or_default("FITWATCH_LOG_LEVEL", "info");
    let days_back = parse_u32("FITWATCH_DAYS_BACK", "7")?;
    let limit_per_channel = parse_u32("FITWATCH_LIMIT_PER_CHANNEL", "50")?;
    if limit_per_channel == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "FITWATCH_LIMIT_PER_CHANNEL".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    let request_delay_ms = parse_u64("FITWATCH_REQUEST_DELAY_MS", "1000")?;
    let request_timeout_secs = parse_u64("FITWATCH_REQUEST_TIMEOUT_SECS", "30")?;
    let report_prefix = or_default("FITWATCH_REPORT_PREFIX", "reddit_fitness_report");
    let output_dir = PathBuf::from(or_default("FITWATCH_OUTPUT_DIR", "."));
    let watchlist_path = optional("FITWATCH_WATCHLIST_PATH").map(PathBuf::from);

    Ok(AppConfig {
        reddit_client_id,
        reddit_client_secret,
        reddit_user_agent,
        reddit_oauth,
        email,
        log_level,
        days_back,
        limit_per_channel,
        request_delay_ms,
        request_timeout_secs,
        report_prefix,
        output_dir,
        watchlist_path,
    })
}

fn parse_bool(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected a boolean, got '{other}'"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    /// Returns a map with all required env vars populated.
    fn full_env<'a>() -> HashMap<&'a str, &'a str> {
        let mut m = HashMap::new();
        m.insert("REDDIT_CLIENT_ID", "client-id");
        m.insert("REDDIT_CLIENT_SECRET", "client-secret");
        m
    }

    #[test]
    fn build_app_config_fails_without_client_id() {
        let map: HashMap<&str, &str> = HashMap::new();
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "REDDIT_CLIENT_ID"),
            "expected MissingEnvVar(REDDIT_CLIENT_ID), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_fails_without_client_secret() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("REDDIT_CLIENT_ID", "client-id");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "REDDIT_CLIENT_SECRET"),
            "expected MissingEnvVar(REDDIT_CLIENT_SECRET), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_treats_blank_required_value_as_missing() {
        let mut map = full_env();
        map.insert("REDDIT_CLIENT_SECRET", "   ");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "REDDIT_CLIENT_SECRET"),
            "expected MissingEnvVar(REDDIT_CLIENT_SECRET), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_succeeds_with_all_required_vars() {
        let map = full_env();
        let result = build_app_config(lookup_from_map(&map));
        assert!(result.is_ok(), "expected Ok, got: {result:?}");
        let cfg = result.unwrap();
        assert_eq!(cfg.reddit_client_id, "client-id");
        assert_eq!(cfg.reddit_user_agent, "WeeklyReportBot/1.0");
        assert!(!cfg.reddit_oauth);
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.days_back, 7);
        assert_eq!(cfg.limit_per_channel, 50);
        assert_eq!(cfg.request_delay_ms, 1000);
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.report_prefix, "reddit_fitness_report");
        assert_eq!(cfg.output_dir, std::path::PathBuf::from("."));
        assert!(cfg.watchlist_path.is_none());
        assert_eq!(cfg.email.smtp_server, "smtp.office365.com");
        assert_eq!(cfg.email.smtp_port, 587);
        assert!(!cfg.email.is_configured());
    }

    #[test]
    fn email_settings_are_read_when_present() {
        let mut map = full_env();
        map.insert("EMAIL_FROM", "bot@example.com");
        map.insert("EMAIL_PASSWORD", "app-password");
        map.insert("EMAIL_TO", "team@example.com");
        map.insert("SMTP_SERVER", "smtp.example.com");
        map.insert("SMTP_PORT", "2525");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!(cfg.email.is_configured());
        assert_eq!(cfg.email.smtp_server, "smtp.example.com");
        assert_eq!(cfg.email.smtp_port, 2525);
    }

    #[test]
    fn empty_email_password_is_absent_not_an_error() {
        let mut map = full_env();
        map.insert("EMAIL_FROM", "bot@example.com");
        map.insert("EMAIL_PASSWORD", "");
        map.insert("EMAIL_TO", "team@example.com");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!(cfg.email.password.is_none());
        assert!(!cfg.email.is_configured());
    }

    #[test]
    fn invalid_smtp_port_is_rejected() {
        let mut map = full_env();
        map.insert("SMTP_PORT", "not-a-port");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SMTP_PORT"),
            "expected InvalidEnvVar(SMTP_PORT), got: {result:?}"
        );
    }

    #[test]
    fn days_back_override() {
        let mut map = full_env();
        map.insert("FITWATCH_DAYS_BACK", "14");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.days_back, 14);
    }

    #[test]
    fn days_back_invalid() {
        let mut map = full_env();
        map.insert("FITWATCH_DAYS_BACK", "a week");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "FITWATCH_DAYS_BACK"),
            "expected InvalidEnvVar(FITWATCH_DAYS_BACK), got: {result:?}"
        );
    }

    #[test]
    fn zero_limit_per_channel_is_rejected() {
        let mut map = full_env();
        map.insert("FITWATCH_LIMIT_PER_CHANNEL", "0");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "FITWATCH_LIMIT_PER_CHANNEL"),
            "expected InvalidEnvVar(FITWATCH_LIMIT_PER_CHANNEL), got: {result:?}"
        );
    }

    #[test]
    fn oauth_flag_accepts_common_spellings() {
        for raw in ["true", "1", "YES", "on"] {
            let mut map = full_env();
            map.insert("FITWATCH_REDDIT_OAUTH", raw);
            let cfg = build_app_config(lookup_from_map(&map)).unwrap();
            assert!(cfg.reddit_oauth, "expected '{raw}' to enable oauth");
        }
    }

    #[test]
    fn oauth_flag_rejects_garbage() {
        let mut map = full_env();
        map.insert("FITWATCH_REDDIT_OAUTH", "maybe");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "FITWATCH_REDDIT_OAUTH"),
            "expected InvalidEnvVar(FITWATCH_REDDIT_OAUTH), got: {result:?}"
        );
    }

    #[test]
    fn watchlist_path_and_output_dir_overrides() {
        let mut map = full_env();
        map.insert("FITWATCH_WATCHLIST_PATH", "./config/watchlist.yaml");
        map.insert("FITWATCH_OUTPUT_DIR", "/tmp/reports");
        map.insert("FITWATCH_REPORT_PREFIX", "weekly");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(
            cfg.watchlist_path,
            Some(std::path::PathBuf::from("./config/watchlist.yaml"))
        );
        assert_eq!(cfg.output_dir, std::path::PathBuf::from("/tmp/reports"));
        assert_eq!(cfg.report_prefix, "weekly");
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let map = full_env();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("client-secret"));
        assert!(!rendered.contains("client-id"));
    }
}
