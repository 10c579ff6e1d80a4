use anyhow::{Result, anyhow};
use config::{Config, File};
use serde::Deserialize;
use std::time::Duration;

/// Environment variable that overrides `api.base_url`.
pub const API_URL_ENV: &str = "NETBACK_API_URL";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub api: Api,
    pub auth: Auth,
    pub log: Log,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Api {
    pub base_url: String, // absolute, or relative to `origin`
    pub origin: String,
    pub timeout_secs: u64,
    pub with_credentials: bool,
}

impl Api {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Auth {
    pub refresh_wait_secs: u64,
    pub login_path: String,
    pub csrf_cookie: String,
    pub csrf_header: String,
}

impl Auth {
    pub fn refresh_wait(&self) -> Duration {
        Duration::from_secs(self.refresh_wait_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Log {
    pub filter: String,
}

#[cfg(debug_assertions)]
const SETTINGS_PATH: &str = "settings/dev.toml";
#[cfg(not(debug_assertions))]
const SETTINGS_PATH: &str = "settings/release.toml";

pub fn parse_settings(path: Option<&str>) -> Result<Settings> {
    let api_url = std::env::var(API_URL_ENV).ok().filter(|v| !v.is_empty());
    load_settings(path, api_url)
}

fn load_settings(path: Option<&str>, api_url: Option<String>) -> Result<Settings> {
    // The bundled file is optional; an explicit path must exist.
    let file = match path {
        Some(path) => File::with_name(path).required(true),
        None => File::with_name(SETTINGS_PATH).required(false),
    };

    let settings: Settings = Config::builder()
        .set_default("api.base_url", "/api")?
        .set_default("api.origin", "http://localhost")?
        .set_default("api.timeout_secs", 15)?
        .set_default("api.with_credentials", true)?
        .set_default("auth.refresh_wait_secs", 30)?
        .set_default("auth.login_path", "/")?
        .set_default("auth.csrf_cookie", "XSRF-TOKEN")?
        .set_default("auth.csrf_header", "X-CSRF-Token")?
        .set_default("log.filter", "info")?
        .add_source(file)
        .set_override_option("api.base_url", api_url)?
        .build()
        .map_err(|e| anyhow!(e))?
        .try_deserialize()
        .map_err(|e| anyhow!(e))?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_keys() {
        let settings = load_settings(None, None).unwrap();
        assert_eq!(settings.api.timeout(), Duration::from_secs(15));
        assert_eq!(settings.auth.csrf_cookie, "XSRF-TOKEN");
        assert_eq!(settings.auth.csrf_header, "X-CSRF-Token");
        assert_eq!(settings.auth.login_path, "/");
        assert!(settings.api.with_credentials);
    }

    #[test]
    fn env_override_replaces_base_url() {
        let settings =
            load_settings(None, Some("https://netback.example/api".to_string())).unwrap();
        assert_eq!(settings.api.base_url, "https://netback.example/api");
    }

    #[test]
    fn explicit_path_must_exist() {
        assert!(load_settings(Some("settings/does-not-exist.toml"), None).is_err());
        assert!(load_settings(Some(""), None).is_err());
    }
}
