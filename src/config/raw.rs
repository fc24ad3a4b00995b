use duration_str::deserialize_option_duration;
use serde::Deserialize;
use std::{path::PathBuf, time::Duration};

const DEFAULT_CONFIG_FILE: &str = include_str!("smartcity.default.toml");

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub api: Option<Api>,
    pub session: Option<Session>,
    pub confirm: Option<Confirm>,
}

impl Default for Config {
    fn default() -> Self {
        let cfg: Self = toml::from_str(DEFAULT_CONFIG_FILE).expect("Default configuration");
        cfg
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Api {
    pub base_url: String,
    #[serde(default, deserialize_with = "deserialize_option_duration")]
    pub timeout: Option<Duration>,
}

impl Default for Api {
    fn default() -> Self {
        Config::default().api.expect("API configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Session {
    pub dir: PathBuf,
}

impl Default for Session {
    fn default() -> Self {
        Config::default().session.expect("Session configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Confirm {
    pub assume_yes: bool,
}

impl Default for Confirm {
    fn default() -> Self {
        Config::default().confirm.expect("Confirm configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_default_config_from_file() {
        let cfg: Config = toml::from_str(DEFAULT_CONFIG_FILE).unwrap();
        assert!(cfg.api.is_some());
        assert!(cfg.session.is_some());
        assert!(cfg.confirm.is_some());
    }

    #[test]
    fn default_api_config() {
        let api = Api::default();
        assert_eq!(api.base_url, "http://localhost:5001/api");
        assert_eq!(api.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn timeout_is_optional() {
        let cfg: Config = toml::from_str(
            r#"
            [api]
            base-url = "https://smartcity.example.org/api"
            "#,
        )
        .unwrap();
        let api = cfg.api.unwrap();
        assert!(api.timeout.is_none());
        assert!(cfg.session.is_none());
    }
}
