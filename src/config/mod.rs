use anyhow::{anyhow, Result};
use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};
use url::Url;

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "smartcity.toml";

const ENV_NAME_API_URL: &str = "SMARTCITY_API_URL";

pub struct Config {
    pub api: Api,
    pub session: Session,
    pub confirm: Confirm,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::debug!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::debug!(
                        "{} not found => load default configuration.",
                        file_path.display()
                    );
                    Ok(raw::Config::default())
                }
                _ => Err(err),
            }?,
        };
        let mut cfg = Self::try_from(raw_config)?;
        if let Ok(api_url) = env::var(ENV_NAME_API_URL) {
            cfg.api.base_url = parse_base_url(api_url)?;
        }
        Ok(cfg)
    }
}

pub struct Api {
    pub base_url: String,
    /// Timeout of a single HTTP request.
    pub timeout: Option<Duration>,
}

pub struct Session {
    /// File system directory of the JSON session store.
    pub dir: PathBuf,
}

pub struct Confirm {
    pub assume_yes: bool,
}

fn parse_base_url(url: String) -> Result<String> {
    let url = url.trim();
    let parsed =
        Url::parse(url).map_err(|err| anyhow!("Invalid API base URL '{url}': {err}"))?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host().is_none() {
        return Err(anyhow!("Invalid API base URL '{url}': expected an http(s) URL"));
    }
    Ok(url.trim_end_matches('/').to_owned())
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config {
            api,
            session,
            confirm,
        } = from;

        let raw::Api { base_url, timeout } = api.unwrap_or_default();
        let api = Api {
            base_url: parse_base_url(base_url)?,
            timeout,
        };

        let raw::Session { dir } = session.unwrap_or_default();
        let session = Session { dir };

        let raw::Confirm { assume_yes } = confirm.unwrap_or_default();
        let confirm = Confirm { assume_yes };

        Ok(Self {
            api,
            session,
            confirm,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_default_config() {
        let file: Option<&Path> = None;
        let _: Config = Config::try_load_from_file_or_default(file).unwrap();
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let raw: raw::Config = toml::from_str(
            r#"
            [confirm]
            assume-yes = true
            "#,
        )
        .unwrap();
        let cfg = Config::try_from(raw).unwrap();
        assert!(cfg.confirm.assume_yes);
        assert_eq!(cfg.api.base_url, "http://localhost:5001/api");
        assert_eq!(cfg.session.dir, PathBuf::from(".smartcity"));
    }

    #[test]
    fn reject_invalid_base_url() {
        let raw: raw::Config = toml::from_str(
            r#"
            [api]
            base-url = "localhost:5001"
            "#,
        )
        .unwrap();
        assert!(Config::try_from(raw).is_err());
        assert!(parse_base_url("http://".into()).is_err());
        assert!(parse_base_url("http://exa mple/api".into()).is_err());
        assert!(parse_base_url("ftp://city.example.org/api".into()).is_err());
        assert!(parse_base_url("not a url".into()).is_err());
        assert_eq!(
            parse_base_url("https://city.example.org/api/ ".into()).unwrap(),
            "https://city.example.org/api"
        );
    }

    #[test]
    fn load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("smartcity.toml");
        fs::write(&path, "[session]\ndir = \"/tmp/smartcity-session\"\n").unwrap();
        let cfg = Config::try_load_from_file_or_default(Some(&path)).unwrap();
        assert_eq!(cfg.session.dir, PathBuf::from("/tmp/smartcity-session"));
    }
}
