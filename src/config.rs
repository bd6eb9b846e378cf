use crate::client::DEFAULT_USER_AGENT;
use crate::error::{Error, Result};
use crate::snapshot::Sanitize;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use url::Url;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scraper: Scraper,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Scraper {
    /// Galleries are archived under `<output_dir>/<name>`
    pub output_dir: PathBuf,
    /// User agent for the json endpoint and the thumbnails
    pub user_agent: String,
    /// Base of the `get-gallery` endpoint, derived from the page url when unset
    pub api_base: Option<Url>,
    /// Proxy for every request, e.g. `socks5://127.0.0.1:1080`
    pub proxy: Option<String>,
    /// Maximum number of thumbnail downloads in flight
    pub threads: usize,
    /// Check the payload against the typed model before archiving
    pub strict: bool,
    pub sanitize: Sanitize,
}

impl Default for Scraper {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("galleries"),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            api_base: None,
            proxy: None,
            threads: 1,
            strict: false,
            sanitize: Sanitize::default(),
        }
    }
}

impl Config {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(Error::io(path))?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| Error::Config(e.to_string()))?;
        if config.scraper.threads == 0 {
            return Err(Error::Config("threads must be at least 1".into()));
        }
        Ok(config)
    }
}
