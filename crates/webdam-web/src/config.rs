use std::net::SocketAddr;
use std::path::PathBuf;

use serde::Deserialize;
use webdam_core::Config;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
    /// Serve a built-in folder tree instead of calling Webdam.
    #[serde(default)]
    pub demo: bool,
    #[serde(flatten)]
    pub core: Config,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            demo: false,
            core: Config::default(),
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8080))
}

impl ServerConfig {
    pub fn from_toml(contents: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn load() -> anyhow::Result<Self> {
        let config_path = std::env::var("WEBDAM_WEB_CONFIG").map(PathBuf::from).ok();

        let mut config = if let Some(path) = config_path {
            let contents = std::fs::read_to_string(&path)?;
            Self::from_toml(&contents)?
        } else {
            ServerConfig::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;

        if !config.demo && config.core.webdam.access_token.is_none() {
            tracing::warn!(
                "No Webdam access token configured. Set WEBDAM_ACCESS_TOKEN or run with demo = true."
            );
        }

        Ok(config)
    }

    /// Applies `WEBDAM_*` overrides looked up through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup("WEBDAM_ACCESS_TOKEN") {
            self.core.webdam.access_token = Some(token);
        }
        if let Some(url) = lookup("WEBDAM_BASE_URL") {
            self.core.webdam.base_url = url;
        }
        if let Some(addr) = lookup("WEBDAM_BIND_ADDR") {
            self.bind_addr = addr.parse()?;
        }
        if let Some(val) = lookup("WEBDAM_DEMO") {
            self.demo = matches!(val.as_str(), "1" | "true" | "yes");
        }
        Ok(())
    }
}
