use std::collections::BTreeMap;

use camino::{Utf8Path, Utf8PathBuf};
use eyre::WrapErr;
use hubctl_client::host::normalize_hostname;
use serde::{Deserialize, Serialize};
use tokio::fs;
use url::Url;

use crate::defaults::CONFIG_FILE_NAME;

/// Per-host settings read from `hosts.toml`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub hosts: BTreeMap<String, HostConfig>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct HostConfig {
    pub token: Option<String>,
    pub api_url: Option<Url>,
}

impl Config {
    pub async fn load(config_dir: &Utf8Path) -> eyre::Result<Self> {
        let path = Self::config_path(config_dir);

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .await
            .wrap_err_with(|| format!("failed to read {path}"))?;

        let config = toml::from_str(&contents).wrap_err_with(|| format!("failed to parse {path}"))?;

        Ok(config)
    }

    pub fn config_path(config_dir: &Utf8Path) -> Utf8PathBuf {
        config_dir.join(CONFIG_FILE_NAME)
    }

    /// Settings for `host`, matching configured names after normalization.
    pub fn host(&self, host: &str) -> Option<&HostConfig> {
        let host = normalize_hostname(host);

        self.hosts
            .iter()
            .find(|(name, _)| normalize_hostname(name) == host)
            .map(|(_, config)| config)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    fn utf8(path: &std::path::Path) -> &Utf8Path {
        Utf8Path::from_path(path).unwrap()
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_config() {
        let temp = tempdir().unwrap();

        let config = Config::load(utf8(temp.path())).await.unwrap();
        assert!(config.hosts.is_empty());
    }

    #[tokio::test]
    async fn test_load_hosts() {
        let temp = tempdir().unwrap();
        std::fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            r#"
[hosts."GitHub.com"]
token = "gho_abc"

[hosts."ghe.example.com"]
token = "ghe_def"
api_url = "https://ghe.example.com/api/v3/"
"#,
        )
        .unwrap();

        let config = Config::load(utf8(temp.path())).await.unwrap();

        let github = config.host("github.com").expect("github.com configured");
        assert_eq!(github.token.as_deref(), Some("gho_abc"));
        assert!(github.api_url.is_none());

        let ghe = config.host("ghe.example.com").expect("ghe configured");
        assert_eq!(
            ghe.api_url.as_ref().map(Url::as_str),
            Some("https://ghe.example.com/api/v3/")
        );

        assert!(config.host("gitlab.com").is_none());
    }

    #[tokio::test]
    async fn test_invalid_file_reports_path() {
        let temp = tempdir().unwrap();
        std::fs::write(temp.path().join(CONFIG_FILE_NAME), "hosts = 42").unwrap();

        let err = Config::load(utf8(temp.path())).await.unwrap_err();
        assert!(err.to_string().contains(CONFIG_FILE_NAME));
    }
}
