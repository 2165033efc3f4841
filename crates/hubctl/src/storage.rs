use std::env;

use async_trait::async_trait;
use hubctl_client::host::{normalize_hostname, DEFAULT_HOST};
use hubctl_client::{AuthToken, ClientError, ClientStorage};

use crate::config::{Config, HostConfig};

/// Token for any host.
pub const TOKEN_ENV: &str = "HUBCTL_TOKEN";

/// Tokens honoured for the default host only.
pub const DEFAULT_HOST_TOKEN_ENVS: [&str; 2] = ["GH_TOKEN", "GITHUB_TOKEN"];

/// Tokens found in the process environment.
#[derive(Clone, Debug, Default)]
pub struct EnvTokens {
    vars: Vec<(&'static str, String)>,
}

impl EnvTokens {
    pub fn from_env() -> Self {
        let vars = [TOKEN_ENV]
            .into_iter()
            .chain(DEFAULT_HOST_TOKEN_ENVS)
            .filter_map(|name| {
                env::var(name)
                    .ok()
                    .filter(|value| !value.trim().is_empty())
                    .map(|value| (name, value))
            })
            .collect();

        Self { vars }
    }

    fn token_for(&self, host: &str) -> Option<AuthToken> {
        self.vars
            .iter()
            .find(|(name, _)| *name == TOKEN_ENV || host == DEFAULT_HOST)
            .map(|(name, value)| AuthToken::new(value.trim(), *name))
    }
}

/// Resolves tokens from the environment first, then from `hosts.toml`.
#[derive(Debug)]
pub struct ConfigTokenStorage {
    config: Config,
    env: EnvTokens,
}

impl ConfigTokenStorage {
    pub const fn new(config: Config, env: EnvTokens) -> Self {
        Self { config, env }
    }

    pub fn host(&self, host: &str) -> Option<&HostConfig> {
        self.config.host(host)
    }
}

#[async_trait]
impl ClientStorage for ConfigTokenStorage {
    async fn load_token(&self, host: &str) -> Result<Option<AuthToken>, ClientError> {
        let host = normalize_hostname(host);

        if let Some(token) = self.env.token_for(&host) {
            return Ok(Some(token));
        }

        let token = self
            .config
            .host(&host)
            .and_then(|config| config.token.as_deref())
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(|token| AuthToken::new(token, "hosts.toml"));

        Ok(token)
    }
}
