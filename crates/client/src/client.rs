//! API client for repository hosts
//!
//! This module provides the repository operations hubctl issues against
//! the REST API of a single host.

use async_trait::async_trait;
use hubctl_primitives::repo::RepositoryIdentity;
use serde::Deserialize;
use tracing::info;
use url::Url;

use crate::connection::ConnectionInfo;
use crate::errors::ClientError;
use crate::traits::RepositoryApi;

#[derive(Debug, Deserialize)]
struct CurrentUser {
    login: String,
}

#[derive(Clone, Debug)]
pub struct Client {
    connection: ConnectionInfo,
}

impl Client {
    #[must_use]
    pub const fn new(connection: ConnectionInfo) -> Self {
        Self { connection }
    }

    #[must_use]
    pub const fn api_url(&self) -> &Url {
        &self.connection.api_url
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.connection.host
    }
}

#[async_trait]
impl RepositoryApi for Client {
    async fn current_login(&self) -> Result<String, ClientError> {
        let user: CurrentUser = self.connection.get(&["user"]).await?;

        Ok(user.login)
    }

    async fn delete_repository(&self, repo: &RepositoryIdentity) -> Result<(), ClientError> {
        self.connection
            .delete(&["repos", repo.owner(), repo.name()])
            .await?;

        info!(repository = %repo, host = %self.host(), "Deleted repository");

        Ok(())
    }
}
