//! Seams between the client and the code that drives it.

use async_trait::async_trait;
use hubctl_primitives::repo::RepositoryIdentity;

use crate::errors::ClientError;
use crate::storage::AuthToken;

/// Source of credentials for a host.
#[async_trait]
pub trait ClientStorage: Send + Sync {
    /// Token for `host`, or `None` when nothing is configured.
    async fn load_token(&self, host: &str) -> Result<Option<AuthToken>, ClientError>;
}

/// Repository operations against the remote host.
#[async_trait]
pub trait RepositoryApi: Send + Sync {
    /// Login of the user owning the active credentials.
    async fn current_login(&self) -> Result<String, ClientError>;

    /// Irrevocably delete `repo`. Never retried.
    async fn delete_repository(&self, repo: &RepositoryIdentity) -> Result<(), ClientError>;
}
