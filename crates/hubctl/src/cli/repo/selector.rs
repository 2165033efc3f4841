//! Turns a `NAME` or `OWNER/NAME` argument into a repository identity.

use hubctl_client::RepositoryApi;
use hubctl_primitives::repo::{InvalidRepository, RepositoryIdentity, SEPARATOR};
use tracing::debug;

use crate::cli::repo::delete::DeleteError;

/// Resolves `selector`, asking `api` for the current login only when no
/// owner was given.
pub async fn resolve<A>(selector: &str, api: &A) -> Result<RepositoryIdentity, DeleteError>
where
    A: RepositoryApi + ?Sized,
{
    let selector = selector.trim();

    if selector.is_empty() {
        return Err(InvalidRepository::EmptyName.into());
    }

    if let Some((owner, name)) = selector.split_once(SEPARATOR) {
        return Ok(RepositoryIdentity::new(owner.trim(), name.trim())?);
    }

    let owner = api
        .current_login()
        .await
        .map_err(DeleteError::IdentityResolutionFailed)?;

    debug!(%owner, "Resolved repository owner from the authenticated user");

    Ok(RepositoryIdentity::new(owner.trim(), selector)?)
}
