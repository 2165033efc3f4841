//! Connection management for hubctl client
//!
//! A connection pairs a REST base URL with the credentials for one host.
//! Every request is sent exactly once: failures are reported, never retried.

use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::errors::{ApiError, ClientError};
use crate::host::with_trailing_slash;
use crate::storage::AuthToken;
use crate::traits::ClientStorage;

pub const ACCEPT_HEADER: &str = "application/vnd.github+json";

pub const USER_AGENT: &str = concat!("hubctl/", env!("CARGO_PKG_VERSION"));

#[derive(Clone, Debug)]
pub struct ConnectionInfo {
    pub api_url: Url,
    pub host: String,
    pub client: Client,
    token: AuthToken,
}

impl ConnectionInfo {
    pub fn new(api_url: Url, host: String, token: AuthToken) -> Result<Self, ClientError> {
        if api_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(api_url));
        }

        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            api_url: with_trailing_slash(api_url),
            host,
            client,
            token,
        })
    }

    /// Builds a connection with the token `storage` holds for `host`.
    pub async fn from_storage<S>(api_url: Url, host: &str, storage: &S) -> Result<Self, ClientError>
    where
        S: ClientStorage + ?Sized,
    {
        let token = storage
            .load_token(host)
            .await?
            .ok_or_else(|| ClientError::MissingToken {
                host: host.to_owned(),
            })?;

        debug!(%host, source = %token.source, "Loaded credentials");

        Self::new(api_url, host.to_owned(), token)
    }

    /// `api_url` extended with percent-encoded path `segments`.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.api_url.clone();

        let _ = url
            .path_segments_mut()
            .map_err(|()| ClientError::InvalidBaseUrl(self.api_url.clone()))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    pub async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ClientError> {
        let response = self.send(Method::GET, segments).await?;

        response.json::<T>().await.map_err(Into::into)
    }

    pub async fn delete(&self, segments: &[&str]) -> Result<(), ClientError> {
        let _response = self.send(Method::DELETE, segments).await?;

        Ok(())
    }

    async fn send(&self, method: Method, segments: &[&str]) -> Result<Response, ClientError> {
        let url = self.endpoint(segments)?;

        debug!(%method, %url, "Sending request");

        let response = self
            .client
            .request(method, url.clone())
            .header(AUTHORIZATION, self.token.auth_header())
            .header(ACCEPT, ACCEPT_HEADER)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let headers = response.headers().clone();
        let body = response.text().await.unwrap_or_default();

        Err(ApiError::new(status, url, &headers, &body).into())
    }
}
