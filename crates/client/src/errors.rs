use core::fmt;
use std::collections::BTreeSet;

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Scopes granted to the token, as reported by the server.
pub const OAUTH_SCOPES_HEADER: &str = "x-oauth-scopes";

/// Scopes the endpoint accepts.
pub const ACCEPTED_OAUTH_SCOPES_HEADER: &str = "x-accepted-oauth-scopes";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("no authentication token configured for {host}")]
    MissingToken { host: String },

    #[error("invalid API URL: {0}")]
    InvalidBaseUrl(Url),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Url(#[from] url::ParseError),
}

impl ClientError {
    /// The remote error, when the server answered with a non-success status.
    #[must_use]
    pub const fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ApiErrorKind {
    /// The token lacks a scope the endpoint requires.
    InsufficientScope,
    Unauthorized,
    NotFound,
    Other,
}

/// Non-success response from the REST API.
#[derive(Clone, Debug, Serialize, Error)]
pub struct ApiError {
    pub status_code: u16,
    pub message: String,
    pub url: Url,
    pub missing_scope: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    #[serde(default)]
    errors: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

impl ApiError {
    pub(crate) fn new(status: StatusCode, url: Url, headers: &HeaderMap, body: &str) -> Self {
        let message = parse_message(body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_owned()
        });

        Self {
            status_code: status.as_u16(),
            message,
            missing_scope: missing_scope(status, headers),
            url,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ApiErrorKind {
        if self.missing_scope.is_some() {
            return ApiErrorKind::InsufficientScope;
        }

        match self.status_code {
            401 => ApiErrorKind::Unauthorized,
            404 => ApiErrorKind::NotFound,
            _ => ApiErrorKind::Other,
        }
    }

    fn host(&self) -> &str {
        self.url.host_str().unwrap_or("the host")
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}: {} ({})", self.status_code, self.message, self.url)?;

        if let Some(scope) = &self.missing_scope {
            write!(
                f,
                "\nThis API operation needs the {scope:?} scope. Grant it to the token used for {} and try again.",
                self.host()
            )?;
        }

        Ok(())
    }
}

fn parse_message(body: &str) -> Option<String> {
    let body = body.trim();

    if body.is_empty() {
        return None;
    }

    let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) else {
        return Some(body.to_owned());
    };

    let mut lines: Vec<String> = parsed.message.into_iter().collect();
    lines.extend(parsed.errors.into_iter().filter_map(|detail| detail.message));

    if lines.is_empty() {
        return Some(body.to_owned());
    }

    Some(lines.join("\n"))
}

/// First scope the endpoint accepts that the token was not granted.
///
/// Only client errors carry a hint, and only when the server reported the
/// token's scopes at all.
fn missing_scope(status: StatusCode, headers: &HeaderMap) -> Option<String> {
    if !status.is_client_error() || status == StatusCode::UNPROCESSABLE_ENTITY {
        return None;
    }

    let granted = headers.get(OAUTH_SCOPES_HEADER)?.to_str().ok()?;
    let accepted = headers
        .get(ACCEPTED_OAUTH_SCOPES_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    let mut have = BTreeSet::new();
    for scope in split_scopes(granted) {
        if let Some(resource) = scope.strip_prefix("admin:") {
            let _ = have.insert(format!("write:{resource}"));
            let _ = have.insert(format!("read:{resource}"));
        } else if let Some(resource) = scope.strip_prefix("write:") {
            let _ = have.insert(format!("read:{resource}"));
        }
        let _ = have.insert(scope.to_owned());
    }

    split_scopes(accepted)
        .find(|scope| !have.contains(*scope))
        .map(str::to_owned)
}

fn split_scopes(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|scope| !scope.is_empty())
}
