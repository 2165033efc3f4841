//! hubctl client library
//!
//! Authenticated access to the REST API of a repository host. The
//! [`ClientStorage`] trait supplies credentials and [`RepositoryApi`] is the
//! seam command code is written against; [`Client`] implements it over
//! HTTP.

pub mod client;
pub mod connection;
pub mod errors;
pub mod host;
pub mod storage;
pub mod traits;

// Re-export main types for easy access
pub use client::Client;
pub use connection::ConnectionInfo;
pub use errors::{ApiError, ApiErrorKind, ClientError};
pub use storage::AuthToken;
pub use traits::{ClientStorage, RepositoryApi};
pub use url::Url;

/// Current version of the client library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
