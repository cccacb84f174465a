//! Error types for ghconf-sync.

use thiserror::Error;

/// A failed call against the remote state provider.
///
/// Every variant is recoverable at item or repository granularity, except
/// that [`RemoteError::AuthenticationFailed`] during the credential check or
/// repository listing aborts the run (see [`SyncError`]).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// Credentials were rejected outright (HTTP 401).
    #[error("authentication failed; check the GitHub token")]
    AuthenticationFailed,

    /// The repository or item does not exist, or is invisible to the token.
    #[error("not found: {resource}")]
    NotFound { resource: String },

    /// The token lacks the scope or permission for this call.
    #[error("permission denied: {resource}")]
    Forbidden { resource: String },

    /// Any other non-success response.
    #[error("remote rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Connection, TLS or timeout failure below HTTP.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body did not have the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

/// Fatal errors that abort a run before any repository is processed.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("GitHub rejected the credentials; check the token")]
    Authentication,

    #[error("failed to list repositories for {owner}: {source}")]
    RepositoryListing {
        owner: String,
        #[source]
        source: RemoteError,
    },
}
