//! Error taxonomy for the SDK runtime.

use reqwest::StatusCode;

/// Errors surfaced by [`crate::BaseClient`] and [`crate::Poller`].
///
/// Polling errors are returned to the caller of the wait call and never
/// retried automatically; retry policy belongs to the caller.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request could not be built (bad endpoint or URI).
    #[error("building request for {uri}: {message}")]
    BuildRequest { uri: String, message: String },

    /// The underlying transport failed before a status code was available.
    #[error("sending request: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a status code outside the operation's
    /// expected set.
    #[error("unexpected status {status} (expected one of {allowed:?})")]
    UnexpectedStatus {
        status: StatusCode,
        allowed: Vec<u16>,
    },

    /// The response body could not be decoded as the expected JSON shape.
    #[error("decoding response from {uri}: {message}")]
    Decode { uri: String, message: String },

    /// A mutating response carried neither an async-operation tracking
    /// header nor a resource-location header, so there is nothing to poll.
    #[error("the `Azure-AsyncOperation` and `Location` headers were empty")]
    NoPollLocation,

    /// The retry-hint header was present but not an integer count of seconds.
    #[error("parsing `Retry-After` value {0:?} as seconds")]
    InvalidRetryAfter(String),

    /// The server reported the tracked operation reached a failed terminal
    /// state. Code and message are the server's own, when it supplied them.
    #[error("operation failed (code {code:?} / message {message:?})")]
    RemoteOperationFailed { code: String, message: String },

    /// A poll response carried a status value this runtime does not know.
    #[error("unrecognized operation status {0:?}")]
    UnrecognizedOperationStatus(String),
}
