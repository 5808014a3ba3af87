use thiserror::Error;

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failure modes of a deactivation run.
#[derive(Debug, Error)]
pub enum Error {
    /// The account key JSON could not be turned into a P-256 signing key.
    #[error("invalid account key: {0}")]
    KeyParse(String),

    /// The directory endpoint did not hand out a usable `Replay-Nonce`.
    #[error("acme server did not respond with a proper nonce header")]
    NoNonce,

    /// Network level failure (connect, DNS, timeout, broken body).
    #[error("transport error")]
    Transport(#[source] BoxError),

    /// The server rejected the request; carries the server-provided detail.
    #[error("{0}")]
    Protocol(String),

    /// The response body did not have the expected JSON shape.
    #[error("unexpected response body")]
    ResponseParse(#[source] serde_json::Error),

    /// The server still reports the authorization as pending.
    #[error("authz still pending")]
    StillPending,

    #[error("could not sign request: {0}")]
    Sign(String),

    #[error("could not encode request")]
    Encode(#[source] serde_json::Error),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(Box::new(err))
    }
}
