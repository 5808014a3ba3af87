//! Deactivation of a single authorization.
//!
//! See [RFC 8555 §7.5.2](https://datatracker.ietf.org/doc/html/rfc8555#section-7.5.2).

use http::StatusCode;

use crate::{
    acc::AcmeKey,
    api::{self, AuthorizationStatus},
    dir::NonceSource,
    error::{BoxError, Error, Result},
    trans::Transport,
    util::{read_body, read_json},
};

/// How a deactivation attempt ended, when the server did not reject it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The server no longer reports the authorization as pending.
    ///
    /// Carries the reported status, if the server sent one.
    Success(Option<AuthorizationStatus>),

    /// The server answered but the authorization is still pending.
    StillPending,
}

impl Outcome {
    /// Turns [`Outcome::StillPending`] into [`Error::StillPending`].
    pub fn into_result(self) -> Result<Option<AuthorizationStatus>> {
        match self {
            Outcome::Success(status) => Ok(status),
            Outcome::StillPending => Err(Error::StillPending),
        }
    }
}

/// Deactivates authorizations on behalf of an account.
///
/// Holds the account key and the [`NonceSource`] that is consulted before every signature.
#[derive(Debug)]
pub struct Deactivator<N> {
    transport: Transport<N>,
}

impl<N: NonceSource> Deactivator<N> {
    /// Create a deactivator from the JSON encoded account key.
    ///
    /// The key is an object with the big integers `X`, `Y` (public point) and `D` (private
    /// scalar) of a P-256 key.
    pub fn new(account_key_json: &str, nonce_source: N) -> Result<Self> {
        let acme_key = AcmeKey::from_json(account_key_json)?;

        Ok(Deactivator {
            transport: Transport::new(acme_key, nonce_source)?,
        })
    }

    /// Sign requests with the account URL (`kid`) instead of embedding the public key.
    pub fn with_key_id(mut self, account_url: impl Into<String>) -> Self {
        self.transport.set_key_id(account_url.into());
        self
    }

    /// The nonce source requests are signed with.
    pub fn nonce_source(&self) -> &N {
        self.transport.nonce_source()
    }

    /// Ask the server to deactivate the authorization at `url`.
    ///
    /// Makes one nonce request and one POST. A server error document becomes
    /// [`Error::Protocol`]; a pending authorization is reported as [`Outcome::StillPending`].
    pub async fn deactivate(&self, url: &str) -> Result<Outcome> {
        let res = self.transport.call(url, &api::Deactivation::new()).await?;
        read_outcome(http::Response::from(res)).await
    }
}

/// Classifies the response to a deactivation request.
///
/// Takes ownership of the response: the body is read to the end before it is decoded and is
/// dropped on every path out of this function.
pub(crate) async fn read_outcome<B>(res: http::Response<B>) -> Result<Outcome>
where
    B: http_body::Body,
    B::Error: Into<BoxError>,
{
    let (parts, body) = res.into_parts();
    let body = read_body(body).await?;

    classify(parts.status, &body)
}

fn classify(status: StatusCode, body: &[u8]) -> Result<Outcome> {
    log::debug!("Server answered {status}");

    if status.as_u16() >= 400 {
        let problem = read_json::<api::Problem>(body)?;

        log::debug!("Server problem: {problem}");

        if problem.is_bad_nonce() {
            log::warn!("Server rejected the nonce, a new attempt will fetch a fresh one");
        }

        return Err(Error::Protocol(problem.detail));
    }

    let authz = read_json::<api::Authorization>(body)?;

    if authz.is_pending() {
        return Ok(Outcome::StillPending);
    }

    Ok(Outcome::Success(authz.status))
}
