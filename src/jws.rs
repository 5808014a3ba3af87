//! See [RFC 8555 §6.2](https://datatracker.ietf.org/doc/html/rfc8555#section-6.2).

use serde::{Deserialize, Serialize};

use crate::{
    acc::AcmeKey,
    dir::Nonce,
    error::{Error, Result},
    util::base64url,
};

/// JWS Protected Header as sent to the ACME server.
///
/// Without a known account URL the public key is embedded as `jwk`, which is what older
/// (pre RFC 8555) servers expect for every request. With an account URL the header carries
/// `kid` instead. The two are mutually exclusive.
#[derive(Debug, Serialize, Deserialize, Default)]
pub(crate) struct JwsProtectedHeader {
    /// Algorithm. Always "ES256" since account keys are P-256.
    alg: String,

    /// Anti-replay token; used for exactly one request.
    ///
    /// As defined in [RFC 8555 §6.5].
    ///
    /// [RFC 8555 §6.5]: https://datatracker.ietf.org/doc/html/rfc8555#section-6.5
    nonce: String,

    /// Target URL of the request, see [RFC 8555 §6.4].
    ///
    /// [RFC 8555 §6.4]: https://datatracker.ietf.org/doc/html/rfc8555#section-6.4
    url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    jwk: Option<Jwk>,

    #[serde(skip_serializing_if = "Option::is_none")]
    kid: Option<String>,
}

impl JwsProtectedHeader {
    pub(crate) fn new_jwk(jwk: Jwk, url: &str, nonce: Nonce) -> Self {
        JwsProtectedHeader {
            alg: "ES256".to_owned(),
            url: url.to_owned(),
            nonce: nonce.into_inner(),
            jwk: Some(jwk),
            ..Default::default()
        }
    }

    pub(crate) fn new_kid(kid: &str, url: &str, nonce: Nonce) -> Self {
        JwsProtectedHeader {
            alg: "ES256".to_owned(),
            url: url.to_owned(),
            nonce: nonce.into_inner(),
            kid: Some(kid.to_owned()),
            ..Default::default()
        }
    }

    /// Picks `kid` when the key knows its account URL, `jwk` otherwise.
    pub(crate) fn for_key(key: &AcmeKey, url: &str, nonce: Nonce) -> Result<Self> {
        match key.key_id() {
            Some(kid) => Ok(Self::new_kid(kid, url, nonce)),
            None => Ok(Self::new_jwk(Jwk::try_from(key)?, url, nonce)),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub(crate) struct Jwk {
    alg: String,
    crv: String,
    kty: String,
    #[serde(rename = "use")]
    _use: String,
    x: String,
    y: String,
}

impl TryFrom<&AcmeKey> for Jwk {
    type Error = Error;

    fn try_from(a: &AcmeKey) -> Result<Self> {
        let point = a.signing_key().verifying_key().to_encoded_point(false);

        let (Some(x), Some(y)) = (point.x(), point.y()) else {
            return Err(Error::Sign("public key is the identity point".to_owned()));
        };

        Ok(Jwk {
            alg: "ES256".to_owned(),
            kty: "EC".to_owned(),
            crv: "P-256".to_owned(),
            _use: "sig".to_owned(),
            x: base64url(x),
            y: base64url(y),
        })
    }
}

/// <https://datatracker.ietf.org/doc/html/rfc7515#section-7.2.2>
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct FlattenedJsonJws {
    pub(crate) protected: String,
    pub(crate) payload: String,
    pub(crate) signature: String,
}

impl FlattenedJsonJws {
    pub(crate) fn new(protected: String, payload: String, signature: String) -> Self {
        FlattenedJsonJws {
            protected,
            payload,
            signature,
        }
    }
}
