use std::time::Duration;

use ecdsa::signature::Signer as _;
use serde::Serialize;

use crate::{
    acc::AcmeKey,
    dir::{Nonce, NonceSource},
    error::{Error, Result},
    jws::{FlattenedJsonJws, JwsProtectedHeader},
    req::{req_client, req_post},
    util::base64url,
};

/// Upper bound on the signed POST.
const POST_TIMEOUT: Duration = Duration::from_secs(30);

/// Signs payloads with the account key and sends them off.
///
/// Every call makes exactly one round trip to the nonce source followed by exactly one POST.
/// Nothing is retried, a rejected nonce surfaces as a protocol error.
#[derive(Debug)]
pub(crate) struct Transport<N> {
    acme_key: AcmeKey,
    nonce_source: N,
    client: reqwest::Client,
}

impl<N: NonceSource> Transport<N> {
    pub(crate) fn new(acme_key: AcmeKey, nonce_source: N) -> Result<Self> {
        Ok(Transport {
            acme_key,
            nonce_source,
            client: req_client(POST_TIMEOUT)?,
        })
    }

    /// Update the key ID once it is known.
    pub(crate) fn set_key_id(&mut self, kid: String) {
        self.acme_key.set_key_id(kid);
    }

    pub(crate) fn nonce_source(&self) -> &N {
        &self.nonce_source
    }

    /// Fetches a nonce, signs `payload` for `url` and produces the serialized JWS.
    pub(crate) async fn sign<T>(&self, url: &str, payload: &T) -> Result<String>
    where
        T: Serialize + ?Sized,
    {
        let nonce = self.nonce_source.fetch_nonce().await?;
        log::trace!("Signing with nonce {}", nonce.as_str());

        jws_with(&self.acme_key, url, nonce, payload)
    }

    /// Make a signed POST to `url`.
    pub(crate) async fn call<T>(&self, url: &str, payload: &T) -> Result<reqwest::Response>
    where
        T: Serialize + ?Sized,
    {
        let body = self.sign(url, payload).await?;

        log::debug!("Call endpoint: {url}");
        req_post(&self.client, url, body).await
    }
}

/// Construct JWS with protected header according to [RFC 7515 §5.1].
///
/// [RFC 7515 §5.1]: https://datatracker.ietf.org/doc/html/rfc7515#section-5.1
pub(crate) fn jws_with<T: Serialize + ?Sized>(
    key: &AcmeKey,
    url: &str,
    nonce: Nonce,
    payload: &T,
) -> Result<String> {
    let protected = JwsProtectedHeader::for_key(key, url, nonce)?;

    let header = {
        let pro_json = serde_json::to_string(&protected).map_err(Error::Encode)?;
        base64url(&pro_json)
    };

    let payload = {
        let payload_json = serde_json::to_string(payload).map_err(Error::Encode)?;
        base64url(&payload_json)
    };

    let to_sign = format!("{header}.{payload}");
    let signature: p256::ecdsa::Signature = key
        .signing_key()
        .try_sign(to_sign.as_bytes())
        .map_err(|err| Error::Sign(err.to_string()))?;

    let signature = base64url(&signature.to_bytes());

    let jws = FlattenedJsonJws::new(header, payload, signature);

    serde_json::to_string(&jws).map_err(Error::Encode)
}
