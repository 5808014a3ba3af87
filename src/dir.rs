use std::{future::Future, time::Duration};

use crate::{
    error::{Error, Result},
    req::{req_client, req_expect_header, req_get},
};

const LETSENCRYPT_URL: &str = "https://acme-v01.api.letsencrypt.org/directory";
const LETSENCRYPT_STAGING_URL: &str = "https://acme-staging.api.letsencrypt.org/directory";

/// Nonce retrieval must fail fast rather than hold up the whole run.
const NONCE_TIMEOUT: Duration = Duration::from_secs(1);

/// Enumeration of known ACME API directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryUrl {
    /// The main Let's Encrypt directory.
    LetsEncrypt,

    /// The staging Let's Encrypt directory.
    LetsEncryptStaging,

    /// Provide an arbitrary directory URL to connect to.
    Other(String),
}

impl DirectoryUrl {
    /// Production or staging, as selected by a `--staging` style switch.
    pub fn letsencrypt(staging: bool) -> Self {
        if staging {
            DirectoryUrl::LetsEncryptStaging
        } else {
            DirectoryUrl::LetsEncrypt
        }
    }

    pub fn to_url(&self) -> &str {
        match self {
            DirectoryUrl::LetsEncrypt => LETSENCRYPT_URL,
            DirectoryUrl::LetsEncryptStaging => LETSENCRYPT_STAGING_URL,
            DirectoryUrl::Other(url) => url,
        }
    }
}

/// Single-use anti-replay token handed out by the ACME server.
///
/// Not `Clone`: once put into a request header it is gone.
#[derive(Debug, PartialEq, Eq)]
pub struct Nonce(String);

impl Nonce {
    pub fn new(nonce: impl Into<String>) -> Self {
        Nonce(nonce.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Capability to obtain a fresh nonce right before a request is signed.
pub trait NonceSource {
    fn fetch_nonce(&self) -> impl Future<Output = Result<Nonce>> + Send;
}

impl<N: NonceSource + Sync> NonceSource for &N {
    fn fetch_nonce(&self) -> impl Future<Output = Result<Nonce>> + Send {
        (**self).fetch_nonce()
    }
}

/// ACME directory, used purely as a nonce source.
#[derive(Debug, Clone)]
pub struct Directory {
    url: DirectoryUrl,
    client: reqwest::Client,
}

impl Directory {
    pub fn new(url: DirectoryUrl) -> Result<Directory> {
        let client = req_client(NONCE_TIMEOUT)?;
        Ok(Directory { url, client })
    }

    pub fn url(&self) -> &DirectoryUrl {
        &self.url
    }
}

impl NonceSource for Directory {
    async fn fetch_nonce(&self) -> Result<Nonce> {
        let url = self.url.to_url();
        log::debug!("Request new nonce from {url}");

        let res = req_get(&self.client, url).await?;

        if !res.status().is_success() {
            log::debug!("Directory answered {}", res.status());
            return Err(Error::NoNonce);
        }

        let nonce = req_expect_header(&res, "replay-nonce").ok_or(Error::NoNonce)?;
        Ok(Nonce::new(nonce))
    }
}
