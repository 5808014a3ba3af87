//! Deactivating pending authorizations with ACME (Automatic Certificate Management Environment)
//! providers such as [Let's Encrypt](https://letsencrypt.org/).
//!
//! An authorization ("authz") that is no longer wanted, for example one created for a domain
//! that will never be validated, can be deactivated by its account. This crate does exactly
//! that and nothing else: no account registration, no orders, no certificates.
//!
//! # Usage
//!
//! ```no_run
//! use acmecancel::{Deactivator, Directory, DirectoryUrl, Outcome};
//!
//! # async fn run(account_key_json: &str) -> acmecancel::Result<()> {
//! // Nonces come from the directory of the same ACME provider.
//! let dir = Directory::new(DirectoryUrl::LetsEncryptStaging)?;
//! let deactivator = Deactivator::new(account_key_json, dir)?;
//!
//! match deactivator
//!     .deactivate("https://acme-staging.api.letsencrypt.org/acme/authz/abc")
//!     .await?
//! {
//!     Outcome::Success(_) => println!("deactivated"),
//!     Outcome::StillPending => println!("still pending"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Account Key
//!
//! The account key is the JSON form of a P-256 private key: the big integers `X` and `Y` of
//! the public point and the private scalar `D`. See [`Deactivator::new()`].
//!
//! # Nonces
//!
//! Every signed request needs a fresh anti-replay nonce from the server. A [`Deactivator`]
//! asks its [`NonceSource`] for one right before signing; [`Directory`] implements that by
//! probing the ACME directory. Nonces are never reused and requests are never retried.
//!
//! ## Use Staging For Development!
//!
//! Let's Encrypt applies [rate limits] to its production environment. See
//! [`DirectoryUrl::LetsEncryptStaging`].
//!
//! [rate limits]: https://letsencrypt.org/docs/rate-limits

#![deny(rust_2018_idioms, nonstandard_style, future_incompatible)]

mod acc;
mod authz;
mod dir;
mod error;
mod jws;
mod req;
mod trans;
mod util;

pub mod api;


pub use crate::{
    authz::{Deactivator, Outcome},
    dir::{Directory, DirectoryUrl, Nonce, NonceSource},
    error::{Error, Result},
};
