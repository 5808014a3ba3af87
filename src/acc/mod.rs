//! Account key handling.
//!
//! This tool never registers accounts; it only loads the P-256 key of an existing one.

mod acme_key;

pub(crate) use self::acme_key::AcmeKey;
