use base64::prelude::*;
use http_body_util::BodyExt as _;
use serde::de;

use crate::error::{BoxError, Error, Result};

pub(crate) fn base64url<T: ?Sized + AsRef<[u8]>>(input: &T) -> String {
    BASE64_URL_SAFE_NO_PAD.encode(input)
}

/// Drains the body to the end and hands back its bytes.
///
/// The body is consumed, so it is released whether or not the caller can make sense of it.
pub(crate) async fn read_body<B>(body: B) -> Result<Vec<u8>>
where
    B: http_body::Body,
    B::Error: Into<BoxError>,
{
    let collected = body
        .collect()
        .await
        .map_err(|err| Error::Transport(err.into()))?;

    Ok(collected.to_bytes().to_vec())
}

/// Decodes the first JSON value of `body`, ignoring whatever follows it.
pub(crate) fn read_json<T: de::DeserializeOwned>(body: &[u8]) -> Result<T> {
    log::trace!("{}", String::from_utf8_lossy(body));

    match serde_json::Deserializer::from_slice(body)
        .into_iter::<T>()
        .next()
    {
        Some(res) => res.map_err(Error::ResponseParse),
        // empty body: run a plain decode to get an EOF error out of serde
        None => serde_json::from_slice(body).map_err(Error::ResponseParse),
    }
}
