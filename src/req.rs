use std::time::Duration;

use crate::error::Result;

pub(crate) fn req_client(timeout: Duration) -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .build()?)
}

pub(crate) async fn req_get(client: &reqwest::Client, url: &str) -> Result<reqwest::Response> {
    let req = client.get(url);
    log::trace!("{req:?}");
    Ok(req.send().await?)
}

pub(crate) async fn req_post(
    client: &reqwest::Client,
    url: &str,
    body: String,
) -> Result<reqwest::Response> {
    let req = client
        .post(url)
        .header(reqwest::header::CONTENT_TYPE, "application/jose+json");
    log::trace!("{req:?} {body}");
    Ok(req.body(body).send().await?)
}

/// Value of header `name`, if it is present, visible ASCII and not empty.
pub(crate) fn req_expect_header(res: &reqwest::Response, name: &str) -> Option<String> {
    res.headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(ToOwned::to_owned)
}
