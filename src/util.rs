use url::Url;

use crate::error::{Error, Result};

/// Join base url with another (possibly relative) url
pub fn join_url(base_url: &Url, url: &str) -> Result<Url> {
    base_url.join(url).map_err(|source| Error::InvalidUrl {
        url: url.to_owned(),
        source,
    })
}

pub fn parse_url(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|source| Error::InvalidUrl {
        url: url.to_owned(),
        source,
    })
}

/// Make `url` absolute against `base_url` and drop its fragment.
///
/// Returns `None` for anything that isn't http or https.
pub fn normalize_url(base_url: &Url, url: &str) -> Option<Url> {
    let mut req_url = base_url.join(url).ok()?;
    req_url.set_fragment(None);
    if req_url.scheme() != "http" && req_url.scheme() != "https" {
        return None;
    }
    Some(req_url)
}
