//! Secondary (lite) page URL derivation.

use url::Url;

use clipscrape_shared::{ClipScrapeError, Result};

/// Clip id: the second-to-last `/`-separated segment of the primary path.
///
/// `/studio/123/clip/456789/Some-Title` → `456789`.
pub fn clip_id(primary: &Url) -> Result<&str> {
    let segments: Vec<&str> = primary.path().split('/').collect();

    let id = segments
        .len()
        .checked_sub(2)
        .map(|i| segments[i])
        .filter(|id| !id.is_empty())
        .ok_or_else(|| {
            ClipScrapeError::validation(format!("no clip id in path of {primary}"))
        })?;

    Ok(id)
}

/// Build the lite page URL for `primary`.
///
/// Without an override this is `<scheme>://l.<host>/clip/<id>`, with any
/// leading `www.` dropped from the host. With an override the `/clip/<id>`
/// path is appended to `base_override` instead.
pub fn secondary_url(primary: &Url, base_override: Option<&Url>) -> Result<Url> {
    let id = clip_id(primary)?;

    if let Some(base) = base_override {
        let mut url = base.clone();
        url.set_path(&format!("{}/clip/{id}", base.path().trim_end_matches('/')));
        url.set_query(None);
        url.set_fragment(None);
        return Ok(url);
    }

    let host = primary
        .host_str()
        .ok_or_else(|| ClipScrapeError::validation(format!("no host in {primary}")))?;
    let host = host.strip_prefix("www.").unwrap_or(host);
    let host = if host.starts_with("l.") {
        host.to_string()
    } else {
        format!("l.{host}")
    };

    let port = primary.port().map(|p| format!(":{p}")).unwrap_or_default();
    let raw = format!("{}://{host}{port}/clip/{id}", primary.scheme());

    Url::parse(&raw).map_err(|e| ClipScrapeError::validation(format!("bad secondary URL {raw}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn derives_lite_url_from_clip_page() {
        let primary = url("https://www.clips4sale.com/studio/123/clip/456789/Some-Title");
        assert_eq!(
            secondary_url(&primary, None).unwrap().as_str(),
            "https://l.clips4sale.com/clip/456789"
        );
    }

    #[test]
    fn keeps_scheme_and_bare_host() {
        let primary = url("http://clips4sale.com/studio/1/clip/42/x");
        assert_eq!(
            secondary_url(&primary, None).unwrap().as_str(),
            "http://l.clips4sale.com/clip/42"
        );
    }

    #[test]
    fn trailing_slash_shifts_the_id_segment() {
        let primary = url("https://www.clips4sale.com/studio/123/clip/456789/Some-Title/");
        assert_eq!(clip_id(&primary).unwrap(), "Some-Title");
    }

    #[test]
    fn override_base_replaces_origin() {
        let primary = url("https://www.clips4sale.com/studio/123/clip/456789/Some-Title");
        let base = url("http://127.0.0.1:8080/lite/");
        assert_eq!(
            secondary_url(&primary, Some(&base)).unwrap().as_str(),
            "http://127.0.0.1:8080/lite/clip/456789"
        );
    }

    #[test]
    fn rootless_path_has_no_id() {
        let err = clip_id(&url("https://www.clips4sale.com/")).unwrap_err();
        assert!(matches!(err, ClipScrapeError::Validation { .. }));
    }
}
