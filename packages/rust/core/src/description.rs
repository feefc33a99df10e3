//! Description orchestration: fetch both renditions and reconcile them.
//!
//! The clip page is required; the lite page is best-effort. When the lite
//! rendition cannot be had (fetch failure, error status, missing element,
//! underivable URL) the base rendition is finalized on its own.

use scraper::Html;
use tracing::{info, instrument, warn};
use url::Url;

use clipscrape_extract::{AltDescription, BaseDescription, DescriptionExtractor};
use clipscrape_shared::{ClipScrapeError, FetchConfig, Result};

use crate::fetch::PageFetcher;
use crate::secondary::secondary_url;

/// Where the final description text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptionSource {
    /// Both renditions were merged.
    CrossReferenced { mismatches: usize, redactions: usize },
    /// Only the base rendition was available.
    BaseOnly,
}

/// A canonical clip description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    pub text: String,
    pub source: DescriptionSource,
}

/// Fetch the clip page at `primary_url` and reconcile its description.
#[instrument(skip_all, fields(url = %primary_url))]
pub async fn reconcile<F: PageFetcher>(
    fetcher: &F,
    config: &FetchConfig,
    primary_url: &Url,
) -> Result<Description> {
    let body = fetcher.fetch(primary_url).await?;

    let base = {
        let doc = Html::parse_document(&body);
        BaseDescription.extract(&doc)
    }
    .ok_or_else(|| ClipScrapeError::parse("description block not found on clip page"))?;

    reconcile_with_base(fetcher, config, primary_url, &base).await
}

/// Reconcile an already-extracted base rendition against the lite page.
pub async fn reconcile_with_base<F: PageFetcher>(
    fetcher: &F,
    config: &FetchConfig,
    primary_url: &Url,
    base: &str,
) -> Result<Description> {
    let alt = match secondary_url(primary_url, config.secondary_base.as_ref()) {
        Ok(lite_url) => fetch_alt(fetcher, &lite_url).await,
        Err(e) => Err(e),
    };

    let alt = match alt {
        Ok(alt) => alt,
        Err(e) => {
            warn!(error = %e, "lite description unavailable, using base description only");
            return Ok(Description {
                text: clipscrape_reconcile::degrade(base),
                source: DescriptionSource::BaseOnly,
            });
        }
    };

    let merged = clipscrape_reconcile::reconcile(base, &alt);

    info!(
        mismatches = merged.mismatches,
        redactions = merged.redactions,
        exhausted_at = ?merged.exhausted_at,
        "description reconciled"
    );

    Ok(Description {
        text: merged.text,
        source: DescriptionSource::CrossReferenced {
            mismatches: merged.mismatches,
            redactions: merged.redactions,
        },
    })
}

async fn fetch_alt<F: PageFetcher>(fetcher: &F, lite_url: &Url) -> Result<String> {
    let body = fetcher.fetch(lite_url).await?;
    let doc = Html::parse_document(&body);

    AltDescription
        .extract(&doc)
        .ok_or_else(|| ClipScrapeError::parse(format!("alt description not found at {lite_url}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{StaticFetcher, fixture};

    const PRIMARY: &str = "https://www.clips4sale.com/studio/123/clip/456789/Sunday-Brunch";
    const LITE: &str = "https://l.clips4sale.com/clip/456789";

    const MERGED: &str = "It's a lazy Sunday morning.  The pancakes are ready and you won't  \
                          believe who shows up at the door.\n\nWhat happens next?\n\n\
                          Watch and find out. Enjoy!";

    fn primary() -> Url {
        Url::parse(PRIMARY).unwrap()
    }

    #[tokio::test]
    async fn merges_both_renditions() {
        let fetcher = StaticFetcher::new()
            .page(PRIMARY, fixture("clip.html"))
            .page(LITE, fixture("clip_lite.html"));

        let description = reconcile(&fetcher, &FetchConfig::default(), &primary())
            .await
            .unwrap();

        assert_eq!(description.text, MERGED);
        assert_eq!(
            description.source,
            DescriptionSource::CrossReferenced {
                mismatches: 3,
                redactions: 0
            }
        );
        assert_eq!(fetcher.requests(), vec![PRIMARY.to_string(), LITE.to_string()]);
    }

    #[tokio::test]
    async fn missing_lite_element_falls_back_to_base() {
        let fetcher = StaticFetcher::new()
            .page(PRIMARY, fixture("clip.html"))
            .page(LITE, fixture("clip_lite_missing.html"));

        let description = reconcile(&fetcher, &FetchConfig::default(), &primary())
            .await
            .unwrap();

        assert_eq!(description.source, DescriptionSource::BaseOnly);
        assert!(description.text.starts_with("Its a lazy Sunday morning."));
        assert!(description.text.ends_with("Watch and find out.Enjoy!"));
        assert!(!description.text.contains("[CENSORED]"));
    }

    #[tokio::test]
    async fn lite_fetch_failure_falls_back_to_base() {
        let fetcher = StaticFetcher::new().page(PRIMARY, fixture("clip.html"));

        let description = reconcile(&fetcher, &FetchConfig::default(), &primary())
            .await
            .unwrap();

        assert_eq!(description.source, DescriptionSource::BaseOnly);
        assert!(!description.text.contains('<'));
    }

    #[tokio::test]
    async fn primary_fetch_failure_is_fatal() {
        let fetcher = StaticFetcher::new().page(LITE, fixture("clip_lite.html"));

        let err = reconcile(&fetcher, &FetchConfig::default(), &primary())
            .await
            .unwrap_err();

        assert!(matches!(err, ClipScrapeError::Network(_)));
        assert_eq!(fetcher.requests(), vec![PRIMARY.to_string()]);
    }

    #[tokio::test]
    async fn primary_without_description_is_a_parse_error() {
        let fetcher = StaticFetcher::new().page(PRIMARY, "<html><body></body></html>".into());

        let err = reconcile(&fetcher, &FetchConfig::default(), &primary())
            .await
            .unwrap_err();

        assert!(matches!(err, ClipScrapeError::Parse { .. }));
    }

    #[tokio::test]
    async fn underivable_lite_url_falls_back_without_fetching() {
        let fetcher = StaticFetcher::new();
        let root = Url::parse("https://www.clips4sale.com/").unwrap();

        let description =
            reconcile_with_base(&fetcher, &FetchConfig::default(), &root, "It\u{2019}s <b>fine</b>")
                .await
                .unwrap();

        assert_eq!(description.text, "It's fine");
        assert_eq!(description.source, DescriptionSource::BaseOnly);
        assert!(fetcher.requests().is_empty());
    }
}
