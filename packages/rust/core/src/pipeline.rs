//! End-to-end scene pipeline: clip URL → clip page → metadata + reconciled
//! description → [`SceneRecord`].

use std::time::Instant;

use scraper::Html;
use tracing::{info, instrument, warn};
use url::Url;

use clipscrape_extract::{BaseDescription, DescriptionExtractor, extract_scene_meta};
use clipscrape_shared::{ClipScrapeError, FetchConfig, Result, SceneRecord, Studio, split_names};

use crate::description::{DescriptionSource, reconcile_with_base};
use crate::fetch::PageFetcher;

/// Scrape one clip page into a scene record.
///
/// The clip page is fetched once; its description block feeds the
/// reconciler so the lite page is the only other request made.
#[instrument(skip_all, fields(url = %url))]
pub async fn scrape_scene<F: PageFetcher>(
    fetcher: &F,
    config: &FetchConfig,
    url: &str,
) -> Result<SceneRecord> {
    let start = Instant::now();

    let primary = Url::parse(url)
        .map_err(|e| ClipScrapeError::validation(format!("invalid scene URL '{url}': {e}")))?;

    let body = fetcher.fetch(&primary).await?;

    // `Html` is not `Send`; parse and drop it before the next await.
    let (meta, base) = {
        let doc = Html::parse_document(&body);
        (extract_scene_meta(&doc)?, BaseDescription.extract(&doc))
    };

    let details = match base {
        Some(base) => {
            let description = reconcile_with_base(fetcher, config, &primary, &base).await?;
            if description.source == DescriptionSource::BaseOnly {
                info!("details taken from clip page only");
            }
            description.text.trim().to_string()
        }
        None => {
            warn!("description block not found, details left empty");
            String::new()
        }
    };

    let studio = meta.studio.unwrap_or_default();

    let record = SceneRecord {
        title: meta.title,
        tags: split_names(&meta.tags),
        url: url.to_string(),
        image: meta.image,
        studio: Studio { name: studio },
        performers: split_names(&meta.performers),
        details,
        date: meta.date,
    };

    info!(
        tags = record.tags.len(),
        performers = record.performers.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "scene scraped"
    );

    Ok(record)
}
