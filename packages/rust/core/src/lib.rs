//! Scene scraping and description reconciliation for clipscrape.
//!
//! This crate ties together page fetching, DOM extraction, and the
//! reconciliation engine into end-to-end workflows (e.g., `scrape_scene`).

pub mod description;
pub mod fetch;
pub mod pipeline;
pub mod secondary;

pub use description::{Description, DescriptionSource, reconcile, reconcile_with_base};
pub use fetch::{HttpFetcher, PageFetcher};
pub use pipeline::scrape_scene;
pub use secondary::{clip_id, secondary_url};
