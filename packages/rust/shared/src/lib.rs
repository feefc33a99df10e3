//! Shared types, error model, and configuration for clipscrape.
//!
//! This crate is the foundation depended on by all other clipscrape crates.
//! It provides:
//! - [`ClipScrapeError`]: the unified error type
//! - Scene types ([`SceneFragment`], [`SceneRecord`], [`NamedEntity`])
//! - Configuration ([`AppConfig`], [`FetchConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, FetchConfig, HttpConfig, SecondaryConfig, config_dir, config_file_path,
    init_config, load_config, load_config_from,
};
pub use error::{ClipScrapeError, Result};
pub use types::{NamedEntity, SceneFragment, SceneRecord, Studio, split_names};
