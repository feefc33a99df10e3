//! Scene input/output types exchanged over stdin/stdout.

use serde::{Deserialize, Serialize};

use crate::error::{ClipScrapeError, Result};

// ---------------------------------------------------------------------------
// SceneFragment
// ---------------------------------------------------------------------------

/// The JSON object read from stdin. Extra keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SceneFragment {
    /// Scene page URL.
    #[serde(default)]
    pub url: Option<String>,
    /// Scene name, as supplied by the caller.
    #[serde(default)]
    pub title: Option<String>,
}

impl SceneFragment {
    /// Parse a fragment from raw stdin text.
    pub fn from_json(input: &str) -> Result<Self> {
        serde_json::from_str(input)
            .map_err(|e| ClipScrapeError::usage(format!("stdin is not a JSON object: {e}")))
    }

    /// Return the scene URL, or a usage error describing what is missing.
    pub fn require_url(&self) -> Result<&str> {
        let url = self.url.as_deref().filter(|u| !u.trim().is_empty());
        let title = self.title.as_deref().filter(|t| !t.trim().is_empty());

        match (url, title) {
            (Some(url), _) => Ok(url.trim()),
            (None, None) => Err(ClipScrapeError::usage("No URL/Name provided")),
            (None, Some(_)) => Err(ClipScrapeError::usage(
                "scene lookup by name is not supported; provide a url",
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// SceneRecord
// ---------------------------------------------------------------------------

/// A `{ "name": ... }` object used for tags, performers, and the studio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedEntity {
    pub name: String,
}

/// Studio reference in the output record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Studio {
    pub name: String,
}

/// The flat record printed to stdout for one scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneRecord {
    pub title: String,
    pub tags: Vec<NamedEntity>,
    pub url: String,
    pub image: Option<String>,
    pub studio: Studio,
    pub performers: Vec<NamedEntity>,
    pub details: String,
    pub date: Option<String>,
}

impl SceneRecord {
    /// Serialize with 4-space indentation.
    pub fn to_json_pretty(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        String::from_utf8(buf).map_err(|e| ClipScrapeError::Serialization(e.to_string()))
    }
}

/// Split a comma-joined name list into name objects.
///
/// Entries are trimmed and lose trailing periods; blank and `N/A` entries are
/// dropped, and repeats keep only their first position.
pub fn split_names(joined: &str) -> Vec<NamedEntity> {
    let mut names: Vec<NamedEntity> = Vec::new();

    for raw in joined.split(',') {
        let name = raw.trim().trim_end_matches('.').trim_end();
        if name.is_empty() || name == "N/A" {
            continue;
        }
        if names.iter().any(|n| n.name == name) {
            continue;
        }
        names.push(NamedEntity {
            name: name.to_string(),
        });
    }

    names
}
