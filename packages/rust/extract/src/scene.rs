//! Scene metadata on the clip page: title, date, thumbnail, studio, tags, performers.

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::warn;

use clipscrape_shared::{ClipScrapeError, Result};

/// Date format shown next to the "Added:" label, e.g. `4/19/23 3:05PM`.
const ADDED_FORMAT: &str = "%m/%d/%y %I:%M%p";

/// Metadata fields pulled from a clip page, before list splitting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SceneMeta {
    pub title: String,
    /// `YYYY-MM-DD`.
    pub date: Option<String>,
    pub image: Option<String>,
    pub studio: Option<String>,
    /// Comma-joined category + related categories.
    pub tags: String,
    /// Comma-joined keywords, with the studio appended.
    pub performers: String,
}

macro_rules! selector {
    ($name:ident, $css:expr) => {
        static $name: LazyLock<Selector> =
            LazyLock::new(|| Selector::parse($css).expect("valid selector"));
    };
}

selector!(TITLE_SEL, r#"h3[class="[ text-white mt-3-0 mb-1-0 text-2-4 ]"]"#);
selector!(SPAN_SEL, "span");
selector!(WHITE_SPAN_SEL, "span.text-white");
selector!(THUMB_SEL, "img.clip_thumb_img[src]");
selector!(VIDEO_SEL, "video[poster]");
selector!(LABEL_SEL, "span.font-bold");
selector!(RELATED_SEL, "span.relatedCatLinks");

/// Extract every metadata field. Only a missing title is fatal.
pub fn extract_scene_meta(doc: &Html) -> Result<SceneMeta> {
    let title = extract_title(doc)
        .ok_or_else(|| ClipScrapeError::parse("clip title element not found"))?;

    let date = extract_date(doc);
    if date.is_none() {
        warn!("clip date not found or unparseable");
    }

    let image = extract_image(doc);
    if image.is_none() {
        warn!("clip thumbnail not found");
    }

    let studio = extract_studio(doc);
    if studio.is_none() {
        warn!("clip studio not found");
    }

    let tags = extract_tags(doc);
    let performers = extract_performers(doc, studio.as_deref());

    Ok(SceneMeta {
        title,
        date,
        image,
        studio,
        tags,
        performers,
    })
}

// ---------------------------------------------------------------------------
// Title
// ---------------------------------------------------------------------------

/// Clip title with video-format noise ("HD MP4 1080p" and friends) removed.
pub fn extract_title(doc: &Html) -> Option<String> {
    let raw = doc.select(&TITLE_SEL).next()?.text().collect::<String>();
    Some(clean_title(raw.trim_end()))
}

/// Strip format/resolution suffixes and trailing separators from a title.
pub fn clean_title(title: &str) -> String {
    static FORMAT_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(
            r"(?i)[ \t]*((Super )?[SH]D)?[ ,-]*(\b(MP4|OPTIMUM|WMV|MOV|AVI|UHD|[48]K)\b|1080p|720p|480p|\(1080 HD\)|\(720 HD\)(Standard|High) Def(inition)?)+[ \t]*",
        )
        .expect("valid regex")
    });

    FORMAT_RE
        .replace_all(title, "")
        .trim_end_matches([' ', '-'])
        .to_string()
}

// ---------------------------------------------------------------------------
// Date
// ---------------------------------------------------------------------------

fn extract_date(doc: &Html) -> Option<String> {
    let raw = doc
        .select(&SPAN_SEL)
        .filter(|span| span.text().any(|t| t.contains("Added:")))
        .find_map(|span| span.select(&WHITE_SPAN_SEL).next())?
        .text()
        .collect::<String>();

    parse_added_date(raw.trim())
}

/// `4/19/23 3:05PM` → `2023-04-19`.
pub fn parse_added_date(raw: &str) -> Option<String> {
    NaiveDateTime::parse_from_str(raw, ADDED_FORMAT)
        .ok()
        .map(|dt| dt.format("%Y-%m-%d").to_string())
}

// ---------------------------------------------------------------------------
// Image
// ---------------------------------------------------------------------------

fn extract_image(doc: &Html) -> Option<String> {
    let src = doc
        .select(&THUMB_SEL)
        .find_map(|img| img.value().attr("src"))
        .or_else(|| {
            doc.select(&VIDEO_SEL)
                .find_map(|video| video.value().attr("poster"))
        })?;

    Some(absolutize(src))
}

fn absolutize(src: &str) -> String {
    if src.starts_with("//") {
        format!("https:{src}")
    } else {
        src.to_string()
    }
}

// ---------------------------------------------------------------------------
// Studio, tags, performers
// ---------------------------------------------------------------------------

fn extract_studio(doc: &Html) -> Option<String> {
    let link = labelled_sibling(doc, "From:", "a", None)?;
    let name = link.text().collect::<String>().replace("  ", " ");
    let name = name.trim();
    (!name.is_empty()).then(|| name.to_string())
}

fn extract_tags(doc: &Html) -> String {
    let category = labelled_sibling(doc, "Category:", "a", None)
        .map(|a| a.text().collect::<String>().trim().to_string())
        .filter(|c| !c.is_empty());

    let related: Vec<String> = doc
        .select(&RELATED_SEL)
        .map(|span| {
            span.text()
                .collect::<String>()
                .trim()
                .trim_end_matches('.')
                .to_string()
        })
        .collect();

    let mut joined = String::new();
    if let Some(category) = category {
        joined.push_str(&category);
        joined.push_str(", ");
    }
    joined.push_str(&related.join(", "));

    joined.trim_end_matches([',', ' ']).to_string()
}

fn extract_performers(doc: &Html, studio: Option<&str>) -> String {
    let keywords = labelled_sibling(doc, "Keywords:", "span", Some("relatedCatLinks"))
        .map(|span| {
            span.text()
                .collect::<String>()
                .trim_end_matches('.')
                .trim_start_matches([',', ' '])
                .to_string()
        })
        .unwrap_or_default();

    match studio {
        Some(studio) if keywords.is_empty() => studio.to_string(),
        Some(studio) => format!("{keywords}, {studio}"),
        None => keywords,
    }
}

/// Find the bold label span whose text is `label`, then the first following
/// sibling element named `tag` (and carrying `class`, when given).
fn labelled_sibling<'a>(
    doc: &'a Html,
    label: &str,
    tag: &str,
    class: Option<&str>,
) -> Option<ElementRef<'a>> {
    let label_span = doc
        .select(&LABEL_SEL)
        .find(|span| span.text().collect::<String>().trim() == label)?;

    label_span
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|el| {
            el.value().name() == tag
                && class.is_none_or(|c| el.value().classes().any(|have| have == c))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_title_strips_format_suffixes() {
        assert_eq!(clean_title("Morning Routine - HD MP4 1080p"), "Morning Routine");
        assert_eq!(clean_title("Night Shift (720 HD)"), "Night Shift (720 HD)");
        assert_eq!(clean_title("Plain Title"), "Plain Title");
        assert_eq!(clean_title("Long Walk 4K"), "Long Walk");
        assert_eq!(clean_title("Quiet - wmv"), "Quiet");
    }

    #[test]
    fn parses_added_dates() {
        assert_eq!(parse_added_date("4/19/23 3:05PM").as_deref(), Some("2023-04-19"));
        assert_eq!(parse_added_date("12/01/22 11:59am").as_deref(), Some("2022-12-01"));
        assert_eq!(parse_added_date("yesterday"), None);
    }

    #[test]
    fn labelled_sibling_skips_other_elements() {
        let doc = Html::parse_document(
            r#"<div><span class="font-bold">From: </span><i>by</i><a href="/s">Some  Studio</a></div>"#,
        );
        assert_eq!(extract_studio(&doc).as_deref(), Some("Some Studio"));
    }

    #[test]
    fn image_falls_back_to_video_poster() {
        let doc = Html::parse_document(r#"<video poster="//cdn.example.com/p.jpg"></video>"#);
        assert_eq!(
            extract_image(&doc).as_deref(),
            Some("https://cdn.example.com/p.jpg")
        );
    }

    #[test]
    fn missing_title_is_a_parse_error() {
        let doc = Html::parse_document("<h3>Not it</h3>");
        let err = extract_scene_meta(&doc).unwrap_err();
        assert!(matches!(err, ClipScrapeError::Parse { .. }));
    }

    #[test]
    fn performers_without_keywords_are_just_the_studio() {
        let doc = Html::parse_document("<p>nothing</p>");
        assert_eq!(extract_performers(&doc, Some("Studio")), "Studio");
        assert_eq!(extract_performers(&doc, None), "");
    }
}
