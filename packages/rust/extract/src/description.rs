//! Description extractors for the two page renditions.
//!
//! The clip page carries the base rendition as the text of a container div;
//! the lite page carries the alt rendition in a `data-text` attribute.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

/// Extracts one rendition of a clip description from a parsed page.
pub trait DescriptionExtractor: Send + Sync {
    /// Returns `None` when the expected element is absent.
    fn extract(&self, doc: &Html) -> Option<String>;

    /// Human-readable extractor name for tracing.
    fn name(&self) -> &str;
}

/// Base rendition: `div.individualClipDescription` on the clip page.
pub struct BaseDescription;

/// Alt rendition: `span.show_more.show_more_js[data-text]` on the lite page.
pub struct AltDescription;

impl DescriptionExtractor for BaseDescription {
    fn extract(&self, doc: &Html) -> Option<String> {
        extract_description_block(doc)
    }

    fn name(&self) -> &str {
        "base"
    }
}

impl DescriptionExtractor for AltDescription {
    fn extract(&self, doc: &Html) -> Option<String> {
        extract_alt_block(doc)
    }

    fn name(&self) -> &str {
        "alt"
    }
}

static DESCRIPTION_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.individualClipDescription").expect("valid selector"));

static ALT_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.show_more.show_more_js").expect("valid selector"));

/// Text of the description container, one text node per line.
///
/// `em`/`strong` content gets an extra blank line on each side so emphasised
/// sentences do not run into their neighbours; runs of three newlines are
/// then folded to one.
pub fn extract_description_block(doc: &Html) -> Option<String> {
    let div = doc.select(&DESCRIPTION_SEL).next()?;

    let mut segments = Vec::new();
    collect_segments(div, &mut segments);

    let text = segments.join("\n");
    Some(text.trim().replace("\n\n\n", "\n"))
}

/// Value of the alt span's `data-text` attribute.
pub fn extract_alt_block(doc: &Html) -> Option<String> {
    doc.select(&ALT_SEL)
        .find_map(|el| el.value().attr("data-text"))
        .map(str::to_string)
}

fn collect_segments(el: ElementRef<'_>, out: &mut Vec<String>) {
    for child in el.children() {
        if let Some(text) = child.value().as_text() {
            out.push(text.to_string());
        } else if let Some(child_el) = ElementRef::wrap(child) {
            let emphasis = matches!(child_el.value().name(), "em" | "strong");
            if emphasis {
                out.push(String::new());
            }
            collect_segments(child_el, out);
            if emphasis {
                out.push(String::new());
            }
        }
    }
}
