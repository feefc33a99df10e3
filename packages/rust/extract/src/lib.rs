//! DOM extraction for clip pages.
//!
//! This crate provides:
//! - [`description`]: base and alt description extractors
//! - [`scene`]: title, date, thumbnail, studio, tags, and performers

pub mod description;
pub mod scene;

pub use description::{
    AltDescription, BaseDescription, DescriptionExtractor, extract_alt_block,
    extract_description_block,
};
pub use scene::{SceneMeta, clean_title, extract_scene_meta, parse_added_date};

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn load_fixture(name: &str) -> Html {
        let path = format!("../../../fixtures/html/{name}");
        let content = std::fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("missing fixture: {path}"));
        Html::parse_document(&content)
    }

    // -----------------------------------------------------------------------
    // Clip page
    // -----------------------------------------------------------------------

    #[test]
    fn clip_page_scene_meta() {
        let doc = load_fixture("clip.html");
        let meta = extract_scene_meta(&doc).unwrap();

        assert_eq!(meta.title, "Sunday Brunch Surprise");
        assert_eq!(meta.date.as_deref(), Some("2023-04-19"));
        assert_eq!(
            meta.image.as_deref(),
            Some("https://imagecdn.clips4sale.com/accounts99/123/clip_images/previewlg_456789.jpg")
        );
        assert_eq!(meta.studio.as_deref(), Some("Sunny Side Studio"));
        assert_eq!(meta.tags, "Comedy, Roleplay, Food, N/A, Jane Doe, John Roe");
        assert_eq!(meta.performers, "Jane Doe, John Roe, Sunny Side Studio");
    }

    #[test]
    fn clip_page_base_description() {
        let doc = load_fixture("clip.html");
        let text = BaseDescription.extract(&doc).unwrap();

        assert!(text.starts_with("Its a lazy Sunday morning."));
        assert!(text.contains("\n\nWhat happens next?\n\n"));
        assert!(text.contains("wont  believe"));
        assert!(text.ends_with("out.Enjoy!<br>"));
    }

    #[test]
    fn clip_page_has_no_alt_block() {
        let doc = load_fixture("clip.html");
        assert!(AltDescription.extract(&doc).is_none());
    }

    // -----------------------------------------------------------------------
    // Lite page
    // -----------------------------------------------------------------------

    #[test]
    fn lite_page_alt_description() {
        let doc = load_fixture("clip_lite.html");
        let text = AltDescription.extract(&doc).unwrap();
        assert!(text.starts_with("It\u{2019}s a lazy Sunday morning."));
        assert!(!text.contains('\n'));
    }

    #[test]
    fn lite_page_without_span() {
        let doc = load_fixture("clip_lite_missing.html");
        assert!(extract_alt_block(&doc).is_none());
    }
}
