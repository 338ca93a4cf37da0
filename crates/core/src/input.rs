//! Input normalization and batch decoding.
//!
//! A page arrives in one of three encodings; [`canonicalize`] resolves the
//! choice once into a tagged [`Canonical`] value so the extractors never
//! probe formats themselves. Batch inputs are either a JSON array of pages or
//! newline-delimited JSON; malformed lines are recorded and skipped without
//! aborting the batch.

use crate::error::{GuidemillError, Result};
use crate::model::{ContentBlock, ContentNode, LegacyContent, Page, PageContent};
use std::fs;
use std::path::Path;

/// Canonical page content, resolved from whichever encoding the record used.
#[derive(Debug, Clone)]
pub enum Canonical {
    /// Ordered typed nodes; supports the full hierarchical pipeline.
    Nodes(Vec<ContentNode>),
    /// Pre-chunked blocks (verbatim `contentBlocks`, or the lossy legacy
    /// conversion). Only the flat pipeline applies.
    Blocks(Vec<ContentBlock>),
}

/// Resolves a page record into its canonical content.
///
/// Priority: explicit `contentBlocks` are used verbatim; a typed-node array
/// is used directly; the legacy `{headings, paragraphs}` shape is converted
/// to blocks (losing interleaving). A page with none of the three yields an
/// empty block list, which callers treat as a skip.
pub fn canonicalize(page: &Page) -> Canonical {
    if let Some(blocks) = &page.content_blocks
        && !blocks.is_empty()
    {
        return Canonical::Blocks(blocks.clone());
    }

    match &page.content {
        Some(PageContent::Nodes(nodes)) => Canonical::Nodes(nodes.clone()),
        Some(PageContent::Legacy(legacy)) => Canonical::Blocks(legacy_blocks(&page.title, legacy)),
        None => Canonical::Blocks(Vec::new()),
    }
}

/// Converts the legacy shape to blocks.
///
/// Interleaving is gone, so every heading is paired with the entire joined
/// paragraph set as a fallback; a heading-less record collapses into a single
/// block titled by the page.
fn legacy_blocks(title: &str, legacy: &LegacyContent) -> Vec<ContentBlock> {
    let body = legacy.paragraphs.join(" ").trim().to_string();
    if body.is_empty() {
        return Vec::new();
    }

    if legacy.headings.is_empty() {
        let heading = if title.is_empty() { "Content" } else { title };
        return vec![ContentBlock::new(heading, body)];
    }

    legacy.headings.iter().map(|h| ContentBlock::new(h.text.clone(), body.clone())).collect()
}

/// Decodes a batch of page records from raw text.
///
/// A JSON array is accepted wholesale; anything else is treated as
/// newline-delimited JSON with one page per line. Returns the decoded pages
/// together with per-line error messages for malformed lines.
///
/// Zero parseable pages is fatal ([`GuidemillError::NoPages`]).
pub fn decode_pages(raw: &str) -> Result<(Vec<Page>, Vec<String>)> {
    if let Ok(pages) = serde_json::from_str::<Vec<Page>>(raw) {
        if pages.is_empty() {
            return Err(GuidemillError::NoPages);
        }
        return Ok((pages, Vec::new()));
    }

    let mut pages = Vec::new();
    let mut errors = Vec::new();

    for (index, line) in raw.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match serde_json::from_str::<Page>(line) {
            Ok(page) => pages.push(page),
            Err(e) => errors.push(format!("failed to parse line {}: {}", index + 1, e)),
        }
    }

    if pages.is_empty() {
        return Err(GuidemillError::NoPages);
    }

    Ok((pages, errors))
}

/// Reads and decodes a batch input file.
///
/// Unreadable files and inputs with zero parseable records are fatal; see
/// [`decode_pages`] for the per-line error contract.
pub fn load_pages(path: &Path) -> Result<(Vec<Page>, Vec<String>)> {
    if !path.exists() {
        return Err(GuidemillError::FileNotFound(path.to_path_buf()));
    }

    let raw = fs::read_to_string(path)?;
    decode_pages(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LegacyHeading;
    use std::io::Write;

    fn node_page() -> Page {
        serde_json::from_str(
            r#"{
                "title": "Ashava Boss Guide",
                "url": "https://example.gg/d4/bosses/ashava",
                "content": [
                    {"type": "heading", "level": 2, "text": "Overview"},
                    {"type": "paragraph", "text": "Ashava is a world boss."}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_canonicalize_prefers_content_blocks() {
        let mut page = node_page();
        page.content_blocks = Some(vec![ContentBlock::new("Pre", "chunked")]);

        match canonicalize(&page) {
            Canonical::Blocks(blocks) => {
                assert_eq!(blocks.len(), 1);
                assert_eq!(blocks[0].heading, "Pre");
            }
            Canonical::Nodes(_) => panic!("contentBlocks must take priority"),
        }
    }

    #[test]
    fn test_canonicalize_empty_content_blocks_falls_through() {
        let mut page = node_page();
        page.content_blocks = Some(Vec::new());
        assert!(matches!(canonicalize(&page), Canonical::Nodes(_)));
    }

    #[test]
    fn test_canonicalize_typed_nodes() {
        assert!(matches!(canonicalize(&node_page()), Canonical::Nodes(nodes) if nodes.len() == 2));
    }

    #[test]
    fn test_legacy_pairs_each_heading_with_full_paragraph_set() {
        let legacy = LegacyContent {
            headings: vec![
                LegacyHeading { level: 2, text: "First".to_string() },
                LegacyHeading { level: 2, text: "Second".to_string() },
            ],
            paragraphs: vec!["One.".to_string(), "Two.".to_string()],
        };

        let blocks = legacy_blocks("Title", &legacy);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].heading, "First");
        assert_eq!(blocks[0].content, "One. Two.");
        assert_eq!(blocks[1].content, "One. Two.");
    }

    #[test]
    fn test_legacy_without_headings_uses_title() {
        let legacy =
            LegacyContent { headings: Vec::new(), paragraphs: vec!["Only paragraph.".to_string()] };
        let blocks = legacy_blocks("Some Guide", &legacy);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].heading, "Some Guide");
    }

    #[test]
    fn test_legacy_without_paragraphs_is_empty() {
        let legacy = LegacyContent {
            headings: vec![LegacyHeading { level: 2, text: "Lonely".to_string() }],
            paragraphs: Vec::new(),
        };
        assert!(legacy_blocks("Title", &legacy).is_empty());
    }

    #[test]
    fn test_decode_json_array() {
        let raw = r#"[{"title": "A", "url": "https://x/d4/wiki/a"}, {"title": "B", "url": "https://x/d4/wiki/b"}]"#;
        let (pages, errors) = decode_pages(raw).unwrap();
        assert_eq!(pages.len(), 2);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_decode_ndjson_records_bad_lines() {
        let raw = "\
{\"title\": \"A\", \"url\": \"https://x/d4/wiki/a\"}\n\
this line is not json\n\
{\"title\": \"B\", \"url\": \"https://x/d4/wiki/b\"}\n";

        let (pages, errors) = decode_pages(raw).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("line 2"));
    }

    #[test]
    fn test_decode_skips_blank_lines() {
        let raw = "\n{\"title\": \"A\", \"url\": \"u\"}\n\n";
        let (pages, errors) = decode_pages(raw).unwrap();
        assert_eq!(pages.len(), 1);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_decode_zero_pages_is_fatal() {
        assert!(matches!(decode_pages("not json at all"), Err(GuidemillError::NoPages)));
        assert!(matches!(decode_pages("[]"), Err(GuidemillError::NoPages)));
        assert!(matches!(decode_pages(""), Err(GuidemillError::NoPages)));
    }

    #[test]
    fn test_load_pages_missing_file() {
        let result = load_pages(Path::new("/nonexistent/input.jsonl"));
        assert!(matches!(result, Err(GuidemillError::FileNotFound(_))));
    }

    #[test]
    fn test_load_pages_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}", r#"{"title": "A", "url": "https://x/d4/wiki/a"}"#).unwrap();

        let (pages, errors) = load_pages(file.path()).unwrap();
        assert_eq!(pages.len(), 1);
        assert!(errors.is_empty());
    }
}
