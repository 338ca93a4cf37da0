//! URL taxonomy mapping: page URL to (output folder, slug).
//!
//! The site roots its taxonomy at a fixed anchor path segment (`d4` by
//! default). The segment after the anchor keys the folder table; the segment
//! after that (or the anchor-following segment itself when terminal) becomes
//! the slug. Recognized query filters are decoded and hyphen-appended so
//! otherwise-identical filtered URLs stay distinct on disk.

use crate::config::ParserConfig;
use url::Url;

/// Slug returned when no usable anchor segment exists; callers treat pages
/// resolving to this as unresolvable and skip them.
pub const UNKNOWN_SLUG: &str = "unknown";

/// Folder used when the taxonomy lookup misses.
pub const MISC_FOLDER: &str = "misc";

/// Derives the output folder and slug for a page URL.
///
/// Deterministic: identical URL (query string included) always yields the
/// identical pair. Unparsable URLs and URLs without the anchor segment map
/// to (`misc`, `unknown`).
pub fn folder_and_slug(url: &str, config: &ParserConfig) -> (String, String) {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(_) => return (MISC_FOLDER.to_string(), UNKNOWN_SLUG.to_string()),
    };

    let segments: Vec<&str> = match parsed.path_segments() {
        Some(segments) => segments.filter(|s| !s.is_empty()).collect(),
        None => return (MISC_FOLDER.to_string(), UNKNOWN_SLUG.to_string()),
    };

    let anchor = match segments.iter().position(|s| *s == config.url_anchor) {
        Some(index) => index,
        None => return (MISC_FOLDER.to_string(), UNKNOWN_SLUG.to_string()),
    };

    let folder = segments
        .get(anchor + 1)
        .and_then(|section| config.folder_map.get(*section))
        .cloned()
        .unwrap_or_else(|| MISC_FOLDER.to_string());

    let base = match (segments.get(anchor + 1), segments.get(anchor + 2)) {
        (None, _) => config.home_slug.clone(),
        (Some(section), None) => (*section).to_string(),
        (Some(_), Some(slug)) => (*slug).to_string(),
    };

    let filters = decode_filters(&parsed, config);
    let slug = if filters.is_empty() { base } else { format!("{}-{}", base, filters.join("-")) };

    (folder, slug)
}

/// Extracts recognized filter values from the query string, in the
/// configured parameter order, with the value prefix stripped.
fn decode_filters(url: &Url, config: &ParserConfig) -> Vec<String> {
    let pairs: Vec<(String, String)> =
        url.query_pairs().map(|(k, v)| (k.into_owned(), v.into_owned())).collect();

    config
        .filter_params
        .iter()
        .filter_map(|param| {
            pairs.iter().find(|(key, _)| key == param).map(|(_, value)| {
                value.strip_prefix(config.filter_value_prefix.as_str()).unwrap_or(value).to_string()
            })
        })
        .filter(|value| !value.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(url: &str) -> (String, String) {
        folder_and_slug(url, &ParserConfig::default())
    }

    #[test]
    fn test_boss_page_url() {
        assert_eq!(map("https://maxroll.gg/d4/bosses/ashava"), ("bosses".to_string(), "ashava".to_string()));
    }

    #[test]
    fn test_section_only_url_uses_section_as_slug() {
        assert_eq!(map("https://maxroll.gg/d4/builds"), ("builds".to_string(), "builds".to_string()));
    }

    #[test]
    fn test_home_url() {
        let (folder, slug) = map("https://maxroll.gg/d4");
        assert_eq!(folder, "misc");
        assert_eq!(slug, "diablo-4-home");
    }

    #[test]
    fn test_unmapped_section_falls_back_to_misc() {
        let (folder, slug) = map("https://maxroll.gg/d4/oddities/strange-thing");
        assert_eq!(folder, "misc");
        assert_eq!(slug, "strange-thing");
    }

    #[test]
    fn test_missing_anchor_is_unknown() {
        assert_eq!(map("https://maxroll.gg/other/page"), ("misc".to_string(), "unknown".to_string()));
    }

    #[test]
    fn test_unparsable_url_is_unknown() {
        assert_eq!(map("not a url"), ("misc".to_string(), "unknown".to_string()));
    }

    #[test]
    fn test_class_filter_appends_to_slug() {
        let (folder, slug) = map("https://maxroll.gg/d4/builds?filter%5Bclasses%5D%5Bvalue%5D=d4-barbarian");
        assert_eq!(folder, "builds");
        assert!(slug.ends_with("-barbarian"), "slug was {:?}", slug);
    }

    #[test]
    fn test_class_filter_with_literal_brackets() {
        let (folder, slug) = map("https://maxroll.gg/d4/builds?filter[classes][value]=d4-barbarian");
        assert_eq!(folder, "builds");
        assert!(slug.ends_with("-barbarian"), "slug was {:?}", slug);
    }

    #[test]
    fn test_multiple_filters_join_in_param_order() {
        let url = "https://maxroll.gg/d4/builds/bash?filter%5Bmetas%5D%5Bvalue%5D=d4-endgame&filter%5Bclasses%5D%5Bvalue%5D=d4-barbarian";
        let (_, slug) = map(url);
        assert_eq!(slug, "bash-barbarian-endgame");
    }

    #[test]
    fn test_build_guide_type_filter_is_verbatim() {
        let url = "https://maxroll.gg/d4/build-guides?filter%5Bbuild_guide_type%5D%5Bfilters%5D%5B0%5D%5Bvalue%5D=leveling";
        let (folder, slug) = map(url);
        assert_eq!(folder, "builds");
        assert_eq!(slug, "build-guides-leveling");
    }

    #[test]
    fn test_mapping_is_deterministic() {
        let url = "https://maxroll.gg/d4/bosses/echo-of-lilith?filter%5Bclasses%5D%5Bvalue%5D=d4-rogue";
        assert_eq!(map(url), map(url));
    }
}
