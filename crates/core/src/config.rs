//! Keyword and taxonomy configuration.
//!
//! Every site-coupled table lives here as data rather than as hardcoded
//! branches: boss keywords, the ability whitelist, the general-content
//! blacklist, the ordered section keyword groups, and the URL taxonomy.
//! [`ParserConfig::default`] carries the target-site phrasing the engine was
//! built against; [`ParserConfig::from_file`] loads a JSON override so the
//! engine is reusable across sites.

use crate::error::{GuidemillError, Result};
use crate::sections::SectionCategory;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// An ordered keyword group mapping to one section category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionRule {
    pub category: SectionCategory,
    pub keywords: Vec<String>,
}

impl SectionRule {
    fn new(category: SectionCategory, keywords: &[&str]) -> Self {
        Self { category, keywords: keywords.iter().map(|k| k.to_string()).collect() }
    }
}

/// Complete engine configuration.
///
/// All keyword matching is case-insensitive substring matching against
/// lowercased keywords; keep the entries lowercase.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Keywords identifying a boss page when found in the title or URL.
    pub boss_keywords: Vec<String>,

    /// Ability whitelist: a heading containing one of these under an active
    /// boss version opens a new ability.
    pub ability_keywords: Vec<String>,

    /// General-content blacklist: a heading containing one of these is never
    /// an ability and is routed through the section categorizer instead.
    pub general_blacklist: Vec<String>,

    /// Ordered section keyword groups; the first matching group wins.
    pub section_rules: Vec<SectionRule>,

    /// URL path-segment to output-folder lookup table.
    pub folder_map: HashMap<String, String>,

    /// Anchor path segment that roots the site taxonomy (e.g. `d4`).
    pub url_anchor: String,

    /// Slug used when the URL path is exactly the anchor segment.
    pub home_slug: String,

    /// Query parameters whose decoded values disambiguate filtered URLs.
    pub filter_params: Vec<String>,

    /// Prefix stripped from filter values before appending to the slug.
    pub filter_value_prefix: String,

    /// Headings at least this long are never default-accepted as abilities.
    pub ability_heading_cutoff: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            boss_keywords: to_strings(&[
                "boss",
                "echo of lilith",
                "uber lilith",
                "ashava",
                "avarice",
                "wandering death",
                "duriel",
                "andariel",
                "varshan",
                "grigoire",
                "lord zir",
                "beast in the ice",
            ]),
            ability_keywords: to_strings(&[
                "blood orb",
                "melee combo",
                "fissure",
                "ground slam",
                "wave",
                "homing soul",
                "soul burst",
                "flight",
                "swipe",
                "stomp",
                "charge",
                "blizzard",
                "death spiral",
                "poison breath",
                "corpse bomb",
            ]),
            general_blacklist: to_strings(&[
                "phase",
                "credit",
                "changelog",
                "policy",
                "privacy",
                "minion",
                "table of contents",
                "related guides",
                "video",
                "faq",
                "feedback",
            ]),
            section_rules: vec![
                SectionRule::new(
                    SectionCategory::Introduction,
                    &["introduction", "overview", "who is", "getting started"],
                ),
                SectionRule::new(
                    SectionCategory::Mechanics,
                    &["mechanic", "debuff", "stagger", "tormented", "attunement"],
                ),
                SectionRule::new(
                    SectionCategory::FightProgression,
                    &["phase", "progression", "transition", "the fight", "fight sequence"],
                ),
                SectionRule::new(
                    SectionCategory::AdvancedStrategy,
                    &["advanced", "tips", "tricks", "cheat sheet", "optimiz"],
                ),
                SectionRule::new(SectionCategory::Summary, &["summary", "conclusion", "recap", "final thoughts"]),
                SectionRule::new(
                    SectionCategory::Footer,
                    &["credit", "changelog", "written by", "reviewed by", "feedback", "support us", "policy"],
                ),
            ],
            folder_map: default_folder_map(),
            url_anchor: "d4".to_string(),
            home_slug: "diablo-4-home".to_string(),
            filter_params: to_strings(&[
                "filter[classes][value]",
                "filter[metas][value]",
                "filter[build_guide_type][filters][0][value]",
            ]),
            filter_value_prefix: "d4-".to_string(),
            ability_heading_cutoff: 50,
        }
    }
}

impl ParserConfig {
    /// Loads a configuration override from a JSON file.
    ///
    /// Fields absent from the file keep their default values, so a site
    /// override only needs to spell out the tables that differ.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|e| GuidemillError::Config(format!("failed to read {}: {}", path.display(), e)))?;
        serde_json::from_str(&raw)
            .map_err(|e| GuidemillError::Config(format!("failed to parse {}: {}", path.display(), e)))
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_folder_map() -> HashMap<String, String> {
    let entries = [
        ("getting-started", "gameplay_mechanics"),
        ("tips", "gameplay_mechanics"),
        ("classes", "classes"),
        ("barbarian", "classes"),
        ("sorcerer", "classes"),
        ("rogue", "classes"),
        ("druid", "classes"),
        ("necromancer", "classes"),
        ("spiritborn", "classes"),
        ("leveling", "leveling"),
        ("systems", "core_systems"),
        ("world", "world"),
        ("regions", "world"),
        ("areas", "world"),
        ("locations", "world"),
        ("endgame", "endgame"),
        ("builds", "builds"),
        ("build-guides", "builds"),
        ("economy", "economy"),
        ("progression", "gear"),
        ("bosses", "bosses"),
        ("tierlists", "tier_lists"),
        ("meta", "meta"),
        ("news", "news"),
        ("database", "database"),
        ("map-tool", "tools"),
        ("planner", "tools"),
        ("resources", "resources"),
        ("wiki", "wiki"),
        ("guides", "guides"),
        ("dungeons", "dungeons"),
        ("strongholds", "strongholds"),
        ("events", "events"),
        ("seasons", "seasons"),
        ("pvp", "pvp"),
        ("crafting", "crafting"),
        ("items", "items"),
        ("uniques", "items"),
        ("aspects", "items"),
        ("runes", "items"),
        ("runewords", "items"),
        ("side-quests", "quests"),
        ("side-quest", "quests"),
        ("main-quest", "quests"),
        ("quests", "quests"),
    ];

    entries.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_tables_are_lowercase() {
        let config = ParserConfig::default();
        for keyword in config
            .boss_keywords
            .iter()
            .chain(config.ability_keywords.iter())
            .chain(config.general_blacklist.iter())
        {
            assert_eq!(keyword, &keyword.to_lowercase(), "keyword {:?} must be lowercase", keyword);
        }
        for rule in &config.section_rules {
            for keyword in &rule.keywords {
                assert_eq!(keyword, &keyword.to_lowercase());
            }
        }
    }

    #[test]
    fn test_default_folder_map() {
        let config = ParserConfig::default();
        assert_eq!(config.folder_map.get("bosses").map(String::as_str), Some("bosses"));
        assert_eq!(config.folder_map.get("build-guides").map(String::as_str), Some("builds"));
        assert_eq!(config.folder_map.get("uniques").map(String::as_str), Some("items"));
        assert!(config.folder_map.get("nonexistent").is_none());
    }

    #[test]
    fn test_from_file_round_trip() {
        let config = ParserConfig::default();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", serde_json::to_string_pretty(&config).unwrap()).unwrap();

        let reloaded = ParserConfig::from_file(file.path()).unwrap();
        assert_eq!(reloaded.boss_keywords, config.boss_keywords);
        assert_eq!(reloaded.url_anchor, config.url_anchor);
        assert_eq!(reloaded.section_rules.len(), config.section_rules.len());
    }

    #[test]
    fn test_from_file_partial_override_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"url_anchor": "poe2", "home_slug": "poe2-home"}}"#).unwrap();

        let config = ParserConfig::from_file(file.path()).unwrap();
        assert_eq!(config.url_anchor, "poe2");
        assert_eq!(config.home_slug, "poe2-home");
        assert!(!config.boss_keywords.is_empty());
        assert_eq!(config.ability_heading_cutoff, 50);
    }

    #[test]
    fn test_from_file_missing() {
        let result = ParserConfig::from_file(Path::new("/nonexistent/config.json"));
        assert!(matches!(result, Err(GuidemillError::Config(_))));
    }

    #[test]
    fn test_from_file_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let result = ParserConfig::from_file(file.path());
        assert!(matches!(result, Err(GuidemillError::Config(_))));
    }
}
