//! Heading-to-section categorization shared by both extraction paths.
//!
//! A heading that does not describe a boss ability lands in one of six fixed
//! buckets (or `general` when nothing matches). Matching walks the configured
//! keyword groups in order; the first group containing a matching keyword
//! wins, so group order encodes priority.

use crate::config::ParserConfig;
use serde::{Deserialize, Serialize};

/// One of the six fixed section tags, or `General` when no group matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionCategory {
    Introduction,
    Mechanics,
    FightProgression,
    AdvancedStrategy,
    Summary,
    Footer,
    General,
}

/// Classifies a heading into a section category.
///
/// Pure: identical input and configuration always yield the identical
/// category. Both the standard and hierarchical extractors route rejected
/// headings through this function so they agree on placement.
pub fn categorize(heading: &str, config: &ParserConfig) -> SectionCategory {
    let lower = heading.to_lowercase();

    for rule in &config.section_rules {
        if rule.keywords.iter().any(|keyword| lower.contains(keyword.as_str())) {
            return rule.category;
        }
    }

    SectionCategory::General
}
