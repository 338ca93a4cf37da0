//! Wire types for crawled pages and structured training output.
//!
//! Input types ([`Page`], [`ContentNode`]) deserialize the crawler's JSON
//! records; output types ([`ContentBlock`], [`HierarchicalContent`],
//! [`ParseResult`]) serialize with camelCase field names to match the
//! existing on-disk corpus.

use serde::{Deserialize, Serialize};

/// A single crawled page record. Immutable input.
///
/// The `content` field accepts either an ordered array of typed nodes or the
/// legacy `{headings, paragraphs}` shape; a pre-chunked `contentBlocks` array
/// takes priority over both. Unknown extra fields from the crawler are
/// ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Page {
    /// Page title as scraped.
    #[serde(default)]
    pub title: String,

    /// Source URL of the page.
    #[serde(default)]
    pub url: String,

    /// Raw page content in one of the two node-level encodings.
    #[serde(default)]
    pub content: Option<PageContent>,

    /// Pre-chunked blocks, used verbatim when present and non-empty.
    #[serde(default, rename = "contentBlocks")]
    pub content_blocks: Option<Vec<ContentBlock>>,
}

/// The two node-level content encodings produced by the crawler.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PageContent {
    /// Ordered sequence of typed nodes. Document order is meaningful.
    Nodes(Vec<ContentNode>),
    /// Legacy shape with separate heading and paragraph arrays.
    /// Node interleaving is lost.
    Legacy(LegacyContent),
}

/// Legacy crawler output: headings and paragraphs in separate arrays.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegacyContent {
    #[serde(default)]
    pub headings: Vec<LegacyHeading>,
    #[serde(default)]
    pub paragraphs: Vec<String>,
}

/// A heading entry in the legacy content shape.
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyHeading {
    #[serde(default)]
    pub level: u8,
    pub text: String,
}

/// A typed content node, tagged by the crawler with a `type` field.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentNode {
    Heading {
        #[serde(default)]
        level: u8,
        text: String,
    },
    Paragraph {
        text: String,
    },
    List {
        #[serde(default)]
        items: Vec<String>,
        #[serde(default, rename = "list_type")]
        kind: ListKind,
    },
    Blockquote {
        text: String,
    },
    Figcaption {
        text: String,
    },
}

/// List flavor as emitted by the crawler (`ul` or `ol`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum ListKind {
    #[default]
    #[serde(rename = "ul")]
    Unordered,
    #[serde(rename = "ol")]
    Ordered,
}

/// Flat (heading, content) output unit. Content is a single joined string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    pub heading: String,
    pub content: String,
}

impl ContentBlock {
    pub fn new(heading: impl Into<String>, content: impl Into<String>) -> Self {
        Self { heading: heading.into(), content: content.into() }
    }
}

/// A named variant/phase of a boss enemy with its own stats and grouped
/// abilities. Unique by name within a page; created once, never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossVersion {
    pub name: String,

    /// Boss level; 0 when the stat line was unparsable.
    #[serde(default)]
    pub level: u32,

    /// Raw HP string as scraped (keeps `~` and thousands separators);
    /// empty when unparsable.
    #[serde(default)]
    pub hp: String,

    /// Stagger HP; 0 when unparsable.
    #[serde(default, rename = "staggerHp")]
    pub stagger_hp: u64,

    #[serde(default)]
    pub abilities: Vec<BossAbility>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub strategies: Vec<BossStrategy>,
}

impl BossVersion {
    /// Creates a version with the given stats and no abilities yet.
    pub fn new(name: impl Into<String>, level: u32, hp: impl Into<String>, stagger_hp: u64) -> Self {
        Self {
            name: name.into(),
            level,
            hp: hp.into(),
            stagger_hp,
            abilities: Vec::new(),
            strategies: Vec::new(),
        }
    }
}

/// A boss ability, owned by exactly one [`BossVersion`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossAbility {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
}

/// A strategy in the ability-external shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossStrategy {
    pub name: String,
    pub description: String,
}

/// The six-bucket taxonomy of general boss-page sections.
///
/// Each bucket holds blocks in source order. Buckets that stay empty are
/// serialized as empty arrays so downstream consumers see a stable shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BossSections {
    pub introduction: Vec<ContentBlock>,
    pub mechanics: Vec<ContentBlock>,
    pub fight_progression: Vec<ContentBlock>,
    pub advanced_strategy: Vec<ContentBlock>,
    pub summary: Vec<ContentBlock>,
    pub footer: Vec<ContentBlock>,
}

impl BossSections {
    /// True when no block landed in any bucket.
    pub fn is_empty(&self) -> bool {
        self.introduction.is_empty()
            && self.mechanics.is_empty()
            && self.fight_progression.is_empty()
            && self.advanced_strategy.is_empty()
            && self.summary.is_empty()
            && self.footer.is_empty()
    }
}

/// Hierarchical model of a boss page: variants with their owned abilities,
/// plus content that belongs to no variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchicalContent {
    pub title: String,
    pub url: String,
    pub boss_versions: Vec<BossVersion>,
    pub general_content: Vec<ContentBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sections: Option<BossSections>,
}

/// Accumulated outcome of one batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    pub total_pages: usize,
    pub pages_parsed: usize,
    pub pages_skipped: usize,
    /// Touched output folders, deduplicated, in insertion order.
    pub output_folders: Vec<String>,
    /// Non-fatal failures recorded as human-readable messages.
    pub errors: Vec<String>,
}

impl ParseResult {
    /// Records a folder once, preserving first-touch order.
    pub fn track_folder(&mut self, folder: &str) {
        if !self.output_folders.iter().any(|f| f == folder) {
            self.output_folders.push(folder.to_string());
        }
    }
}
