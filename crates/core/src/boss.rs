//! Hierarchical extraction for boss pages.
//!
//! Two passes over the canonical node sequence. Pass A discovers boss
//! variants: a figure caption naming the boss, followed by a stat paragraph
//! (`Level: N ... HP: ~M ... Stagger HP: K`), yields one [`BossVersion`].
//! Pass B threads an explicit two-level cursor (active version, open ability)
//! through a left-to-right reduction over the headings, assigning every piece
//! of trailing content to the entity that owns it.

use crate::blocks::{extract_blocks, fragment};
use crate::classify::boss_name;
use crate::config::ParserConfig;
use crate::input::Canonical;
use crate::model::{BossAbility, BossSections, BossVersion, ContentBlock, ContentNode, HierarchicalContent, Page};
use crate::sections::{SectionCategory, categorize};
use regex::Regex;
use std::sync::LazyLock;

/// Boss stat line: level, HP (optionally `~`-prefixed, thousands separators
/// tolerated), stagger HP. Non-greedy so a paragraph embedding two stat
/// blocks produces two matches.
static STAT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?si)level:\s*(\d+).*?hp:\s*(~?[\d][\d,.]*).*?stagger\s*hp:\s*(\d[\d,]*)")
        .expect("stat pattern is valid")
});

/// Outcome of testing a heading against the ability heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AbilityMatch {
    /// Opens a new ability.
    Accept,
    /// Never an ability; goes through the section categorizer.
    Reject,
    /// Neither; the heading continues whatever is already open.
    Neutral,
}

/// Classifies a heading under an active version.
///
/// Blacklist first, then the whitelist, then the default-accept for short
/// headings that mention neither "phase" nor "break".
fn classify_ability(heading: &str, config: &ParserConfig) -> AbilityMatch {
    let lower = heading.to_lowercase();

    if config.general_blacklist.iter().any(|k| lower.contains(k.as_str())) {
        return AbilityMatch::Reject;
    }
    if config.ability_keywords.iter().any(|k| lower.contains(k.as_str())) {
        return AbilityMatch::Accept;
    }
    if heading.chars().count() < config.ability_heading_cutoff && !lower.contains("phase") && !lower.contains("break")
    {
        return AbilityMatch::Accept;
    }

    AbilityMatch::Neutral
}

/// Pass A: discovers boss variants from figcaption/stat-paragraph pairs.
///
/// Figcaptions naming the boss queue up; each stat match in a subsequent
/// paragraph consumes one queued name in order. A paragraph carrying two
/// stat blocks (the dual-variant page layout) therefore registers both
/// variants at once. Duplicate figcaptions never create duplicate entities.
fn discover_versions(nodes: &[ContentNode], boss: &str) -> Vec<BossVersion> {
    if boss.is_empty() {
        return Vec::new();
    }

    let boss_lower = boss.to_lowercase();
    let mut versions: Vec<BossVersion> = Vec::new();
    let mut pending: Vec<String> = Vec::new();

    for node in nodes {
        match node {
            ContentNode::Figcaption { text } => {
                let name = text.trim();
                if name.to_lowercase().contains(&boss_lower)
                    && !versions.iter().any(|v| v.name.eq_ignore_ascii_case(name))
                    && !pending.iter().any(|p| p.eq_ignore_ascii_case(name))
                {
                    pending.push(name.to_string());
                }
            }
            ContentNode::Paragraph { text } if !pending.is_empty() => {
                for caps in STAT_RE.captures_iter(text) {
                    if pending.is_empty() {
                        break;
                    }
                    let name = pending.remove(0);
                    let level = caps.get(1).and_then(|m| m.as_str().parse().ok()).unwrap_or(0);
                    let hp = caps.get(2).map(|m| m.as_str().to_string()).unwrap_or_default();
                    let stagger =
                        caps.get(3).and_then(|m| m.as_str().replace(',', "").parse().ok()).unwrap_or(0);
                    versions.push(BossVersion::new(name, level, hp, stagger));
                }
            }
            _ => {}
        }
    }

    versions
}

/// A heading with its trailing content: the concatenated formatted
/// non-heading nodes up to the next heading.
#[derive(Debug, Clone)]
struct HeadingBlock {
    heading: String,
    content: String,
}

/// Splits the node sequence into a preamble (content before the first
/// heading) and per-heading blocks.
fn heading_blocks(nodes: &[ContentNode]) -> (String, Vec<HeadingBlock>) {
    let mut blocks: Vec<HeadingBlock> = Vec::new();
    let mut preamble: Vec<String> = Vec::new();
    let mut current: Option<(String, Vec<String>)> = None;

    for node in nodes {
        if let ContentNode::Heading { text, .. } = node {
            if let Some((heading, body)) = current.take() {
                blocks.push(HeadingBlock { heading, content: body.join(" ") });
            }
            current = Some((text.trim().to_string(), Vec::new()));
        } else if let Some(text) = fragment(node) {
            match current.as_mut() {
                Some((_, body)) => body.push(text),
                None => preamble.push(text),
            }
        }
    }

    if let Some((heading, body)) = current.take() {
        blocks.push(HeadingBlock { heading, content: body.join(" ") });
    }

    (preamble.join(" "), blocks)
}

/// The ownership accumulator threaded through Pass B.
///
/// Kept as an explicit value with a single transition function so the
/// grouping rules are unit-testable without a full page.
#[derive(Debug)]
struct Grouping {
    versions: Vec<BossVersion>,
    general: Vec<ContentBlock>,
    sections: BossSections,
    active_version: Option<usize>,
    active_ability: Option<BossAbility>,
}

impl Grouping {
    fn new(versions: Vec<BossVersion>) -> Self {
        Self {
            versions,
            general: Vec::new(),
            sections: BossSections::default(),
            active_version: None,
            active_ability: None,
        }
    }

    /// Applies one heading transition. First matching rule wins:
    /// version switch, strategy attachment, ability classification, then
    /// top-level section routing.
    fn step(&mut self, heading: &str, content: &str, config: &ParserConfig) {
        let heading = heading.trim();

        if let Some(index) = self.versions.iter().position(|v| v.name.eq_ignore_ascii_case(heading)) {
            self.flush_ability();
            self.active_version = Some(index);
            return;
        }

        let lower = heading.to_lowercase();
        if lower.contains("strategy") {
            if let Some(index) = self.active_version {
                self.attach_strategy(index, heading, content);
                return;
            }
        }

        if self.active_version.is_some() {
            match classify_ability(heading, config) {
                AbilityMatch::Accept => {
                    self.flush_ability();
                    self.active_ability = Some(BossAbility {
                        name: heading.to_string(),
                        description: content.to_string(),
                        strategy: None,
                    });
                }
                AbilityMatch::Reject => self.route_section(heading, content, config),
                AbilityMatch::Neutral => match self.active_ability.as_mut() {
                    Some(ability) if !content.is_empty() => {
                        if !ability.description.is_empty() {
                            ability.description.push(' ');
                        }
                        ability.description.push_str(content);
                    }
                    Some(_) => {}
                    None => self.route_section(heading, content, config),
                },
            }
            return;
        }

        self.route_section(heading, content, config);
    }

    /// Attaches strategy text to the open ability, to the version's last
    /// ability, or synthesizes a placeholder ability so the strategy is
    /// never dropped.
    fn attach_strategy(&mut self, version_index: usize, heading: &str, content: &str) {
        if let Some(ability) = self.active_ability.as_mut() {
            ability.strategy = Some(content.to_string());
        } else if let Some(last) = self.versions[version_index].abilities.last_mut() {
            last.strategy = Some(content.to_string());
        } else {
            self.versions[version_index].abilities.push(BossAbility {
                name: heading.to_string(),
                description: String::new(),
                strategy: Some(content.to_string()),
            });
        }
    }

    fn route_section(&mut self, heading: &str, content: &str, config: &ParserConfig) {
        let block = ContentBlock::new(heading, content);
        match categorize(heading, config) {
            SectionCategory::Introduction => self.sections.introduction.push(block),
            SectionCategory::Mechanics => self.sections.mechanics.push(block),
            SectionCategory::FightProgression => self.sections.fight_progression.push(block),
            SectionCategory::AdvancedStrategy => self.sections.advanced_strategy.push(block),
            SectionCategory::Summary => self.sections.summary.push(block),
            SectionCategory::Footer => self.sections.footer.push(block),
            SectionCategory::General => self.general.push(block),
        }
    }

    fn flush_ability(&mut self) {
        if let (Some(ability), Some(index)) = (self.active_ability.take(), self.active_version) {
            self.versions[index].abilities.push(ability);
        }
    }

    fn finish(mut self) -> (Vec<BossVersion>, Vec<ContentBlock>, BossSections) {
        self.flush_ability();
        (self.versions, self.general, self.sections)
    }
}

/// Builds the hierarchical model for a boss-classified page.
///
/// Only typed node sequences support the full two-pass pipeline; pre-chunked
/// and legacy content degrades gracefully to the flat blocks wrapped as
/// general content with no boss versions. This function never fails.
pub fn extract_hierarchy(page: &Page, canonical: &Canonical, config: &ParserConfig) -> HierarchicalContent {
    let nodes = match canonical {
        Canonical::Nodes(nodes) => nodes,
        Canonical::Blocks(_) => {
            return HierarchicalContent {
                title: page.title.clone(),
                url: page.url.clone(),
                boss_versions: Vec::new(),
                general_content: extract_blocks(&page.title, canonical),
                sections: None,
            };
        }
    };

    let versions = discover_versions(nodes, &boss_name(&page.title));
    tracing::debug!(page = %page.title, versions = versions.len(), "discovered boss versions");

    let (preamble, headed) = heading_blocks(nodes);
    let mut grouping = Grouping::new(versions);

    if !preamble.is_empty() {
        let heading = if page.title.is_empty() { "Content" } else { &page.title };
        grouping.general.push(ContentBlock::new(heading, preamble));
    }

    for block in &headed {
        grouping.step(&block.heading, &block.content, config);
    }

    let (boss_versions, general_content, sections) = grouping.finish();
    let sections = if sections.is_empty() { None } else { Some(sections) };

    HierarchicalContent { title: page.title.clone(), url: page.url.clone(), boss_versions, general_content, sections }
}
