pub mod blocks;
pub mod boss;
pub mod classify;
pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod parser;
pub mod sections;
pub mod taxonomy;

pub use blocks::{extract_blocks, fragment};
pub use boss::extract_hierarchy;
pub use classify::{boss_name, is_boss_page};
pub use config::{ParserConfig, SectionRule};
pub use error::{GuidemillError, Result};
pub use input::{Canonical, canonicalize, decode_pages, load_pages};
pub use model::{
    BossAbility, BossSections, BossStrategy, BossVersion, ContentBlock, ContentNode, HierarchicalContent,
    LegacyContent, LegacyHeading, ListKind, Page, PageContent, ParseResult,
};
pub use parser::{PageOutput, ParseOptions, Parser, parse};
pub use sections::{SectionCategory, categorize};
pub use taxonomy::{MISC_FOLDER, UNKNOWN_SLUG, folder_and_slug};
