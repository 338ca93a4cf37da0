//! Batch parsing API.
//!
//! [`parse`] turns one page into its flat blocks plus, for boss pages, the
//! hierarchical model. [`Parser`] wraps it for batches: it resolves each
//! page's output location, persists 0-2 JSON files per page, and accumulates
//! counts and non-fatal errors in a [`ParseResult`]. Only fatal input
//! failures propagate as errors; a single page can never abort a batch.

use crate::blocks::extract_blocks;
use crate::boss::extract_hierarchy;
use crate::classify::is_boss_page;
use crate::config::ParserConfig;
use crate::error::Result;
use crate::input::{canonicalize, load_pages};
use crate::model::{ContentBlock, HierarchicalContent, Page, ParseResult};
use crate::taxonomy::{UNKNOWN_SLUG, folder_and_slug};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Options consumed by a batch run.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Root directory for output files.
    pub output_dir: PathBuf,
    /// Run the full classification but suppress all writes.
    pub dry_run: bool,
    /// Promote per-page progress to info-level log events.
    pub verbose: bool,
    /// Also persist the hierarchical model for boss pages.
    pub preserve_hierarchy: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("training-data"),
            dry_run: false,
            verbose: false,
            preserve_hierarchy: true,
        }
    }
}

/// The per-page output contract: flat blocks always, the hierarchical model
/// iff the page is boss-classified.
#[derive(Debug, Clone)]
pub struct PageOutput {
    pub blocks: Vec<ContentBlock>,
    pub hierarchical: Option<HierarchicalContent>,
}

/// Parses one page into its output units.
///
/// Pure with respect to the page: entities are created fresh per call and no
/// state survives across calls.
pub fn parse(page: &Page, config: &ParserConfig) -> PageOutput {
    let canonical = canonicalize(page);
    let blocks = extract_blocks(&page.title, &canonical);

    let hierarchical =
        if is_boss_page(page, config) { Some(extract_hierarchy(page, &canonical, config)) } else { None };

    PageOutput { blocks, hierarchical }
}

/// Batch parser: applies [`parse`] to every page and persists the results.
///
/// The accumulator is local to each `parse_all` call, so one `Parser` may be
/// reused across batches (sequentially; it is not meant for concurrent
/// reentry).
#[derive(Debug, Clone)]
pub struct Parser {
    options: ParseOptions,
    config: ParserConfig,
}

impl Parser {
    /// Creates a parser with the default (target-site) configuration.
    pub fn new(options: ParseOptions) -> Self {
        Self { options, config: ParserConfig::default() }
    }

    /// Creates a parser with a custom keyword/taxonomy configuration.
    pub fn with_config(options: ParseOptions, config: ParserConfig) -> Self {
        Self { options, config }
    }

    /// Reads a batch input file and processes every record in it.
    ///
    /// Line-level decode errors are carried into the result; unreadable
    /// files and zero-record inputs are fatal.
    pub fn parse_file(&self, path: &Path) -> Result<ParseResult> {
        let (pages, line_errors) = load_pages(path)?;
        let mut result = self.parse_all(&pages);
        result.errors.splice(0..0, line_errors);
        Ok(result)
    }

    /// Processes a batch of already-decoded pages.
    pub fn parse_all(&self, pages: &[Page]) -> ParseResult {
        let mut result = ParseResult { total_pages: pages.len(), ..ParseResult::default() };

        for page in pages {
            self.process_page(page, &mut result);
        }

        info!(
            total = result.total_pages,
            parsed = result.pages_parsed,
            skipped = result.pages_skipped,
            folders = result.output_folders.len(),
            "batch complete"
        );

        result
    }

    fn process_page(&self, page: &Page, result: &mut ParseResult) {
        let output = parse(page, &self.config);

        if output.blocks.is_empty() {
            result.pages_skipped += 1;
            result.errors.push(format!("no content blocks in page \"{}\"", page.title));
            debug!(page = %page.title, "skipped: no content blocks");
            return;
        }

        let (folder, slug) = folder_and_slug(&page.url, &self.config);
        if slug == UNKNOWN_SLUG {
            result.pages_skipped += 1;
            result.errors.push(format!("could not derive slug from URL: {}", page.url));
            debug!(page = %page.title, url = %page.url, "skipped: unresolvable slug");
            return;
        }

        if !self.options.dry_run {
            let folder_path = self.options.output_dir.join(&folder);
            if let Err(message) = self.persist(&folder_path, &slug, &output) {
                result.pages_skipped += 1;
                result.errors.push(message);
                return;
            }
        }

        result.track_folder(&folder);
        result.pages_parsed += 1;

        if self.options.verbose {
            info!(page = %page.title, folder = %folder, slug = %slug, blocks = output.blocks.len(),
                hierarchical = output.hierarchical.is_some(), dry_run = self.options.dry_run, "parsed page");
        }
    }

    /// Writes the flat blocks and, when enabled, the hierarchical model.
    /// Returns a recorded-error message on failure; never panics or aborts.
    fn persist(&self, folder_path: &Path, slug: &str, output: &PageOutput) -> std::result::Result<(), String> {
        fs::create_dir_all(folder_path)
            .map_err(|e| format!("failed to create {}: {}", folder_path.display(), e))?;

        let flat_path = folder_path.join(format!("{}.json", slug));
        write_json(&flat_path, &output.blocks)?;

        if self.options.preserve_hierarchy
            && let Some(hierarchical) = &output.hierarchical
        {
            let hierarchical_path = folder_path.join(format!("{}-hierarchical.json", slug));
            write_json(&hierarchical_path, hierarchical)?;
        }

        Ok(())
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> std::result::Result<(), String> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("failed to serialize {}: {}", path.display(), e))?;

    fs::write(path, json).map_err(|e| {
        warn!(path = %path.display(), error = %e, "write failed");
        format!("failed to write {}: {}", path.display(), e)
    })
}
