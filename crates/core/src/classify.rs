//! Boss-page detection and boss-name inference.

use crate::config::ParserConfig;
use crate::model::Page;

/// Returns true when the page is about a boss enemy.
///
/// Case-insensitive substring match of the configured keyword set against
/// the page title or URL. Pure, no side effects.
pub fn is_boss_page(page: &Page, config: &ParserConfig) -> bool {
    let title = page.title.to_lowercase();
    let url = page.url.to_lowercase();

    config.boss_keywords.iter().any(|keyword| title.contains(keyword.as_str()) || url.contains(keyword.as_str()))
}

/// Infers the boss name from a page title.
///
/// Takes the leading segment before the first separator (`|`, `:`, `–`, or a
/// spaced hyphen) and strips a trailing "boss guide"/"guide" suffix, so
/// "Echo of Lilith Boss Guide - Maxroll.gg" yields "Echo of Lilith".
pub fn boss_name(title: &str) -> String {
    let mut leading = title;
    for separator in ["|", " - ", "–", "—", ":"] {
        if let Some(index) = leading.find(separator) {
            leading = &leading[..index];
        }
    }

    let trimmed = leading.trim();
    let lower = trimmed.to_lowercase();

    for suffix in ["boss guide", "guide"] {
        let cut = trimmed.len().saturating_sub(suffix.len());
        if lower.len() == trimmed.len() && lower.ends_with(suffix) && trimmed.is_char_boundary(cut) {
            return trimmed[..cut].trim().to_string();
        }
    }

    trimmed.to_string()
}
