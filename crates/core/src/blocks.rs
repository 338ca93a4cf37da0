//! Standard block extraction: canonical content to flat (heading, content)
//! blocks.
//!
//! The fold walks nodes in document order: each heading flushes the block in
//! progress and opens the next one; every other node appends a type-specific
//! formatted fragment. Block order therefore mirrors source order.

use crate::input::Canonical;
use crate::model::{ContentBlock, ContentNode};

/// Formats a non-heading node as a body fragment.
///
/// List items are joined with `"; "`, blockquotes are wrapped in double
/// quotes, and figure captions are prefixed so they stay recognizable in the
/// joined body. Returns `None` for headings and for nodes with no text.
pub fn fragment(node: &ContentNode) -> Option<String> {
    let text = match node {
        ContentNode::Heading { .. } => return None,
        ContentNode::Paragraph { text } => text.trim().to_string(),
        ContentNode::List { items, .. } => items
            .iter()
            .map(|item| item.trim())
            .filter(|item| !item.is_empty())
            .collect::<Vec<_>>()
            .join("; "),
        ContentNode::Blockquote { text } => {
            let trimmed = text.trim();
            if trimmed.is_empty() { String::new() } else { format!("\"{}\"", trimmed) }
        }
        ContentNode::Figcaption { text } => {
            let trimmed = text.trim();
            if trimmed.is_empty() { String::new() } else { format!("Caption: {}", trimmed) }
        }
    };

    if text.is_empty() { None } else { Some(text) }
}

/// Folds canonical content into flat blocks.
///
/// Content preceding the first heading accumulates under the page title.
/// Blocks whose body stays empty are not emitted; a page yielding zero
/// blocks is a non-fatal skip handled by the caller.
pub fn extract_blocks(title: &str, canonical: &Canonical) -> Vec<ContentBlock> {
    let nodes = match canonical {
        Canonical::Blocks(blocks) => return blocks.clone(),
        Canonical::Nodes(nodes) => nodes,
    };

    let mut blocks = Vec::new();
    let mut heading = if title.is_empty() { "Content".to_string() } else { title.to_string() };
    let mut body: Vec<String> = Vec::new();

    for node in nodes {
        if let ContentNode::Heading { text, .. } = node {
            flush(&mut blocks, &heading, &mut body);
            heading = text.trim().to_string();
        } else if let Some(text) = fragment(node) {
            body.push(text);
        }
    }

    flush(&mut blocks, &heading, &mut body);
    blocks
}

fn flush(blocks: &mut Vec<ContentBlock>, heading: &str, body: &mut Vec<String>) {
    if !body.is_empty() {
        blocks.push(ContentBlock::new(heading, body.join(" ")));
        body.clear();
    }
}
