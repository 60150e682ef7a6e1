//! Splitting a normalized statement into one block per transaction.
//!
//! Two strategies are provided and picked per vendor:
//! - delimiter-anchored: cut a balance-bounded region after every cheque
//!   marker (passbooks)
//! - pattern-anchored: every match of a full-transaction pattern is a block
//!   (receipt listings)
//!
//! Segmentation never fails; an empty result means no transactions were found.

use regex::Regex;

use crate::token::{cheque_value, tokenize, TokenKind};

/// Substring believed to hold exactly one transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionBlock {
    /// Position in source order
    pub index: usize,
    pub text: String,
}

impl TransactionBlock {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }
}

pub trait Segmenter: Send + Sync {
    fn segment(&self, normalized: &str) -> Vec<TransactionBlock>;
}

/// Text strictly between the first `opening` match and the first `closing`
/// match after it. `None` when either marker is missing.
pub fn balance_region<'a>(text: &'a str, opening: &Regex, closing: &Regex) -> Option<&'a str> {
    let open = opening.find(text)?;
    let close = closing.find_at(text, open.end())?;
    Some(text[open.end()..close.start()].trim())
}

/// Cut `region` after every `Chq:` marker (and its value). Text after the last
/// marker has no anchor and is dropped.
pub fn split_after_anchors(region: &str) -> Vec<TransactionBlock> {
    let tokens = tokenize(region);
    let mut blocks = Vec::new();
    let mut start = 0;

    for (i, token) in tokens.iter().enumerate() {
        if !token.is(TokenKind::Cheque) {
            continue;
        }
        let end = cheque_value(region, &tokens, i).map_or(token.end, |v| v.end);
        if end <= start {
            continue;
        }
        let text = region[start..end].trim();
        if !text.is_empty() {
            blocks.push(TransactionBlock::new(blocks.len(), text));
        }
        start = end;
    }

    let trailing = region[start..].trim();
    if !trailing.is_empty() {
        tracing::debug!(chars = trailing.len(), "dropping text after last cheque anchor");
    }
    blocks
}

/// One block per match of `pattern`; a match is kept only when every group
/// named in `mandatory` captured non-blank text.
pub fn pattern_blocks(text: &str, pattern: &Regex, mandatory: &[&str]) -> Vec<TransactionBlock> {
    let mut blocks = Vec::new();
    for caps in pattern.captures_iter(text) {
        let complete = mandatory.iter().all(|name| {
            caps.name(name)
                .is_some_and(|m| !m.as_str().trim().is_empty())
        });
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if complete {
            blocks.push(TransactionBlock::new(blocks.len(), whole.as_str()));
        } else {
            tracing::debug!(at = whole.start(), "skipping match with blank mandatory field");
        }
    }
    blocks
}
