//! Document assembly: joins reconstructed pages, normalizes the text and decides
//! whether there is enough of it to analyze.

use serde::Serialize;

/// Upper bound on stored/analyzed text. Longer documents are cut, never rejected.
pub const MAX_TEXT_CHARS: usize = 150_000;

/// Below this many normalized characters a document is treated as image-only.
pub const MIN_READABLE_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Readability {
    Readable,
    Unreadable,
}

/// Text of one uploaded document, ready for analysis.
#[derive(Debug, Clone)]
pub struct AssembledDocument {
    /// Pages concatenated in order, trimmed.
    pub raw_text: String,
    /// Printable ASCII plus newlines and tabs, single-spaced, trimmed and capped
    /// at `MAX_TEXT_CHARS`.
    pub normalized_text: String,
    pub verdict: Readability,
}

impl AssembledDocument {
    pub fn is_readable(&self) -> bool {
        self.verdict == Readability::Readable
    }
}

/// Strips everything outside printable ASCII, collapses runs of spaces and trims.
///
/// `\n` and `\t` are kept so the line structure produced by page reconstruction
/// survives. Applying this twice is a no-op.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_space = false;

    for c in text.chars().filter(|&c| is_kept(c)) {
        if c == ' ' {
            if prev_space {
                continue;
            }
            prev_space = true;
        } else {
            prev_space = false;
        }
        out.push(c);
    }

    out.trim().to_string()
}

fn is_kept(c: char) -> bool {
    matches!(c, ' '..='~' | '\n' | '\t')
}

/// Builds the document from already-reconstructed pages, in the order given.
pub fn assemble(pages: &[String]) -> AssembledDocument {
    let raw_text = pages.concat().trim().to_string();
    let mut normalized_text = normalize(&raw_text);
    truncate_chars(&mut normalized_text, MAX_TEXT_CHARS);

    let verdict = if normalized_text.chars().count() >= MIN_READABLE_CHARS {
        Readability::Readable
    } else {
        Readability::Unreadable
    };

    AssembledDocument {
        raw_text,
        normalized_text,
        verdict,
    }
}

fn truncate_chars(text: &mut String, max_chars: usize) {
    if let Some((idx, _)) = text.char_indices().nth(max_chars) {
        text.truncate(idx);
    }
}
