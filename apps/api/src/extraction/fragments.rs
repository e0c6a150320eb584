//! Page text reconstruction: turns one page's positioned text fragments into
//! plain text that follows the page's visual line structure.

use thiserror::Error;
use tracing::warn;

/// One run of text as emitted by the page extractor.
///
/// `baseline` is the vertical position of the run on the page. Runs sharing a
/// baseline belong to the same visual line.
#[derive(Debug, Clone, PartialEq)]
pub struct TextFragment {
    pub content: String,
    pub baseline: f64,
}

impl TextFragment {
    pub fn new(content: impl Into<String>, baseline: f64) -> Self {
        Self {
            content: content.into(),
            baseline,
        }
    }
}

/// A single page could not be rendered into fragments.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("page {page} failed to render: {message}")]
    Render { page: u32, message: String },

    #[error("page {page} aborted the PDF renderer")]
    Aborted { page: u32 },
}

/// Fragments for one page, or the reason that page could not be read.
pub type PageFragments = Result<Vec<TextFragment>, PageError>;

/// Joins fragments into lines.
///
/// Fragments are taken in the order supplied, which is assumed to be left-to-right
/// within a line. A newline is emitted whenever the baseline changes from the
/// previous fragment; fragments on the same baseline are concatenated as-is.
pub fn reconstruct_page(fragments: &[TextFragment]) -> String {
    let mut text = String::new();
    let mut last_baseline: Option<f64> = None;

    for fragment in fragments {
        if let Some(last) = last_baseline {
            if fragment.baseline != last {
                text.push('\n');
            }
        }
        text.push_str(&fragment.content);
        last_baseline = Some(fragment.baseline);
    }

    text
}

/// Per-page callback used while assembling a document.
///
/// A failed page contributes an empty string so the rest of the document survives.
pub fn render_page(page: PageFragments) -> String {
    match page {
        Ok(fragments) => reconstruct_page(&fragments),
        Err(e) => {
            warn!(error = %e, "Dropping unreadable page");
            String::new()
        }
    }
}
