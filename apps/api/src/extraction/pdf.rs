//! Page extraction backed by `pdf-extract`.
//!
//! `PdfPageExtractor` walks the document page by page and feeds glyphs into a
//! `FragmentSink`, which groups them into baseline-keyed `TextFragment`s for
//! `reconstruct_page`. The rest of the pipeline only sees the `PageExtractor` trait.

use std::panic::{self, AssertUnwindSafe};

use pdf_extract::{Document, MediaBox, OutputDev, OutputError, Transform};
use thiserror::Error;
use tracing::debug;

use crate::extraction::fragments::{PageError, PageFragments, TextFragment};

/// Horizontal gap, as a fraction of the font size, that counts as a word break.
const WORD_GAP_RATIO: f64 = 0.1;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("document could not be parsed: {0}")]
    Malformed(String),

    #[error("document has no pages")]
    NoPages,
}

/// Splits a document into per-page fragment lists.
///
/// Implementations return one entry per page, in document order. A page that
/// fails on its own is reported as `Err` in its slot; `ExtractionError` is
/// reserved for documents that cannot be opened at all.
pub trait PageExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<Vec<PageFragments>, ExtractionError>;
}

/// Production extractor for text-based PDFs.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfPageExtractor;

impl PageExtractor for PdfPageExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<Vec<PageFragments>, ExtractionError> {
        let doc = Document::load_mem(bytes).map_err(|e| ExtractionError::Malformed(e.to_string()))?;

        // BTreeMap keyed by page number, so this is document order.
        let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
        if page_numbers.is_empty() {
            return Err(ExtractionError::NoPages);
        }

        debug!(pages = page_numbers.len(), "Extracting PDF pages");
        Ok(page_numbers
            .into_iter()
            .map(|page| extract_page(&doc, page))
            .collect())
    }
}

fn extract_page(doc: &Document, page: u32) -> PageFragments {
    let mut sink = FragmentSink::default();

    // pdf-extract panics on some malformed content streams; contain it to this page.
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::output_doc_page(doc, &mut sink, page)
    }));

    match outcome {
        Ok(Ok(())) => Ok(sink.finish()),
        Ok(Err(e)) => Err(PageError::Render {
            page,
            message: e.to_string(),
        }),
        Err(_) => Err(PageError::Aborted { page }),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Glyph → fragment grouping
// ────────────────────────────────────────────────────────────────────────────

/// Collects glyphs emitted by `pdf-extract` into fragments.
///
/// A fragment ends at a word boundary, a line boundary, or when the baseline
/// changes. Spacing that the PDF expresses only as positioning is turned into a
/// literal space so fragments can be concatenated without separators.
#[derive(Debug, Default)]
struct FragmentSink {
    fragments: Vec<TextFragment>,
    current: String,
    current_baseline: f64,
    last_baseline: Option<f64>,
    last_end_x: f64,
}

impl FragmentSink {
    fn push_glyph(&mut self, x: f64, baseline: f64, advance: f64, font_size: f64, glyph: &str) {
        if !self.current.is_empty() && self.current_baseline != baseline {
            self.flush();
        }

        let gap = self.last_baseline == Some(baseline)
            && x > self.last_end_x + font_size * WORD_GAP_RATIO;
        if gap && !self.current.ends_with(' ') && !glyph.starts_with(' ') {
            self.current.push(' ');
        }

        self.current.push_str(glyph);
        self.current_baseline = baseline;
        self.last_baseline = Some(baseline);
        self.last_end_x = x + advance;
    }

    fn flush(&mut self) {
        if self.current.is_empty() {
            return;
        }
        let content = std::mem::take(&mut self.current);
        self.fragments
            .push(TextFragment::new(content, self.current_baseline));
    }

    fn finish(mut self) -> Vec<TextFragment> {
        self.flush();
        self.fragments
    }
}

impl OutputDev for FragmentSink {
    fn begin_page(
        &mut self,
        _page_num: u32,
        _media_box: &MediaBox,
        _art_box: Option<(f64, f64, f64, f64)>,
    ) -> Result<(), OutputError> {
        Ok(())
    }

    fn end_page(&mut self) -> Result<(), OutputError> {
        self.flush();
        Ok(())
    }

    fn output_character(
        &mut self,
        trm: &Transform,
        width: f64,
        _spacing: f64,
        font_size: f64,
        char: &str,
    ) -> Result<(), OutputError> {
        // Effective size after the text matrix scale (unrotated text: m11 × m22).
        let scaled_size = font_size * (trm.m11 * trm.m22).abs().sqrt();
        self.push_glyph(trm.m31, trm.m32, width * scaled_size, scaled_size, char);
        Ok(())
    }

    fn begin_word(&mut self) -> Result<(), OutputError> {
        Ok(())
    }

    fn end_word(&mut self) -> Result<(), OutputError> {
        self.flush();
        Ok(())
    }

    fn end_line(&mut self) -> Result<(), OutputError> {
        self.flush();
        Ok(())
    }
}
