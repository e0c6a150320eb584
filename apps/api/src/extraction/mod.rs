// Resume text extraction: PDF pages → positioned fragments → lines → one
// normalized document, plus the upload checks that gate analysis.

pub mod assemble;
pub mod fragments;
pub mod pdf;
pub mod upload;
