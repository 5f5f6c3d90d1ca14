//! Text extraction: PDF bytes in, [`RawDocumentText`] out.

use std::fs;
use std::path::Path;

use spendlens_core::ExtractionError;
use tracing::debug;

use crate::text::RawDocumentText;

/// Produces the page-ordered text lines of a document.
///
/// A document without extractable text (scanned pages) yields an empty
/// result, not an error.
pub trait TextExtractor {
    fn extract(&self, document: &[u8]) -> Result<RawDocumentText, ExtractionError>;

    fn extract_path(&self, path: &Path) -> Result<RawDocumentText, ExtractionError> {
        let bytes = fs::read(path).map_err(|source| ExtractionError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), bytes = bytes.len(), "read statement");
        self.extract(&bytes)
    }
}

/// Extractor backed by `pdf-extract`
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, document: &[u8]) -> Result<RawDocumentText, ExtractionError> {
        let text = pdf_extract::extract_text_from_mem(document)
            .map_err(|e| ExtractionError::Decode(e.to_string()))?;

        let raw = RawDocumentText::from_text(&text);
        debug!(lines = raw.len(), "extracted statement text");
        Ok(raw)
    }
}

/// Already-extracted text, for callers that run their own PDF tooling.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, document: &[u8]) -> Result<RawDocumentText, ExtractionError> {
        let text = std::str::from_utf8(document)
            .map_err(|e| ExtractionError::Decode(format!("text is not UTF-8: {e}")))?;
        Ok(RawDocumentText::from_text(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_garbage_bytes_are_a_decode_error() {
        let err = PdfTextExtractor.extract(b"definitely not a pdf").unwrap_err();
        assert!(matches!(err, ExtractionError::Decode(_)));
    }

    #[test]
    fn test_missing_file_is_a_read_error() {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("no-such-statement.pdf");
        let err = PdfTextExtractor.extract_path(&path).unwrap_err();
        match err {
            ExtractionError::Read { path: p, .. } => assert_eq!(p, path),
            other => panic!("expected read error, got {other:?}"),
        }
    }

    #[test]
    fn test_plain_text_extractor() {
        let raw = PlainTextExtractor.extract("a\n\nb\n".as_bytes()).unwrap();
        assert_eq!(raw.lines(), &["a", "b"]);

        let err = PlainTextExtractor.extract(&[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(matches!(err, ExtractionError::Decode(_)));
    }
}
