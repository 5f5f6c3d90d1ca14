//! spendlens-ingest: statement text extraction and the payment-app record parser.

pub mod extract;
pub mod parsers;
pub mod text;

use std::path::Path;

use anyhow::Result;

pub use extract::{PdfTextExtractor, PlainTextExtractor, TextExtractor};
pub use parsers::payment_app::{ParseOutcome, ScanReport, SkippedLine, StatementParser};
pub use text::RawDocumentText;

/// Extract and parse a statement PDF from disk.
///
/// Only extraction failures are errors; a statement with no recognizable
/// transactions comes back as a "no structured data" outcome.
pub fn parse_statement_pdf(path: impl AsRef<Path>) -> Result<ParseOutcome> {
    let raw = PdfTextExtractor.extract_path(path.as_ref())?;
    Ok(StatementParser::new()?.parse(raw))
}

/// Extract and parse an in-memory document with any extractor
pub fn parse_document<E: TextExtractor>(extractor: &E, document: &[u8]) -> Result<ParseOutcome> {
    let raw = extractor.extract(document)?;
    Ok(StatementParser::new()?.parse(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use spendlens_core::ExtractionError;

    #[test]
    fn test_parse_document_with_plain_text() {
        let doc = "Aug 06, 2025 Paid to Coffee Shop DEBIT ₹360\n2:15 pm\n";
        let table = parse_document(&PlainTextExtractor, doc.as_bytes())
            .unwrap()
            .into_table()
            .unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_empty_document_is_not_an_error() {
        let outcome = parse_document(&PlainTextExtractor, b"").unwrap();
        assert_eq!(outcome, ParseOutcome::Empty);
    }

    #[test]
    fn test_extraction_error_is_surfaced() {
        let err = parse_statement_pdf("/nonexistent/statement.pdf").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ExtractionError>(),
            Some(ExtractionError::Read { .. })
        ));
    }
}
