//! Payment-app statement parser (text)
//!
//! Expected extracted-text rows:
//!   Aug 06, 2025 Paid to Coffee Shop DEBIT ₹360
//!   2:15 pm
//!   Aug 07, 2025 Received from Employer CREDIT ₹50,000
//!
//! A primary line carries date, direction, payee, type and amount. The line
//! right after it may hold the clock time; when it does not, the record gets
//! midnight.

use anyhow::Result;
use chrono::NaiveDateTime;
use regex::{Captures, Regex};
use spendlens_core::{Direction, LineParseError, TransactionRecord, TransactionTable};
use tracing::{debug, warn};

use crate::text::RawDocumentText;

const DATETIME_FORMAT: &str = "%b %d, %Y %I:%M %p";
const MIDNIGHT: &str = "12:00 am";

const MONTHS: [&str; 12] = [
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december",
];

/// Result of parsing one document.
///
/// Both `RawText` and `Empty` mean "no structured data": callers branch on
/// the variant rather than on an error.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    /// At least one record was recognized
    Table(TransactionTable),
    /// Text was present but no line produced a record
    RawText(RawDocumentText),
    /// The extractor produced no text at all
    Empty,
}

impl ParseOutcome {
    pub fn is_no_structured_data(&self) -> bool {
        !matches!(self, ParseOutcome::Table(_))
    }

    pub fn table(&self) -> Option<&TransactionTable> {
        match self {
            ParseOutcome::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn into_table(self) -> Option<TransactionTable> {
        match self {
            ParseOutcome::Table(t) => Some(t),
            _ => None,
        }
    }
}

/// A primary line that matched the grammar but was dropped
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedLine {
    /// 1-based index into the document's lines
    pub line_no: usize,
    pub line: String,
    pub error: LineParseError,
}

/// Records in source order plus the primary lines that failed validation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanReport {
    pub records: Vec<TransactionRecord>,
    pub skipped: Vec<SkippedLine>,
}

impl ScanReport {
    pub fn into_outcome(self, raw: RawDocumentText) -> ParseOutcome {
        if !self.records.is_empty() {
            ParseOutcome::Table(TransactionTable::new(self.records))
        } else if raw.is_empty() {
            ParseOutcome::Empty
        } else {
            ParseOutcome::RawText(raw)
        }
    }
}

/// Scanner state. After a primary match the next line is peeked for a time,
/// then scanning always returns to `SeekingPrimary`.
enum ScanState<'a> {
    SeekingPrimary,
    PeekTime { primary: Captures<'a>, line_idx: usize },
}

/// Compiled grammar for the payment-app statement layout.
///
/// Holds no per-document state; one parser can be reused for any number of
/// documents.
#[derive(Debug, Clone)]
pub struct StatementParser {
    primary_re: Regex,
    time_re: Regex,
}

impl StatementParser {
    pub fn new() -> Result<Self> {
        let primary_re = Regex::new(concat!(
            r"^(?P<month>[A-Za-z]{3,9}) (?P<day>\d{1,2}), (?P<year>\d{4}) ",
            r"(?P<phrase>Paid to|Received from) ",
            r"(?P<payee>.+?) ",
            r"(?P<kind>DEBIT|CREDIT) ",
            r"₹(?P<amount>[\d,]+(?:\.\d{1,2})?)"
        ))?;
        let time_re = Regex::new(r"(?i)^(?P<clock>\d{1,2}:\d{2}) ?(?P<meridiem>am|pm)$")?;

        Ok(Self {
            primary_re,
            time_re,
        })
    }

    /// Parse document lines into a table, or a "no structured data" marker.
    pub fn parse(&self, raw: RawDocumentText) -> ParseOutcome {
        let report = self.scan(&raw);
        if !report.skipped.is_empty() {
            debug!(skipped = report.skipped.len(), "some primary lines were dropped");
        }
        report.into_outcome(raw)
    }

    /// Parse already-extracted text
    pub fn parse_text(&self, text: &str) -> ParseOutcome {
        self.parse(RawDocumentText::from_text(text))
    }

    /// Walk the lines once, collecting records and skipped primary lines.
    pub fn scan(&self, raw: &RawDocumentText) -> ScanReport {
        let lines = raw.lines();
        let mut report = ScanReport::default();
        let mut state = ScanState::SeekingPrimary;
        let mut i = 0;

        while i < lines.len() {
            state = match state {
                ScanState::SeekingPrimary => {
                    let next = self
                        .primary_re
                        .captures(&lines[i])
                        .map(|primary| ScanState::PeekTime {
                            primary,
                            line_idx: i,
                        })
                        .unwrap_or(ScanState::SeekingPrimary);
                    i += 1;
                    next
                }
                ScanState::PeekTime { primary, line_idx } => {
                    let time = self.clock_time(&lines[i]);
                    if time.is_some() {
                        // consumed: never a record start
                        i += 1;
                    }
                    self.emit(&mut report, &primary, time, line_idx, &lines[line_idx]);
                    ScanState::SeekingPrimary
                }
            };
        }

        // primary match on the last line: nothing to peek at
        if let ScanState::PeekTime { primary, line_idx } = state {
            self.emit(&mut report, &primary, None, line_idx, &lines[line_idx]);
        }

        debug!(
            lines = lines.len(),
            records = report.records.len(),
            skipped = report.skipped.len(),
            "scanned statement text"
        );
        report
    }

    fn clock_time(&self, line: &str) -> Option<String> {
        self.time_re
            .captures(line)
            .map(|c| format!("{} {}", &c["clock"], &c["meridiem"]))
    }

    fn emit(
        &self,
        report: &mut ScanReport,
        primary: &Captures<'_>,
        time: Option<String>,
        line_idx: usize,
        line: &str,
    ) {
        match build_record(primary, time.as_deref().unwrap_or(MIDNIGHT)) {
            Ok(record) => report.records.push(record),
            Err(error) => {
                warn!(line_no = line_idx + 1, %error, "skipping transaction line");
                report.skipped.push(SkippedLine {
                    line_no: line_idx + 1,
                    line: line.to_string(),
                    error,
                });
            }
        }
    }
}

/// Reduce a month token to the abbreviation `%b` expects.
///
/// Accepts the 3-letter abbreviation or the full name, any case. Anything
/// else (`Sept`, `Augu`) is not a month.
fn month_abbrev(token: &str) -> Option<&'static str> {
    let lower = token.to_ascii_lowercase();
    MONTHS
        .iter()
        .copied()
        .find(|name| lower == name[..3] || lower == *name)
        .map(|name| &name[..3])
}

fn resolve_direction(kind: &str) -> Result<Direction, LineParseError> {
    Direction::from_token(kind).ok_or_else(|| LineParseError::Kind(kind.to_string()))
}

fn build_record(primary: &Captures<'_>, time: &str) -> Result<TransactionRecord, LineParseError> {
    let month = &primary["month"];
    let stamp = format!("{} {}, {} {}", month, &primary["day"], &primary["year"], time);
    let datetime_err = |reason: String| LineParseError::DateTime {
        input: stamp.clone(),
        reason,
    };

    let abbrev = month_abbrev(month).ok_or_else(|| datetime_err(format!("unknown month '{month}'")))?;
    let normalized = format!("{} {}, {} {}", abbrev, &primary["day"], &primary["year"], time);
    let datetime = NaiveDateTime::parse_from_str(&normalized, DATETIME_FORMAT)
        .map_err(|e| datetime_err(e.to_string()))?;

    let amount_raw = &primary["amount"];
    let amount: f64 = amount_raw
        .replace(',', "")
        .parse()
        .map_err(|_| LineParseError::Amount(amount_raw.to_string()))?;

    let direction = resolve_direction(&primary["kind"])?;
    let phrase = &primary["phrase"];
    let phrase_agrees = matches!(
        (phrase, direction),
        ("Paid to", Direction::Debit) | ("Received from", Direction::Credit)
    );
    if !phrase_agrees {
        debug!(phrase, kind = direction.as_str(), "direction phrase disagrees with type; trusting type");
    }

    Ok(TransactionRecord::new(
        datetime.date(),
        datetime.time(),
        primary["payee"].trim(),
        direction,
        amount,
    )?)
}
