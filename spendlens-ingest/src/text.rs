//! Line-oriented statement text as produced by the extractor.

/// Ordered, immutable sequence of visual text lines (pages concatenated,
/// page breaks not marked).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawDocumentText {
    lines: Vec<String>,
}

impl RawDocumentText {
    /// Split extracted text into lines.
    ///
    /// Lines are trimmed, PDF artifacts (form feeds, NULs, BOMs) removed and
    /// blank lines dropped, so adjacent visual lines stay adjacent here.
    pub fn from_text(text: &str) -> Self {
        Self::from_lines(text.lines())
    }

    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lines = lines
            .into_iter()
            .flat_map(|l| {
                // pdf text uses form feed between pages
                l.as_ref()
                    .split('\u{c}')
                    .map(clean_line)
                    .collect::<Vec<_>>()
            })
            .filter(|l| !l.is_empty())
            .collect();
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Re-join lines with `\n`
    pub fn as_text(&self) -> String {
        self.lines.join("\n")
    }
}

fn clean_line(line: &str) -> String {
    line.replace(['\u{0}', '\u{FEFF}'], "").trim().to_string()
}
