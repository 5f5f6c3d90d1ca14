//! Date-range and payee filters over a transaction table.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use spendlens_core::{TransactionRecord, TransactionTable};

/// Selection applied before aggregation. Empty fields select everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableFilter {
    /// Inclusive lower bound
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound
    pub to: Option<NaiveDate>,
    /// Exact payee names to keep
    pub payees: Option<BTreeSet<String>>,
}

impl TableFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from(mut self, date: NaiveDate) -> Self {
        self.from = Some(date);
        self
    }

    pub fn to(mut self, date: NaiveDate) -> Self {
        self.to = Some(date);
        self
    }

    pub fn payees<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.payees = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn matches(&self, record: &TransactionRecord) -> bool {
        self.from.is_none_or(|d| record.date >= d)
            && self.to.is_none_or(|d| record.date <= d)
            && self
                .payees
                .as_ref()
                .is_none_or(|set| set.contains(&record.description))
    }

    /// Copy of `table` holding only the matching records, order kept
    pub fn apply(&self, table: &TransactionTable) -> TransactionTable {
        table.filtered(|r| self.matches(r))
    }
}

/// Distinct payee names, sorted
pub fn payee_names(table: &TransactionTable) -> Vec<String> {
    table
        .iter()
        .map(|r| r.description.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// First and last transaction date in the table
pub fn date_span(table: &TransactionTable) -> Option<(NaiveDate, NaiveDate)> {
    let min = table.iter().map(|r| r.date).min()?;
    let max = table.iter().map(|r| r.date).max()?;
    Some((min, max))
}
