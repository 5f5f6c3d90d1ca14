//! Transaction record types recovered from a statement

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::RecordError;

/// Which side of the ledger a transaction lands on
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Outgoing payment
    #[serde(rename = "debit")]
    Debit,
    /// Incoming payment
    #[serde(rename = "credit")]
    Credit,
}

impl Direction {
    /// Parse the statement's type token (`DEBIT` / `CREDIT`)
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "DEBIT" => Some(Direction::Debit),
            "CREDIT" => Some(Direction::Credit),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Debit => "DEBIT",
            Direction::Credit => "CREDIT",
        }
    }
}

/// One parsed financial event.
///
/// Exactly one of `debit` / `credit` is nonzero; both are non-negative.
/// Build through [`TransactionRecord::new`] so that holds; deserialization
/// goes through the same check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "RecordFields")]
pub struct TransactionRecord {
    /// Calendar date of the transaction
    pub date: NaiveDate,
    /// Time of day, midnight when the statement had none
    pub time: NaiveTime,
    /// Payee / counterparty name
    pub description: String,
    /// Outgoing amount (0.0 for credits)
    pub debit: f64,
    /// Incoming amount (0.0 for debits)
    pub credit: f64,
}

/// Unchecked wire shape of a record
#[derive(Deserialize)]
struct RecordFields {
    date: NaiveDate,
    time: NaiveTime,
    description: String,
    debit: f64,
    credit: f64,
}

impl TryFrom<RecordFields> for TransactionRecord {
    type Error = RecordError;

    fn try_from(f: RecordFields) -> Result<Self, Self::Error> {
        match (f.debit, f.credit) {
            (d, c) if d > 0.0 && c == 0.0 => {
                Self::new(f.date, f.time, f.description, Direction::Debit, d)
            }
            (d, c) if c > 0.0 && d == 0.0 => {
                Self::new(f.date, f.time, f.description, Direction::Credit, c)
            }
            (debit, credit) => Err(RecordError::Sides { debit, credit }),
        }
    }
}

impl TransactionRecord {
    pub fn new(
        date: NaiveDate,
        time: NaiveTime,
        description: impl Into<String>,
        direction: Direction,
        amount: f64,
    ) -> Result<Self, RecordError> {
        let description = description.into().trim().to_string();
        if description.is_empty() {
            return Err(RecordError::EmptyDescription);
        }
        if !amount.is_finite() || amount <= 0.0 {
            return Err(RecordError::InvalidAmount(amount));
        }

        let (debit, credit) = match direction {
            Direction::Debit => (amount, 0.0),
            Direction::Credit => (0.0, amount),
        };

        Ok(Self {
            date,
            time,
            description,
            debit,
            credit,
        })
    }

    pub fn direction(&self) -> Direction {
        if self.debit > 0.0 {
            Direction::Debit
        } else {
            Direction::Credit
        }
    }

    /// The nonzero side of the record
    pub fn amount(&self) -> f64 {
        match self.direction() {
            Direction::Debit => self.debit,
            Direction::Credit => self.credit,
        }
    }

    pub fn datetime(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    pub fn is_debit(&self) -> bool {
        self.debit > 0.0
    }

    pub fn is_credit(&self) -> bool {
        self.credit > 0.0
    }
}

/// Ordered collection of records, in source-line order (not sorted by date).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TransactionTable {
    records: Vec<TransactionRecord>,
}

impl TransactionTable {
    pub fn new(records: Vec<TransactionRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TransactionRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Copy out the records matching `pred`, keeping their order
    pub fn filtered<F>(&self, mut pred: F) -> TransactionTable
    where
        F: FnMut(&TransactionRecord) -> bool,
    {
        self.records.iter().filter(|r| pred(r)).cloned().collect()
    }

    pub fn into_records(self) -> Vec<TransactionRecord> {
        self.records
    }
}

impl FromIterator<TransactionRecord> for TransactionTable {
    fn from_iter<I: IntoIterator<Item = TransactionRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a TransactionTable {
    type Item = &'a TransactionRecord;
    type IntoIter = std::slice::Iter<'a, TransactionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aug(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, day).unwrap()
    }

    #[test]
    fn test_debit_record_creation() {
        let record = TransactionRecord::new(
            aug(6),
            NaiveTime::from_hms_opt(14, 15, 0).unwrap(),
            "  Coffee Shop ",
            Direction::Debit,
            360.0,
        )
        .unwrap();
        assert_eq!(record.description, "Coffee Shop");
        assert_eq!(record.debit, 360.0);
        assert_eq!(record.credit, 0.0);
        assert!(record.is_debit());
        assert_eq!(record.direction(), Direction::Debit);
        assert_eq!(record.amount(), 360.0);
    }

    #[test]
    fn test_credit_record_creation() {
        let record =
            TransactionRecord::new(aug(7), NaiveTime::MIN, "Employer", Direction::Credit, 50000.0)
                .unwrap();
        assert_eq!(record.debit, 0.0);
        assert_eq!(record.credit, 50000.0);
        assert_eq!(record.datetime().to_string(), "2025-08-07 00:00:00");
    }

    #[test]
    fn test_rejects_invalid_records() {
        assert_eq!(
            TransactionRecord::new(aug(1), NaiveTime::MIN, "   ", Direction::Debit, 10.0),
            Err(RecordError::EmptyDescription)
        );
        assert!(TransactionRecord::new(aug(1), NaiveTime::MIN, "Shop", Direction::Debit, 0.0).is_err());
        assert!(TransactionRecord::new(aug(1), NaiveTime::MIN, "Shop", Direction::Debit, -5.0).is_err());
        assert!(
            TransactionRecord::new(aug(1), NaiveTime::MIN, "Shop", Direction::Credit, f64::NAN).is_err()
        );
    }

    #[test]
    fn test_direction_tokens() {
        assert_eq!(Direction::from_token("DEBIT"), Some(Direction::Debit));
        assert_eq!(Direction::from_token("CREDIT"), Some(Direction::Credit));
        assert_eq!(Direction::from_token("debit"), None);
        assert_eq!(Direction::Credit.as_str(), "CREDIT");
    }

    #[test]
    fn test_table_filtered_keeps_order() {
        let table: TransactionTable = [(3, 10.0), (1, 20.0), (2, 30.0)]
            .into_iter()
            .map(|(d, amt)| {
                TransactionRecord::new(aug(d), NaiveTime::MIN, "Shop", Direction::Debit, amt).unwrap()
            })
            .collect();

        let big = table.filtered(|r| r.debit >= 20.0);
        assert_eq!(big.len(), 2);
        assert_eq!(big.records()[0].date, aug(1));
        assert_eq!(big.records()[1].date, aug(2));
        // source table untouched
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_record_serializes_to_json() {
        let record =
            TransactionRecord::new(aug(6), NaiveTime::MIN, "Coffee Shop", Direction::Debit, 360.0)
                .unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["date"], "2025-08-06");
        assert_eq!(json["time"], "00:00:00");
        assert_eq!(json["debit"], 360.0);
    }

    #[test]
    fn test_deserialize_checks_invariants() {
        let record =
            TransactionRecord::new(aug(7), NaiveTime::MIN, "Employer", Direction::Credit, 500.0)
                .unwrap();
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(serde_json::from_str::<TransactionRecord>(&json).unwrap(), record);

        let both = r#"{"date":"2025-08-06","time":"00:00:00","description":"Shop","debit":10.0,"credit":5.0}"#;
        assert!(serde_json::from_str::<TransactionRecord>(both).is_err());

        let neither = r#"{"date":"2025-08-06","time":"00:00:00","description":"Shop","debit":0.0,"credit":0.0}"#;
        assert!(serde_json::from_str::<TransactionRecord>(neither).is_err());

        let blank = r#"{"date":"2025-08-06","time":"00:00:00","description":"  ","debit":10.0,"credit":0.0}"#;
        assert!(serde_json::from_str::<TransactionRecord>(blank).is_err());

        let negative = r#"{"date":"2025-08-06","time":"00:00:00","description":"Shop","debit":-10.0,"credit":0.0}"#;
        assert!(serde_json::from_str::<TransactionRecord>(negative).is_err());
    }

    #[test]
    fn test_table_deserialize_rejects_bad_record() {
        let json = r#"{"records":[{"date":"2025-08-06","time":"00:00:00","description":"Shop","debit":10.0,"credit":10.0}]}"#;
        assert!(serde_json::from_str::<TransactionTable>(json).is_err());
    }
}
