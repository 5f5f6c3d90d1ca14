//! CSV export of a transaction table.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use spendlens_core::{TransactionRecord, TransactionTable};

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Time")]
    time: String,
    #[serde(rename = "Description")]
    description: &'a str,
    #[serde(rename = "Debit")]
    debit: f64,
    #[serde(rename = "Credit")]
    credit: f64,
}

impl<'a> From<&'a TransactionRecord> for CsvRow<'a> {
    fn from(r: &'a TransactionRecord) -> Self {
        Self {
            date: r.date.format("%Y-%m-%d").to_string(),
            time: r.time.format("%H:%M:%S").to_string(),
            description: &r.description,
            debit: r.debit,
            credit: r.credit,
        }
    }
}

/// Write `Date,Time,Description,Debit,Credit` rows in table order
pub fn write_csv<W: Write>(table: &TransactionTable, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    if table.is_empty() {
        // serialize() only emits the header with the first row
        wtr.write_record(["Date", "Time", "Description", "Debit", "Credit"])?;
    }
    for record in table {
        wtr.serialize(CsvRow::from(record))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn export_csv(table: &TransactionTable, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    write_csv(table, file).with_context(|| format!("write {}", path.display()))?;
    tracing::debug!(rows = table.len(), path = %path.display(), "exported csv");
    Ok(())
}
