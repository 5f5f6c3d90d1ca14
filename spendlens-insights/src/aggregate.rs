//! Insight aggregation: pure reductions over a (filtered) transaction table.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use spendlens_core::{Category, TransactionRecord, TransactionTable, categorize};

/// Calendar month bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DirectionSplit {
    pub debit_count: usize,
    pub credit_count: usize,
}

impl DirectionSplit {
    pub fn total(&self) -> usize {
        self.debit_count + self.credit_count
    }

    /// Share of debits in percent, `None` when there are no records
    pub fn debit_share(&self) -> Option<f64> {
        match self.total() {
            0 => None,
            n => Some(self.debit_count as f64 / n as f64 * 100.0),
        }
    }

    pub fn credit_share(&self) -> Option<f64> {
        self.debit_share().map(|d| 100.0 - d)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub debit: f64,
    pub count: usize,
}

pub fn total_debit(table: &TransactionTable) -> f64 {
    table.iter().map(|r| r.debit).sum()
}

pub fn total_credit(table: &TransactionTable) -> f64 {
    table.iter().map(|r| r.credit).sum()
}

/// The `n` largest debits, biggest first. Equal debits keep table order.
pub fn top_spends(table: &TransactionTable, n: usize) -> Vec<TransactionRecord> {
    let mut debits: Vec<&TransactionRecord> = table.iter().filter(|r| r.is_debit()).collect();
    // sort_by is stable
    debits.sort_by(|a, b| b.debit.total_cmp(&a.debit));
    debits.into_iter().take(n).cloned().collect()
}

/// Debit sum per calendar day, for every day with at least one record
pub fn daily_debit(table: &TransactionTable) -> BTreeMap<NaiveDate, f64> {
    let mut days = BTreeMap::new();
    for r in table {
        *days.entry(r.date).or_insert(0.0) += r.debit;
    }
    days
}

/// Debit sum per calendar month, for every month with at least one record
pub fn monthly_debit(table: &TransactionTable) -> BTreeMap<YearMonth, f64> {
    let mut months = BTreeMap::new();
    for r in table {
        *months.entry(YearMonth::of(r.date)).or_insert(0.0) += r.debit;
    }
    months
}

fn mean<'a>(values: impl ExactSizeIterator<Item = &'a f64>) -> Option<f64> {
    let n = values.len();
    if n == 0 {
        return None;
    }
    Some(values.sum::<f64>() / n as f64)
}

pub fn average_daily_debit(table: &TransactionTable) -> Option<f64> {
    mean(daily_debit(table).values())
}

pub fn average_monthly_debit(table: &TransactionTable) -> Option<f64> {
    mean(monthly_debit(table).values())
}

/// Day with the highest debit sum; the earliest wins a tie.
pub fn biggest_spending_day(table: &TransactionTable) -> Option<(NaiveDate, f64)> {
    daily_debit(table)
        .into_iter()
        .fold(None, |best, (day, amount)| match best {
            Some((_, top)) if amount <= top => best,
            _ => Some((day, amount)),
        })
}

pub fn direction_counts(table: &TransactionTable) -> DirectionSplit {
    DirectionSplit {
        debit_count: table.iter().filter(|r| r.is_debit()).count(),
        credit_count: table.iter().filter(|r| r.is_credit()).count(),
    }
}

/// Debit totals per payee category, largest first
pub fn category_split(table: &TransactionTable) -> Vec<CategoryTotal> {
    let mut by_cat: BTreeMap<Category, (f64, usize)> = BTreeMap::new();
    for r in table.iter().filter(|r| r.is_debit()) {
        let entry = by_cat
            .entry(categorize(&r.description, r.direction()))
            .or_insert((0.0, 0));
        entry.0 += r.debit;
        entry.1 += 1;
    }

    let mut out: Vec<CategoryTotal> = by_cat
        .into_iter()
        .map(|(category, (debit, count))| CategoryTotal {
            category,
            debit,
            count,
        })
        .collect();
    out.sort_by(|a, b| b.debit.total_cmp(&a.debit));
    out
}

/// Everything the summary view shows, computed in one pass over the table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insights {
    pub record_count: usize,
    pub total_debit: f64,
    pub total_credit: f64,
    pub top_spends: Vec<TransactionRecord>,
    pub daily_debit: BTreeMap<NaiveDate, f64>,
    pub monthly_debit: BTreeMap<String, f64>,
    pub average_daily_debit: Option<f64>,
    pub average_monthly_debit: Option<f64>,
    pub biggest_spending_day: Option<(NaiveDate, f64)>,
    pub direction: DirectionSplit,
    pub categories: Vec<CategoryTotal>,
}

impl Insights {
    pub fn compute(table: &TransactionTable, top_n: usize) -> Self {
        let daily = daily_debit(table);
        let monthly = monthly_debit(table);

        Self {
            record_count: table.len(),
            total_debit: total_debit(table),
            total_credit: total_credit(table),
            top_spends: top_spends(table, top_n),
            average_daily_debit: mean(daily.values()),
            average_monthly_debit: mean(monthly.values()),
            biggest_spending_day: biggest_spending_day(table),
            direction: direction_counts(table),
            categories: category_split(table),
            monthly_debit: monthly
                .into_iter()
                .map(|(m, v)| (m.to_string(), v))
                .collect(),
            daily_debit: daily,
        }
    }
}
