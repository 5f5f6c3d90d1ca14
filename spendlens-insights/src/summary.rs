//! Plain-text rendering of [`Insights`] for terminal output.

use std::fmt::Write;

use crate::aggregate::Insights;

/// Format an amount with two decimals and comma-grouped thousands,
/// e.g. `₹1,234,567.50`.
pub fn format_amount(symbol: &str, amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}{symbol}{grouped}.{frac}")
}

pub fn render_summary(insights: &Insights, symbol: &str) -> String {
    let money = |v: f64| format_amount(symbol, v);
    let mut s = String::new();

    let _ = writeln!(s, "Transactions: {}", insights.record_count);
    let _ = writeln!(s, "Total spent:    {}", money(insights.total_debit));
    let _ = writeln!(s, "Total received: {}", money(insights.total_credit));

    if !insights.top_spends.is_empty() {
        let _ = writeln!(s, "\nTop {} spends", insights.top_spends.len());
        for r in &insights.top_spends {
            let _ = writeln!(
                s,
                "  {}  {:>14}  {}",
                r.date.format("%b %d, %Y"),
                money(r.debit),
                r.description
            );
        }
    }

    if let Some((day, amount)) = insights.biggest_spending_day {
        let _ = writeln!(
            s,
            "\nBiggest spending day: {} ({})",
            day.format("%b %d, %Y"),
            money(amount)
        );
    }

    let split = &insights.direction;
    let _ = writeln!(
        s,
        "Debit / credit count: {} / {}",
        split.debit_count, split.credit_count
    );
    if let (Some(d), Some(c)) = (split.debit_share(), split.credit_share()) {
        let _ = writeln!(s, "Debit / credit share: {d:.1}% / {c:.1}%");
    }

    if let Some(avg) = insights.average_daily_debit {
        let _ = writeln!(s, "\nAverage daily spend:   {}", money(avg));
    }
    if let Some(avg) = insights.average_monthly_debit {
        let _ = writeln!(s, "Average monthly spend: {}", money(avg));
    }

    if !insights.daily_debit.is_empty() {
        let _ = writeln!(s, "\nDaily spending");
        for (day, amount) in &insights.daily_debit {
            let _ = writeln!(s, "  {}  {:>14}", day.format("%Y-%m-%d"), money(*amount));
        }
    }

    if !insights.categories.is_empty() {
        let _ = writeln!(s, "\nSpending by category");
        for c in &insights.categories {
            let _ = writeln!(
                s,
                "  {:<18} {:>14}  ({} txns)",
                c.category.label(),
                money(c.debit),
                c.count
            );
        }
    }

    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use spendlens_core::{Direction, TransactionRecord, TransactionTable};

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount("₹", 0.0), "₹0.00");
        assert_eq!(format_amount("₹", 360.0), "₹360.00");
        assert_eq!(format_amount("₹", 1234.0), "₹1,234.00");
        assert_eq!(format_amount("₹", 50000.0), "₹50,000.00");
        assert_eq!(format_amount("₹", 1234567.891), "₹1,234,567.89");
        assert_eq!(format_amount("$", -99.5), "-$99.50");
    }

    #[test]
    fn test_render_summary() {
        let table: TransactionTable = vec![
            TransactionRecord::new(
                NaiveDate::from_ymd_opt(2025, 8, 6).unwrap(),
                NaiveTime::MIN,
                "Coffee Shop",
                Direction::Debit,
                360.0,
            )
            .unwrap(),
            TransactionRecord::new(
                NaiveDate::from_ymd_opt(2025, 8, 7).unwrap(),
                NaiveTime::MIN,
                "Employer",
                Direction::Credit,
                50000.0,
            )
            .unwrap(),
        ]
        .into_iter()
        .collect();

        let out = render_summary(&Insights::compute(&table, 3), "₹");
        assert!(out.contains("Transactions: 2"));
        assert!(out.contains("Total spent:    ₹360.00"));
        assert!(out.contains("Total received: ₹50,000.00"));
        assert!(out.contains("Biggest spending day: Aug 06, 2025 (₹360.00)"));
        assert!(out.contains("Debit / credit count: 1 / 1"));
        assert!(out.contains("Food & dining"));
    }

    #[test]
    fn test_render_empty_summary() {
        let out = render_summary(&Insights::compute(&TransactionTable::default(), 3), "₹");
        assert!(out.contains("Transactions: 0"));
        assert!(!out.contains("Top"));
        assert!(!out.contains("Biggest"));
    }
}
