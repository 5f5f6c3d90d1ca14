//! Deterministic payee categories.
//!
//! Keyword matching on the lowercase payee name. Order matters: the first
//! rule that hits wins.

use serde::{Deserialize, Serialize};

use crate::record::Direction;

/// Spending categories matched deterministically
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    #[serde(rename = "food")]
    Food,
    #[serde(rename = "groceries")]
    Groceries,
    #[serde(rename = "transport")]
    Transport,
    #[serde(rename = "shopping")]
    Shopping,
    #[serde(rename = "bills")]
    Bills,
    #[serde(rename = "entertainment")]
    Entertainment,
    #[serde(rename = "transfers")]
    Transfers,
    #[serde(rename = "income")]
    Income,
    #[serde(rename = "uncategorized")]
    Uncategorized,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Food,
        Category::Groceries,
        Category::Transport,
        Category::Shopping,
        Category::Bills,
        Category::Entertainment,
        Category::Transfers,
        Category::Income,
        Category::Uncategorized,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Food => "Food & dining",
            Category::Groceries => "Groceries",
            Category::Transport => "Transport",
            Category::Shopping => "Shopping",
            Category::Bills => "Bills & recharges",
            Category::Entertainment => "Entertainment",
            Category::Transfers => "Transfers",
            Category::Income => "Income",
            Category::Uncategorized => "Uncategorized",
        }
    }
}

const RULES: &[(Category, &[&str])] = &[
    (
        Category::Food,
        &["swiggy", "zomato", "restaurant", "cafe", "coffee", "bakery", "dhaba", "pizza", "food"],
    ),
    (
        Category::Groceries,
        &["bigbasket", "blinkit", "zepto", "dmart", "grocery", "kirana", "supermarket", "mart"],
    ),
    (
        Category::Transport,
        &["uber", "ola", "rapido", "metro", "irctc", "petrol", "fuel", "parking", "fastag"],
    ),
    (
        Category::Shopping,
        &["amazon", "flipkart", "myntra", "ajio", "meesho", "store", "shop"],
    ),
    (
        Category::Bills,
        &["electricity", "recharge", "broadband", "airtel", "jio", "gas", "water", "insurance", "rent"],
    ),
    (
        Category::Entertainment,
        &["netflix", "spotify", "hotstar", "bookmyshow", "prime video", "cinema", "pvr"],
    ),
];

/// Categorize a payee description.
///
/// Credits that no keyword rule claims count as income; debits fall back to
/// `Transfers` when the payee looks like a person-to-person payment and
/// `Uncategorized` otherwise.
pub fn categorize(description: &str, direction: Direction) -> Category {
    let desc = description.to_lowercase();

    for (category, keywords) in RULES {
        if keywords.iter().any(|k| desc.contains(k)) {
            return *category;
        }
    }

    match direction {
        Direction::Credit => Category::Income,
        Direction::Debit if looks_like_person(&desc) => Category::Transfers,
        Direction::Debit => Category::Uncategorized,
    }
}

// Payment apps print individuals as "First Last"; merchants usually carry
// digits, punctuation or a single word.
fn looks_like_person(desc: &str) -> bool {
    let words: Vec<&str> = desc.split_whitespace().collect();
    (2..=3).contains(&words.len())
        && words
            .iter()
            .all(|w| w.chars().all(|c| c.is_alphabetic() || c == '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorize_food() {
        assert_eq!(categorize("Coffee Shop", Direction::Debit), Category::Food);
        assert_eq!(categorize("SWIGGY LIMITED", Direction::Debit), Category::Food);
    }

    #[test]
    fn test_categorize_transport() {
        assert_eq!(categorize("Uber India", Direction::Debit), Category::Transport);
    }

    #[test]
    fn test_categorize_bills() {
        assert_eq!(categorize("Airtel Prepaid Recharge", Direction::Debit), Category::Bills);
    }

    #[test]
    fn test_rules_apply_before_direction_fallback() {
        // a refund from a merchant keeps the merchant's category
        assert_eq!(categorize("Amazon Pay", Direction::Credit), Category::Shopping);
    }

    #[test]
    fn test_fallbacks() {
        assert_eq!(categorize("Employer", Direction::Credit), Category::Income);
        assert_eq!(categorize("Rahul Sharma", Direction::Debit), Category::Transfers);
        assert_eq!(categorize("XYZ123 Enterprises", Direction::Debit), Category::Uncategorized);
    }

    #[test]
    fn test_labels_are_unique() {
        let mut labels: Vec<_> = Category::ALL.iter().map(|c| c.label()).collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), Category::ALL.len());
    }
}
