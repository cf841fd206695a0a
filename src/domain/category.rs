//! Budget categories and their append-only ledgers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::common::Displayable;
use crate::domain::entry::Entry;

const TITLE_WIDTH: usize = 30;
const DESCRIPTION_WIDTH: usize = 23;
const AMOUNT_WIDTH: usize = 7;

/// A named spending category holding an ordered ledger of entries.
///
/// The balance is always derived from the ledger. Withdrawals and transfers
/// are funds-checked and report failure with `false`, leaving the ledger
/// untouched. Amounts are not validated here; callers that need validation
/// go through [`crate::core::services::TransactionService`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub name: String,
    ledger: Vec<Entry>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ledger: Vec::new(),
        }
    }

    /// Entries in the order they were recorded.
    pub fn entries(&self) -> &[Entry] {
        &self.ledger
    }

    pub fn deposit(&mut self, amount: f64, description: impl Into<String>) {
        self.ledger.push(Entry::new(amount, description));
    }

    pub fn withdraw(&mut self, amount: f64, description: impl Into<String>) -> bool {
        if !self.check_funds(amount) {
            return false;
        }
        self.ledger.push(Entry::new(-amount, description));
        true
    }

    /// Moves `amount` into `other`, recording a matching entry on each side.
    pub fn transfer(&mut self, amount: f64, other: &mut Category) -> bool {
        if !self.check_funds(amount) {
            return false;
        }
        let outgoing = format!("Transfer to {}", other.name);
        let incoming = format!("Transfer from {}", self.name);
        self.ledger.push(Entry::new(-amount, outgoing));
        other.deposit(amount, incoming);
        true
    }

    /// Transfer where source and destination are this category. The balance
    /// is unchanged but both legs are recorded.
    pub fn transfer_to_self(&mut self, amount: f64) -> bool {
        if !self.check_funds(amount) {
            return false;
        }
        let outgoing = format!("Transfer to {}", self.name);
        let incoming = format!("Transfer from {}", self.name);
        self.ledger.push(Entry::new(-amount, outgoing));
        self.ledger.push(Entry::new(amount, incoming));
        true
    }

    pub fn balance(&self) -> f64 {
        self.ledger.iter().fold(0.0, |total, entry| total + entry.amount)
    }

    pub fn check_funds(&self, amount: f64) -> bool {
        self.balance() >= amount
    }

    /// Total outflow: the magnitude of every negative entry, deposits ignored.
    pub fn spent(&self) -> f64 {
        self.ledger
            .iter()
            .filter(|entry| entry.is_outflow())
            .fold(0.0, |total, entry| total - entry.amount)
    }
}

impl Displayable for Category {
    fn display_label(&self) -> String {
        format!("{} ({:.2})", self.name, self.balance())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:*^width$}", self.name, width = TITLE_WIDTH)?;
        for entry in &self.ledger {
            writeln!(
                f,
                "{:<dw$.dw$}{:>aw$.2}",
                entry.description,
                entry.amount,
                dw = DESCRIPTION_WIDTH,
                aw = AMOUNT_WIDTH,
            )?;
        }
        write!(f, "Total: {:.2}", self.balance())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn funded(name: &str, amount: f64) -> Category {
        let mut category = Category::new(name);
        category.deposit(amount, "initial deposit");
        category
    }

    #[test]
    fn new_category_is_empty() {
        let category = Category::new("Food");
        assert!(category.entries().is_empty());
        assert_eq!(category.balance(), 0.0);
        assert!(category.balance().is_sign_positive());
    }

    #[test]
    fn deposit_appends_entry_as_given() {
        let mut category = Category::new("Food");
        category.deposit(900.0, "deposit");
        category.deposit(-5.0, "");
        assert_eq!(
            category.entries(),
            &[Entry::new(900.0, "deposit"), Entry::new(-5.0, "")]
        );
        assert_eq!(category.balance(), 895.0);
    }

    #[test]
    fn withdraw_records_negative_entry() {
        let mut category = Category::new("Groceries");
        category.deposit(900.0, "deposit");
        assert!(category.withdraw(45.67, "milk, cereal, eggs, bread"));
        assert_eq!(category.entries()[1].amount, -45.67);
        assert!((category.balance() - 854.33).abs() < 1e-9);
    }

    #[test]
    fn withdraw_without_funds_leaves_ledger_untouched() {
        let mut category = funded("Food", 10.0);
        let before = category.entries().to_vec();
        assert!(!category.withdraw(20.0, "dinner"));
        assert_eq!(category.balance(), 10.0);
        assert_eq!(category.entries(), before.as_slice());
    }

    #[test]
    fn withdraw_of_exact_balance_succeeds() {
        let mut category = funded("Food", 10.0);
        assert!(category.withdraw(10.0, ""));
        assert_eq!(category.balance(), 0.0);
    }

    #[test]
    fn transfer_moves_funds_and_labels_both_sides() {
        let mut food = funded("Food", 100.0);
        let mut clothing = Category::new("Clothing");

        assert!(food.transfer(50.0, &mut clothing));

        assert_eq!(food.balance(), 50.0);
        assert_eq!(clothing.balance(), 50.0);
        assert_eq!(
            food.entries().last(),
            Some(&Entry::new(-50.0, "Transfer to Clothing"))
        );
        assert_eq!(
            clothing.entries(),
            &[Entry::new(50.0, "Transfer from Food")]
        );
    }

    #[test]
    fn failed_transfer_mutates_neither_side() {
        let mut food = funded("Food", 10.0);
        let mut clothing = Category::new("Clothing");
        assert!(!food.transfer(50.0, &mut clothing));
        assert_eq!(food.entries().len(), 1);
        assert!(clothing.entries().is_empty());
    }

    #[test]
    fn transfer_to_self_keeps_balance_and_records_both_legs() {
        let mut food = funded("Food", 40.0);
        assert!(food.transfer_to_self(15.0));
        assert_eq!(food.balance(), 40.0);
        let descriptions: Vec<_> = food
            .entries()
            .iter()
            .map(|entry| entry.description.as_str())
            .collect();
        assert_eq!(
            descriptions,
            ["initial deposit", "Transfer to Food", "Transfer from Food"]
        );
        assert!(!food.transfer_to_self(41.0));
        assert_eq!(food.entries().len(), 3);
    }

    #[test]
    fn display_label_includes_balance() {
        assert_eq!(funded("Food", 12.5).display_label(), "Food (12.50)");
    }

    #[test]
    fn check_funds_compares_against_balance() {
        let category = funded("Food", 25.0);
        assert!(category.check_funds(25.0));
        assert!(category.check_funds(0.0));
        assert!(!category.check_funds(25.01));
    }

    #[test]
    fn spent_only_counts_outflows() {
        let mut category = funded("Food", 100.0);
        category.withdraw(30.0, "");
        category.deposit(20.0, "");
        category.withdraw(15.5, "");
        assert_eq!(category.spent(), 45.5);
        assert_eq!(Category::new("Empty").spent(), 0.0);
    }

    #[test]
    fn balance_is_sum_of_entries_over_mixed_sequence() {
        let mut category = Category::new("Mixed");
        let mut expected = 0.0;
        for (index, amount) in [120.0, 35.25, 80.0, 10.75, 500.0].iter().enumerate() {
            if index % 2 == 0 {
                category.deposit(*amount, "");
                expected += amount;
            } else if category.withdraw(*amount, "") {
                expected -= amount;
            }
            let sum: f64 = category.entries().iter().map(|entry| entry.amount).sum();
            assert!((category.balance() - sum).abs() < 1e-9);
        }
        assert!((category.balance() - expected).abs() < 1e-9);
    }

    #[test]
    fn renders_ledger_report() {
        let mut category = Category::new("Groceries");
        category.deposit(900.0, "deposit");
        category.withdraw(45.67, "milk, cereal, eggs, bread");

        let expected = concat!(
            "**********Groceries***********\n",
            "deposit                 900.00\n",
            "milk, cereal, eggs, bre -45.67\n",
            "Total: 854.33",
        );
        assert_eq!(category.to_string(), expected);
    }

    #[test]
    fn header_is_thirty_columns_and_long_names_are_not_truncated() {
        let short = Category::new("Food").to_string();
        let header = short.lines().next().unwrap();
        assert_eq!(header, "*************Food*************");
        assert_eq!(header.chars().count(), 30);

        let long_name = "A category name that is much longer than thirty";
        let long = Category::new(long_name).to_string();
        assert_eq!(long.lines().next(), Some(long_name));
    }

    #[test]
    fn empty_ledger_renders_header_and_total_only() {
        let rendered = Category::new("Food").to_string();
        assert_eq!(rendered, "*************Food*************\nTotal: 0.00");
    }

    #[test]
    fn entry_lines_pad_short_descriptions_and_wide_amounts() {
        let mut category = Category::new("Rent");
        category.deposit(12345.5, "");
        let rendered = category.to_string();
        let line = rendered.lines().nth(1).unwrap();
        assert_eq!(line, format!("{}12345.50", " ".repeat(23)));
    }
}
