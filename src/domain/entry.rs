//! Ledger entries recorded against a category.

use serde::{Deserialize, Serialize};

/// A single signed movement of money. Positive amounts are inflows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entry {
    pub amount: f64,
    pub description: String,
}

impl Entry {
    pub fn new(amount: f64, description: impl Into<String>) -> Self {
        Self {
            amount,
            description: description.into(),
        }
    }

    pub fn is_outflow(&self) -> bool {
        self.amount < 0.0
    }
}
