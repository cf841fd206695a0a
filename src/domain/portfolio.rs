//! Caller-owned collection of categories managed together.

use serde::{Deserialize, Serialize};

use crate::domain::category::Category;
use crate::errors::{BudgetError, Result};

/// Ordered set of uniquely named categories. Creation order is preserved and
/// drives the order of summaries and charts.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Portfolio {
    categories: Vec<Category>,
}

impl Portfolio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an empty category, rejecting names that already exist.
    pub fn create(&mut self, name: impl Into<String>) -> Result<&mut Category> {
        let name = name.into();
        if self.contains(&name) {
            return Err(BudgetError::CategoryExists(name));
        }
        self.categories.push(Category::new(name));
        let index = self.categories.len() - 1;
        Ok(&mut self.categories[index])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Category> {
        self.categories
            .iter_mut()
            .find(|category| category.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.categories
            .iter()
            .map(|category| category.name.as_str())
            .collect()
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Transfers between two named categories. `Ok(false)` means the source
    /// lacked funds and nothing changed. Transferring a category to itself is
    /// permitted and records both legs on the same ledger.
    pub fn transfer(&mut self, from: &str, to: &str, amount: f64) -> Result<bool> {
        let source = self.require(from)?;
        let target = self.require(to)?;

        if source == target {
            return Ok(self.categories[source].transfer_to_self(amount));
        }

        let (source_category, target_category) = if source < target {
            let (head, tail) = self.categories.split_at_mut(target);
            (&mut head[source], &mut tail[0])
        } else {
            let (head, tail) = self.categories.split_at_mut(source);
            (&mut tail[0], &mut head[target])
        };
        Ok(source_category.transfer(amount, target_category))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.categories
            .iter()
            .position(|category| category.name == name)
    }

    fn require(&self, name: &str) -> Result<usize> {
        self.position(name)
            .ok_or_else(|| BudgetError::CategoryNotFound(name.to_string()))
    }
}
