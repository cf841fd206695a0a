use crate::domain::{Category, Portfolio};
use crate::errors::{BudgetError, Result};

pub struct CategoryService;

impl CategoryService {
    /// Creates an empty category after trimming and validating the name.
    pub fn create<'a>(portfolio: &'a mut Portfolio, name: &str) -> Result<&'a Category> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(BudgetError::InvalidInput(
                "Category name cannot be empty".into(),
            ));
        }
        let category: &Category = portfolio.create(trimmed)?;
        tracing::info!(category = %category.name, "category created");
        Ok(category)
    }

    pub fn get<'a>(portfolio: &'a Portfolio, name: &str) -> Result<&'a Category> {
        portfolio
            .get(name)
            .ok_or_else(|| BudgetError::CategoryNotFound(name.to_string()))
    }

    pub fn list(portfolio: &Portfolio) -> Vec<&Category> {
        portfolio.categories().iter().collect()
    }
}
