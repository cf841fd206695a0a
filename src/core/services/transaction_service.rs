use crate::domain::Portfolio;
use crate::errors::{BudgetError, Result};

/// Validated deposits, withdrawals, and transfers over a [`Portfolio`].
///
/// Unlike the raw category operations, amounts must be finite and strictly
/// positive, and insufficient funds surface as an error.
pub struct TransactionService;

impl TransactionService {
    pub fn deposit(
        portfolio: &mut Portfolio,
        category: &str,
        amount: f64,
        description: &str,
    ) -> Result<f64> {
        validate_amount(amount)?;
        let target = portfolio
            .get_mut(category)
            .ok_or_else(|| BudgetError::CategoryNotFound(category.to_string()))?;
        target.deposit(amount, description);
        let balance = target.balance();
        tracing::info!(category, amount, balance, "deposit recorded");
        Ok(balance)
    }

    pub fn withdraw(
        portfolio: &mut Portfolio,
        category: &str,
        amount: f64,
        description: &str,
    ) -> Result<f64> {
        validate_amount(amount)?;
        let source = portfolio
            .get_mut(category)
            .ok_or_else(|| BudgetError::CategoryNotFound(category.to_string()))?;
        if !source.withdraw(amount, description) {
            let available = source.balance();
            tracing::warn!(category, amount, available, "withdrawal refused");
            return Err(BudgetError::InsufficientFunds {
                category: category.to_string(),
                requested: amount,
                available,
            });
        }
        let balance = source.balance();
        tracing::info!(category, amount, balance, "withdrawal recorded");
        Ok(balance)
    }

    pub fn transfer(portfolio: &mut Portfolio, from: &str, to: &str, amount: f64) -> Result<()> {
        validate_amount(amount)?;
        if portfolio.transfer(from, to, amount)? {
            tracing::info!(from, to, amount, "transfer recorded");
            return Ok(());
        }
        let available = portfolio
            .get(from)
            .map(|category| category.balance())
            .unwrap_or_default();
        tracing::warn!(from, to, amount, available, "transfer refused");
        Err(BudgetError::InsufficientFunds {
            category: from.to_string(),
            requested: amount,
            available,
        })
    }
}

fn validate_amount(amount: f64) -> Result<()> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(BudgetError::InvalidAmount(amount))
    }
}
