use std::cmp::Ordering;
use std::fmt::Write;

use serde::Serialize;

use crate::domain::Category;

/// One category's slice of total spending.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SpendShare {
    pub name: String,
    pub spent: f64,
    pub percentage: f64,
}

/// Percentage breakdown of outflows across categories, in input order.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SpendDistribution {
    pub shares: Vec<SpendShare>,
    pub total_spent: f64,
}

impl SpendDistribution {
    /// `(name, percentage)` pairs in input order.
    pub fn percentages(&self) -> Vec<(&str, f64)> {
        self.shares
            .iter()
            .map(|share| (share.name.as_str(), share.percentage))
            .collect()
    }

    /// Shares ordered by percentage, highest first. Ties keep input order.
    pub fn ranked(&self) -> Vec<&SpendShare> {
        let mut ranked: Vec<&SpendShare> = self.shares.iter().collect();
        ranked.sort_by(|a, b| {
            b.percentage
                .partial_cmp(&a.percentage)
                .unwrap_or(Ordering::Equal)
        });
        ranked
    }

    /// Horizontal bar chart, highest share on top, each bar labelled with its
    /// percentage to one decimal place.
    pub fn render_chart(&self, width: usize) -> String {
        let ranked = self.ranked();
        let label_width = ranked
            .iter()
            .map(|share| share.name.chars().count())
            .max()
            .unwrap_or(0);

        let mut chart = String::from("Percentage spent by category\n");
        for share in ranked {
            let filled = ((share.percentage / 100.0) * width as f64).round() as usize;
            let filled = filled.min(width);
            let _ = writeln!(
                chart,
                "{:<label_width$} | {}{} {:.1}%",
                share.name,
                "#".repeat(filled),
                " ".repeat(width - filled),
                share.percentage,
            );
        }
        chart
    }
}

pub struct SummaryService;

impl SummaryService {
    /// Computes each category's share of total outflow. Returns `None` when
    /// nothing has been spent, including when `categories` is empty.
    pub fn spend_distribution<'a, I>(categories: I) -> Option<SpendDistribution>
    where
        I: IntoIterator<Item = &'a Category>,
    {
        let spent: Vec<(&str, f64)> = categories
            .into_iter()
            .map(|category| (category.name.as_str(), category.spent()))
            .collect();
        let total_spent = spent.iter().fold(0.0, |total, (_, amount)| total + *amount);
        if total_spent <= 0.0 {
            tracing::debug!(categories = spent.len(), "no spending data to distribute");
            return None;
        }

        let shares = spent
            .into_iter()
            .map(|(name, amount)| SpendShare {
                name: name.to_string(),
                spent: amount,
                percentage: amount / total_spent * 100.0,
            })
            .collect();
        Some(SpendDistribution {
            shares,
            total_spent,
        })
    }

    pub fn total_balance<'a, I>(categories: I) -> f64
    where
        I: IntoIterator<Item = &'a Category>,
    {
        categories
            .into_iter()
            .fold(0.0, |total, category| total + category.balance())
    }
}
