use crate::cli::core::{usage_error, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::core::services::{CategoryService, SummaryService};
use crate::errors::BudgetError;

const BALANCE_USAGE: &str = "balance [category]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "balance",
            "Show one category's balance or the total across all",
            BALANCE_USAGE,
            cmd_balance,
        ),
        CommandEntry::new(
            "chart",
            "Show the spending distribution",
            "chart",
            cmd_chart,
        ),
        CommandEntry::new(
            "export",
            "Print the session's categories as JSON",
            "export",
            cmd_export,
        ),
    ]
}

fn cmd_balance(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() > 1 {
        return Err(usage_error(BALANCE_USAGE));
    }
    if let Some(name) = args.first() {
        let category = CategoryService::get(&context.portfolio, name)?;
        io::print_info(format!(
            "Balance of {}: {:.2}",
            category.name,
            category.balance()
        ));
        return Ok(());
    }
    let total = SummaryService::total_balance(context.portfolio.categories());
    io::print_info(format!("Total balance across all categories: {:.2}", total));
    Ok(())
}

fn cmd_chart(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.portfolio.is_empty() {
        io::print_warning("No categories found. Please add some categories first!");
        return Ok(());
    }
    match SummaryService::spend_distribution(context.portfolio.categories()) {
        Some(distribution) => {
            output::section("Spending Distribution");
            output::block(distribution.render_chart(context.config.chart_width));
        }
        None => io::print_warning("No spending data available."),
    }
    Ok(())
}

fn cmd_export(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let json = serde_json::to_string_pretty(&context.portfolio).map_err(BudgetError::from)?;
    output::block(json);
    Ok(())
}
