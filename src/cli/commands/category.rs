use crate::cli::core::{usage_error, CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::core::services::CategoryService;

const USAGE: &str = "category <add|list|show> [name]";
const ADD_USAGE: &str = "category add <name> (quote names containing spaces)";
const SHOW_USAGE: &str = "category show <name>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "category",
        "Create and inspect spending categories",
        USAGE,
        cmd_category,
    )]
}

fn cmd_category(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(action) = args.first() else {
        return Err(usage_error(USAGE));
    };
    let rest = &args[1..];
    match action.to_lowercase().as_str() {
        "add" | "create" => handle_add(context, rest),
        "list" => handle_list(context),
        "show" => handle_show(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown category subcommand `{}`",
            other
        ))),
    }
}

fn handle_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = match args {
        [name] => (*name).to_string(),
        [] if context.mode() == CliMode::Interactive => {
            io::prompt_text(&context.theme, "Category name")?
        }
        _ => return Err(usage_error(ADD_USAGE)),
    };
    let created = CategoryService::create(&mut context.portfolio, &name)?;
    io::print_success(format!("Category '{}' created successfully!", created.name));
    Ok(())
}

fn handle_list(context: &ShellContext) -> CommandResult {
    let categories = CategoryService::list(&context.portfolio);
    if categories.is_empty() {
        io::print_warning("No categories found. Use `category add <name>` to create one.");
        return Ok(());
    }
    output::section("Categories");
    let width = categories
        .iter()
        .map(|category| category.name.chars().count())
        .max()
        .unwrap_or(0);
    for category in categories {
        output::block(format!(
            "  {:<width$}  {:>12.2}",
            category.name,
            category.balance()
        ));
    }
    Ok(())
}

fn handle_show(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() > 1 {
        return Err(usage_error(SHOW_USAGE));
    }
    let name = context.category_arg(args, 0, "Select a category", SHOW_USAGE)?;
    let category = CategoryService::get(&context.portfolio, &name)?;
    output::section(format!("Transaction History of {}", category.name));
    output::block(category);
    Ok(())
}
