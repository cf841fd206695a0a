use crate::cli::core::{usage_error, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;

const USAGE: &str = "config <show|set <key> <value>>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "Inspect or update shell preferences",
        USAGE,
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["show"] => show_config(context),
        ["set", key, value] => set_config(context, key, value),
        _ => Err(usage_error(USAGE)),
    }
}

fn show_config(context: &ShellContext) -> CommandResult {
    output::section("Configuration");
    for (key, value) in context.config.entries() {
        io::print_info(format!("  {}: {}", key, value));
    }
    io::print_info(format!(
        "  file: {}",
        context.config_manager.path().display()
    ));
    Ok(())
}

fn set_config(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    let mut updated = context.config.clone();
    updated.set(key, value)?;
    context.config = updated;
    context.persist_config()?;
    context.apply_config();
    tracing::info!(key, value, "configuration updated");
    io::print_success(format!("Set {} to {}", key, value));
    Ok(())
}
