//! Dispatch, error reporting, and shared prompts for the shell context.
use dialoguer::theme::ColorfulTheme;
use strsim::levenshtein;
use thiserror::Error;

use crate::{
    config::ConfigManager,
    domain::{Displayable, Portfolio},
    errors::BudgetError,
};

pub use crate::cli::shell_context::{CliMode, ShellContext};
pub use crate::errors::CliError;

use super::commands;
use super::io as cli_io;
use super::output::{self, OutputPreferences};
use super::registry::CommandRegistry;

const SUGGESTION_DISTANCE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

/// Failure of a single command. Reported to the user; the session continues.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Budget(#[from] BudgetError),
    #[error("Prompt failed: {0}")]
    Prompt(String),
    #[error("Exit requested")]
    ExitRequested,
}

impl From<dialoguer::Error> for CommandError {
    fn from(err: dialoguer::Error) -> Self {
        CommandError::Prompt(err.to_string())
    }
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        Self::with_config_manager(mode, config_manager)
    }

    pub fn with_config_manager(
        mode: CliMode,
        config_manager: ConfigManager,
    ) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        let config = config_manager.load()?;
        output::set_preferences(OutputPreferences::from(&config));
        tracing::debug!(?mode, config = %config_manager.path().display(), "shell session started");
        Ok(ShellContext {
            mode,
            registry,
            portfolio: Portfolio::new(),
            theme: ColorfulTheme::default(),
            config_manager,
            config,
        })
    }

    pub(crate) fn mode(&self) -> CliMode {
        self.mode
    }

    pub(crate) fn prompt(&self) -> String {
        format!("budget[{}]> ", self.portfolio.len())
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            tracing::debug!(command, args = args.len(), "dispatching command");
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));
        if let Some(best) = self.closest_command(input) {
            cli_io::print_info(format!("Suggestion: `{}`?", best));
        }
    }

    fn closest_command(&self, input: &str) -> Option<&'static str> {
        let needle = input.to_lowercase();
        self.registry
            .names()
            .map(|name| (levenshtein(name, &needle), name))
            .filter(|(distance, _)| *distance <= SUGGESTION_DISTANCE)
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, name)| name)
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, "Exit shell?", true)
            .map_err(|err| CliError::Input(err.to_string()))
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                self.print_error(&message);
                cli_io::print_info("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Budget(BudgetError::CategoryNotFound(name)) => {
                self.print_error(&format!("Category `{}` does not exist.", name));
                cli_io::print_info("Use `category list` to see available categories.");
                Ok(())
            }
            other => {
                self.print_error(&other.to_string());
                Ok(())
            }
        }
    }

    pub(crate) fn print_error(&self, message: &str) {
        cli_io::print_error(message);
    }

    pub(crate) fn apply_config(&self) {
        output::set_preferences(OutputPreferences::from(&self.config));
    }

    pub(crate) fn persist_config(&self) -> CommandResult {
        self.config_manager.save(&self.config)?;
        Ok(())
    }

    /// Picks a category interactively, returning its name.
    pub(crate) fn select_category(&self, prompt: &str) -> Result<String, CommandError> {
        let categories = self.portfolio.categories();
        if categories.is_empty() {
            return Err(CommandError::InvalidArguments(
                "No categories found. Use `category add <name>` first.".into(),
            ));
        }
        let labels: Vec<String> = categories.iter().map(|c| c.display_label()).collect();
        let index = cli_io::select_index(&self.theme, prompt, &labels)?;
        Ok(categories[index].name.clone())
    }

    /// Returns `args[index]` or, in interactive mode, asks for a category.
    pub(crate) fn category_arg(
        &self,
        args: &[&str],
        index: usize,
        prompt: &str,
        usage: &str,
    ) -> Result<String, CommandError> {
        match args.get(index) {
            Some(name) => Ok((*name).to_string()),
            None if self.mode == CliMode::Interactive => self.select_category(prompt),
            None => Err(usage_error(usage)),
        }
    }

    /// Returns the parsed `args[index]` or, in interactive mode, asks for it.
    pub(crate) fn amount_arg(
        &self,
        args: &[&str],
        index: usize,
        usage: &str,
    ) -> Result<f64, CommandError> {
        match args.get(index) {
            Some(raw) => parse_amount(raw),
            None if self.mode == CliMode::Interactive => {
                cli_io::prompt_amount(&self.theme, "Amount")
            }
            None => Err(usage_error(usage)),
        }
    }
}

pub(crate) fn usage_error(usage: &str) -> CommandError {
    CommandError::InvalidArguments(format!("usage: {}", usage))
}

pub(crate) fn parse_amount(raw: &str) -> Result<f64, CommandError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| CommandError::InvalidArguments(format!("Invalid amount `{}`", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn script_context() -> (TempDir, ShellContext) {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let context = ShellContext::with_config_manager(CliMode::Script, manager).unwrap();
        (temp, context)
    }

    fn run(context: &mut ShellContext, line: &str) -> Result<LoopControl, CommandError> {
        crate::cli::shell::handle_line(context, line)
    }

    #[test]
    fn full_budget_flow_updates_portfolio() {
        let (_temp, mut context) = script_context();
        run(&mut context, "category add Groceries").unwrap();
        run(&mut context, "category add Clothing").unwrap();
        run(&mut context, "deposit Groceries 900 deposit").unwrap();
        run(&mut context, r#"withdraw Groceries 45.67 "milk, cereal, eggs, bread""#).unwrap();
        run(&mut context, "transfer Groceries Clothing 100").unwrap();

        let groceries = context.portfolio.get("Groceries").unwrap();
        assert!((groceries.balance() - 754.33).abs() < 1e-9);
        assert_eq!(
            groceries.entries()[1].description,
            "milk, cereal, eggs, bread"
        );
        assert_eq!(context.portfolio.get("Clothing").unwrap().balance(), 100.0);
    }

    #[test]
    fn insufficient_funds_surface_as_budget_errors() {
        let (_temp, mut context) = script_context();
        run(&mut context, "category add Food").unwrap();
        run(&mut context, "deposit Food 10").unwrap();
        let err = run(&mut context, "withdraw Food 20").unwrap_err();
        assert!(matches!(
            err,
            CommandError::Budget(BudgetError::InsufficientFunds { .. })
        ));
        assert_eq!(context.portfolio.get("Food").unwrap().entries().len(), 1);
    }

    #[test]
    fn missing_arguments_in_script_mode_report_usage() {
        let (_temp, mut context) = script_context();
        let err = run(&mut context, "deposit").unwrap_err();
        assert!(matches!(err, CommandError::InvalidArguments(message) if message.starts_with("usage:")));
    }

    #[test]
    fn invalid_amounts_are_rejected() {
        let (_temp, mut context) = script_context();
        run(&mut context, "category add Food").unwrap();
        let err = run(&mut context, "deposit Food ten").unwrap_err();
        assert!(matches!(err, CommandError::InvalidArguments(_)));
        let err = run(&mut context, "deposit Food -5").unwrap_err();
        assert!(matches!(
            err,
            CommandError::Budget(BudgetError::InvalidAmount(_))
        ));
    }

    #[test]
    fn unknown_commands_continue_the_loop() {
        let (_temp, mut context) = script_context();
        assert_eq!(
            run(&mut context, "depost Food 1").unwrap(),
            LoopControl::Continue
        );
        assert_eq!(context.closest_command("depost"), Some("deposit"));
        assert_eq!(context.closest_command("xyzzyplugh"), None);
    }

    #[test]
    fn exit_stops_the_loop() {
        let (_temp, mut context) = script_context();
        assert_eq!(run(&mut context, "exit").unwrap(), LoopControl::Exit);
    }

    #[test]
    fn config_set_persists_preferences() {
        let (temp, mut context) = script_context();
        run(&mut context, "config set chart_width 12").unwrap();
        assert_eq!(context.config.chart_width, 12);

        let reloaded = ConfigManager::with_base_dir(temp.path().to_path_buf())
            .unwrap()
            .load()
            .unwrap();
        assert_eq!(reloaded.chart_width, 12);
    }

    #[test]
    fn category_names_with_spaces_need_quoting() {
        let (_temp, mut context) = script_context();
        let err = run(&mut context, "category add Eating Out").unwrap_err();
        assert!(matches!(err, CommandError::InvalidArguments(message) if message.starts_with("usage:")));
        assert!(context.portfolio.is_empty());

        run(&mut context, r#"category add "Eating Out""#).unwrap();
        run(&mut context, r#"category show "Eating Out""#).unwrap();
        run(&mut context, r#"deposit "Eating Out" 20"#).unwrap();
        assert_eq!(context.portfolio.get("Eating Out").unwrap().balance(), 20.0);

        let err = run(&mut context, "category show Eating Out").unwrap_err();
        assert!(matches!(err, CommandError::InvalidArguments(_)));
        let err = run(&mut context, "balance Eating Out").unwrap_err();
        assert!(matches!(err, CommandError::InvalidArguments(_)));
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let (_temp, mut context) = script_context();
        assert_eq!(run(&mut context, "   ").unwrap(), LoopControl::Continue);
        assert_eq!(
            run(&mut context, "# category add Don't").unwrap(),
            LoopControl::Continue
        );
        assert!(context.portfolio.is_empty());
    }

    #[test]
    fn unbalanced_quotes_are_reported_as_invalid_arguments() {
        let (_temp, mut context) = script_context();
        let err = run(&mut context, r#"category add "Food"#).unwrap_err();
        assert!(matches!(err, CommandError::InvalidArguments(_)));
    }

    #[test]
    fn parse_amount_accepts_decimals() {
        assert_eq!(parse_amount(" 45.67 ").unwrap(), 45.67);
        assert!(parse_amount("4O").is_err());
    }
}
