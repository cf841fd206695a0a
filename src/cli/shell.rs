//! Line-oriented front end: a rustyline editor for people, stdin for scripts.
use std::io::{self, BufRead};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};

use crate::cli::core::{CliError, CliMode, CommandError, LoopControl, ShellContext};
use crate::cli::output;
use crate::domain::Portfolio;

const SCRIPT_ENV_VAR: &str = "BUDGET_TRACKER_CLI_SCRIPT";
const CATEGORY_ACTIONS: [&str; 3] = ["add", "list", "show"];

pub fn run_cli() -> Result<(), CliError> {
    let mode = match std::env::var_os(SCRIPT_ENV_VAR) {
        Some(_) => CliMode::Script,
        None => CliMode::Interactive,
    };
    let mut context = ShellContext::new(mode)?;
    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<BudgetHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(BudgetHelper::new(context.command_names())));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);

    output::info("Welcome to the Budget Tracker! Type `help` to get started.");

    loop {
        if let Some(helper) = editor.helper_mut() {
            helper.refresh_categories(&context.portfolio);
        }
        let line = match editor.readline(&context.prompt()) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                if context.confirm_exit()? {
                    break;
                }
                continue;
            }
            Err(ReadlineError::Eof) => {
                output::info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        };

        let line = line.trim();
        if !line.is_empty() {
            editor.add_history_entry(line).ok();
        }
        if execute(context, line)? == LoopControl::Exit {
            break;
        }
    }
    Ok(())
}

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    for line in io::stdin().lock().lines() {
        if execute(context, &line?)? == LoopControl::Exit {
            break;
        }
    }
    Ok(())
}

/// Runs one input line. Command failures are reported and the session goes on.
fn execute(context: &mut ShellContext, line: &str) -> Result<LoopControl, CliError> {
    match handle_line(context, line) {
        Ok(control) => Ok(control),
        Err(err) => {
            context.report_error(err)?;
            Ok(LoopControl::Continue)
        }
    }
}

/// Tokenizes and dispatches a line. Blank lines and `#` comments do nothing.
pub(crate) fn handle_line(
    context: &mut ShellContext,
    line: &str,
) -> Result<LoopControl, CommandError> {
    if line.trim_start().starts_with('#') {
        return Ok(LoopControl::Continue);
    }
    let tokens = parse_command_line(line)?;
    let Some((raw, rest)) = tokens.split_first() else {
        return Ok(LoopControl::Continue);
    };
    let args: Vec<&str> = rest.iter().map(String::as_str).collect();
    context.dispatch(&raw.to_lowercase(), raw, &args)
}

pub(crate) fn parse_command_line(input: &str) -> Result<Vec<String>, CommandError> {
    shell_words::split(input)
        .map_err(|err| CommandError::InvalidArguments(format!("Could not parse input: {}", err)))
}

fn takes_category_first(command: &str) -> bool {
    matches!(
        command.to_ascii_lowercase().as_str(),
        "deposit" | "withdraw" | "transfer" | "balance"
    )
}

/// Completes command names, `category` actions, and category names in the
/// argument positions that expect one.
struct BudgetHelper {
    commands: Vec<String>,
    categories: Vec<String>,
}

impl BudgetHelper {
    fn new(names: Vec<&'static str>) -> Self {
        let mut commands: Vec<String> = names
            .into_iter()
            .map(|name| name.to_ascii_lowercase())
            .collect();
        commands.sort();
        commands.dedup();
        Self {
            commands,
            categories: Vec::new(),
        }
    }

    fn refresh_categories(&mut self, portfolio: &Portfolio) {
        self.categories = portfolio.names().into_iter().map(str::to_string).collect();
    }

    fn category_names(&self) -> Vec<&str> {
        self.categories.iter().map(String::as_str).collect()
    }

    /// Candidates for `partial`, given the finished words before it.
    fn candidates(&self, words: &[&str], partial: &str) -> Vec<Pair> {
        let pool: Vec<&str> = match words {
            [] => self.commands.iter().map(String::as_str).collect(),
            [command] if command.eq_ignore_ascii_case("category") => CATEGORY_ACTIONS.to_vec(),
            [command, action]
                if command.eq_ignore_ascii_case("category")
                    && action.eq_ignore_ascii_case("show") =>
            {
                self.category_names()
            }
            [command] if takes_category_first(command) => self.category_names(),
            [command, _] if command.eq_ignore_ascii_case("transfer") => self.category_names(),
            _ => Vec::new(),
        };

        let needle = partial.to_lowercase();
        pool.into_iter()
            .filter(|candidate| candidate.to_lowercase().starts_with(&needle))
            .map(|candidate| Pair {
                display: candidate.to_string(),
                replacement: shell_words::quote(candidate).into_owned(),
            })
            .collect()
    }
}

impl Helper for BudgetHelper {}

impl Completer for BudgetHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        let start = prefix
            .rfind(char::is_whitespace)
            .map(|idx| idx + 1)
            .unwrap_or(0);
        let words: Vec<&str> = prefix[..start].split_whitespace().collect();
        Ok((start, self.candidates(&words, &prefix[start..])))
    }
}

impl Hinter for BudgetHelper {
    type Hint = String;
}

impl Highlighter for BudgetHelper {}

impl Validator for BudgetHelper {}
