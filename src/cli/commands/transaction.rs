use crate::cli::core::{CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::core::services::TransactionService;

const DEPOSIT_USAGE: &str = "deposit <category> <amount> [description]";
const WITHDRAW_USAGE: &str = "withdraw <category> <amount> [description]";
const TRANSFER_USAGE: &str = "transfer <from> <to> <amount>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "deposit",
            "Add money to a category",
            DEPOSIT_USAGE,
            cmd_deposit,
        ),
        CommandEntry::new(
            "withdraw",
            "Spend money from a category",
            WITHDRAW_USAGE,
            cmd_withdraw,
        ),
        CommandEntry::new(
            "transfer",
            "Move money between categories",
            TRANSFER_USAGE,
            cmd_transfer,
        ),
    ]
}

fn cmd_deposit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let category = context.category_arg(args, 0, "Deposit into", DEPOSIT_USAGE)?;
    let amount = context.amount_arg(args, 1, DEPOSIT_USAGE)?;
    let description = description_arg(context, args, 2, "Deposit description")?;
    TransactionService::deposit(&mut context.portfolio, &category, amount, &description)?;
    io::print_success(format!("Deposited {:.2} to {}", amount, category));
    Ok(())
}

fn cmd_withdraw(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let category = context.category_arg(args, 0, "Withdraw from", WITHDRAW_USAGE)?;
    let amount = context.amount_arg(args, 1, WITHDRAW_USAGE)?;
    let description = description_arg(context, args, 2, "Withdraw description")?;
    TransactionService::withdraw(&mut context.portfolio, &category, amount, &description)?;
    io::print_success(format!("Withdrew {:.2} from {}", amount, category));
    Ok(())
}

fn cmd_transfer(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let from = context.category_arg(args, 0, "Transfer from", TRANSFER_USAGE)?;
    let to = context.category_arg(args, 1, "Transfer to", TRANSFER_USAGE)?;
    let amount = context.amount_arg(args, 2, TRANSFER_USAGE)?;
    TransactionService::transfer(&mut context.portfolio, &from, &to, amount)?;
    io::print_success(format!("Transferred {:.2} from {} to {}", amount, from, to));
    Ok(())
}

/// Remaining arguments joined as the description. Interactive sessions that
/// supplied no arguments at all are prompted instead.
fn description_arg(
    context: &ShellContext,
    args: &[&str],
    index: usize,
    prompt: &str,
) -> Result<String, CommandError> {
    if args.is_empty() && context.mode() == CliMode::Interactive {
        return io::prompt_optional_text(&context.theme, prompt);
    }
    Ok(args.get(index..).unwrap_or_default().join(" "))
}
