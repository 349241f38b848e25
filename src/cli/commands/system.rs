use chrono::Local;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::ui::Table;
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("help", "Show available commands", "help [command]", cmd_help),
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new(
            "whoami",
            "Show the server and sign-in state",
            "whoami",
            cmd_whoami,
        ),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit),
    ]
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first() {
        Some(name) => match context.registry.get(&name.to_lowercase()) {
            Some(entry) => help::print_command(entry),
            None => context.suggest_command(name),
        },
        None => help::print_overview(&context.registry),
    }
    Ok(())
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output::section(format!("tally {}", meta.version));
    let table = Table::two_column(vec![
        ("Build hash".into(), format!("{} ({})", meta.git_hash, meta.git_status)),
        ("Built at".into(), meta.timestamp.into()),
        ("Target".into(), meta.target.into()),
        ("Profile".into(), meta.profile.into()),
        ("Rustc".into(), meta.rustc.into()),
    ]);
    output::block(&table.render());
    Ok(())
}

fn cmd_whoami(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let session = &context.session;
    let state = match (session.is_signed_in(), session.signed_in_since()) {
        (true, Some(since)) => format!(
            "signed in since {}",
            since.with_timezone(&Local).format("%Y-%m-%d %H:%M")
        ),
        (true, None) => "signed in".to_string(),
        (false, _) => "signed out".to_string(),
    };
    let table = Table::two_column(vec![
        ("Server".into(), session.api_base().to_string()),
        ("Session".into(), state),
        ("Currency".into(), session.config().currency_symbol.clone()),
    ]);
    output::block(&table.render());
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
