use tally_domain::ExpenseId;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::registry::CommandEntry;
use crate::cli::ui::{format_amount, Table, TableColumn};
use crate::cli::{io, output};

const ADD_USAGE: &str = "add <name> <amount> <category>";
const NAME_WIDTH: usize = 32;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("add", "Record an expense", ADD_USAGE, cmd_add).protected(),
        CommandEntry::new("rm", "Delete an expense by id", "rm <id>", cmd_remove).protected(),
        CommandEntry::new(
            "list",
            "List expenses with the active filter and sort",
            "list",
            cmd_list,
        )
        .protected(),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [name, amount, category] = args else {
        return Err(CommandError::InvalidArguments(format!("usage: {ADD_USAGE}")));
    };
    context.session.ensure_loaded()?;
    let created = context.session.add_expense(name, amount, category)?;
    io::print_success(format!(
        "Added #{} {} ({}) {}.",
        created.id,
        created.name,
        created.category,
        format_amount(context.currency(), created.amount)
    ));
    Ok(())
}

fn cmd_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw_id] = args else {
        return Err(CommandError::InvalidArguments("usage: rm <id>".into()));
    };
    let id = parse_id(raw_id)?;
    context.session.ensure_loaded()?;
    match context.session.delete_expense(&id)? {
        Some(removed) => io::print_success(format!("Deleted #{} {}.", removed.id, removed.name)),
        None => io::print_success(format!("Deleted #{id}.")),
    }
    Ok(())
}

/// Ids travel as one URL path segment, so dot segments are refused.
fn parse_id(raw: &str) -> Result<ExpenseId, CommandError> {
    match raw.trim() {
        "" => Err(CommandError::InvalidArguments("usage: rm <id>".into())),
        "." | ".." => Err(CommandError::InvalidArguments(format!(
            "`{}` is not an expense id",
            raw.trim()
        ))),
        id => Ok(ExpenseId::new(id)),
    }
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.session.ensure_loaded()?;
    let currency = context.currency();
    let view = context.session.dashboard().view();
    let rows = view.visible_rows();

    if view.is_empty() {
        io::print_info("No expenses yet. Use `add <name> <amount> <category>`.");
        return Ok(());
    }

    let rule = if output::current_preferences().plain_mode { '-' } else { '─' };
    let mut table = Table::new(vec![
        TableColumn::right("ID"),
        TableColumn::left("Name").max_width(NAME_WIDTH),
        TableColumn::left("Category"),
        TableColumn::right("Amount"),
    ])
    .with_rule(rule);
    for expense in &rows {
        table.push_row(vec![
            expense.id.to_string(),
            expense.name.clone(),
            expense.category.clone(),
            format_amount(currency, expense.amount),
        ]);
    }

    if rows.is_empty() {
        io::print_info("No expenses match the current filter.");
    } else {
        output::block(&table.render());
    }

    let mut footer = format!("{} of {} expense(s)", rows.len(), view.len());
    if let Some(filter) = view.filter() {
        footer.push_str(&format!(", category: {filter}"));
    }
    if let Some(sort) = view.sort() {
        footer.push_str(&format!(", sorted by {sort}"));
    }
    io::print_hint(footer);
    Ok(())
}
