use tally_domain::{SortDirection, SortField, SortSpec};

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;

const SORT_USAGE: &str = "sort [name|category|amount] [asc|desc]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "filter",
            "Show only one category; no label clears",
            "filter [category]",
            cmd_filter,
        )
        .protected(),
        CommandEntry::new(
            "sort",
            "Sort the list; a field alone cycles its directions, then off",
            SORT_USAGE,
            cmd_sort,
        )
        .protected(),
        CommandEntry::new("reset", "Clear filter and sort", "reset", cmd_reset).protected(),
    ]
}

fn cmd_filter(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    context.session.ensure_loaded()?;
    let label = args.join(" ");
    let view = context.session.dashboard_mut().view_mut();
    view.set_filter(Some(&label));

    match view.filter() {
        None => io::print_info("Category filter cleared."),
        Some(active) => {
            let matches = view.visible_rows().len();
            if matches == 0 {
                io::print_warning(format!("No expenses in category `{active}`."));
            } else {
                io::print_info(format!("Showing {matches} expense(s) in `{active}`."));
            }
        }
    }
    Ok(())
}

fn cmd_sort(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parse_field = |raw: &str| raw.parse::<SortField>().map_err(CommandError::InvalidArguments);
    let parse_direction =
        |raw: &str| raw.parse::<SortDirection>().map_err(CommandError::InvalidArguments);

    let view = context.session.dashboard_mut().view_mut();
    match args {
        [] => view.set_sort(None),
        [field] => view.toggle_sort(parse_field(field)?),
        [field, direction] => view.set_sort(Some(SortSpec::new(
            parse_field(field)?,
            parse_direction(direction)?,
        ))),
        _ => return Err(CommandError::InvalidArguments(format!("usage: {SORT_USAGE}"))),
    }

    match view.sort() {
        Some(spec) => io::print_info(format!("Sorted by {spec}.")),
        None => io::print_info("Sorting cleared."),
    }
    Ok(())
}

fn cmd_reset(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.session.dashboard_mut().view_mut().reset_view();
    io::print_info("Filter and sort cleared.");
    Ok(())
}
