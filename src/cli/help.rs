use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::cli::ui::{Table, TableColumn};

fn rule() -> char {
    if output::current_preferences().plain_mode {
        '-'
    } else {
        '─'
    }
}

pub fn print_overview(registry: &CommandRegistry) {
    output::section("Available commands");
    let mut table = Table::new(vec![
        TableColumn::left("Command"),
        TableColumn::left("Description"),
    ])
    .with_rule(rule());
    for entry in registry.list() {
        let marker = if entry.requires_session { "" } else { " (no sign-in needed)" };
        table.push_row(vec![
            entry.name.to_string(),
            format!("{}{}", entry.description, marker),
        ]);
    }
    output::block(&table.render());
    output::hint("Use `help <command>` for usage details.");
}

pub fn print_command(entry: &CommandEntry) {
    output::section(format!("Help: {}", entry.name));
    let table = Table::two_column(vec![
        ("Description".into(), entry.description.into()),
        ("Usage".into(), entry.usage.into()),
        (
            "Sign-in".into(),
            if entry.requires_session { "required" } else { "not required" }.into(),
        ),
    ]);
    output::block(&table.render());
}
