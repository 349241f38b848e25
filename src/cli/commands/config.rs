use tally_config::Config;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output::{self, OutputPreferences};
use crate::cli::registry::CommandEntry;
use crate::cli::ui::Table;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change client preferences",
        "config [show|set <key> <value>]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() || args[0].eq_ignore_ascii_case("show") {
        show_config(context);
        return Ok(());
    }

    match args[0].to_lowercase().as_str() {
        "set" => {
            if args.len() < 3 {
                return Err(CommandError::InvalidArguments(format!(
                    "usage: config set <{}> <value>",
                    Config::KEYS.join("|")
                )));
            }
            let key = args[1].to_lowercase();
            let value = args[2..].join(" ");
            set_config_value(context, &key, value.trim())
        }
        other => Err(CommandError::InvalidArguments(format!(
            "unknown config action `{other}` (try `config show` or `config set`)"
        ))),
    }
}

fn show_config(context: &ShellContext) {
    let config = context.session.config();
    let rows = Config::KEYS
        .iter()
        .filter_map(|key| config.get_field(key).map(|value| (key.to_string(), value)))
        .collect();
    output::section("Preferences");
    output::block(&Table::two_column(rows).render());
}

fn set_config_value(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    let applied = context.session.set_preference(key, value)?;
    if key == "ui_color_enabled" {
        output::set_preferences(OutputPreferences::detect(
            context.session.config().ui_color_enabled,
        ));
    }

    output::success(format!("Saved {key} = {value}."));
    if !applied {
        output::hint("Restart tally for this change to take effect.");
    }
    Ok(())
}
