use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::registry::CommandEntry;
use crate::cli::ui::{budget_chart, format_amount, share_chart, terminal_width, ChartStyle, Table};
use crate::cli::{io, output};

/// Label column plus amount/percent columns beside each bar.
const CHART_CHROME: usize = 36;
const MIN_CHART_WIDTH: usize = 10;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("refresh", "Reload budget and expenses", "refresh", cmd_refresh)
            .protected(),
        CommandEntry::new(
            "budget",
            "Show or set the budget",
            "budget [amount]",
            cmd_budget,
        )
        .protected(),
        CommandEntry::new(
            "summary",
            "Show spent, remaining and budget",
            "summary",
            cmd_summary,
        )
        .protected(),
        CommandEntry::new(
            "chart",
            "Chart spending by category and against the budget",
            "chart",
            cmd_chart,
        )
        .protected(),
    ]
}

fn cmd_refresh(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.session.refresh()?;
    let count = context.session.dashboard().view().len();
    io::print_success(format!("Loaded {count} expense(s)."));
    Ok(())
}

fn cmd_budget(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            context.session.ensure_loaded()?;
            let budget = context.session.dashboard().budget();
            io::print_info(format!("Budget: {}", format_amount(context.currency(), budget)));
            Ok(())
        }
        [amount] => {
            let saved = context.session.set_budget(amount)?;
            io::print_success(format!(
                "Budget set to {}.",
                format_amount(context.currency(), saved)
            ));
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments("usage: budget [amount]".into())),
    }
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.session.ensure_loaded()?;
    let summary = context.session.dashboard().summary();
    let currency = context.currency();

    output::section("Budget summary");
    let table = Table::two_column(vec![
        ("Budget".into(), format_amount(currency, summary.budget)),
        ("Spent".into(), format_amount(currency, summary.spent)),
        ("Remaining".into(), format_amount(currency, summary.remaining)),
    ]);
    output::block(&table.render());
    if summary.is_overspent() {
        io::print_warning(format!(
            "Over budget by {}.",
            format_amount(currency, -summary.remaining)
        ));
    }
    Ok(())
}

fn cmd_chart(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.session.ensure_loaded()?;
    let style = chart_style(context);
    let dashboard = context.session.dashboard();
    let currency = context.currency();

    output::section("Spending by category");
    let shares = dashboard.shares();
    if shares.is_empty() {
        io::print_info("No expenses yet.");
    } else {
        output::block(&share_chart(&shares, style, currency));
    }

    output::section("Budget");
    output::block(&budget_chart(&dashboard.bars(), style, currency));
    Ok(())
}

fn chart_style(context: &ShellContext) -> ChartStyle {
    let configured = context.session.config().chart_width;
    let width = match terminal_width() {
        Some(cols) => configured.min(cols.saturating_sub(CHART_CHROME)),
        None => configured,
    };
    ChartStyle::new(
        width.max(MIN_CHART_WIDTH),
        output::current_preferences().plain_mode,
    )
}
