use std::{
    borrow::Cow,
    cell::RefCell,
    fmt,
    io::{self, BufRead},
    rc::Rc,
};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::{ValidationContext, ValidationResult, Validator},
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};
use shell_words::split;

use crate::cli::core::{CliMode, CommandError, LoopControl, ShellContext};
use crate::cli::output;
use crate::errors::TallyError;
use crate::utils::build_info;

/// Set to run lines from stdin without a line editor or prompts.
pub const SCRIPT_ENV: &str = "TALLY_CLI_SCRIPT";

const SORT_WORDS: &[&str] = &["name", "category", "amount", "asc", "desc"];

pub fn run_cli() -> Result<(), TallyError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), TallyError> {
    let labels = Rc::new(RefCell::new(Vec::new()));
    let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(CommandHelper::new(
        context.command_names(),
        Rc::clone(&labels),
    )));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);

    output::info(build_info::current().summary());
    output::hint("Type `help` to list commands.");
    if !context.session.is_signed_in() {
        output::hint("Start with `login <username>` or `register`.");
    }

    while context.running {
        let prompt = context.prompt();
        match editor.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                editor.add_history_entry(trimmed).ok();

                match handle_line(context, trimmed) {
                    Ok(LoopControl::Continue) => {}
                    Ok(LoopControl::Exit) => break,
                    Err(err) => context.report_error(err),
                }
                labels.replace(context.session.dashboard().view().category_labels());
            }
            Err(ReadlineError::Interrupted) => {
                if context.confirm_exit()? {
                    break;
                }
            }
            Err(ReadlineError::Eof) => {
                output::info("Goodbye.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

fn run_script(context: &mut ShellContext) -> Result<(), TallyError> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        if !context.running {
            break;
        }
        let line = line?;
        match handle_line(context, &line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err),
        }
    }
    Ok(())
}

fn handle_line(context: &mut ShellContext, line: &str) -> Result<LoopControl, CommandError> {
    let tokens = match parse_command_line(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            output::warning(err);
            return Ok(LoopControl::Continue);
        }
    };

    let Some(raw) = tokens.first() else {
        return Ok(LoopControl::Continue);
    };
    if raw.starts_with('#') {
        return Ok(LoopControl::Continue);
    }

    let command = raw.to_lowercase();
    let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();

    match context.dispatch(&command, raw, &args) {
        Ok(LoopControl::Exit) => {
            context.running = false;
            Ok(LoopControl::Exit)
        }
        other => other,
    }
}

/// Completes command names, then sort words after `sort` and category labels
/// after `filter`.
struct CommandHelper {
    commands: Vec<String>,
    labels: Rc<RefCell<Vec<String>>>,
}

impl CommandHelper {
    fn new(names: Vec<&'static str>, labels: Rc<RefCell<Vec<String>>>) -> Self {
        let mut commands: Vec<String> = names.into_iter().map(str::to_ascii_lowercase).collect();
        commands.sort();
        commands.dedup();
        Self { commands, labels }
    }

    fn argument_candidates(&self, command: &str) -> Vec<String> {
        match command {
            "sort" => SORT_WORDS.iter().map(|w| w.to_string()).collect(),
            "filter" => self.labels.borrow().clone(),
            _ => Vec::new(),
        }
    }
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = line.get(..pos).unwrap_or(line);
        let start = word_start(prefix);
        let needle = prefix[start..].to_lowercase();

        let trimmed = prefix.trim_start();
        let pool = match trimmed.split_once(char::is_whitespace) {
            Some((command, _)) => self.argument_candidates(&command.to_lowercase()),
            None => self.commands.clone(),
        };

        let candidates = pool
            .into_iter()
            .filter(|word| word.to_lowercase().starts_with(&needle))
            .map(|word| {
                let replacement = if word.contains(char::is_whitespace) {
                    format!("\"{word}\"")
                } else {
                    word.clone()
                };
                Pair {
                    display: word,
                    replacement,
                }
            })
            .collect();
        Ok((start, candidates))
    }
}

/// Byte offset where the word under the cursor begins.
fn word_start(prefix: &str) -> usize {
    prefix
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map(|(idx, c)| idx + c.len_utf8())
        .unwrap_or(0)
}

impl Hinter for CommandHelper {
    type Hint = String;
}

impl Highlighter for CommandHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }
}

impl Validator for CommandHelper {
    fn validate(&self, _ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        Ok(ValidationResult::Valid(None))
    }
}

pub(crate) fn parse_command_line(input: &str) -> Result<Vec<String>, ParseError> {
    split(input).map_err(|err| ParseError {
        message: err.to_string(),
    })
}

#[derive(Debug)]
pub(crate) struct ParseError {
    message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Could not parse line: {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_arguments_stay_together() {
        let tokens = parse_command_line(r#"add "Coffee beans" 12.5 "eating out""#).unwrap();
        assert_eq!(tokens, vec!["add", "Coffee beans", "12.5", "eating out"]);
    }

    #[test]
    fn unbalanced_quote_is_reported() {
        let err = parse_command_line(r#"add "Coffee 3 food"#).unwrap_err();
        assert!(err.to_string().starts_with("Could not parse line"));
    }

    #[test]
    fn word_start_handles_multibyte_whitespace() {
        assert_eq!(word_start("filter fo"), 7);
        assert_eq!(word_start("filter\u{00A0}fo"), 8);
        assert_eq!(word_start("sort\u{3000}am"), 7);
        assert_eq!(word_start("lis"), 0);
        assert_eq!(word_start("filter "), 7);
    }

    #[test]
    fn completion_after_nbsp_does_not_panic() {
        let labels = Rc::new(RefCell::new(vec!["Food".to_string()]));
        let helper = CommandHelper::new(vec!["filter", "sort"], labels);
        let history = DefaultHistory::new();
        let ctx = ReadlineContext::new(&history);

        let line = "filter\u{00A0}fo";
        let (start, candidates) = helper.complete(line, line.len(), &ctx).unwrap();
        assert_eq!(start, 8);
        let replacements: Vec<&str> = candidates.iter().map(|c| c.replacement.as_str()).collect();
        assert_eq!(replacements, vec!["Food"]);
    }

    #[test]
    fn filter_arguments_come_from_current_labels() {
        let labels = Rc::new(RefCell::new(vec!["Food".to_string(), "Eating Out".to_string()]));
        let helper = CommandHelper::new(vec!["filter", "sort"], labels);
        assert_eq!(
            helper.argument_candidates("filter"),
            vec!["Food".to_string(), "Eating Out".to_string()]
        );
        assert!(helper.argument_candidates("sort").contains(&"amount".to_string()));
        assert!(helper.argument_candidates("list").is_empty());
    }
}
