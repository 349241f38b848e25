//! Dispatch, error reporting and the shared command error type.

use std::io;

use dialoguer::theme::ColorfulTheme;
use tally_config::{resolve_base_dir, ConfigError};
use tally_core::{CoreError, GatewayError, ValidationError};

use crate::errors::TallyError;
use crate::session::Session;

use super::commands;
use super::io as cli_io;
use super::output::{self, OutputPreferences};
use super::registry::CommandRegistry;
pub use super::shell_context::{CliMode, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error("Not signed in.")]
    NotSignedIn,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<ValidationError> for CommandError {
    fn from(err: ValidationError) -> Self {
        CommandError::Core(CoreError::Validation(err))
    }
}

impl From<CommandError> for TallyError {
    fn from(err: CommandError) -> Self {
        TallyError::Command(err.to_string())
    }
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, TallyError> {
        let session = Session::open(&resolve_base_dir())?;
        Ok(Self::with_session(mode, session))
    }

    pub fn with_session(mode: CliMode, session: Session) -> Self {
        output::set_preferences(OutputPreferences::detect(session.config().ui_color_enabled));

        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        Self {
            mode,
            registry,
            session,
            theme: ColorfulTheme::default(),
            running: true,
        }
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn prompt(&self) -> String {
        if self.session.is_signed_in() {
            "tally> ".into()
        } else {
            "tally (signed out)> ".into()
        }
    }

    pub(crate) fn currency(&self) -> &str {
        &self.session.config().currency_symbol
    }

    /// Fails with the usage text when a value would have to be prompted for
    /// but no terminal is attached.
    pub(crate) fn require_interactive(&self, usage: &str) -> CommandResult {
        if self.is_interactive() {
            Ok(())
        } else {
            Err(CommandError::InvalidArguments(format!("usage: {usage}")))
        }
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some((handler, protected)) = self
            .registry
            .get(command)
            .map(|entry| (entry.handler, entry.requires_session))
        else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };

        if protected && !self.session.is_signed_in() {
            return Err(CommandError::NotSignedIn);
        }

        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{input}`. Type `help` to see available commands."
        ));
        if let Some(best) = self.registry.suggest(input) {
            cli_io::print_info(format!("Suggestion: `{best}`?"));
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, TallyError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(cli_io::confirm_action(&self.theme, "Exit tally?", true)?)
    }

    /// Prints a failed command. Nothing here ends the shell.
    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(message);
                cli_io::print_hint("Use `help <command>` for usage details.");
            }
            CommandError::NotSignedIn => {
                cli_io::print_error("Not signed in.");
                cli_io::print_hint(
                    "Use `login <username>` to sign in, or `register` to create an account.",
                );
            }
            CommandError::Core(err) if err.is_auth_failure() => {
                cli_io::print_error(&err);
                cli_io::print_hint("Your session has ended. Use `login <username>` to sign in again.");
            }
            CommandError::Core(CoreError::Gateway(err @ GatewayError::Network(_))) => {
                cli_io::print_error(&err);
                cli_io::print_hint(format!(
                    "Check that the budget service is reachable at {}.",
                    self.session.api_base()
                ));
            }
            other => cli_io::print_error(other),
        }
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = crate::cli::shell::parse_command_line(line)
            .map_err(|err| CommandError::InvalidArguments(err.to_string()))?;
        let Some(raw) = tokens.first() else {
            return Ok(LoopControl::Continue);
        };
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.dispatch(&raw.to_lowercase(), raw, &args)
    }
}
