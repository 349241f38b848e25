//! Runtime state shared by every command handler.

use dialoguer::theme::ColorfulTheme;

use crate::session::Session;

use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    /// Lines come from stdin; nothing may prompt.
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub session: Session,
    pub theme: ColorfulTheme,
    pub running: bool,
}

impl ShellContext {
    pub fn is_interactive(&self) -> bool {
        self.mode == CliMode::Interactive
    }
}
