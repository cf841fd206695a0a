use dialoguer::theme::ColorfulTheme;

use crate::{
    config::{Config, ConfigManager},
    domain::Portfolio,
};

use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// State owned by one shell session. The portfolio lives only as long as the
/// session does.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub portfolio: Portfolio,
    pub theme: ColorfulTheme,
    pub config_manager: ConfigManager,
    pub config: Config,
}
