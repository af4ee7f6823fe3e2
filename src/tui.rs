use anyhow::Result;

use crate::model::ClientConfig;

/// Runs the interactive todo list until the user quits. Requires a TTY.
pub fn run(config: &ClientConfig) -> Result<()> {
    crate::tui_shell::run(config)
}
