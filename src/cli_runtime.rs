use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use checklist::model::ClientConfig;

/// Logs go to `log_file` when given, otherwise to stderr. The TUI owns the
/// terminal, so without a log file it installs no subscriber at all.
pub(crate) fn init_tracing(log_file: Option<&Path>, interactive: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None if interactive => {}
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

/// Defaults, then the config file, then `--url` / `CHECKLIST_URL`.
pub(crate) fn resolve_config(
    path: Option<&Path>,
    url: Option<String>,
    reload_after_mutation: bool,
) -> Result<ClientConfig> {
    let mut cfg = match path {
        Some(p) => ClientConfig::read(p)?,
        None => ClientConfig::default(),
    };
    if let Some(url) = url {
        cfg.base_url = url;
    }
    if reload_after_mutation {
        cfg.reload_after_mutation = true;
    }
    Ok(cfg.validated()?)
}
