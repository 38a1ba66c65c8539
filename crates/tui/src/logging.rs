use std::{
    fs::{self, OpenOptions},
    path::Path,
    sync::Mutex,
};

use crate::{
    config::AppConfig,
    error::{AppError, Result},
};

/// Sends every `tracing` event of this binary and of the ledger to the log
/// file. The file is opened in append mode and never rotated.
pub fn init(config: &AppConfig) -> Result<()> {
    let path = Path::new(&config.log_file);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "debts_tui={level},ledger={level}",
            level = config.log_level
        ))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| AppError::Logging(err.to_string()))
}
