mod app;
mod config;
mod error;
mod logging;
mod ui;

use crate::error::Result;

fn main() -> Result<()> {
    let config = config::load()?;
    logging::init(&config)?;

    // An unreadable file aborts here, before anything could overwrite it.
    let (ledger, report) = ledger::load(&config.data_file).inspect_err(|err| {
        tracing::error!("Error reading \"{}\": {err}", config.data_file);
    })?;

    // Terminal setup failures return from `run` before the final save.
    app::App::new(ledger, &report, &config.data_file).run()
}
