use clap::Parser;
use mazewalk::app::{self, AppConfig};

fn main() -> anyhow::Result<()> {
    let config = AppConfig::parse();
    // Keep the guard alive so buffered logs are flushed on exit
    let _log_guard = app::init_logging(&config.log_file, config.log_level)?;
    tracing::info!("Starting with {:?}", config);

    app::run(&config)
}
