use anyhow::Result;
use clap::Parser;
use mealtime::cli::{Cli, run};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = mealtime::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    mealtime::observability::init_observability(
        "mealtime",
        env!("CARGO_PKG_VERSION"),
        &config.logging,
    )?;

    let stdout = std::io::stdout();
    if let Err(err) = run(cli.command, &config, &mut stdout.lock()) {
        tracing::error!(error = %err, "Command failed");
        eprintln!("error: {err}");
        std::process::exit(err.exit_code());
    }

    Ok(())
}
