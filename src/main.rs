//! pwgen CLI
//!
//! Prints generated passwords to stdout. Diagnostics go to stderr.

use clap::Parser;
use pwgen::{cli::Args, driver, Driver, DriverError, FileConfig};
use std::io::IsTerminal;
use tracing::debug;

fn main() {
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    if let Err(e) = run(&args) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), DriverError> {
    debug!("pwgen v{}", pwgen::VERSION);

    let file = match &args.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };

    let plan = args.plan(&file, std::io::stdout().is_terminal())?;
    debug!(
        length = plan.config.length,
        count = plan.count,
        kind = ?plan.kind,
        layout = ?plan.layout,
        "Run planned"
    );

    let mut driver = Driver::from_spec(plan.config, plan.kind, &plan.source)?;
    let passwords = driver.generate_batch(plan.count)?;

    let stdout = std::io::stdout();
    driver::write_passwords(&mut stdout.lock(), &passwords, plan.layout)?;
    Ok(())
}
