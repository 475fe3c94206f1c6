//! Organogram CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use organograma::OrganogramaError;
use organograma_cli::{Args, error_adapter::to_reportables};

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();
    init_logger(&args.log_level);

    info!(
        input = args.input,
        format:? = args.format,
        select:? = args.select;
        "Starting organograma"
    );
    debug!(args:?; "Parsed arguments");

    if let Err(err) = organograma_cli::run(&args) {
        report(&err);
        process::exit(1);
    }

    info!("Organogram written");
}

/// Install `env_logger`, falling back to `warn` for an unknown level name.
fn init_logger(level: &str) {
    let log_level = LevelFilter::from_str(level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {level}. Using 'warn' instead.");
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();
}

/// Render every diagnostic of `err` through miette's graphical handler.
fn report(err: &OrganogramaError) {
    let reporter = miette::GraphicalReportHandler::new();

    for reportable in to_reportables(err) {
        let mut writer = String::new();
        if reporter.render_report(&mut writer, &reportable).is_err() {
            writer = reportable.to_string();
        }
        error!("{writer}");
    }
}
