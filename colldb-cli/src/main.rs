//! `colldb`: list and merge collection database files.

mod cli;
mod listing;

use std::io::{IsTerminal, Write};

use clap::Parser;
use colldb_core::CollectionDb;
use eyre::WrapErr;
use tracing_subscriber::EnvFilter;

use cli::{Args, Config};

fn init_tracing(args: &Args) -> eyre::Result<()> {
    // --quiet: nothing. --verbose: RUST_LOG, else debug. Default: warnings only.
    let filter = if args.quiet {
        EnvFilter::new("off")
    } else if args.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::new("warn")
    };

    // colldb-core logs through the `log` facade.
    tracing_log::LogTracer::init().wrap_err("failed to bridge log records")?;

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .wrap_err("failed to install tracing subscriber")
}

fn load(path: &std::path::Path) -> eyre::Result<CollectionDb> {
    let db = CollectionDb::open(path)
        .wrap_err_with(|| format!("failed to load {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        version = db.format_version,
        collections = db.collection_count(),
        fingerprints = db.fingerprint_total(),
        "loaded collection file"
    );
    Ok(db)
}

fn run(config: &Config) -> eyre::Result<()> {
    let primary = load(&config.input)?;

    if config.list {
        let mut stdout = std::io::stdout().lock();
        listing::render(&primary, config.format, &mut stdout)
            .and_then(|()| stdout.flush())
            .wrap_err("failed to write listing")?;
    }

    if let Some(merge_path) = &config.merge {
        let secondary = load(merge_path)?;
        let merged = CollectionDb::merge(&primary, &secondary);
        merged
            .save(&config.output)
            .wrap_err_with(|| format!("failed to write {}", config.output.display()))?;
        tracing::info!(
            output = %config.output.display(),
            collections = merged.collection_count(),
            "wrote merged collection file"
        );
    }

    if !config.list && config.merge.is_none() {
        tracing::warn!("nothing to do: pass --list and/or --merge");
    }

    Ok(())
}

fn main() {
    let args = Args::parse();

    if let Err(e) = init_tracing(&args) {
        eprintln!("warning: {e:#}");
    }

    let config = Config::from(args);
    if let Err(e) = run(&config) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
