use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use taxdb::convert::convert_database;
use taxdb::registry::{Database, DATABASES_ENV, ORIGINALS_ENV};
use taxdb::tracing::{start_taxdb_tracing_subscriber, DEFAULT_FILTER};
use tracing::info;

/// Converts an old-format CREST database to the .tre/.map/.names/.fasta layout
#[derive(Parser)]
#[clap(version, about)]
struct Args {
    #[arg(short, long, env = ORIGINALS_ENV)]
    /// Directory holding the old-format databases
    originals_dir: PathBuf,

    #[arg(short, long, env = DATABASES_ENV)]
    /// Directory where the converted database is written
    databases_dir: PathBuf,

    #[arg()]
    /// Short name of the database, e.g. silvamod138
    database: String,
}

fn main() -> anyhow::Result<()> {
    // Initialize the tracing subscriber to handle debug, info, warn, and error macro calls
    start_taxdb_tracing_subscriber(DEFAULT_FILTER);

    // Parse arguments from the command line
    let args = Args::parse();
    let old = Database::from_registry(&args.database, &args.originals_dir)?;
    let new = Database::from_registry(&args.database, &args.databases_dir)?;

    info!("converting {} into {}", old, new);
    let summary = convert_database(&old, &new)
        .with_context(|| format!("could not convert database '{}'", args.database))?;

    info!(
        "wrote {} map entries, {} names entries and {} sequences ({} duplicates removed)",
        summary.map_entries,
        summary.names_entries,
        summary.fasta.written,
        summary.fasta.duplicates_removed
    );
    info!("done!");
    Ok(())
}
