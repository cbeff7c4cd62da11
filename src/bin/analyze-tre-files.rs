use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use taxdb::identifiers::audit_identifiers;
use taxdb::registry::{resolve_database, DATABASES_ENV};
use taxdb::tracing::{start_taxdb_tracing_subscriber, DEFAULT_FILTER, QUIET_FILTER};
use tracing::info;

/// Prints the identifiers duplicated within the .map, .tre, .names and .fasta files of a database
#[derive(Parser)]
#[clap(version, about)]
struct Args {
    #[arg(short, long, env = DATABASES_ENV, verbatim_doc_comment)]
    /// Directory holding one sub-directory per database.
    /// Used to find the default database when no directory is given.
    databases_dir: Option<PathBuf>,

    #[arg(short, long, action)]
    /// Print the report as JSON
    json: bool,

    #[arg()]
    /// Directory containing .map, .tre, .names, .fasta files
    directory: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    // Parse arguments from the command line
    let args = Args::parse();

    // Initialize the tracing subscriber to handle debug, info, warn, and error macro calls
    start_taxdb_tracing_subscriber(if args.json { QUIET_FILTER } else { DEFAULT_FILTER });

    let database = resolve_database(args.directory.as_deref(), args.databases_dir.as_deref())?;
    info!("auditing {}", database);
    let report = audit_identifiers(&database)?;

    let mut stdout = io::stdout().lock();
    if args.json {
        serde_json::to_writer_pretty(&mut stdout, &report)?;
        writeln!(stdout)?;
    } else {
        report.write_text(&mut stdout)?;
    }
    stdout.flush()?;

    info!("done!");
    Ok(())
}
