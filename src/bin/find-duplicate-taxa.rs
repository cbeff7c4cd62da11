use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use taxdb::ranks::{find_rank_conflicts, write_conflicts};
use taxdb::tracing::{start_taxdb_tracing_subscriber, DEFAULT_FILTER, QUIET_FILTER};
use tracing::info;

/// Check a 3-column TSV (accession, lineage, name) for taxonomic names appearing at multiple distinct levels
#[derive(Parser)]
#[clap(version, about)]
struct Args {
    #[arg(short, long, action)]
    /// Print the conflicts as JSON
    json: bool,

    #[arg(value_name = "TSV_FILE")]
    /// Path to the input TSV file (can be gzipped)
    tsv_file: PathBuf,
}

fn main() -> anyhow::Result<()> {
    // Parse arguments from the command line
    let args = Args::parse();

    // Initialize the tracing subscriber to handle debug, info, warn, and error macro calls
    start_taxdb_tracing_subscriber(if args.json { QUIET_FILTER } else { DEFAULT_FILTER });

    let conflicts = find_rank_conflicts(&args.tsv_file)?;
    info!("{} names appear at multiple ranks", conflicts.len());

    let mut stdout = io::stdout().lock();
    if args.json {
        serde_json::to_writer_pretty(&mut stdout, &conflicts)?;
        writeln!(stdout)?;
    } else {
        write_conflicts(&conflicts, &mut stdout)?;
    }
    stdout.flush()?;
    Ok(())
}
