use clap::Parser;
use std::path::PathBuf;
use taxdb::registry::{Database, DATABASES_ENV, DEFAULT_DATABASE, KNOWN_DATABASES};

/// Prints the known databases and, given a databases directory, whether each is present
#[derive(Parser)]
#[clap(version, about)]
struct Args {
    #[arg(short, long, env = DATABASES_ENV)]
    /// Directory holding one sub-directory per database
    databases_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    // Parse arguments from the command line
    let args = Args::parse();

    for spec in KNOWN_DATABASES {
        let marker = if spec.short_name == DEFAULT_DATABASE { "*" } else { " " };
        match &args.databases_dir {
            None => println!("{} {:<16}{}", marker, spec.short_name, spec.description),
            Some(base_dir) => {
                let database = Database::from_registry(spec.short_name, base_dir)?;
                let status = if database.is_complete() { "present" } else { "missing" };
                println!(
                    "{} {:<16}{:<9}{}",
                    marker,
                    spec.short_name,
                    status,
                    database.dir().display()
                );
            }
        }
    }
    Ok(())
}
