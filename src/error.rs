use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaxdbError {
    #[error("could not read {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse fasta record in {path:?}")]
    Fasta {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse newick tree at {path:?}: {message}")]
    Newick { path: PathBuf, message: String },

    #[error("line {line} of {origin} has {found} field(s), expected {expected}")]
    MalformedRecord {
        origin: String,
        line: usize,
        expected: String,
        found: usize,
    },

    #[error("line {line} of {origin}: '{value}' is not an integer")]
    InvalidNumber {
        origin: String,
        line: usize,
        value: String,
    },

    #[error("got a comma in the name '{name}' on line {line} of {origin}")]
    NameContainsComma {
        origin: String,
        line: usize,
        name: String,
    },

    #[error("unknown database '{0}'")]
    UnknownDatabase(String),

    #[error("cannot derive a database name from directory {0:?}")]
    UnnamedDirectory(PathBuf),

    #[error("no database directory was given and no databases directory is configured")]
    MissingDefault,
}

pub type Result<T> = std::result::Result<T, TaxdbError>;
