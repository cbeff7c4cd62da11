use crate::error::{Result, TaxdbError};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Environment variable holding the directory of formatted databases
pub const DATABASES_ENV: &str = "TAXDB_DATABASES";

/// Environment variable holding the directory of old-format databases
pub const ORIGINALS_ENV: &str = "TAXDB_ORIGINALS";

/// Database audited when no directory is given
pub const DEFAULT_DATABASE: &str = "silvamod138pr2";

#[derive(Debug, Clone, Copy, Serialize)]
pub struct DatabaseSpec {
    pub short_name: &'static str,
    pub description: &'static str,
}

pub const KNOWN_DATABASES: &[DatabaseSpec] = &[
    DatabaseSpec {
        short_name: "silvamod128",
        description: "SILVA 128 with manual curation (original CREST database)",
    },
    DatabaseSpec {
        short_name: "silvamod138",
        description: "SILVA 138 with manual curation",
    },
    DatabaseSpec {
        short_name: "silvamod138pr2",
        description: "SILVA 138 merged with PR2 for protists",
    },
    DatabaseSpec {
        short_name: "greengenes",
        description: "Greengenes 16S (original CREST database)",
    },
    DatabaseSpec {
        short_name: "pr2",
        description: "Protist Ribosomal Reference database",
    },
    DatabaseSpec {
        short_name: "bold",
        description: "Barcode of Life COI sequences",
    },
    DatabaseSpec {
        short_name: "midori248",
        description: "MIDORI2 release 248 mitochondrial sequences",
    },
];

pub fn lookup(short_name: &str) -> Result<&'static DatabaseSpec> {
    KNOWN_DATABASES
        .iter()
        .find(|spec| spec.short_name == short_name)
        .ok_or_else(|| TaxdbError::UnknownDatabase(short_name.to_string()))
}

/// A database directory named `X` holding `X.map`, `X.tre`, `X.names` and `X.fasta`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Database {
    name: String,
    dir: PathBuf,
}

impl Database {
    /// Uses the last component of `dir` as the database name
    pub fn at<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        let name = match dir.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => dir
                .canonicalize()
                .ok()
                .and_then(|absolute| absolute.file_name().map(|n| n.to_string_lossy().into_owned()))
                .ok_or_else(|| TaxdbError::UnnamedDirectory(dir.clone()))?,
        };
        Ok(Database { name, dir })
    }

    /// The registered database `short_name` inside `base_dir`
    pub fn from_registry(short_name: &str, base_dir: &Path) -> Result<Self> {
        let spec = lookup(short_name)?;
        Ok(Database {
            name: spec.short_name.to_string(),
            dir: base_dir.join(spec.short_name),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file(&self, extension: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", self.name, extension))
    }

    pub fn map_path(&self) -> PathBuf {
        self.file("map")
    }

    pub fn tre_path(&self) -> PathBuf {
        self.file("tre")
    }

    pub fn names_path(&self) -> PathBuf {
        self.file("names")
    }

    pub fn fasta_path(&self) -> PathBuf {
        self.file("fasta")
    }

    /// True when all four database files exist
    pub fn is_complete(&self) -> bool {
        [
            self.map_path(),
            self.tre_path(),
            self.names_path(),
            self.fasta_path(),
        ]
        .iter()
        .all(|path| path.is_file())
    }
}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<database '{}' at '{}'>", self.name, self.dir.display())
    }
}

/// Picks the database to audit: an explicit directory wins, otherwise the
/// default database inside the configured databases directory.
pub fn resolve_database(directory: Option<&Path>, databases_dir: Option<&Path>) -> Result<Database> {
    match (directory, databases_dir) {
        (Some(directory), _) => Database::at(directory),
        (None, Some(base_dir)) => Database::from_registry(DEFAULT_DATABASE, base_dir),
        (None, None) => Err(TaxdbError::MissingDefault),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_are_named_after_directory() {
        let database = Database::at("/data/databases/bold/").unwrap();
        assert_eq!(database.name(), "bold");
        assert_eq!(database.map_path(), Path::new("/data/databases/bold/bold.map"));
        assert_eq!(database.tre_path(), Path::new("/data/databases/bold/bold.tre"));
        assert_eq!(database.names_path(), Path::new("/data/databases/bold/bold.names"));
        assert_eq!(database.fasta_path(), Path::new("/data/databases/bold/bold.fasta"));
    }

    #[test]
    fn registry_builds_descriptors_on_demand() {
        let database = Database::from_registry("midori248", Path::new("/db")).unwrap();
        assert_eq!(database.dir(), Path::new("/db/midori248"));
        assert_eq!(database, Database::at("/db/midori248").unwrap());
        assert!(matches!(
            Database::from_registry("nope", Path::new("/db")),
            Err(TaxdbError::UnknownDatabase(_))
        ));
    }

    #[test]
    fn default_needs_a_base_directory() {
        assert!(matches!(resolve_database(None, None), Err(TaxdbError::MissingDefault)));
        let database = resolve_database(None, Some(Path::new("/db"))).unwrap();
        assert_eq!(database.name(), DEFAULT_DATABASE);
        let explicit = resolve_database(Some(Path::new("/x/pr2")), Some(Path::new("/db"))).unwrap();
        assert_eq!(explicit.name(), "pr2");
    }
}
