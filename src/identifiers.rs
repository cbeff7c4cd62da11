//! Cross-file identifier audit of one database directory.
//!
//! The `.map`, `.tre`, `.names` and `.fasta` files of a database are each
//! reduced to a sequence of identifiers and every value occurring more than
//! once within one sequence is reported.

use crate::duplicates::duplicates;
use crate::error::{Result, TaxdbError};
use crate::io::{open_file, read_comma_column, read_comma_pairs};
use crate::registry::Database;
use crate::tree::{display_node_name, NewickTree, NodeNames};
use bio::io::fasta;
use itertools::Itertools;
use serde::Serialize;
use std::collections::BTreeSet;
use std::io::{self, BufReader, Write};
use std::path::Path;
use tracing::{debug, info};

/// The identifier sequences extracted from one database
#[derive(Debug, Default, Clone)]
pub struct IdentifierCorpora {
    pub map_ids: Vec<String>,
    pub map_names: Vec<String>,
    pub tree_ids: Vec<Option<String>>,
    pub names_ids: Vec<String>,
    pub fasta_ids: Vec<String>,
    pub empty_node_names: usize,
}

impl IdentifierCorpora {
    pub fn load(database: &Database) -> Result<Self> {
        let map_path = database.map_path();
        info!("reading map at {:?}", map_path);
        let (map_ids, map_names) = read_comma_pairs(
            BufReader::new(open_file(&map_path)?),
            &map_path.display().to_string(),
        )?;

        let tre_path = database.tre_path();
        info!("reading tree at {:?}", tre_path);
        let tree = NewickTree::from_file(&tre_path)?;
        let tree_ids = tree.node_names();
        let empty_node_names = tree.count_unnamed();

        let names_path = database.names_path();
        info!("reading names at {:?}", names_path);
        let names_ids = read_comma_column(
            BufReader::new(open_file(&names_path)?),
            &names_path.display().to_string(),
            0,
        )?;

        let fasta_path = database.fasta_path();
        info!("reading fasta at {:?}", fasta_path);
        let fasta_ids = read_fasta_ids(&fasta_path)?;

        debug!(
            "{} map lines, {} tree nodes, {} names lines, {} fasta records",
            map_ids.len(),
            tree_ids.len(),
            names_ids.len(),
            fasta_ids.len()
        );

        Ok(IdentifierCorpora {
            map_ids,
            map_names,
            tree_ids,
            names_ids,
            fasta_ids,
            empty_node_names,
        })
    }
}

pub fn read_fasta_ids(path: &Path) -> Result<Vec<String>> {
    let reader = fasta::Reader::new(open_file(path)?);
    reader
        .records()
        .map(|record| {
            record
                .map(|record| record.id().to_string())
                .map_err(|source| TaxdbError::Fasta {
                    path: path.to_path_buf(),
                    source,
                })
        })
        .collect()
}

/// Duplicate sets of every identifier sequence of a database
#[derive(Debug, Clone, Serialize)]
pub struct IdentifierReport {
    pub database: Database,
    pub empty_node_names: usize,
    /// Map IDs are expected unique by construction and are left out of reports
    #[serde(skip)]
    pub dup_map_ids: BTreeSet<String>,
    pub dup_map_names: BTreeSet<String>,
    /// `None` stands for unnamed nodes and stays distinct from any real label
    pub dup_tre_ids: BTreeSet<Option<String>>,
    pub dup_names_ids: BTreeSet<String>,
    pub dup_fasta_ids: BTreeSet<String>,
}

impl IdentifierReport {
    pub fn from_corpora(database: Database, corpora: IdentifierCorpora) -> Self {
        IdentifierReport {
            database,
            empty_node_names: corpora.empty_node_names,
            dup_map_ids: duplicates(corpora.map_ids),
            dup_map_names: duplicates(corpora.map_names),
            dup_tre_ids: duplicates(corpora.tree_ids),
            dup_names_ids: duplicates(corpora.names_ids),
            dup_fasta_ids: duplicates(corpora.fasta_ids),
        }
    }

    pub fn write_text<W: Write>(&self, mut out: W) -> io::Result<()> {
        writeln!(out, "{}", self.database)?;
        writeln!(out, "empty node names: {}", self.empty_node_names)?;
        write_set(&mut out, "dup_map_names", &self.dup_map_names)?;
        writeln!(
            out,
            "{:<13} : {{{}}} {}",
            "dup_tre_ids",
            self.dup_tre_ids.iter().map(display_node_name).join(", "),
            self.dup_tre_ids.len()
        )?;
        write_set(&mut out, "dup_names_ids", &self.dup_names_ids)?;
        write_set(&mut out, "dup_fasta_ids", &self.dup_fasta_ids)
    }
}

fn write_set<W: Write>(out: &mut W, label: &str, set: &BTreeSet<String>) -> io::Result<()> {
    writeln!(out, "{:<13} : {{{}}} {}", label, set.iter().join(", "), set.len())
}

/// Loads every identifier sequence of `database` and finds their duplicates
pub fn audit_identifiers(database: &Database) -> Result<IdentifierReport> {
    let corpora = IdentifierCorpora::load(database)?;
    info!("files read! looking for duplicates...");
    Ok(IdentifierReport::from_corpora(database.clone(), corpora))
}
