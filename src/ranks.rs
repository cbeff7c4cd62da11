//! Detection of taxonomic names that occur at more than one rank.
//!
//! Input rows are `accession \t lineage \t name`, where the lineage is a
//! `/`-delimited path from the root to the leaf. The rank of a name is its
//! 1-based position in the normalized lineage.

use crate::error::{Result, TaxdbError};
use crate::io::{for_each_line, open_file, sniff_gzip};
use itertools::Itertools;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{self, BufRead, Read, Write};
use std::path::Path;
use tracing::{debug, info};

/// One row of an accession TSV
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineageRow {
    pub accession: String,
    pub lineage: String,
    pub name: String,
}

impl LineageRow {
    pub fn parse(line: &str, origin: &str, line_number: usize) -> Result<Self> {
        let fields = line.split('\t').collect::<Vec<&str>>();
        match fields.as_slice() {
            [accession, lineage, name] => Ok(LineageRow {
                accession: accession.to_string(),
                lineage: lineage.to_string(),
                name: name.to_string(),
            }),
            _ => Err(TaxdbError::MalformedRecord {
                origin: origin.to_string(),
                line: line_number,
                expected: "exactly 3".to_string(),
                found: fields.len(),
            }),
        }
    }
}

/// Splits a lineage on `/`, gluing all-digit segments back onto the segment
/// before them. The first segment is never glued to anything.
pub fn normalize_lineage(lineage: &str) -> Vec<String> {
    let mut segments: Vec<String> = Vec::new();
    for (index, segment) in lineage.split('/').enumerate() {
        let is_number = !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit());
        match segments.last_mut() {
            Some(previous) if is_number && index > 0 => {
                previous.push('/');
                previous.push_str(segment);
            }
            _ => segments.push(segment.to_string()),
        }
    }
    segments
}

/// Name → rank → first accession seen at that rank.
/// The ranks a name was observed at are the keys of its inner map.
#[derive(Debug, Default, Clone)]
pub struct TaxonRankIndex {
    taxa: BTreeMap<String, BTreeMap<usize, String>>,
}

impl TaxonRankIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, accession: &str, lineage: &str) {
        for (position, name) in normalize_lineage(lineage).into_iter().enumerate() {
            self.taxa
                .entry(name)
                .or_default()
                .entry(position + 1)
                .or_insert_with(|| accession.to_string());
        }
    }

    pub fn record_row(&mut self, row: &LineageRow) {
        self.record(&row.accession, &row.lineage)
    }

    /// Number of distinct names seen
    pub fn len(&self) -> usize {
        self.taxa.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taxa.is_empty()
    }

    /// Ranks `name` was seen at, ascending
    pub fn ranks_of(&self, name: &str) -> Vec<usize> {
        self.taxa
            .get(name)
            .map(|ranks| ranks.keys().copied().collect())
            .unwrap_or_default()
    }

    pub fn example_accession(&self, name: &str, rank: usize) -> Option<&str> {
        self.taxa.get(name)?.get(&rank).map(String::as_str)
    }

    /// Every name seen at more than one rank, sorted by name
    pub fn conflicts(&self) -> Vec<RankConflict> {
        self.taxa
            .iter()
            .filter(|(_, ranks)| ranks.len() > 1)
            .map(|(name, ranks)| RankConflict {
                name: name.clone(),
                ranks: ranks.keys().copied().collect(),
                examples: ranks
                    .iter()
                    .map(|(rank, accession)| RankExample {
                        rank: *rank,
                        accession: accession.clone(),
                    })
                    .collect(),
            })
            .collect()
    }

    /// Reads TSV rows from `reader`, failing on the first malformed row
    pub fn scan<R: BufRead>(&mut self, reader: R, origin: &str) -> Result<usize> {
        let mut rows = 0;
        for_each_line(reader, origin, |line_number, line| {
            self.record_row(&LineageRow::parse(line, origin, line_number)?);
            rows += 1;
            Ok(())
        })?;
        Ok(rows)
    }
}

impl<'a> Extend<&'a LineageRow> for TaxonRankIndex {
    fn extend<T: IntoIterator<Item = &'a LineageRow>>(&mut self, rows: T) {
        rows.into_iter().for_each(|row| self.record_row(row));
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankExample {
    pub rank: usize,
    pub accession: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankConflict {
    pub name: String,
    pub ranks: Vec<usize>,
    pub examples: Vec<RankExample>,
}

pub fn write_conflicts<W: Write>(conflicts: &[RankConflict], mut out: W) -> io::Result<()> {
    writeln!(out, "\nNames appearing at multiple ranks:")?;
    writeln!(out, "--------------------------------")?;
    for conflict in conflicts {
        writeln!(
            out,
            "\n{}: appears at ranks [{}]",
            conflict.name,
            conflict.ranks.iter().join(", ")
        )?;
        writeln!(out, "Example accessions:")?;
        for example in &conflict.examples {
            writeln!(out, "  - {} (rank {})", example.accession, example.rank)?;
        }
    }
    Ok(())
}

/// Builds the rank index of a possibly gzip compressed byte stream
pub fn index_reader<R: Read>(reader: R, origin: &str) -> Result<TaxonRankIndex> {
    let reader = sniff_gzip(reader).map_err(|source| TaxdbError::Io {
        path: origin.into(),
        source,
    })?;
    let mut index = TaxonRankIndex::new();
    let rows = index.scan(reader, origin)?;
    debug!("scanned {} rows from {}", rows, origin);
    Ok(index)
}

/// Lists the rank conflicts of a TSV file, gzip compressed or not
pub fn find_rank_conflicts(tsv_path: &Path) -> Result<Vec<RankConflict>> {
    info!("reading accession tsv at {:?}", tsv_path);
    let index = index_reader(open_file(tsv_path)?, &tsv_path.display().to_string())?;
    info!("tsv read covering {} distinct names", index.len());
    Ok(index.conflicts())
}
