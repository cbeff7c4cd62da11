//! Conversion of old-format CREST databases to the current layout.
//!
//! The old `.map` file is tab separated with four columns:
//! `num  name  minus  frac`. Rows with `frac == -1` describe map entries and
//! the rows before the first of them describe names.

use crate::error::{Result, TaxdbError};
use crate::io::{create_output_file, for_each_line, open_file};
use crate::registry::Database;
use bio::io::fasta;
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::io::{BufReader, Write};
use std::path::Path;
use tracing::{info, warn};

/// Marks an old map row as a map entry rather than a names entry
const MAP_FRACTION: &str = "-1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OldMapRow {
    pub num: u64,
    pub raw_num: String,
    pub name: String,
    pub minus: String,
    pub frac: String,
}

impl OldMapRow {
    pub fn parse(line: &str, origin: &str, line_number: usize) -> Result<Self> {
        let fields = line.trim().split('\t').collect::<Vec<&str>>();
        let [raw_num, name, minus, frac] = fields.as_slice() else {
            return Err(TaxdbError::MalformedRecord {
                origin: origin.to_string(),
                line: line_number,
                expected: "exactly 4".to_string(),
                found: fields.len(),
            });
        };
        let num = raw_num.parse::<u64>().map_err(|_| TaxdbError::InvalidNumber {
            origin: origin.to_string(),
            line: line_number,
            value: raw_num.to_string(),
        })?;
        Ok(OldMapRow {
            num,
            raw_num: raw_num.to_string(),
            name: name.to_string(),
            minus: minus.to_string(),
            frac: frac.to_string(),
        })
    }

    fn is_map_entry(&self) -> bool {
        self.frac == MAP_FRACTION
    }
}

fn write_lines(path: &Path, lines: impl IntoIterator<Item = String>) -> Result<usize> {
    let write_error = |source: std::io::Error| TaxdbError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut output = create_output_file(path)?;
    let mut count = 0;
    for line in lines {
        output.write_all(line.as_bytes()).map_err(write_error)?;
        output.write_all(b"\n").map_err(write_error)?;
        count += 1;
    }
    output.flush().map_err(write_error)?;
    Ok(count)
}

/// Writes `num,name` for every map entry of the old map, sorted by number.
/// A comma inside a name would corrupt the output and is rejected.
pub fn convert_map(old_map: &Path, new_map: &Path) -> Result<usize> {
    let origin = old_map.display().to_string();
    let mut rows = Vec::new();
    for_each_line(BufReader::new(open_file(old_map)?), &origin, |line_number, line| {
        let row = OldMapRow::parse(line, &origin, line_number)?;
        if row.name.contains(',') {
            return Err(TaxdbError::NameContainsComma {
                origin: origin.clone(),
                line: line_number,
                name: row.name,
            });
        }
        if row.is_map_entry() {
            rows.push(row);
        }
        Ok(())
    })?;
    rows.sort_by_key(|row| row.num);
    write_lines(
        new_map,
        rows.into_iter().map(|row| format!("{},{}", row.raw_num, row.name)),
    )
}

/// Writes `num,name,frac` for every row before the first map entry, sorted by number
pub fn convert_names(old_map: &Path, new_names: &Path) -> Result<usize> {
    let origin = old_map.display().to_string();
    let mut rows = Vec::new();
    let mut reached_map = false;
    for_each_line(BufReader::new(open_file(old_map)?), &origin, |line_number, line| {
        if reached_map {
            return Ok(());
        }
        let row = OldMapRow::parse(line, &origin, line_number)?;
        if row.is_map_entry() {
            reached_map = true;
        } else {
            rows.push(row);
        }
        Ok(())
    })?;
    rows.sort_by_key(|row| row.num);
    write_lines(
        new_names,
        rows.into_iter()
            .map(|row| format!("{},{},{}", row.raw_num, row.name, row.frac)),
    )
}

/// Replaces RNA uracil with DNA thymine, keeping case
pub fn back_transcribe(sequence: &[u8]) -> Vec<u8> {
    sequence
        .iter()
        .map(|base| match base {
            b'U' => b'T',
            b'u' => b't',
            other => *other,
        })
        .collect()
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct FastaConversion {
    pub written: usize,
    pub duplicates_removed: usize,
}

/// Copies a fasta file dropping records whose id was already written and
/// back transcribing every sequence
pub fn convert_fasta(old_fasta: &Path, new_fasta: &Path) -> Result<FastaConversion> {
    let write_error = |source: std::io::Error| TaxdbError::Write {
        path: new_fasta.to_path_buf(),
        source,
    };
    let reader = fasta::Reader::new(open_file(old_fasta)?);
    let mut writer = fasta::Writer::new(create_output_file(new_fasta)?);
    let mut seen = HashSet::new();
    let mut conversion = FastaConversion::default();
    for record in reader.records() {
        let record = record.map_err(|source| TaxdbError::Fasta {
            path: old_fasta.to_path_buf(),
            source,
        })?;
        if !seen.insert(record.id().to_string()) {
            conversion.duplicates_removed += 1;
            continue;
        }
        writer
            .write(record.id(), record.desc(), &back_transcribe(record.seq()))
            .map_err(write_error)?;
        conversion.written += 1;
    }
    writer.flush().map_err(write_error)?;
    if conversion.duplicates_removed > 0 {
        warn!(
            "removed {} duplicate records from {:?}",
            conversion.duplicates_removed, old_fasta
        );
    }
    Ok(conversion)
}

#[derive(Debug, Clone, Serialize)]
pub struct ConversionSummary {
    pub map_entries: usize,
    pub names_entries: usize,
    pub fasta: FastaConversion,
}

/// Converts the old database `old` into the new layout at `new`
pub fn convert_database(old: &Database, new: &Database) -> Result<ConversionSummary> {
    fs::create_dir_all(new.dir()).map_err(|source| TaxdbError::Write {
        path: new.dir().to_path_buf(),
        source,
    })?;

    info!("copying tree {:?} to {:?}", old.tre_path(), new.tre_path());
    fs::copy(old.tre_path(), new.tre_path()).map_err(|source| TaxdbError::Io {
        path: old.tre_path(),
        source,
    })?;

    info!("converting map...");
    let map_entries = convert_map(&old.map_path(), &new.map_path())?;
    info!("converting names...");
    let names_entries = convert_names(&old.map_path(), &new.names_path())?;
    info!("converting fasta...");
    let fasta = convert_fasta(&old.fasta_path(), &new.fasta_path())?;

    Ok(ConversionSummary {
        map_entries,
        names_entries,
        fasta,
    })
}
