use crate::error::{Result, TaxdbError};
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Cursor, Read};
use std::path::Path;
use tracing::debug;

/// First two bytes of every gzip member
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

pub fn open_file(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| TaxdbError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn create_output_file(path: &Path) -> Result<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| TaxdbError::Write {
            path: path.to_path_buf(),
            source,
        })
}

/// Wraps `reader` in a gzip decoder if it starts with the gzip magic number.
/// The sniffed bytes are handed back to whichever reader is returned.
pub fn sniff_gzip<'a, R: Read + 'a>(mut reader: R) -> io::Result<Box<dyn BufRead + 'a>> {
    let mut magic = Vec::with_capacity(GZIP_MAGIC.len());
    reader
        .by_ref()
        .take(GZIP_MAGIC.len() as u64)
        .read_to_end(&mut magic)?;
    let is_gzip = magic.starts_with(&GZIP_MAGIC);
    let restored = Cursor::new(magic).chain(reader);
    if is_gzip {
        debug!("gzip magic number found, decompressing");
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(restored))))
    } else {
        Ok(Box::new(BufReader::new(restored)))
    }
}

/// Calls `on_line` with the 1-based line number and content of every line
pub fn for_each_line<R, F>(reader: R, origin: &str, mut on_line: F) -> Result<()>
where
    R: BufRead,
    F: FnMut(usize, &str) -> Result<()>,
{
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| TaxdbError::Io {
            path: origin.into(),
            source,
        })?;
        on_line(index + 1, &line)?;
    }
    Ok(())
}

/// Returns the trimmed `column`-th (0-based) field of `line` split on `delimiter`
pub fn field(line: &str, delimiter: char, column: usize, origin: &str, line_number: usize) -> Result<String> {
    match line.split(delimiter).nth(column) {
        Some(value) => Ok(value.trim().to_string()),
        None => Err(TaxdbError::MalformedRecord {
            origin: origin.to_string(),
            line: line_number,
            expected: format!("at least {}", column + 1),
            found: line.split(delimiter).count(),
        }),
    }
}

/// Reads one comma-separated column of every line in `reader`
pub fn read_comma_column<R: BufRead>(reader: R, origin: &str, column: usize) -> Result<Vec<String>> {
    let mut values = Vec::new();
    for_each_line(reader, origin, |line_number, line| {
        values.push(field(line, ',', column, origin, line_number)?);
        Ok(())
    })?;
    Ok(values)
}

/// Reads the first two comma-separated columns of every line in `reader`
pub fn read_comma_pairs<R: BufRead>(reader: R, origin: &str) -> Result<(Vec<String>, Vec<String>)> {
    let (mut firsts, mut seconds) = (Vec::new(), Vec::new());
    for_each_line(reader, origin, |line_number, line| {
        let mut fields = line.split(',');
        match (fields.next(), fields.next()) {
            (Some(first), Some(second)) => {
                firsts.push(first.trim().to_string());
                seconds.push(second.trim().to_string());
                Ok(())
            }
            _ => Err(TaxdbError::MalformedRecord {
                origin: origin.to_string(),
                line: line_number,
                expected: "at least 2".to_string(),
                found: line.split(',').count(),
            }),
        }
    })?;
    Ok((firsts, seconds))
}
