//! Delimited-text reading for the example algorithms

use crate::configuration::{FileFormat, FileInputSetting};
use std::fs::File;
use std::io::{self, BufRead, BufReader};

/// Column names plus data rows of one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Records {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Read the whole file with its format. Files without a header get
/// `column1`, `column2`, ... sized by the first record. Short rows are
/// padded with the null value; rows wider than the header are an error.
pub(crate) fn read_records(file: &FileInputSetting) -> io::Result<Records> {
    let format = &file.format;
    let mut input = BufReader::new(File::open(&file.path)?);
    let mut skipped = String::new();
    for _ in 0..format.skip_lines {
        skipped.clear();
        if input.read_line(&mut skipped)? == 0 {
            break;
        }
    }

    let mut reader = reader_builder(format)?.from_reader(input);
    let mut columns: Vec<String> = if format.header {
        reader.headers()?.iter().map(str::to_string).collect()
    } else {
        Vec::new()
    };

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if !format.header && columns.is_empty() {
            columns = (1..=record.len()).map(|i| format!("column{}", i)).collect();
        }
        if record.len() > columns.len() {
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "{} line {}: {} fields but {} columns",
                    file.path.display(),
                    line,
                    record.len(),
                    columns.len()
                ),
            ));
        }

        let mut row: Vec<String> = record.iter().map(str::to_string).collect();
        row.resize(columns.len(), format.null_value.clone());
        rows.push(row);
    }

    Ok(Records { columns, rows })
}

fn reader_builder(format: &FileFormat) -> io::Result<csv::ReaderBuilder> {
    format
        .validate()
        .map_err(|reason| io::Error::new(io::ErrorKind::InvalidInput, reason))?;

    // validated as ASCII above
    let mut builder = csv::ReaderBuilder::new();
    builder
        .delimiter(format.separator as u8)
        .quote(format.quote_char as u8)
        .escape(format.escape_char.map(|c| c as u8))
        .has_headers(format.header)
        .flexible(true)
        .trim(if format.trim_whitespace {
            csv::Trim::All
        } else {
            csv::Trim::None
        });
    Ok(builder)
}
