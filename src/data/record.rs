//! Comma-separated record loading with lenient numeric coercion.

use crate::{Error, Result};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// A single field of a record.
///
/// Tokens that parse as a float become `Number`; anything else keeps its
/// original text so that the failure surfaces only when a numeric value is
/// actually required.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Number(f64),
    Text(String),
}

impl Field {
    /// Coerce a raw token, falling back to text.
    pub fn parse(token: &str) -> Self {
        match token.trim().parse::<f64>() {
            Ok(value) => Field::Number(value),
            Err(_) => Field::Text(token.to_string()),
        }
    }

    /// The numeric value, if this field holds one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Field::Number(value) => Some(*value),
            Field::Text(_) => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Number(value) => write!(f, "{}", value),
            Field::Text(text) => write!(f, "{:?}", text),
        }
    }
}

/// One non-comment line of a MOTChallenge text file.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    line: usize,
    fields: Vec<Field>,
}

impl Record {
    /// Create a record from already coerced fields.
    ///
    /// # Arguments
    /// * `line` - 1-based source line number, used in error messages
    /// * `fields` - Ordered fields of the row
    pub fn new(line: usize, fields: Vec<Field>) -> Self {
        Self { line, fields }
    }

    /// Parse a raw text line.
    ///
    /// Returns `None` for blank lines and for lines whose first field starts
    /// with `#`.
    pub fn parse_line(line: usize, text: &str) -> Option<Self> {
        if text.trim().is_empty() {
            return None;
        }
        let tokens: Vec<&str> = text.split(',').collect();
        if tokens[0].starts_with('#') {
            return None;
        }
        Some(Self::new(line, tokens.into_iter().map(Field::parse).collect()))
    }

    /// 1-based line number in the source.
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, column: usize) -> Option<&Field> {
        self.fields.get(column)
    }

    /// Require a numeric field.
    pub fn number(&self, column: usize) -> Result<f64> {
        match self.fields.get(column) {
            Some(Field::Number(value)) => Ok(*value),
            Some(Field::Text(text)) => Err(self.parse_error(
                column,
                format!("expected a number, found {:?}", text),
            )),
            None => Err(self.parse_error(
                column,
                format!("missing field (row has {} fields)", self.fields.len()),
            )),
        }
    }

    /// Require an integer field.
    ///
    /// Finite numbers are truncated toward zero, so `3.0` and `3.7` both give `3`.
    pub fn integer(&self, column: usize) -> Result<i64> {
        let value = self.number(column)?;
        if !value.is_finite() {
            return Err(self.parse_error(
                column,
                format!("expected an integer, found {}", value),
            ));
        }
        Ok(value.trunc() as i64)
    }

    fn parse_error(&self, column: usize, reason: String) -> Error {
        Error::Parse {
            line: self.line,
            column,
            reason,
        }
    }
}

/// Read all records from a text source.
///
/// Blank lines and `#` comment lines are dropped; every remaining field is
/// coerced with [`Field::parse`].
pub fn load_records<R: BufRead>(reader: R) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    for (idx, line_result) in reader.lines().enumerate() {
        let line = line_result.map_err(Error::IoError)?;
        if let Some(record) = Record::parse_line(idx + 1, &line) {
            records.push(record);
        }
    }
    Ok(records)
}

/// Read all records from a file.
pub fn load_records_from_path<P: AsRef<Path>>(file_path: P) -> Result<Vec<Record>> {
    let path = file_path.as_ref();
    let file = File::open(path).map_err(|e| {
        Error::IoError(std::io::Error::new(
            e.kind(),
            format!("failed to open '{}': {}", path.display(), e),
        ))
    })?;

    let records = load_records(BufReader::new(file))?;
    log::debug!("loaded {} records from {}", records.len(), path.display());
    Ok(records)
}
