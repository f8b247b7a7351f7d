//! The learned value table and its text format.
//!
//! On disk the table is transposed relative to memory: one line per die face
//! (1..=6, in order), each holding [`BOARDLENGTH`] space-separated values for
//! cells `0..BOARDLENGTH`. A trailing space after the last value is written
//! and tolerated on read. Values are written in Rust's shortest round-trip
//! form, so a save followed by a load reproduces every value bit for bit.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::num::ParseFloatError;
use std::path::Path;

use crate::constants::{BOARDLENGTH, FACES};

#[derive(thiserror::Error, Debug)]
pub enum QTableError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("line {line}, column {column}: {source}")]
    Parse {
        line: usize,
        column: usize,
        source: ParseFloatError,
    },
    #[error("line {line}: expected {expected} values, found {found}", expected = BOARDLENGTH)]
    Shape { line: usize, found: usize },
    #[error("missing row for die face {0}")]
    MissingRow(usize),
    #[error("lookup ({row}, {column}) outside a {rows}x{columns} table", rows = FACES, columns = BOARDLENGTH)]
    OutOfRange { row: usize, column: usize },
}

/// One value per (cell, die face) pair.
#[derive(Clone, Debug, PartialEq)]
pub struct QTable {
    q: [[f64; FACES]; BOARDLENGTH],
}

impl Default for QTable {
    fn default() -> Self {
        Self::new()
    }
}

impl QTable {
    /// All-zero table.
    pub fn new() -> Self {
        Self {
            q: [[0.0; FACES]; BOARDLENGTH],
        }
    }

    /// Value of rolling `face` (1..=6) from `cell`.
    #[inline]
    pub fn get(&self, cell: usize, face: u8) -> f64 {
        self.q[cell][face as usize - 1]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, cell: usize, face: u8) -> &mut f64 {
        &mut self.q[cell][face as usize - 1]
    }

    /// Best value over all faces at `cell`, never below zero.
    pub fn max_action(&self, cell: usize) -> f64 {
        self.q[cell].iter().copied().fold(0.0, f64::max)
    }

    /// Write the table in its persisted text form.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for face in 0..FACES {
            for cell in 0..BOARDLENGTH {
                write!(out, "{} ", self.q[cell][face])?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), QTableError> {
        let mut out = BufWriter::new(File::create(path)?);
        self.write_to(&mut out)?;
        out.flush()?;
        Ok(())
    }

    /// Parse a table from its persisted text form.
    pub fn read_from<R: BufRead>(input: R) -> Result<Self, QTableError> {
        let mut table = Self::new();
        let mut lines = input.lines();
        for face in 0..FACES {
            let line = lines.next().ok_or(QTableError::MissingRow(face + 1))??;
            let row = parse_row(&line, face + 1)?;
            for (cell, v) in row.into_iter().enumerate() {
                table.q[cell][face] = v;
            }
        }
        Ok(table)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, QTableError> {
        Self::read_from(BufReader::new(File::open(path)?))
    }

    /// Read a single value from a table file: `row` is the die face minus
    /// one, `column` is the cell.
    pub fn lookup(path: impl AsRef<Path>, row: usize, column: usize) -> Result<f64, QTableError> {
        if row >= FACES || column >= BOARDLENGTH {
            return Err(QTableError::OutOfRange { row, column });
        }
        let input = BufReader::new(File::open(path)?);
        let line = input
            .lines()
            .nth(row)
            .ok_or(QTableError::MissingRow(row + 1))??;
        Ok(parse_row(&line, row + 1)?[column])
    }

    /// Console dump: one line per face, one decimal place per value.
    pub fn to_pretty_string(&self) -> String {
        (0..FACES)
            .map(|face| {
                let mut line: String = (0..BOARDLENGTH)
                    .map(|cell| format!("{:.1} ", self.q[cell][face]))
                    .collect();
                line.push('\n');
                line
            })
            .collect()
    }
}

fn parse_row(line: &str, line_no: usize) -> Result<Vec<f64>, QTableError> {
    let row = line
        .split_whitespace()
        .enumerate()
        .map(|(column, v)| {
            v.parse::<f64>().map_err(|source| QTableError::Parse {
                line: line_no,
                column,
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    if row.len() != BOARDLENGTH {
        return Err(QTableError::Shape {
            line: line_no,
            found: row.len(),
        });
    }
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> QTable {
        let mut t = QTable::new();
        for cell in 0..BOARDLENGTH {
            for face in 1..=6u8 {
                *t.get_mut(cell, face) = (cell as f64 + 1.0) / (face as f64 * 7.0) - 0.3;
            }
        }
        t
    }

    #[test]
    fn test_text_round_trip() {
        let table = sample();
        let mut buf = Vec::new();
        table.write_to(&mut buf).unwrap();
        let text = String::from_utf8(buf.clone()).unwrap();
        assert_eq!(text.lines().count(), FACES);
        assert!(text.lines().all(|l| l.ends_with(' ')));

        let back = QTable::read_from(buf.as_slice()).unwrap();
        for cell in 0..BOARDLENGTH {
            for face in 1..=6u8 {
                assert_eq!(
                    back.get(cell, face).to_bits(),
                    table.get(cell, face).to_bits()
                );
            }
        }
    }

    #[test]
    fn test_max_action_floor() {
        let mut t = QTable::new();
        *t.get_mut(3, 2) = -1.0;
        assert_eq!(t.max_action(3), 0.0);
        *t.get_mut(3, 5) = 0.25;
        assert_eq!(t.max_action(3), 0.25);
    }

    #[test]
    fn test_read_rejects_short_row() {
        let err = QTable::read_from("1 2 3\n".as_bytes()).unwrap_err();
        assert!(matches!(err, QTableError::Shape { line: 1, found: 3 }));
    }

    #[test]
    fn test_read_rejects_missing_rows() {
        let mut buf = Vec::new();
        sample().write_to(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let truncated: String = text.lines().take(4).map(|l| format!("{l}\n")).collect();
        let err = QTable::read_from(truncated.as_bytes()).unwrap_err();
        assert!(matches!(err, QTableError::MissingRow(5)));
    }

    #[test]
    fn test_read_rejects_garbage() {
        let line = vec!["0"; BOARDLENGTH - 1].join(" ") + " x\n";
        let err = QTable::read_from(line.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            QTableError::Parse {
                line: 1,
                column,
                ..
            } if column == BOARDLENGTH - 1
        ));
    }

    #[test]
    fn test_pretty_string() {
        let s = QTable::new().to_pretty_string();
        assert_eq!(s.lines().count(), FACES);
        assert!(s.starts_with("0.0 0.0 "));

        let mut t = QTable::new();
        *t.get_mut(1, 2) = 0.26;
        let s = t.to_pretty_string();
        let row: Vec<&str> = s.lines().nth(1).unwrap().split_whitespace().collect();
        assert_eq!(row.len(), BOARDLENGTH);
        assert_eq!(row[1], "0.3");
        assert!(s.ends_with(" \n"));
    }
}
