//! In-memory tab-separated tables
//!
//! ClinVar releases are small enough to materialize fully, so every
//! transformation works on a `Table` holding all rows as strings. Column
//! access goes through the header; values keep whatever text the source
//! file carried.

use anyhow::{bail, Result};
use hashbrown::{HashMap, HashSet};

use std::io::{BufRead, Write};
use std::path::Path;

use crate::fns::{gz_writer, reader};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Read a tab-separated table with a header row. Transparently
    /// gunzips `.gz` files. Ragged rows are a hard error.
    pub fn read_tsv<P: AsRef<Path>>(path: P) -> Result<Table> {
        let path = path.as_ref();
        let mut lines = reader(path)?.lines();

        let header_line = match lines.next() {
            Some(line) => line?,
            None => bail!("ERROR: {} is empty", path.display()),
        };
        let header: Vec<String> = header_line.split('\t').map(str::to_owned).collect();

        let mut rows = Vec::new();
        for (i, line) in lines.enumerate() {
            let line = line?;
            if line.is_empty() {
                continue;
            }

            let row: Vec<String> = line.split('\t').map(str::to_owned).collect();
            if row.len() != header.len() {
                bail!(
                    "ERROR: {} line {}: expected {} fields, found {}",
                    path.display(),
                    i + 2,
                    header.len(),
                    row.len()
                );
            }
            rows.push(row);
        }

        Ok(Table { header, rows })
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.header.len())
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|col| col == name)
    }

    /// Columns from `required` that this table does not have, sorted.
    pub fn missing_columns(&self, required: &[&str]) -> Vec<String> {
        let present: HashSet<&str> = self.header.iter().map(String::as_str).collect();
        let mut missing: Vec<String> = required
            .iter()
            .filter(|col| !present.contains(**col))
            .map(|col| col.to_string())
            .collect();
        missing.sort();
        missing
    }

    /// Rewrite every column name through `f`.
    pub fn normalize_header<F: Fn(&str) -> String>(&mut self, f: F) {
        for col in self.header.iter_mut() {
            *col = f(col);
        }
    }

    pub fn rename_column(&mut self, from: &str, to: &str) -> bool {
        match self.column_index(from) {
            Some(idx) => {
                self.header[idx] = to.to_owned();
                true
            }
            None => false,
        }
    }

    /// Keep only rows where `column` equals `value` (exact match).
    pub fn filter_eq(&mut self, column: &str, value: &str) -> Result<()> {
        let idx = match self.column_index(column) {
            Some(idx) => idx,
            None => bail!("ERROR: missing column: {}", column),
        };
        self.rows.retain(|row| row[idx] == value);
        Ok(())
    }

    /// New table holding `columns` in exactly the given order.
    pub fn select(&self, columns: &[&str]) -> Result<Table> {
        let missing = self.missing_columns(columns);
        if !missing.is_empty() {
            bail!("ERROR: missing columns: {}", missing.join(", "));
        }

        let indices: Vec<usize> = columns
            .iter()
            .map(|col| self.column_index(col).unwrap_or_default())
            .collect();

        let rows = self
            .rows
            .iter()
            .map(|row| indices.iter().map(|&idx| row[idx].clone()).collect())
            .collect();

        Ok(Table {
            header: columns.iter().map(|col| col.to_string()).collect(),
            rows,
        })
    }

    /// Drop the named columns; every name must exist.
    pub fn drop_columns(&mut self, columns: &[&str]) -> Result<()> {
        let missing = self.missing_columns(columns);
        if !missing.is_empty() {
            bail!("ERROR: missing columns: {}", missing.join(", "));
        }

        let drop: HashSet<usize> = columns
            .iter()
            .filter_map(|col| self.column_index(col))
            .collect();

        let keep = |i: &usize| !drop.contains(i);
        self.header = std::mem::take(&mut self.header)
            .into_iter()
            .enumerate()
            .filter(|(i, _)| keep(i))
            .map(|(_, col)| col)
            .collect();
        self.rows = std::mem::take(&mut self.rows)
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .enumerate()
                    .filter(|(i, _)| keep(i))
                    .map(|(_, value)| value)
                    .collect()
            })
            .collect();

        Ok(())
    }

    /// Append a column; `values` must line up with the rows.
    pub fn push_column(&mut self, name: &str, values: Vec<String>) -> Result<()> {
        if values.len() != self.rows.len() {
            bail!(
                "ERROR: column {} has {} values for {} rows",
                name,
                values.len(),
                self.rows.len()
            );
        }
        self.header.push(name.to_owned());
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
        Ok(())
    }

    /// Remove exact-duplicate rows, keeping first occurrences.
    pub fn dedup_rows(&mut self) {
        let mut seen: HashSet<Vec<String>> = HashSet::with_capacity(self.rows.len());
        self.rows.retain(|row| seen.insert(row.clone()));
    }

    /// Index row numbers by the values of `column`.
    pub fn index_by(&self, column: &str) -> Result<HashMap<&str, Vec<usize>>> {
        let idx = match self.column_index(column) {
            Some(idx) => idx,
            None => bail!("ERROR: missing column: {}", column),
        };

        let mut index: HashMap<&str, Vec<usize>> = HashMap::new();
        for (i, row) in self.rows.iter().enumerate() {
            index.entry(row[idx].as_str()).or_default().push(i);
        }
        Ok(index)
    }

    /// Write as a gzip-compressed tab-separated file.
    pub fn write_tsv_gz<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = gz_writer(path)?;
        writeln!(writer, "{}", self.header.join("\t"))?;
        for row in &self.rows {
            writeln!(writer, "{}", row.join("\t"))?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile;

    fn sample() -> Table {
        Table {
            header: vec!["a".into(), "b".into(), "c".into()],
            rows: vec![
                vec!["1".into(), "x".into(), "p".into()],
                vec!["2".into(), "y".into(), "q".into()],
                vec!["1".into(), "x".into(), "p".into()],
            ],
        }
    }

    #[test]
    fn test_read_tsv_plain() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "a\tb\n1\t2\n3\t4\n").unwrap();

        let t = Table::read_tsv(file.path()).unwrap();
        assert_eq!(t.shape(), (2, 2));
        assert_eq!(t.rows[1], vec!["3".to_string(), "4".to_string()]);
    }

    #[test]
    fn test_read_tsv_ragged_row_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "a\tb\n1\t2\t3\n").unwrap();

        assert!(Table::read_tsv(file.path()).is_err());
    }

    #[test]
    fn test_gz_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.tsv.gz");

        let t = sample();
        t.write_tsv_gz(&path).unwrap();

        let back = Table::read_tsv(&path).unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn test_missing_columns_sorted() {
        let t = sample();
        assert_eq!(
            t.missing_columns(&["z", "a", "d"]),
            vec!["d".to_string(), "z".to_string()]
        );
        assert!(t.missing_columns(&["a", "b"]).is_empty());
    }

    #[test]
    fn test_select_reorders() {
        let t = sample();
        let s = t.select(&["c", "a"]).unwrap();
        assert_eq!(s.header, vec!["c".to_string(), "a".to_string()]);
        assert_eq!(s.rows[0], vec!["p".to_string(), "1".to_string()]);

        assert!(t.select(&["c", "nope"]).is_err());
    }

    #[test]
    fn test_drop_columns() {
        let mut t = sample();
        t.drop_columns(&["b"]).unwrap();
        assert_eq!(t.header, vec!["a".to_string(), "c".to_string()]);
        assert_eq!(t.rows[0], vec!["1".to_string(), "p".to_string()]);
    }

    #[test]
    fn test_dedup_rows_keeps_first() {
        let mut t = sample();
        t.dedup_rows();
        assert_eq!(t.shape(), (2, 3));
        assert_eq!(t.rows[0][0], "1");
    }

    #[test]
    fn test_index_by_groups_duplicates() {
        let t = sample();
        let index = t.index_by("a").unwrap();
        assert_eq!(index["1"], vec![0, 2]);
        assert_eq!(index["2"], vec![1]);
    }
}
