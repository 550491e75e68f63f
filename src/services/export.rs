//! Dashboard table export.

use crate::domain::constants::MSG_NO_TABLE;
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct Table {
    pub rows: Vec<Vec<String>>,
    /// First row holds column titles and stays on top when sorting.
    #[serde(default = "default_header")]
    pub header: bool,
}

fn default_header() -> bool {
    true
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum TableError {
    #[error("{}", MSG_NO_TABLE)]
    Empty,
    #[error("row {row} has no column {column}")]
    MissingColumn { row: usize, column: usize },
}

fn csv_cell(text: &str) -> String {
    format!("\"{}\"", text.trim().replace('"', "\"\""))
}

/// Every cell quoted, inner quotes doubled, rows joined with `\n`.
pub fn to_csv(rows: &[Vec<String>]) -> String {
    rows.iter()
        .map(|r| r.iter().map(|c| csv_cell(c)).collect::<Vec<_>>().join(","))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn export_file_name(date: NaiveDate) -> String {
    format!("solicitacoes_{}.csv", date.format("%Y-%m-%d"))
}

fn sort_key(text: &str) -> (String, String) {
    (text.to_lowercase(), text.to_string())
}

/// Sorts body rows by the text of `column`, case-insensitively.
pub fn sort_rows(table: &mut Table, column: usize) -> Result<(), TableError> {
    let skip = usize::from(table.header && !table.rows.is_empty());
    if let Some((i, _)) = table
        .rows
        .iter()
        .enumerate()
        .skip(skip)
        .find(|(_, r)| r.len() <= column)
    {
        return Err(TableError::MissingColumn { row: i, column });
    }
    table.rows[skip..].sort_by_key(|r| sort_key(&r[column]));
    Ok(())
}

pub fn write_export(dir: &Path, table: &Table, date: NaiveDate) -> anyhow::Result<PathBuf> {
    if table.rows.is_empty() {
        return Err(TableError::Empty.into());
    }
    std::fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(date));
    std::fs::write(&path, to_csv(&table.rows))?;
    info!(path = %path.display(), rows = table.rows.len(), "table exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::{export_file_name, sort_rows, to_csv, write_export, Table, TableError};
    use chrono::NaiveDate;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn cells_are_quoted_trimmed_and_escaped() {
        let csv = to_csv(&rows(&[&["ID", "Cliente"], &["1", "  Ana \"Aninha\" Lima "]]));
        assert_eq!(csv, "\"ID\",\"Cliente\"\n\"1\",\"Ana \"\"Aninha\"\" Lima\"");
    }

    #[test]
    fn file_name_carries_the_date() {
        let d = NaiveDate::from_ymd_opt(2025, 1, 9).expect("date");
        assert_eq!(export_file_name(d), "solicitacoes_2025-01-09.csv");
    }

    #[test]
    fn sort_keeps_header_first() {
        let mut t = Table {
            rows: rows(&[&["Cliente"], &["bruno"], &["Ana"], &["carla"]]),
            header: true,
        };
        sort_rows(&mut t, 0).expect("sorted");
        assert_eq!(t.rows, rows(&[&["Cliente"], &["Ana"], &["bruno"], &["carla"]]));
    }

    #[test]
    fn sort_rejects_short_rows() {
        let mut t = Table {
            rows: rows(&[&["a", "b"], &["c"]]),
            header: false,
        };
        assert_eq!(
            sort_rows(&mut t, 1),
            Err(TableError::MissingColumn { row: 1, column: 1 })
        );
    }

    #[test]
    fn empty_table_is_not_exported() {
        let dir = tempfile::TempDir::new().expect("tmp");
        let t = Table {
            rows: vec![],
            header: true,
        };
        let d = NaiveDate::from_ymd_opt(2025, 1, 9).expect("date");
        let err = write_export(dir.path(), &t, d).expect_err("empty");
        assert!(err.to_string().contains("Nenhuma tabela"));
    }
}
