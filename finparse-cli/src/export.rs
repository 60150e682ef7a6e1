//! Writers for redacted records: CSV and JSON files, or a plain table on stdout.

use anyhow::{Context, Result};
use clap::ValueEnum;
use finparse_core::{Record, TxnField};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Csv,
    Json,
    Table,
}

impl OutputFormat {
    fn extension(&self) -> Option<&'static str> {
        match self {
            OutputFormat::Csv => Some("csv"),
            OutputFormat::Json => Some("json"),
            OutputFormat::Table => None,
        }
    }
}

/// `statements/feb.pdf` -> `<dir>/feb_result.csv`
pub fn result_path(dir: &Path, input: &Path, format: OutputFormat) -> Option<PathBuf> {
    let ext = format.extension()?;
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "statement".to_string());
    Some(dir.join(format!("{stem}_result.{ext}")))
}

/// Columns present in at least one record, in canonical field order.
pub fn columns(records: &[Record]) -> Vec<TxnField> {
    TxnField::ALL
        .into_iter()
        .filter(|f| records.iter().any(|r| r.contains(*f)))
        .collect()
}

fn cell(record: &Record, field: TxnField) -> &str {
    record.get(field).flatten().unwrap_or("")
}

pub fn write_csv(path: &Path, records: &[Record]) -> Result<()> {
    let mut w = csv::Writer::from_path(path).with_context(|| format!("create {}", path.display()))?;
    let cols = columns(records);
    w.write_record(cols.iter().map(|f| f.as_str()))
        .context("write csv header")?;
    for record in records {
        w.write_record(cols.iter().map(|f| cell(record, *f)))
            .context("write csv row")?;
    }
    w.flush().with_context(|| format!("flush {}", path.display()))?;
    Ok(())
}

pub fn write_json(path: &Path, records: &[Record]) -> Result<()> {
    let json = serde_json::to_string_pretty(records).context("serialize records")?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn render_table(records: &[Record]) -> String {
    let cols = columns(records);
    let widths: Vec<usize> = cols
        .iter()
        .map(|f| {
            records
                .iter()
                .map(|r| cell(r, *f).chars().count())
                .chain(std::iter::once(f.as_str().len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let mut out = String::new();
    out.push_str(&row(&cols.iter().map(|f| f.as_str()).collect::<Vec<_>>(), &widths));
    out.push_str(&row(&rule.iter().map(String::as_str).collect::<Vec<_>>(), &widths));
    for record in records {
        out.push_str(&row(&cols.iter().map(|f| cell(record, *f)).collect::<Vec<_>>(), &widths));
    }
    out
}

fn row(cells: &[&str], widths: &[usize]) -> String {
    let joined = cells
        .iter()
        .zip(widths)
        .map(|(c, &w)| format!("{c:<w$}"))
        .collect::<Vec<_>>()
        .join("  ");
    format!("{}\n", joined.trim_end())
}

/// Write `records` for `input` in the chosen format. Returns the file written,
/// `None` when the table went to stdout.
pub fn export(
    records: &[Record],
    input: &Path,
    dir: &Path,
    format: OutputFormat,
) -> Result<Option<PathBuf>> {
    let Some(path) = result_path(dir, input, format) else {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "# {}", input.display())?;
        stdout.write_all(render_table(records).as_bytes())?;
        return Ok(None);
    };
    crate::state::ensure_output_dir(dir)?;
    match format {
        OutputFormat::Json => write_json(&path, records)?,
        _ => write_csv(&path, records)?,
    }
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<Record> {
        vec![
            Record::from_pairs(vec![
                (TxnField::Date, Some("2023-02-01".to_string())),
                (TxnField::Direction, Some("Debit".to_string())),
                (TxnField::Counterparty, Some("John Doe".to_string())),
                (TxnField::Amount, Some("500.00".to_string())),
                (TxnField::ReferenceId, None),
            ]),
            Record::from_pairs(vec![
                (TxnField::Date, Some("2023-02-02".to_string())),
                (TxnField::Direction, Some("Credit".to_string())),
                (TxnField::Counterparty, Some("Acme, Corp".to_string())),
                (TxnField::Amount, Some("10000.00".to_string())),
                (TxnField::ReferenceId, Some("************".to_string())),
            ]),
        ]
    }

    #[test]
    fn test_result_path() {
        let dir = Path::new("out");
        assert_eq!(
            result_path(dir, Path::new("stmts/feb.pdf"), OutputFormat::Csv),
            Some(PathBuf::from("out/feb_result.csv"))
        );
        assert_eq!(
            result_path(dir, Path::new("feb.txt"), OutputFormat::Json),
            Some(PathBuf::from("out/feb_result.json"))
        );
        assert_eq!(result_path(dir, Path::new("feb.pdf"), OutputFormat::Table), None);
    }

    #[test]
    fn test_csv_output() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("results");
        let written = export(&records(), Path::new("feb.pdf"), &dir, OutputFormat::Csv)
            .unwrap()
            .unwrap();
        let s = fs::read_to_string(written).unwrap();
        let lines: Vec<&str> = s.lines().collect();
        assert_eq!(lines[0], "date,direction,counterparty,amount,reference_id");
        assert_eq!(lines[1], "2023-02-01,Debit,John Doe,500.00,");
        assert_eq!(lines[2], "2023-02-02,Credit,\"Acme, Corp\",10000.00,************");
    }

    #[test]
    fn test_json_output_keeps_nulls() {
        let tmp = tempfile::tempdir().unwrap();
        let written = export(&records(), Path::new("feb.pdf"), tmp.path(), OutputFormat::Json)
            .unwrap()
            .unwrap();
        let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(written).unwrap()).unwrap();
        assert_eq!(v[0]["counterparty"], "John Doe");
        assert!(v[0]["reference_id"].is_null());
        assert!(v[0].get("cheque_no").is_none());
    }

    #[test]
    fn test_table_alignment() {
        let table = render_table(&records());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("date        direction  counterparty"));
        assert!(lines[1].starts_with("----------  ---------"));
        assert!(lines[3].ends_with("************"));
    }

    #[test]
    fn test_columns_skip_removed_fields() {
        let cols = columns(&records());
        assert!(!cols.contains(&TxnField::ChequeNo));
        assert_eq!(cols.first(), Some(&TxnField::Date));
        assert!(columns(&[]).is_empty());
    }
}
