//! Backup listing display
//!
//! Formats `list` rows as a table, JSON, CSV, YAML or a bare count.

use std::io::Write;

use tabled::settings::Style;
use tabled::Table;

use crate::error::{SnapError, SnapResult};
use crate::restore::BackupRow;

use super::ListFormat;

const CSV_HEADER: [&str; 4] = ["option_name", "option_backup_name", "backup_count", "time_keys"];

/// Format backup rows in the requested format
pub fn format_backup_list(rows: &[BackupRow], format: ListFormat) -> SnapResult<String> {
    let mut buffer = Vec::new();
    write_backup_list(rows, format, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| SnapError::Export(e.to_string()))
}

/// Write backup rows in the requested format
pub fn write_backup_list<W: Write>(
    rows: &[BackupRow],
    format: ListFormat,
    writer: &mut W,
) -> SnapResult<()> {
    match format {
        ListFormat::Table => {
            if rows.is_empty() {
                writeln!(writer, "No backups found.")?;
            } else {
                let mut table = Table::new(rows);
                table.with(Style::psql());
                writeln!(writer, "{}", table)?;
            }
        }
        ListFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, rows)?;
            writeln!(writer)?;
        }
        ListFormat::Csv => {
            let mut csv_writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(&mut *writer);
            csv_writer.write_record(CSV_HEADER)?;
            for row in rows {
                csv_writer.serialize(row)?;
            }
            csv_writer.flush()?;
        }
        ListFormat::Count => {
            writeln!(writer, "{}", rows.len())?;
        }
        ListFormat::Yaml => {
            serde_yaml::to_writer(&mut *writer, rows)?;
        }
    }

    Ok(())
}
