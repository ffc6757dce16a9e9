//! CSV export of one category's records

use crate::model::record::Record;
use crate::model::schema::FormSchema;
use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

/// Write `records` as CSV under `dir`, one column per schema column.
///
/// Cells go through the same render path as the table, so exported values
/// match what the user sees on screen. Returns the written file's path.
pub fn export_csv(dir: &Path, schema: &FormSchema, records: &[Record]) -> Result<PathBuf> {
    if !dir.exists() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create export directory {}", dir.display()))?;
    }

    let filename = format!(
        "{}_{}.csv",
        schema.category.slug(),
        Local::now().format("%Y%m%d-%H%M%S")
    );
    let path = dir.join(filename);

    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    let headers: Vec<&str> = schema.columns.iter().map(|c| c.title).collect();
    writer.write_record(&headers)?;

    for record in records {
        let row: Vec<String> = schema.columns.iter().map(|c| c.cell(record)).collect();
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(path)
}
