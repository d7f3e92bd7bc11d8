use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::error::Result;
use crate::model::Category;
use crate::table::ResultTable;

/// Per-invocation values shared by the scrape and the export.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub category: Category,
    pub started_at: DateTime<Local>,
}

impl RunContext {
    pub fn new(category: Category) -> Self {
        Self::at(category, Local::now())
    }

    pub fn at(category: Category, started_at: DateTime<Local>) -> Self {
        Self {
            category,
            started_at,
        }
    }

    /// e.g. `Laptop_14-10-2026_09-05-33.csv`
    pub fn file_name(&self) -> String {
        format!(
            "{}_{}.csv",
            self.category.display_name(),
            self.started_at.format("%d-%m-%Y_%H-%M-%S")
        )
    }
}

pub fn write_csv<W: Write>(table: &ResultTable, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(table.headers())?;
    for record in table.records() {
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes `table` into `output_dir` and returns the file path.
pub fn export_csv(table: &ResultTable, context: &RunContext, output_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)?;
    let path = output_dir.join(context.file_name());

    let file = std::fs::File::create(&path)?;
    write_csv(table, file)?;

    log::info!("💾 Wrote {} rows to {}", table.len(), path.display());
    Ok(path)
}
