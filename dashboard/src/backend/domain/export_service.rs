//! CSV export of the expense list.
//!
//! The export contains exactly the rows the user is looking at: the current
//! filtered, sorted view, in view order. Writing the file to disk goes through
//! a temp file and a rename so a failed export never leaves a truncated CSV.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::{error, info};
use shared::{Expense, ExportExpensesResponse};

use super::list_view::{ListRecord, ListView};

const EXPORT_HEADER: [&str; 5] = ["id", "date", "description", "category", "amount"];

#[derive(Debug, Clone, Default)]
pub struct ExportService;

impl ExportService {
    pub fn new() -> Self {
        Self
    }

    /// Render the visible expenses as CSV
    pub fn export_expenses_csv(&self, view: &ListView<'_, Expense>, today: NaiveDate) -> Result<ExportExpensesResponse> {
        info!("📄 EXPORT: Exporting {} visible expenses as CSV", view.count);

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(EXPORT_HEADER)?;

        for expense in &view.records {
            let amount = ListRecord::amount(*expense);
            let amount_field = if amount.is_finite() {
                format!("{:.2}", amount)
            } else {
                String::new()
            };
            writer.write_record([
                expense.id.to_string().as_str(),
                expense.date.as_deref().unwrap_or_default(),
                expense.description.as_str(),
                expense.category.as_deref().unwrap_or_default(),
                amount_field.as_str(),
            ])?;
        }

        let bytes = writer.into_inner().context("Failed to flush CSV writer")?;
        let csv_content = String::from_utf8(bytes).context("CSV export produced invalid UTF-8")?;
        let filename = export_filename(today);

        info!(
            "✅ EXPORT: Generated {} ({} rows, {} bytes)",
            filename,
            view.records.len(),
            csv_content.len()
        );

        Ok(ExportExpensesResponse {
            csv_content,
            filename,
            record_count: view.records.len(),
        })
    }

    /// Write an export into `directory`, falling back to the user's documents
    /// folder and then the home directory. Returns the written path.
    pub fn write_export(&self, export: &ExportExpensesResponse, directory: Option<&Path>) -> Result<PathBuf> {
        let directory = match directory {
            Some(directory) => directory.to_path_buf(),
            None => match dirs::document_dir().or_else(dirs::home_dir) {
                Some(directory) => directory,
                None => {
                    error!("❌ EXPORT: Could not determine default export directory");
                    anyhow::bail!("Failed to determine export directory");
                }
            },
        };

        fs::create_dir_all(&directory)
            .with_context(|| format!("Failed to create export directory {}", directory.display()))?;

        let target = directory.join(&export.filename);
        let temp = directory.join(format!("{}.tmp", export.filename));
        fs::write(&temp, &export.csv_content).with_context(|| format!("Failed to write {}", temp.display()))?;
        fs::rename(&temp, &target).with_context(|| format!("Failed to move export into {}", target.display()))?;

        info!("📁 EXPORT: Saved {} expenses to {}", export.record_count, target.display());
        Ok(target)
    }
}

/// `expenses_YYYYMMDD.csv`
pub fn export_filename(date: NaiveDate) -> String {
    format!("expenses_{}.csv", date.format("%Y%m%d"))
}
