//! Operational contract of the spreadsheet the backend appends listings to.
//!
//! The backend owns the writes; the front-end only knows the layout and the
//! environment the integration needs, so it can check a setup and lay out
//! rows the same way.

use chrono::NaiveDateTime;
use std::env;
use std::path::{Path, PathBuf};

use crate::models::job::JobListing;

pub const SHEET_HEADER: [&str; 6] = ["Date Added", "Company", "Role", "Location", "URL", "Status"];
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const SPREADSHEET_ID_VAR: &str = "SPREADSHEET_ID";
pub const CREDENTIALS_VAR: &str = "GOOGLE_APPLICATION_CREDENTIALS";
pub const SHEET_NAME_VAR: &str = "DEFAULT_SHEET_NAME";

#[derive(Debug, Clone, PartialEq)]
pub struct SheetSettings {
    pub spreadsheet_id: Option<String>,
    pub credentials_path: Option<PathBuf>,
    pub sheet_name: String,
}

impl SheetSettings {
    pub fn from_env() -> Self {
        let non_empty = |name: &str| env::var(name).ok().filter(|v| !v.trim().is_empty());
        Self {
            spreadsheet_id: non_empty(SPREADSHEET_ID_VAR),
            credentials_path: non_empty(CREDENTIALS_VAR).map(PathBuf::from),
            sheet_name: non_empty(SHEET_NAME_VAR).unwrap_or_else(|| DEFAULT_SHEET_NAME.to_string()),
        }
    }

    /// Range the backend appends to, e.g. `Sheet1!A1`.
    pub fn append_range(&self) -> String {
        format!("{}!A1", self.sheet_name)
    }

    /// Problems that would keep the backend from writing to the sheet.
    /// Relative credential paths are resolved against `base_dir`.
    pub fn check(&self, base_dir: &Path) -> Vec<String> {
        let mut problems = Vec::new();

        if self.spreadsheet_id.is_none() {
            problems.push(format!("{} is not set", SPREADSHEET_ID_VAR));
        }

        match &self.credentials_path {
            None => problems.push(format!(
                "{} is not set; point it at the service account JSON key file",
                CREDENTIALS_VAR
            )),
            Some(path) => {
                let resolved = resolve_path(path, base_dir);
                if !resolved.is_file() {
                    problems.push(format!(
                        "Service account key file not found at {}",
                        resolved.display()
                    ));
                }
            }
        }

        problems
    }
}

fn resolve_path(path: &Path, base_dir: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

/// Lays listings out in `SHEET_HEADER` order. Status starts empty.
pub fn sheet_rows(listings: &[JobListing], added: NaiveDateTime) -> Vec<[String; 6]> {
    let date_added = added.format(TIMESTAMP_FORMAT).to_string();
    listings
        .iter()
        .map(|job| {
            [
                date_added.clone(),
                job.company_or_missing().to_string(),
                job.title_or_missing().to_string(),
                job.location_or_missing().to_string(),
                job.url_or_missing().to_string(),
                String::new(),
            ]
        })
        .collect()
}

/// Tab-separated rows, header first, ready to paste into the sheet.
pub fn to_tsv(listings: &[JobListing], added: NaiveDateTime) -> String {
    let clean = |cell: &str| cell.replace(['\t', '\n', '\r'], " ");

    let mut lines = vec![SHEET_HEADER.join("\t")];
    for row in sheet_rows(listings, added) {
        lines.push(row.iter().map(|c| clean(c)).collect::<Vec<_>>().join("\t"));
    }
    lines.join("\n")
}
