//! Import/Export Adapters
//!
//! Format translation at the boundary: JSON backups for full-snapshot
//! migration between devices, and spreadsheet-compatible CSV for parents
//! who want the data in Excel. Shares the domain model but is not part of
//! the scoring/ordering core.

mod csv;
mod json;

pub use csv::{
    export_logs_csv, export_problems_csv, import_problems_csv, import_question_bank_csv,
    normalize_status, CsvError, CsvImport,
};
pub use json::{
    backup_from_snapshot, export_backup, import_backup, parse_backup, read_backup_file,
    write_backup_file, Backup, ImportSummary, JsonError, BACKUP_VERSION,
};
