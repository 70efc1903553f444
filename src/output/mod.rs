//! Output module
//!
//! JSON backups, Parquet exports and console rendering of scan results

mod backup;
mod console;
mod types;

pub use backup::{
    backup_file_name, export_file_name, export_results, load_results_backup, save_results_backup,
    RESULTS_PREFIX,
};
pub use console::{render_moves_json, render_moves_table};
pub use types::OutputError;
