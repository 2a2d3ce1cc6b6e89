//! CLI command implementations

pub mod import;
pub mod init;
pub mod precheck;
pub mod validate;

use crate::config::ZaakimportConfig;
use crate::core::session::{ImportOptions, ImportSession, RunOutcome};

/// Run options derived from configuration
fn options_from(config: &ZaakimportConfig) -> ImportOptions {
    ImportOptions {
        year: config.import.year,
        start_date: config
            .import
            .start_date
            .unwrap_or_else(|| chrono::Local::now().date_naive()),
        close_published: config.import.close_published,
        catalog_url: config.catalog.catalog_url.clone(),
    }
}

/// Render a statistics table with aligned columns
fn print_table(rows: &[Vec<String>]) {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..columns)
        .map(|col| {
            rows.iter()
                .map(|row| row.get(col).map(String::len).unwrap_or(0))
                .max()
                .unwrap_or(0)
        })
        .collect();

    for row in rows {
        let line: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(col, cell)| format!("{cell:<width$}", width = widths[col]))
            .collect();
        println!("  {}", line.join("  ").trim_end());
    }
}

/// Shared epilogue: print the table and derive the exit code
fn finish(session: &ImportSession, rows: Vec<Vec<String>>) -> i32 {
    println!();
    print_table(&rows);
    println!();

    match session.outcome() {
        RunOutcome::Completed => {
            let issues = session
                .logs()
                .iter()
                .filter(|log| log.level != crate::domain::LogLevel::Info)
                .count();
            if issues > 0 {
                println!("Completed with {issues} issue(s); see the log above.");
            } else {
                println!("Completed.");
            }
            0
        }
        RunOutcome::Aborted => {
            println!("Aborted.");
            1
        }
    }
}
