//! Result formatting for ratio queries

use serde::{Deserialize, Serialize};

/// Outcome of a single ratio query, ready for printing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatioReport {
    pub from: String,
    pub to: String,
    /// Conversion ratio along the discovered path, or `None` when the
    /// destination is unreachable
    pub ratio: Option<f64>,
}

impl RatioReport {
    pub fn new(from: &str, to: &str, ratio: Option<f64>) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            ratio,
        }
    }
}

/// Print a query outcome to stdout.
///
/// A found ratio and a no-path outcome get visibly distinct lines; neither
/// is an error.
pub fn print_report(report: &RatioReport) {
    match report.ratio {
        Some(ratio) => {
            println!(
                "\x1b[1;32m1 {} = {:.6} {}\x1b[0m",
                report.from, ratio, report.to
            );
        }
        None => {
            println!(
                "\x1b[1;33mNo conversion path from {} to {}\x1b[0m",
                report.from, report.to
            );
        }
    }
}

/// Print a query outcome as JSON
pub fn print_report_json(report: &RatioReport) {
    match serde_json::to_string_pretty(report) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Warning: Failed to serialize report: {}", e),
    }
}
