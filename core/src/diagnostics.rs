use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use chrono::Utc;
use serde::Serialize;

use crate::models::ImportReport;

const LOG_FILE: &str = "diagnostics.log";
const MAX_LOG_BYTES: u64 = 1_500_000;
const MIN_REDACTED_DIGITS: usize = 9;

#[derive(Debug, Serialize)]
pub struct LogEvent {
    pub ts: String,
    pub kind: String,
    pub message: String,
}

/// Strips home paths and anything that looks like a phone number.
fn sanitize(input: &str) -> String {
    let mut out = input.to_string();
    for prefix in ["/home/", "/Users/", "/root/", "/var/", "/private/", "C:\\", "D:\\"] {
        if let Some(idx) = out.find(prefix) {
            out.replace_range(idx.., "[redacted]");
            break;
        }
    }
    out.split_whitespace()
        .map(|token| {
            let digits = token.chars().filter(|c| c.is_ascii_digit()).count();
            if digits >= MIN_REDACTED_DIGITS {
                "[redacted]"
            } else {
                token
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn log_event(log_dir: &Path, kind: &str, message: &str) -> io::Result<()> {
    write_event(log_dir, kind, sanitize(message))
}

// `message` is written as is; callers sanitize any free text first.
fn write_event(log_dir: &Path, kind: &str, message: String) -> io::Result<()> {
    fs::create_dir_all(log_dir)?;
    let path = log_dir.join(LOG_FILE);
    trim_log(&path)?;
    let event = LogEvent {
        ts: Utc::now().to_rfc3339(),
        kind: kind.to_string(),
        message,
    };
    let line = serde_json::to_string(&event).unwrap_or_else(|_| "{}".to_string());
    let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
    writeln!(file, "{}", line)?;
    Ok(())
}

/// One `import` line per run plus one `import_file_failed` line per rejected file.
pub fn log_import_report(log_dir: &Path, report: &ImportReport) -> io::Result<()> {
    for failure in &report.failures {
        log_event(
            log_dir,
            "import_file_failed",
            &format!("{}: {}", failure.file_name, failure.reason),
        )?;
    }
    // Only the import id and counts; not sanitized.
    write_event(
        log_dir,
        "import",
        format!(
            "id={} files={} failed={} added={} total={}",
            report.import_id,
            report.files.len() + report.failures.len(),
            report.failures.len(),
            report.added_count,
            report.total_count
        ),
    )
}

// Keeps the newest half once the file grows past the cap.
fn trim_log(path: &Path) -> io::Result<()> {
    if !path.exists() {
        return Ok(());
    }
    if fs::metadata(path)?.len() <= MAX_LOG_BYTES {
        return Ok(());
    }
    let data = fs::read(path)?;
    let mut keep_from = data.len().saturating_sub((MAX_LOG_BYTES / 2) as usize);
    if let Some(newline) = data[keep_from..].iter().position(|b| *b == b'\n') {
        keep_from += newline + 1;
    }
    fs::write(path, &data[keep_from..])
}
