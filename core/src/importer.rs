use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::dedupe::{dedupe_batch, filter_new, identity_keys};
use crate::error::CoreError;
use crate::models::{FileFailure, FileOutcome, ImportProgress, ImportReport, MessageRecord};
use crate::parser::parse_backup;
use crate::phone::normalize_address;
use crate::store::MessageStore;

/// Whether addresses are normalized before deduplication.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressMode {
    #[default]
    Normalized,
    Raw,
}

/// Pipeline settings, fixed for every file of one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOptions {
    pub address_mode: AddressMode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub content: String,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        SourceFile {
            name: name.into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImportPlan {
    pub sources: Vec<SourceFile>,
    /// Selected files that could not be read.
    pub unreadable: Vec<FileFailure>,
}

/// Reads the selected backup files.
///
/// Paths that are missing, directories or not `.xml` are skipped and reported
/// in `unreadable` alongside files that fail to read. The selection is only
/// rejected when it is empty or none of its paths is an XML file.
pub fn plan_import(paths: &[PathBuf]) -> Result<ImportPlan, CoreError> {
    if paths.is_empty() {
        return Err(CoreError::InvalidArgument("no files selected".to_string()));
    }

    let mut sources = Vec::with_capacity(paths.len());
    let mut unreadable = Vec::new();
    let mut selected = 0;
    for path in paths {
        let name = file_name(path);
        let result = match selection_problem(path) {
            Some(reason) => Err(reason),
            None => {
                selected += 1;
                read_source(path)
            }
        };
        match result {
            Ok(content) => sources.push(SourceFile { name, content }),
            Err(reason) => {
                warn!(file = %name, %reason, "backup file skipped");
                unreadable.push(FileFailure {
                    file_name: name,
                    reason,
                });
            }
        }
    }
    if selected == 0 {
        return Err(CoreError::InvalidArgument(
            "no .xml backup files in selection".to_string(),
        ));
    }
    Ok(ImportPlan { sources, unreadable })
}

fn selection_problem(path: &Path) -> Option<String> {
    if !path.exists() {
        Some("file not found".to_string())
    } else if path.is_dir() {
        Some("expected a file, got a directory".to_string())
    } else if !has_xml_extension(path) {
        Some("file must have .xml extension".to_string())
    } else {
        None
    }
}

fn has_xml_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("xml"))
        .unwrap_or(false)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}

fn read_source(path: &Path) -> Result<String, String> {
    let bytes = fs::read(path).map_err(|e| format!("read failed: {}", e))?;
    let text = String::from_utf8(bytes).map_err(|_| "file is not valid UTF-8".to_string())?;
    match text.strip_prefix('\u{feff}') {
        Some(stripped) => Ok(stripped.to_string()),
        None => Ok(text),
    }
}

pub fn import_plan_with_progress<S, F>(
    store: &mut S,
    plan: &ImportPlan,
    options: &ImportOptions,
    progress: F,
) -> Result<ImportReport, CoreError>
where
    S: MessageStore,
    F: Fn(&ImportProgress),
{
    let mut report = import_files_with_progress(store, &plan.sources, options, progress)?;
    let mut failures = plan.unreadable.clone();
    failures.append(&mut report.failures);
    report.failures = failures;
    Ok(report)
}

pub fn import_files<S>(
    store: &mut S,
    files: &[SourceFile],
    options: &ImportOptions,
) -> Result<ImportReport, CoreError>
where
    S: MessageStore,
{
    import_files_with_progress(store, files, options, |_| {})
}

/// Parses every file, then appends the records not already stored in one
/// atomic write.
///
/// A file that fails to parse is reported and skipped. A storage failure aborts
/// the whole import and nothing from it is written.
pub fn import_files_with_progress<S, F>(
    store: &mut S,
    files: &[SourceFile],
    options: &ImportOptions,
    progress: F,
) -> Result<ImportReport, CoreError>
where
    S: MessageStore,
    F: Fn(&ImportProgress),
{
    let import_id = Uuid::new_v4().to_string();
    info!(import_id = %import_id, files = files.len(), "import started");
    let result = (|| -> Result<ImportReport, CoreError> {
        let total = files.len();
        let mut batch: Vec<MessageRecord> = Vec::new();
        let mut outcomes = Vec::with_capacity(total);
        let mut failures = Vec::new();
        for (idx, file) in files.iter().enumerate() {
            progress(&ImportProgress::Processing {
                current: idx + 1,
                total,
                file_name: file.name.clone(),
            });
            match parse_backup(&file.content) {
                Ok(mut records) => {
                    if options.address_mode == AddressMode::Normalized {
                        for record in &mut records {
                            record.address = normalize_address(&record.address);
                        }
                    }
                    debug!(file = %file.name, records = records.len(), "parsed backup file");
                    outcomes.push(FileOutcome {
                        name: file.name.clone(),
                        sha256: content_sha256(&file.content),
                        parsed: records.len() as i64,
                    });
                    batch.extend(records);
                }
                Err(err) => {
                    warn!(file = %file.name, error = %err, "skipping backup file");
                    failures.push(FileFailure {
                        file_name: file.name.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        let unique = dedupe_batch(batch);
        let existing = identity_keys(&store.get_all()?);
        let fresh = filter_new(unique, &existing);

        progress(&ImportProgress::Saving {
            new_records: fresh.len(),
        });
        if !fresh.is_empty() {
            if let Err(err) = store.bulk_append(&fresh) {
                error!(import_id = %import_id, error = %err, "bulk append failed");
                return Err(err.into());
            }
        }
        let total_count = store.count()?;

        Ok(ImportReport {
            import_id: import_id.clone(),
            added_count: fresh.len() as i64,
            total_count,
            files: outcomes,
            failures,
        })
    })();
    progress(&ImportProgress::Idle);

    if let Ok(report) = &result {
        info!(
            import_id = %report.import_id,
            added = report.added_count,
            total = report.total_count,
            failed_files = report.failures.len(),
            "import finished"
        );
    }
    result
}

/// Empties the archive. Callers confirm with the user first.
pub fn clear_all<S>(store: &mut S) -> Result<(), CoreError>
where
    S: MessageStore,
{
    let removed = store.count()?;
    store.clear()?;
    info!(removed, "archive cleared");
    Ok(())
}

fn content_sha256(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}
