//! JSONL storage for the event and registration records
//!
//! Records live in a data directory as `events.jsonl` and
//! `registrations.jsonl`, one JSON object per line. Uses file locking
//! for concurrent access safety.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::{Event, Registration};

use super::catalog::EventCatalog;

/// Store for the record files of one data directory
pub struct CatalogStore {
    dir: PathBuf,
}

impl CatalogStore {
    /// Creates a store rooted at the given data directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the data directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the event record file
    pub fn events_path(&self) -> PathBuf {
        self.dir.join("events.jsonl")
    }

    /// Path of the registration record file
    pub fn registrations_path(&self) -> PathBuf {
        self.dir.join("registrations.jsonl")
    }

    /// Reads both record files into a catalog snapshot
    pub fn load(&self) -> Result<EventCatalog> {
        let events: Vec<Event> = read_records(&self.events_path())?;
        let registrations: Vec<Registration> = read_records(&self.registrations_path())?;
        Ok(EventCatalog::from_records(events, registrations))
    }

    /// Writes all events back (full rewrite, sorted by id)
    pub fn write_events<'a>(&self, events: impl IntoIterator<Item = &'a Event>) -> Result<()> {
        let mut sorted: Vec<_> = events.into_iter().collect();
        sorted.sort_by_key(|event| event.id);
        write_records(&self.events_path(), &sorted)
    }

    /// Appends a single registration
    pub fn append_registration(&self, registration: &Registration) -> Result<()> {
        if let Some(parent) = self.registrations_path().parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let path = self.registrations_path();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open record file: {}", path.display()))?;

        file.lock_exclusive()
            .context("Failed to acquire write lock on record file")?;

        let mut writer = BufWriter::new(&file);
        let line =
            serde_json::to_string(registration).context("Failed to serialize registration")?;
        writeln!(writer, "{}", line).context("Failed to write registration")?;

        writer.flush().context("Failed to flush record file")?;

        Ok(())
    }
}

/// Reads all records from a JSONL file; a missing file is an empty set
fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open record file: {}", path.display()))?;

    // Shared lock for reading
    file.lock_shared()
        .context("Failed to acquire read lock on record file")?;

    let reader = BufReader::new(&file);
    let mut records = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line.with_context(|| {
            format!("Failed to read line {} of {}", line_num + 1, path.display())
        })?;

        if line.trim().is_empty() {
            continue;
        }

        let record: T = serde_json::from_str(&line).with_context(|| {
            format!("Failed to parse record at line {} of {}", line_num + 1, path.display())
        })?;

        records.push(record);
    }

    // Lock is released when the file is dropped
    Ok(records)
}

/// Writes records to a JSONL file via a temp file and atomic rename
fn write_records<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let temp_path = path.with_extension("jsonl.tmp");

    {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

        file.lock_exclusive()
            .context("Failed to acquire write lock on record file")?;

        let mut writer = BufWriter::new(&file);

        for record in records {
            let line = serde_json::to_string(record).context("Failed to serialize record")?;
            writeln!(writer, "{}", line).context("Failed to write record")?;
        }

        writer.flush().context("Failed to flush record file")?;
    }

    fs::rename(&temp_path, path).with_context(|| {
        format!(
            "Failed to rename {} to {}",
            temp_path.display(),
            path.display()
        )
    })?;

    Ok(())
}
