//! JSONL storage for the undo stack
//!
//! Snapshots are stored in `.crease/snapshots.jsonl`, one JSON object per
//! line, oldest first. A commit appends a line; an undo rewrites the file
//! without its last line. Uses file locking for concurrent access safety.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use crate::domain::{Scorebook, Snapshot};

/// Store for scorebook snapshots in JSONL format
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// Creates a new snapshot store at the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates the default store for a match directory
    pub fn for_project(project_root: &Path) -> Self {
        Self::new(project_root.join(".crease").join("snapshots.jsonl"))
    }

    /// Returns the path to the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every snapshot, oldest first
    pub fn read_all(&self) -> Result<Vec<Snapshot<Scorebook>>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open snapshot store: {}", self.path.display()))?;

        file.lock_shared()
            .context("Failed to acquire read lock on snapshot store")?;

        let reader = BufReader::new(&file);
        let mut snapshots = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("Failed to read line {}", line_num + 1))?;

            if line.trim().is_empty() {
                continue;
            }

            let snapshot = serde_json::from_str(&line)
                .with_context(|| format!("Failed to parse snapshot at line {}", line_num + 1))?;
            snapshots.push(snapshot);
        }

        Ok(snapshots)
    }

    /// Writes all snapshots to the store (full rewrite)
    pub fn write_all(&self, snapshots: &[Snapshot<Scorebook>]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let temp_path = self.path.with_extension("jsonl.tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

            file.lock_exclusive()
                .context("Failed to acquire write lock on snapshot store")?;

            let mut writer = BufWriter::new(&file);
            for snapshot in snapshots {
                let line =
                    serde_json::to_string(snapshot).context("Failed to serialize snapshot")?;
                writeln!(writer, "{}", line).context("Failed to write snapshot")?;
            }

            writer.flush().context("Failed to flush snapshot store")?;
        }

        fs::rename(&temp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }

    /// Appends a single snapshot
    pub fn append(&self, snapshot: &Snapshot<Scorebook>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open snapshot store: {}", self.path.display()))?;

        file.lock_exclusive()
            .context("Failed to acquire write lock on snapshot store")?;

        let mut writer = BufWriter::new(&file);
        let line = serde_json::to_string(snapshot).context("Failed to serialize snapshot")?;
        writeln!(writer, "{}", line).context("Failed to write snapshot")?;

        writer.flush().context("Failed to flush snapshot store")?;

        Ok(())
    }

    /// Brings the file in line with the stack after one operation
    ///
    /// `before` is the stack length when the match was loaded. A grown stack
    /// appends the new snapshots; a shrunk one is rewritten in full.
    pub fn sync(&self, entries: &[Snapshot<Scorebook>], before: usize) -> Result<()> {
        if entries.len() > before {
            for snapshot in &entries[before..] {
                self.append(snapshot)?;
            }
            Ok(())
        } else if entries.len() < before {
            self.write_all(entries)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MatchRules;
    use tempfile::TempDir;

    fn snapshot(label: &str, overs: u32) -> Snapshot<Scorebook> {
        let rules = MatchRules {
            overs,
            ..MatchRules::default()
        };
        Snapshot::new(label, Scorebook::new(rules))
    }

    #[test]
    fn read_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path().join("snapshots.jsonl"));

        assert!(store.read_all().unwrap().is_empty());
    }

    #[test]
    fn append_keeps_order() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path().join("snapshots.jsonl"));

        store.append(&snapshot("start", 20)).unwrap();
        store.append(&snapshot("revise overs 10", 10)).unwrap();

        let loaded = store.read_all().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].label, "start");
        assert_eq!(loaded[1].state.rules.overs, 10);
    }

    #[test]
    fn sync_rewrites_after_undo() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path().join("snapshots.jsonl"));
        let all = vec![snapshot("start", 20), snapshot("a", 10), snapshot("b", 5)];
        store.write_all(&all).unwrap();

        store.sync(&all[..2], 3).unwrap();

        let loaded = store.read_all().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[1].label, "a");
    }

    #[test]
    fn sync_appends_new_entries() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path().join("snapshots.jsonl"));
        let all = vec![snapshot("start", 20), snapshot("a", 10)];
        store.write_all(&all[..1]).unwrap();

        store.sync(&all, 1).unwrap();

        assert_eq!(store.read_all().unwrap().len(), 2);
    }

    #[test]
    fn creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path().join("nested").join("snapshots.jsonl"));

        store.append(&snapshot("start", 20)).unwrap();

        assert!(store.path().exists());
    }

    #[test]
    fn atomic_write() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path().join("snapshots.jsonl"));

        store.write_all(&[snapshot("start", 20)]).unwrap();

        let temp_path = store.path().with_extension("jsonl.tmp");
        assert!(!temp_path.exists());
    }
}
