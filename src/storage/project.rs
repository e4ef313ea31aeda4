//! Match directory management
//!
//! Handles match initialization and loading/saving the scorer between
//! commands.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;
use tracing::debug;

use super::{Config, ProjectConfig, SnapshotStore};
use crate::domain::{MatchRules, Scorer, WicketFlow};

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("A match already exists at {0}")]
    AlreadyExists(PathBuf),

    #[error("Not in a crease match. Run 'crease init' first.")]
    NotInProject,

    #[error("Snapshot store is empty: {0}")]
    EmptyStore(PathBuf),
}

/// A loaded scorer plus what is needed to write it back
pub struct Session {
    pub scorer: Scorer,
    loaded_len: usize,
}

/// A crease match directory
pub struct Project {
    root: PathBuf,
    config: Config,
}

impl Project {
    /// Opens an existing match at the given path
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.join(".crease").is_dir() {
            return Err(ProjectError::NotInProject.into());
        }

        let config = Config::for_project(&root)?;

        Ok(Self { root, config })
    }

    /// Opens the match at the current directory or a parent
    pub fn open_current() -> Result<Self> {
        let root = Config::find_project_root().ok_or(ProjectError::NotInProject)?;

        Self::open(root)
    }

    /// Sets up a new match at the given path
    pub fn init(root: impl Into<PathBuf>, rules: MatchRules) -> Result<Self> {
        let root = root.into();
        let crease_dir = root.join(".crease");
        if crease_dir.join("snapshots.jsonl").exists() {
            return Err(ProjectError::AlreadyExists(root).into());
        }

        let project_config = ProjectConfig { rules };
        project_config.validate().context("Invalid match rules")?;

        fs::create_dir_all(&crease_dir).with_context(|| {
            format!("Failed to create .crease directory: {}", crease_dir.display())
        })?;

        let config = Config {
            project: project_config,
            global: Config::load_global()?,
            project_root: Some(root.clone()),
        };
        config.save_project()?;

        let scorer = Scorer::new(config.project.rules.clone());
        SnapshotStore::for_project(&root).write_all(scorer.undo_stack().entries())?;
        debug!(root = %root.display(), "match initialized");

        Self::open(root)
    }

    /// Returns the match root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the .crease directory path
    pub fn crease_dir(&self) -> PathBuf {
        self.root.join(".crease")
    }

    /// Returns the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the snapshot store
    pub fn snapshot_store(&self) -> SnapshotStore {
        SnapshotStore::for_project(&self.root)
    }

    fn wicket_path(&self) -> PathBuf {
        self.crease_dir().join("wicket.json")
    }

    fn load_wicket_flow(&self) -> Result<WicketFlow> {
        let path = self.wicket_path();
        if !path.exists() {
            return Ok(WicketFlow::new());
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read wicket entry: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse wicket entry: {}", path.display()))
    }

    fn save_wicket_flow(&self, flow: &WicketFlow) -> Result<()> {
        let path = self.wicket_path();
        if flow.is_idle() {
            if path.exists() {
                fs::remove_file(&path)
                    .with_context(|| format!("Failed to remove {}", path.display()))?;
            }
            return Ok(());
        }

        let temp_path = path.with_extension("json.tmp");
        let content = serde_json::to_string_pretty(flow).context("Failed to serialize wicket entry")?;
        fs::write(&temp_path, content)
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;
        fs::rename(&temp_path, &path)
            .with_context(|| format!("Failed to rename {} to {}", temp_path.display(), path.display()))
    }

    /// Loads the scorer from the snapshot store and any open wicket entry
    pub fn load(&self) -> Result<Session> {
        let store = self.snapshot_store();
        let entries = store.read_all()?;
        let loaded_len = entries.len();
        let flow = self.load_wicket_flow()?;

        let scorer = Scorer::resume(entries, flow)
            .ok_or_else(|| ProjectError::EmptyStore(store.path().to_path_buf()))?;
        debug!(snapshots = loaded_len, "match loaded");

        Ok(Session { scorer, loaded_len })
    }

    /// Writes back whatever the session changed
    pub fn save(&self, session: &Session) -> Result<()> {
        self.snapshot_store()
            .sync(session.scorer.undo_stack().entries(), session.loaded_len)?;
        self.save_wicket_flow(session.scorer.wicket_flow())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DismissalKind;
    use tempfile::TempDir;

    fn rules() -> MatchRules {
        MatchRules {
            overs: 5,
            ..MatchRules::default()
        }
    }

    #[test]
    fn init_creates_structure() {
        let dir = TempDir::new().unwrap();
        let project = Project::init(dir.path(), rules()).unwrap();

        assert!(project.crease_dir().is_dir());
        assert!(project.crease_dir().join("config.toml").is_file());
        assert!(project.snapshot_store().path().is_file());
        assert_eq!(project.config().project.rules.overs, 5);
    }

    #[test]
    fn init_twice_fails() {
        let dir = TempDir::new().unwrap();
        Project::init(dir.path(), rules()).unwrap();

        assert!(Project::init(dir.path(), rules()).is_err());
    }

    #[test]
    fn open_non_project_fails() {
        let dir = TempDir::new().unwrap();
        assert!(Project::open(dir.path()).is_err());
    }

    #[test]
    fn session_round_trip() {
        let dir = TempDir::new().unwrap();
        let project = Project::init(dir.path(), rules()).unwrap();

        let mut session = project.load().unwrap();
        session.scorer.start_innings("Rohit", "Gill", "Starc").unwrap();
        session.scorer.apply_run(4).unwrap();
        project.save(&session).unwrap();

        let mut session = project.load().unwrap();
        assert_eq!(session.scorer.state().score, 4);
        session.scorer.undo().unwrap();
        project.save(&session).unwrap();

        let session = project.load().unwrap();
        assert_eq!(session.scorer.state().score, 0);
        assert_eq!(project.snapshot_store().read_all().unwrap().len(), 2);
    }

    #[test]
    fn wicket_entry_survives_between_commands() {
        let dir = TempDir::new().unwrap();
        let project = Project::init(dir.path(), rules()).unwrap();

        let mut session = project.load().unwrap();
        session.scorer.start_innings("Rohit", "Gill", "Starc").unwrap();
        session.scorer.begin_wicket(DismissalKind::Caught).unwrap();
        project.save(&session).unwrap();
        assert!(project.crease_dir().join("wicket.json").exists());

        let mut session = project.load().unwrap();
        assert!(!session.scorer.wicket_flow().is_idle());
        session.scorer.cancel_wicket();
        project.save(&session).unwrap();
        assert!(!project.crease_dir().join("wicket.json").exists());
    }
}
