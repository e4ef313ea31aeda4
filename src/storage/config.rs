//! Configuration handling for crease
//!
//! Match rules are stored in `.crease/config.toml` (per match) under a
//! `[rules]` table. Personal defaults live in `~/.config/crease/config.toml`
//! (global).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::MatchRules;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Match-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ProjectConfig {
    /// Rules the match was set up with
    pub rules: MatchRules,
}

impl ProjectConfig {
    /// Rejects rules no match can be played under
    pub fn validate(&self) -> Result<(), ConfigError> {
        let rules = &self.rules;
        if rules.overs == 0 {
            return Err(ConfigError::Invalid("overs must be at least 1".into()));
        }
        for team in [&rules.team_a, &rules.team_b] {
            if team.players < 2 {
                return Err(ConfigError::Invalid(format!(
                    "{} needs at least 2 players",
                    team.name
                )));
            }
        }
        if rules.bowler_over_cap == Some(0) {
            return Err(ConfigError::Invalid("bowler cap must be at least 1".into()));
        }
        Ok(())
    }
}

/// Global user configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GlobalConfig {
    /// Default output format (text or json)
    pub default_format: OutputFormat,

    /// Overs per innings for `crease init` when `--overs` is not given
    pub default_overs: Option<u32>,
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Combined configuration (global + match)
#[derive(Debug, Clone)]
pub struct Config {
    pub project: ProjectConfig,
    pub global: GlobalConfig,
    pub project_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration for a specific match directory
    pub fn for_project(project_root: &Path) -> Result<Self> {
        let global = Self::load_global()?;
        let project = Self::load_project_config(project_root)?;

        Ok(Self {
            project,
            global,
            project_root: Some(project_root.to_path_buf()),
        })
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "crease", "crease").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads global configuration
    pub fn load_global() -> Result<GlobalConfig> {
        let config_dir = match Self::global_config_dir() {
            Some(dir) => dir,
            None => return Ok(GlobalConfig::default()),
        };

        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            return Ok(GlobalConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read global config: {}", config_path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse global config")
    }

    fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
        let config_path = project_root.join(".crease").join("config.toml");

        if !config_path.exists() {
            return Ok(ProjectConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read match config: {}", config_path.display()))?;

        let config: ProjectConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse match config")?;
        config.validate().context("Invalid match config")?;
        Ok(config)
    }

    /// Finds the match root by looking for a `.crease/` directory
    pub fn find_project_root() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            if current.join(".crease").is_dir() {
                return Some(current);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Returns the match root, or an error if not in a match directory
    pub fn require_project_root(&self) -> Result<&Path> {
        self.project_root
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("Not in a crease match. Run 'crease init' first."))
    }

    /// Saves the match configuration
    pub fn save_project(&self) -> Result<()> {
        let root = self.require_project_root()?;
        let config_path = root.join(".crease").join("config.toml");

        let content =
            toml::to_string_pretty(&self.project).context("Failed to serialize match config")?;

        fs::write(&config_path, content)
            .with_context(|| format!("Failed to write match config: {}", config_path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = Config {
            project: ProjectConfig::default(),
            global: GlobalConfig::default(),
            project_root: None,
        };

        assert_eq!(config.project.rules.overs, 20);
        assert_eq!(config.global.default_format, OutputFormat::Text);
        assert!(config.require_project_root().is_err());
    }

    #[test]
    fn parse_project_config() {
        let toml = r#"
[rules]
overs = 6
last_man_stands = true
bowler_over_cap = 2

[rules.team_a]
name = "Hawks"
players = 6
"#;

        let config: ProjectConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.rules.overs, 6);
        assert!(config.rules.last_man_stands);
        assert_eq!(config.rules.bowler_over_cap, Some(2));
        assert_eq!(config.rules.team_a.name, "Hawks");
        assert_eq!(config.rules.team_b.players, 11);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_global_config() {
        let toml = r#"
default_format = "json"
default_overs = 10
"#;

        let config: GlobalConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.default_format, OutputFormat::Json);
        assert_eq!(config.default_overs, Some(10));
    }

    #[test]
    fn validate_rejects_zero_overs() {
        let config = ProjectConfig {
            rules: MatchRules {
                overs: 0,
                ..MatchRules::default()
            },
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn save_and_reload_project_config() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(".crease")).unwrap();

        let mut config = Config {
            project: ProjectConfig::default(),
            global: GlobalConfig::default(),
            project_root: Some(dir.path().to_path_buf()),
        };
        config.project.rules.overs = 5;
        config.save_project().unwrap();

        let loaded = Config::for_project(dir.path()).unwrap();
        assert_eq!(loaded.project, config.project);
    }
}
