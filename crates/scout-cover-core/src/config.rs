//! Run configuration, plus optional defaults from .scoutcoverrc (JSON).
//! CLI flags and env override the file.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::eligibility::EligibilityRule;
use crate::error::{CoverError, CoverResult};
use crate::Resource;

pub const CONFIG_FILE: &str = ".scoutcoverrc";
pub const DEFAULT_MAX_RESOURCE: Resource = 12000;
pub const DEFAULT_MAX_SOLUTIONS: usize = 5;
pub const DEFAULT_EVENT_DIR: &str = "event_data";

/// Everything the engine needs besides the event data itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoverConfig {
    pub mandatory: Resource,
    pub max_resource: Resource,
    pub include: BTreeSet<Resource>,
    pub exclude: BTreeSet<Resource>,
    pub max_solutions: usize,
}

impl CoverConfig {
    pub fn new(mandatory: Resource) -> Self {
        Self {
            mandatory,
            max_resource: DEFAULT_MAX_RESOURCE,
            include: BTreeSet::new(),
            exclude: BTreeSet::new(),
            max_solutions: DEFAULT_MAX_SOLUTIONS,
        }
    }

    /// Reject settings the engine must not silently resolve.
    pub fn validate(&self) -> CoverResult<()> {
        if self.exclude.contains(&self.mandatory) {
            return Err(CoverError::MandatoryExcluded {
                resource: self.mandatory,
            });
        }
        if self.max_solutions == 0 {
            return Err(CoverError::InvalidConfig {
                field: "max_solutions".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn rule(&self) -> EligibilityRule {
        EligibilityRule {
            max_resource: self.max_resource,
            include: self.include.clone(),
            exclude: self.exclude.clone(),
        }
    }

    /// Fill in anything the file sets. Call before applying CLI flags.
    pub fn apply_file(&mut self, file: &FileConfig) {
        if let Some(max) = file.max_team {
            self.max_resource = max;
        }
        if let Some(k) = file.max_solutions {
            self.max_solutions = k;
        }
        self.include.extend(file.include_teams.iter().copied());
        self.exclude.extend(file.exclude_teams.iter().copied());
    }
}

/// Optional settings from .scoutcoverrc.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FileConfig {
    pub max_team: Option<Resource>,
    pub max_solutions: Option<usize>,
    pub include_teams: Vec<Resource>,
    pub exclude_teams: Vec<Resource>,
    pub event_dir: Option<String>,
    pub skip_championships: Option<bool>,
}

impl FileConfig {
    /// Event directory: SCOUT_COVER_EVENT_DIR, then the file, then the default.
    pub fn event_dir(&self) -> PathBuf {
        if let Ok(dir) = std::env::var("SCOUT_COVER_EVENT_DIR") {
            if !dir.trim().is_empty() {
                return PathBuf::from(dir);
            }
        }
        PathBuf::from(self.event_dir.as_deref().unwrap_or(DEFAULT_EVENT_DIR))
    }
}

/// Load config from .scoutcoverrc in dir, then ~/.scoutcoverrc. Missing or invalid file = default.
pub fn load_config(dir: &Path) -> FileConfig {
    let mut candidates = vec![dir.join(CONFIG_FILE)];
    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(CONFIG_FILE));
    }
    for path in &candidates {
        if path.is_file() {
            return std::fs::read_to_string(path)
                .ok()
                .and_then(|s| serde_json::from_str(&s).ok())
                .unwrap_or_default();
        }
    }
    FileConfig::default()
}
