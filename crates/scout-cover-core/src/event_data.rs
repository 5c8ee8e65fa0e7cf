//! Local event data: a directory of per-event team lists, or one JSON map.
//!
//! Directory layout: one `<event_key>.json` per event, each an array of team
//! objects with at least an integer `team_number`. Anything else is skipped.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CoverError, CoverResult};
use crate::utils::log;
use crate::{CoverageInput, Resource};

/// Team details for display; every field is optional in the source files.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamInfo {
    pub team_number: Resource,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub school_name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state_prov: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

impl TeamInfo {
    /// "City, State" with "Unknown" for missing parts.
    pub fn location(&self) -> String {
        format!(
            "{}, {}",
            self.city.as_deref().unwrap_or("Unknown"),
            self.state_prov.as_deref().unwrap_or("Unknown")
        )
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventData {
    pub events: CoverageInput,
    pub teams: BTreeMap<Resource, TeamInfo>,
}

impl EventData {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drop district championship events.
    pub fn without_championships(mut self) -> Self {
        self.events.retain(|key, _| !is_championship_key(key));
        self
    }
}

/// District championships use keys ending in `cmp` or `cmp1`..`cmp9`.
pub fn is_championship_key(key: &str) -> bool {
    if key.ends_with("cmp") {
        return true;
    }
    match key.as_bytes() {
        [.., b'c', b'm', b'p', d] => (b'1'..=b'9').contains(d),
        _ => false,
    }
}

fn team_number(value: &Value) -> Option<Resource> {
    value.as_u64().and_then(|n| Resource::try_from(n).ok())
}

fn read_json(path: &Path) -> CoverResult<Value> {
    let s = fs::read_to_string(path).map_err(|e| CoverError::io("read event file", path, e))?;
    serde_json::from_str(&s).map_err(|e| CoverError::Parse {
        path: path.display().to_string(),
        source: e.to_string(),
    })
}

/// Teams listed in one event file. Entries without a usable team number are skipped.
fn parse_event_teams(value: &Value, teams: &mut BTreeMap<Resource, TeamInfo>) -> Vec<Resource> {
    let Some(entries) = value.as_array() else {
        return Vec::new();
    };
    let mut numbers = Vec::with_capacity(entries.len());
    for entry in entries {
        let Some(number) = entry.get("team_number").and_then(team_number) else {
            continue;
        };
        numbers.push(number);
        if let Ok(info) = serde_json::from_value::<TeamInfo>(entry.clone()) {
            teams.insert(number, info);
        } else {
            teams.entry(number).or_insert_with(|| TeamInfo {
                team_number: number,
                ..Default::default()
            });
        }
    }
    numbers
}

/// Load every `*.json` file in `dir` as one event. Files are read in name order.
pub fn load_event_dir(dir: &Path) -> CoverResult<EventData> {
    let entries = fs::read_dir(dir).map_err(|e| CoverError::io("read event dir", dir, e))?;
    let mut paths: Vec<_> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    let mut data = EventData::default();
    for path in &paths {
        let Some(key) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let value = read_json(path)?;
        let numbers = parse_event_teams(&value, &mut data.teams);
        log(&format!("Loaded {}: {} teams", key, numbers.len()));
        data.events.insert(key.to_string(), numbers);
    }
    if data.is_empty() {
        return Err(CoverError::NoEventData {
            path: dir.display().to_string(),
        });
    }
    Ok(data)
}

/// Load a single `{ "event": [team, ...] }` map. Non-integer entries are skipped.
pub fn load_event_map(path: &Path) -> CoverResult<EventData> {
    let value = read_json(path)?;
    let Some(map) = value.as_object() else {
        return Err(CoverError::Parse {
            path: path.display().to_string(),
            source: "expected an object of event -> team list".to_string(),
        });
    };
    let mut data = EventData::default();
    for (key, teams) in map {
        let numbers: Vec<Resource> = teams
            .as_array()
            .map(|list| list.iter().filter_map(team_number).collect())
            .unwrap_or_default();
        data.events.insert(key.clone(), numbers);
    }
    if data.is_empty() {
        return Err(CoverError::NoEventData {
            path: path.display().to_string(),
        });
    }
    log(&format!("Loaded {} events from {}", data.events.len(), path.display()));
    Ok(data)
}
