//! # UI Preferences
//!
//! Small pieces of presentation state that survive restarts. Stored as JSON
//! at `~/.predicta/ui.json`, written atomically (`.tmp` then `rename()`).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiPrefs {
    #[serde(rename = "sidebarHidden", default)]
    pub sidebar_hidden: bool,
}

/// Returns the path to `~/.predicta/ui.json`.
pub fn prefs_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".predicta").join("ui.json"))
}

/// Load preferences, falling back to defaults on any problem.
pub fn load_prefs() -> UiPrefs {
    let Some(path) = prefs_path() else {
        return UiPrefs::default();
    };
    match load_from(&path) {
        Ok(prefs) => prefs,
        Err(e) if e.kind() == io::ErrorKind::NotFound => UiPrefs::default(),
        Err(e) => {
            warn!("Ignoring unreadable UI preferences {}: {}", path.display(), e);
            UiPrefs::default()
        }
    }
}

pub fn save_prefs(prefs: &UiPrefs) {
    let Some(path) = prefs_path() else {
        warn!("Could not determine home directory, UI preferences not saved");
        return;
    };
    if let Err(e) = save_to(&path, prefs) {
        warn!("Failed to save UI preferences: {}", e);
    } else {
        debug!("UI preferences saved: {:?}", prefs);
    }
}

pub fn load_from(path: &Path) -> io::Result<UiPrefs> {
    let json = fs::read_to_string(path)?;
    serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

pub fn save_to(path: &Path, prefs: &UiPrefs) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp_path = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(prefs)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}
