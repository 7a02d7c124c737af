use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "rcpconfig.yaml";

/// Optional user settings, looked up in the working directory first and
/// the home directory second. Absence is not an error; a file that fails
/// to parse is reported by the caller and defaults are used.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_color() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            color: default_color(),
        }
    }
}

impl Config {
    /// Search order: `rcpconfig.yaml` in `cwd`, then in the home
    /// directory. Returns the defaults plus an optional parse-failure
    /// message for the caller to surface.
    pub fn discover(cwd: &Path) -> (Self, Option<String>) {
        for candidate in Self::candidates(cwd) {
            if candidate.exists() {
                return match Self::load(&candidate) {
                    Ok(config) => (config, None),
                    Err(reason) => (
                        Self::default(),
                        Some(format!("ignoring {}: {reason}", candidate.display())),
                    ),
                };
            }
        }
        (Self::default(), None)
    }

    fn candidates(cwd: &Path) -> Vec<PathBuf> {
        let mut paths = vec![cwd.join(CONFIG_FILE)];
        if let Some(home) = home::home_dir() {
            paths.push(home.join(CONFIG_FILE));
        }
        paths
    }

    fn load(path: &Path) -> Result<Self, String> {
        let data = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
        serde_yaml::from_str(&data).map_err(|e| e.to_string())
    }
}
