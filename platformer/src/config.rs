//! Level configuration parsing from level TOML files

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};

use crate::{collision::Footprint, input::HeldDirections, rapier::SolidDef};

/// One span of scripted input, `from_tick..to_tick` (end exclusive).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptEntry {
    pub from_tick: u64,
    pub to_tick: u64,
    #[serde(default)]
    pub left: bool,
    #[serde(default)]
    pub right: bool,
    /// Whether the character holds a controllable payload during the span.
    #[serde(default = "default_payload")]
    pub payload: bool,
}

impl ScriptEntry {
    fn covers(&self, tick: u64) -> bool {
        (self.from_tick..self.to_tick).contains(&tick)
    }
}

/// Level configuration from a level TOML file
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Display name of the level
    #[serde(default)]
    pub name: Option<String>,
    /// Character origin (bottom center) at spawn
    pub spawn: [f32; 2],
    #[serde(default)]
    pub footprint: Footprint,
    /// Fixed simulation rate
    #[serde(default = "default_tick_hz")]
    pub tick_hz: u32,
    #[serde(default)]
    pub solids: Vec<SolidDef>,
    /// Input timeline; later entries win where spans overlap
    #[serde(default)]
    pub script: Vec<ScriptEntry>,
}

fn default_tick_hz() -> u32 {
    crate::constants::TICK_HZ as u32
}

fn default_payload() -> bool {
    true
}

impl LevelConfig {
    /// Load and validate a level from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, LevelConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| LevelConfigError::IoError(path.to_path_buf(), e))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| LevelConfigError::ParseError(path.to_path_buf(), e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), LevelConfigError> {
        let invalid = |msg: String| Err(LevelConfigError::Invalid(msg));

        if !self.spawn.iter().all(|v| v.is_finite()) {
            return invalid("spawn must be finite".into());
        }
        if let Err(e) = self.footprint.validate() {
            return invalid(e.into());
        }
        if self.tick_hz == 0 {
            return invalid("tick_hz must be positive".into());
        }
        for (i, solid) in self.solids.iter().enumerate() {
            if let Err(e) = solid.validate() {
                return invalid(format!("solid {}: {e}", solid.id));
            }
            if self.solids[..i].iter().any(|s| s.id == solid.id) {
                return invalid(format!("duplicate solid id {}", solid.id));
            }
        }
        if let Some(entry) = self.script.iter().find(|e| e.to_tick < e.from_tick) {
            return invalid(format!(
                "script span {}..{} ends before it starts",
                entry.from_tick, entry.to_tick
            ));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.tick_hz.max(1)
    }

    /// Held directions and payload gate at `tick`; no input and an open gate outside every span.
    pub fn input_at(&self, tick: u64) -> (HeldDirections, bool) {
        self.script
            .iter()
            .rev()
            .find(|e| e.covers(tick))
            .map(|e| {
                (
                    HeldDirections {
                        left: e.left,
                        right: e.right,
                    },
                    e.payload,
                )
            })
            .unwrap_or((HeldDirections::NONE, true))
    }

    /// Last tick any script entry covers.
    pub fn script_end(&self) -> u64 {
        self.script.iter().map(|e| e.to_tick).max().unwrap_or(0)
    }
}

/// Errors that can occur when loading a level configuration
#[derive(Debug)]
pub enum LevelConfigError {
    IoError(PathBuf, std::io::Error),
    ParseError(PathBuf, toml::de::Error),
    Invalid(String),
}

impl std::fmt::Display for LevelConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelConfigError::IoError(path, e) => {
                write!(f, "Failed to read {}: {}", path.display(), e)
            }
            LevelConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse {}: {}", path.display(), e)
            }
            LevelConfigError::Invalid(msg) => write!(f, "Invalid level: {msg}"),
        }
    }
}

impl std::error::Error for LevelConfigError {}
