//! Saving the best time and checkpoint progress
//!
//! Writes are synchronous full-file overwrites. Missing or unreadable saves
//! load as "nothing saved" and never surface as errors.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chargejump_math::Vec2;

/// File holding the best time as plain text seconds
pub const BEST_TIME_FILE: &str = "best_time.txt";

/// File holding the last checkpoint reached
pub const CHECKPOINT_FILE: &str = "checkpoint.ron";

/// Saved checkpoint progress
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CheckpointSave {
    /// Level the checkpoint belongs to
    pub level: String,
    pub index: usize,
    /// Respawn position
    pub position: Vec2,
}

/// Storage for progress that outlives a session
pub trait ProgressStore {
    fn load_best_time(&self) -> Option<f64>;
    fn save_best_time(&mut self, seconds: f64) -> Result<(), SaveError>;
    fn load_checkpoint(&self) -> Option<CheckpointSave>;
    fn save_checkpoint(&mut self, save: &CheckpointSave) -> Result<(), SaveError>;
    fn clear_checkpoint(&mut self) -> Result<(), SaveError>;
}

/// Progress stored as files in a directory
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    fn write(&self, file: &str, contents: &str) -> Result<(), SaveError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path(file), contents)?;
        Ok(())
    }
}

impl ProgressStore for FileStore {
    fn load_best_time(&self) -> Option<f64> {
        let path = self.path(BEST_TIME_FILE);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) => {
                log::debug!("No best time at {}: {}", path.display(), e);
                return None;
            }
        };
        match contents.trim().parse::<f64>() {
            Ok(seconds) if seconds.is_finite() && seconds >= 0.0 => Some(seconds),
            _ => {
                log::warn!("Ignoring unparseable best time in {}", path.display());
                None
            }
        }
    }

    fn save_best_time(&mut self, seconds: f64) -> Result<(), SaveError> {
        self.write(BEST_TIME_FILE, &seconds.to_string())
    }

    fn load_checkpoint(&self) -> Option<CheckpointSave> {
        let path = self.path(CHECKPOINT_FILE);
        let contents = fs::read_to_string(&path).ok()?;
        match ron::from_str(&contents) {
            Ok(save) => Some(save),
            Err(e) => {
                log::warn!("Ignoring unparseable checkpoint save {}: {}", path.display(), e);
                None
            }
        }
    }

    fn save_checkpoint(&mut self, save: &CheckpointSave) -> Result<(), SaveError> {
        let contents = ron::ser::to_string_pretty(save, ron::ser::PrettyConfig::new())?;
        self.write(CHECKPOINT_FILE, &contents)
    }

    fn clear_checkpoint(&mut self) -> Result<(), SaveError> {
        match fs::remove_file(self.path(CHECKPOINT_FILE)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory progress store
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    pub best_time: Option<f64>,
    pub checkpoint: Option<CheckpointSave>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_best_time(mut self, seconds: f64) -> Self {
        self.best_time = Some(seconds);
        self
    }
}

impl ProgressStore for MemoryStore {
    fn load_best_time(&self) -> Option<f64> {
        self.best_time
    }

    fn save_best_time(&mut self, seconds: f64) -> Result<(), SaveError> {
        self.best_time = Some(seconds);
        Ok(())
    }

    fn load_checkpoint(&self) -> Option<CheckpointSave> {
        self.checkpoint.clone()
    }

    fn save_checkpoint(&mut self, save: &CheckpointSave) -> Result<(), SaveError> {
        self.checkpoint = Some(save.clone());
        Ok(())
    }

    fn clear_checkpoint(&mut self) -> Result<(), SaveError> {
        self.checkpoint = None;
        Ok(())
    }
}

/// Error writing progress
#[derive(Debug)]
pub enum SaveError {
    /// IO error (permission denied, disk full, etc.)
    Io(io::Error),
    /// Serialization error
    Serialize(ron::Error),
}

impl From<io::Error> for SaveError {
    fn from(e: io::Error) -> Self {
        SaveError::Io(e)
    }
}

impl From<ron::Error> for SaveError {
    fn from(e: ron::Error) -> Self {
        SaveError::Serialize(e)
    }
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "IO error: {}", e),
            SaveError::Serialize(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for SaveError {}
