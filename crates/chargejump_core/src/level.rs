//! Level description
//!
//! A level is the already-parsed object list of a tile map: rectangles with
//! a name, a kind, a property bag and an optional polyline path. Levels are
//! stored as RON files.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use crate::properties::PropertyValue;

/// One map object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelObject {
    #[serde(default)]
    pub name: String,
    /// Object type/class from the map editor
    #[serde(default)]
    pub kind: String,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub w: f32,
    #[serde(default)]
    pub h: f32,
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyValue>,
    /// Absolute polyline points, used by moving platforms
    #[serde(default)]
    pub path: Option<Vec<[f32; 2]>>,
}

impl LevelObject {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            name: String::new(),
            kind: String::new(),
            x,
            y,
            w,
            h,
            properties: BTreeMap::new(),
            path: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn with_path(mut self, points: Vec<[f32; 2]>) -> Self {
        self.path = Some(points);
        self
    }

    /// Case-insensitive match against the object's name or kind
    pub fn is_named(&self, role: &str) -> bool {
        self.name.eq_ignore_ascii_case(role) || self.kind.eq_ignore_ascii_case(role)
    }
}

/// A serializable level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// Level name; also keys the checkpoint save
    pub name: String,
    pub objects: Vec<LevelObject>,
}

impl Level {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            objects: Vec::new(),
        }
    }

    pub fn add_object(&mut self, object: LevelObject) {
        self.objects.push(object);
    }

    pub fn with_object(mut self, object: LevelObject) -> Self {
        self.objects.push(object);
        self
    }

    /// Load a level from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LevelLoadError> {
        let contents = fs::read_to_string(path)?;
        let level = ron::from_str(&contents)?;
        Ok(level)
    }

    /// Save a level to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), LevelSaveError> {
        let pretty = ron::ser::PrettyConfig::new()
            .struct_names(true)
            .enumerate_arrays(false);
        let contents = ron::ser::to_string_pretty(self, pretty)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Load a level, falling back to the built-in sample on any failure
    pub fn load_or_sample<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(level) => {
                log::info!(
                    "Loaded level '{}' from {} ({} objects)",
                    level.name,
                    path.display(),
                    level.objects.len()
                );
                level
            }
            Err(e) => {
                log::warn!(
                    "Failed to load level from {}: {}. Using sample level",
                    path.display(),
                    e
                );
                Self::sample()
            }
        }
    }

    /// Built-in sample level
    ///
    /// Exercises every surface kind: solid ground, a one-way ledge, ice, a
    /// ping-pong and a looping moving platform, an enemy patrol, two
    /// checkpoints and the finish.
    pub fn sample() -> Self {
        Level::new("sample")
            .with_object(LevelObject::new(40.0, 520.0, 0.0, 0.0).with_name("spawn"))
            .with_object(LevelObject::new(0.0, 560.0, 480.0, 40.0).with_name("ground"))
            .with_object(LevelObject::new(-40.0, 0.0, 40.0, 600.0).with_name("left_wall"))
            .with_object(
                LevelObject::new(200.0, 440.0, 120.0, 12.0)
                    .with_name("ledge")
                    .with_property("oneWay", true),
            )
            .with_object(
                LevelObject::new(380.0, 380.0, 160.0, 16.0)
                    .with_name("ice_shelf")
                    .with_property("ice", true),
            )
            .with_object(
                LevelObject::new(300.0, 360.0, 24.0, 8.0)
                    .with_kind("checkpoint"),
            )
            .with_object(
                LevelObject::new(600.0, 340.0, 0.0, 0.0)
                    .with_name("lift")
                    .with_property("moving", true)
                    .with_property("speed", 70.0)
                    .with_property("width", 72i64)
                    .with_property("height", 12i64)
                    .with_path(vec![[600.0, 340.0], [600.0, 220.0]]),
            )
            .with_object(
                LevelObject::new(720.0, 220.0, 140.0, 24.0)
                    .with_name("guarded")
                    .with_property("enemy", true)
                    .with_property("radius", 10i64),
            )
            .with_object(
                LevelObject::new(780.0, 190.0, 24.0, 8.0)
                    .with_kind("checkpoint"),
            )
            .with_object(
                LevelObject::new(900.0, 200.0, 0.0, 0.0)
                    .with_name("shuttle")
                    .with_property("moving", true)
                    .with_property("loop", true)
                    .with_property("speed", 90.0)
                    .with_property("width", 64i64)
                    .with_property("height", 12i64)
                    .with_path(vec![[900.0, 200.0], [1040.0, 200.0], [1040.0, 140.0]]),
            )
            .with_object(
                LevelObject::new(1100.0, 120.0, 180.0, 20.0)
                    .with_name("summit")
                    .with_property("platform_type", "goal"),
            )
            .with_object(
                LevelObject::new(1100.0, 0.0, 180.0, 20.0)
                    .with_name("banner")
                    .with_property("visual_only", true),
            )
            .with_object(LevelObject::new(1240.0, 88.0, 24.0, 32.0).with_name("finish"))
    }
}

/// Error loading a level
#[derive(Debug)]
pub enum LevelLoadError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// Parse error (invalid RON syntax)
    Parse(ron::error::SpannedError),
}

impl From<io::Error> for LevelLoadError {
    fn from(e: io::Error) -> Self {
        LevelLoadError::Io(e)
    }
}

impl From<ron::error::SpannedError> for LevelLoadError {
    fn from(e: ron::error::SpannedError) -> Self {
        LevelLoadError::Parse(e)
    }
}

impl std::fmt::Display for LevelLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelLoadError::Io(e) => write!(f, "IO error: {}", e),
            LevelLoadError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for LevelLoadError {}

/// Error saving a level
#[derive(Debug)]
pub enum LevelSaveError {
    /// IO error (permission denied, disk full, etc.)
    Io(io::Error),
    /// Serialization error
    Serialize(ron::Error),
}

impl From<io::Error> for LevelSaveError {
    fn from(e: io::Error) -> Self {
        LevelSaveError::Io(e)
    }
}

impl From<ron::Error> for LevelSaveError {
    fn from(e: ron::Error) -> Self {
        LevelSaveError::Serialize(e)
    }
}

impl std::fmt::Display for LevelSaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelSaveError::Io(e) => write!(f, "IO error: {}", e),
            LevelSaveError::Serialize(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for LevelSaveError {}
