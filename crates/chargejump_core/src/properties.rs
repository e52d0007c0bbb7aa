//! Typed view of a map object's property bag
//!
//! Map objects carry loosely typed key/value properties. They are resolved
//! once at load time into [`ObjectProperties`]; the simulation never sees
//! the raw map.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A raw property value as it appears in a level file
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl PropertyValue {
    /// Interpret as a flag; numbers are true when non-zero
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(b) => Some(*b),
            PropertyValue::Int(i) => Some(*i != 0),
            PropertyValue::Float(f) => Some(*f != 0.0),
            PropertyValue::Str(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "1" => Some(true),
                "false" | "no" | "0" => Some(false),
                _ => None,
            },
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            PropertyValue::Bool(_) => None,
            PropertyValue::Int(i) => Some(*i as f32),
            PropertyValue::Float(f) => Some(*f as f32),
            PropertyValue::Str(s) => s.trim().parse().ok(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(v: bool) -> Self {
        PropertyValue::Bool(v)
    }
}

impl From<i64> for PropertyValue {
    fn from(v: i64) -> Self {
        PropertyValue::Int(v)
    }
}

impl From<f64> for PropertyValue {
    fn from(v: f64) -> Self {
        PropertyValue::Float(v)
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        PropertyValue::Str(v.to_string())
    }
}

/// Recognized object properties
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectProperties {
    pub one_way: bool,
    /// `ice` or `slippery`
    pub ice: bool,
    pub moving: bool,
    /// Spawn an enemy patrolling this platform
    pub enemy: bool,
    pub collidable: bool,
    /// Drawn but never collided with
    pub visual_only: bool,
    pub platform_type: Option<String>,
    /// Moving platform speed (px/s)
    pub speed: Option<f32>,
    /// Moving platform wraps to its first waypoint instead of reversing
    pub looping: bool,
    /// Enemy radius
    pub radius: Option<f32>,
    pub checkpoint: bool,
    /// Size override for path-driven objects
    pub width: Option<f32>,
    pub height: Option<f32>,
}

impl Default for ObjectProperties {
    fn default() -> Self {
        Self {
            one_way: false,
            ice: false,
            moving: false,
            enemy: false,
            collidable: true,
            visual_only: false,
            platform_type: None,
            speed: None,
            looping: false,
            radius: None,
            checkpoint: false,
            width: None,
            height: None,
        }
    }
}

impl ObjectProperties {
    /// Resolve a raw property bag, ignoring unrecognized keys
    pub fn resolve(raw: &BTreeMap<String, PropertyValue>) -> Self {
        let mut props = Self::default();
        for (key, value) in raw {
            let flag = || value.as_bool().unwrap_or(false);
            match key.as_str() {
                "oneWay" => props.one_way = flag(),
                "ice" | "slippery" => props.ice |= flag(),
                "moving" => props.moving = flag(),
                "enemy" => props.enemy = flag(),
                "collidable" => props.collidable = value.as_bool().unwrap_or(true),
                "visual_only" => props.visual_only = flag(),
                "platform_type" => {
                    props.platform_type = value
                        .as_str()
                        .map(str::to_string)
                        .or_else(|| value.as_f32().map(|n| n.to_string()));
                }
                "speed" => props.speed = value.as_f32(),
                "loop" => props.looping = flag(),
                "radius" => props.radius = value.as_f32(),
                "checkpoint" => props.checkpoint = flag(),
                "width" => props.width = value.as_f32(),
                "height" => props.height = value.as_f32(),
                other => log::debug!("Ignoring unrecognized object property '{}'", other),
            }
        }
        props
    }

    /// Whether a platform built from these properties enters the collision world
    pub fn is_collidable(&self) -> bool {
        self.collidable && !self.visual_only
    }
}
