//! Keyframe-set data model.
//! Value shapes are defined in value.rs.

use serde::{Deserialize, Serialize};

use crate::value::{PositionValue, TimeValue};

/// A single timestamped sample on a timeline.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Keyframe<V> {
    /// Wall-clock position of the keyframe in milliseconds.
    #[serde(rename = "realTimestamp")]
    pub real_timestamp: u32,
    pub value: V,
}

impl<V> Keyframe<V> {
    pub fn new(real_timestamp: u32, value: V) -> Self {
        Self {
            real_timestamp,
            value,
        }
    }
}

/// A named camera path: a position timeline, a time timeline and the opaque
/// objects placed along it.
///
/// Keyframe order is the timeline order of the source and is never sorted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyframeSet<C = serde_json::Value> {
    pub name: String,
    pub position_keyframes: Vec<Keyframe<PositionValue>>,
    pub time_keyframes: Vec<Keyframe<TimeValue>>,
    /// Passed through unmodified.
    pub custom_objects: Vec<C>,
}

impl<C> KeyframeSet<C> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position_keyframes: Vec::new(),
            time_keyframes: Vec::new(),
            custom_objects: Vec::new(),
        }
    }

    /// True when the set holds no keyframes and no custom objects.
    pub fn is_empty(&self) -> bool {
        self.position_keyframes.is_empty()
            && self.time_keyframes.is_empty()
            && self.custom_objects.is_empty()
    }
}

impl<C> Default for KeyframeSet<C> {
    fn default() -> Self {
        Self::new(String::new())
    }
}
