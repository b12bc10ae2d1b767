//! Typed keyframe values and the pure decoders that build them from flat
//! legacy records.

use serde::{Deserialize, Serialize};

/// Camera position and rotation. Absent fields are zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlainPosition {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
}

/// A position that follows the entity with the given id.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpectatedPosition {
    #[serde(flatten)]
    pub position: PlainPosition,
    #[serde(rename = "spectatedEntityID")]
    pub spectated_entity_id: i32,
}

impl SpectatedPosition {
    pub fn new(position: PlainPosition, spectated_entity_id: i32) -> Self {
        Self {
            position,
            spectated_entity_id,
        }
    }
}

/// Value of a position keyframe.
///
/// Serialized untagged: a spectated position is recognised by its
/// `spectatedEntityID` field, so `Spectated` must stay the first variant.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PositionValue {
    Spectated(SpectatedPosition),
    Plain(PlainPosition),
}

impl Default for PositionValue {
    fn default() -> Self {
        PositionValue::Plain(PlainPosition::default())
    }
}

impl PositionValue {
    /// Rebuild a plain position as spectating `entity_id`, copying the
    /// geometry unchanged. An already spectated value is returned as is.
    pub fn upgrade(self, entity_id: i32) -> Self {
        match self {
            PositionValue::Plain(position) => {
                PositionValue::Spectated(SpectatedPosition::new(position, entity_id))
            }
            spectated @ PositionValue::Spectated(_) => spectated,
        }
    }

    pub fn position(&self) -> &PlainPosition {
        match self {
            PositionValue::Plain(position) => position,
            PositionValue::Spectated(spectated) => &spectated.position,
        }
    }

    pub fn spectated_entity_id(&self) -> Option<i32> {
        match self {
            PositionValue::Plain(_) => None,
            PositionValue::Spectated(spectated) => Some(spectated.spectated_entity_id),
        }
    }

    pub fn is_spectated(&self) -> bool {
        matches!(self, PositionValue::Spectated(_))
    }
}

/// Value of a time keyframe: a timestamp on the replay timeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeValue {
    pub value: i32,
}

/// Flat record read from a legacy position object before a variant is chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PositionRecord {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
    /// Entity id embedded directly in the position object.
    pub spectated_entity_id: Option<i32>,
}

pub fn decode_position(record: &PositionRecord) -> PlainPosition {
    PlainPosition {
        x: record.x,
        y: record.y,
        z: record.z,
        yaw: record.yaw,
        pitch: record.pitch,
        roll: record.roll,
    }
}

/// `None` when the record carries no inline entity id.
pub fn decode_spectated(record: &PositionRecord) -> Option<SpectatedPosition> {
    record
        .spectated_entity_id
        .map(|id| SpectatedPosition::new(decode_position(record), id))
}

/// Pick the variant from the record alone: spectated when an id is embedded.
pub fn decode_position_value(record: &PositionRecord) -> PositionValue {
    match decode_spectated(record) {
        Some(spectated) => PositionValue::Spectated(spectated),
        None => PositionValue::Plain(decode_position(record)),
    }
}

pub fn decode_time_value(value: i32) -> TimeValue {
    TimeValue { value }
}
