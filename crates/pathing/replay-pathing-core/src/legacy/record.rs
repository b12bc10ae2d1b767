//! Nested value objects inside keyframes.

use std::fmt;

use serde::de::value::MapAccessDeserializer;
use serde::de::{self, Deserialize, DeserializeSeed, Deserializer, MapAccess, Unexpected, Visitor};

use super::fields::{PITCH, ROLL, SPECTATED_ENTITY_ID, VALUE, X, Y, YAW, Z};
use super::DecodeCtx;
use crate::value::{decode_time_value, PositionRecord, TimeValue};

/// Flat position object, with or without an embedded entity id.
pub(super) struct PositionRecordSeed<'a> {
    pub(super) ctx: &'a DecodeCtx<'a>,
}

impl<'de> DeserializeSeed<'de> for PositionRecordSeed<'_> {
    type Value = PositionRecord;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(self)
    }
}

impl<'de> Visitor<'de> for PositionRecordSeed<'_> {
    type Value = PositionRecord;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a position object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let ctx = self.ctx;
        let mut record = PositionRecord::default();
        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                X => record.x = primitive(ctx, &mut map, X, record.x)?,
                Y => record.y = primitive(ctx, &mut map, Y, record.y)?,
                Z => record.z = primitive(ctx, &mut map, Z, record.z)?,
                YAW => record.yaw = primitive(ctx, &mut map, YAW, record.yaw)?,
                PITCH => record.pitch = primitive(ctx, &mut map, PITCH, record.pitch)?,
                ROLL => record.roll = primitive(ctx, &mut map, ROLL, record.roll)?,
                SPECTATED_ENTITY_ID => {
                    // null clears an earlier inline id
                    ctx.at(SPECTATED_ENTITY_ID);
                    record.spectated_entity_id = map.next_value()?;
                }
                _ => ctx.skip("position", &key, &mut map)?,
            }
        }
        Ok(record)
    }
}

/// Read a numeric field; `null` keeps the current value.
fn primitive<'de, A, T>(
    ctx: &DecodeCtx<'_>,
    map: &mut A,
    field: &'static str,
    current: T,
) -> Result<T, A::Error>
where
    A: MapAccess<'de>,
    T: Deserialize<'de>,
{
    ctx.at(field);
    Ok(map.next_value::<Option<T>>()?.unwrap_or(current))
}

/// Time keyframe `value`: a bare integer, or an object handed to
/// `TimeValue`'s own decoder.
pub(super) struct TimeValueSeed<'a> {
    pub(super) ctx: &'a DecodeCtx<'a>,
}

impl<'de> DeserializeSeed<'de> for TimeValueSeed<'_> {
    type Value = TimeValue;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for TimeValueSeed<'_> {
    type Value = TimeValue;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an integer timestamp or a timestamp object")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        i32::try_from(v)
            .map(decode_time_value)
            .map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        i32::try_from(v)
            .map(decode_time_value)
            .map_err(|_| E::invalid_value(Unexpected::Signed(v), &self))
    }

    fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        self.ctx.delegating(VALUE);
        TimeValue::deserialize(MapAccessDeserializer::new(map))
    }
}
