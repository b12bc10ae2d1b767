//! Keyframe objects.
//!
//! Legacy writers marked a spectating keyframe in two ways: the entity id is
//! either embedded in the position object or written as its sibling. The
//! sibling may come before or after the position, so a position is decoded
//! optimistically and upgraded once the keyframe object is closed.

use serde::de::{self, MapAccess};

use super::fields::{
    POSITION, POSITION_KEYFRAMES, REAL_TIMESTAMP, SPECTATED_ENTITY_ID, TIMESTAMP, TIME_KEYFRAMES,
    VALUE,
};
use super::record::{PositionRecordSeed, TimeValueSeed};
use super::DecodeCtx;
use crate::config::EntityIdConflict;
use crate::data::Keyframe;
use crate::value::{decode_position_value, decode_time_value, PositionValue, TimeValue};

/// A keyframe value type with its own legacy object layout.
pub(super) trait KeyframeShape: Sized {
    /// Keyframe-set field holding a list of keyframes of this shape.
    const LIST_FIELD: &'static str;

    fn visit_keyframe<'de, A>(ctx: &DecodeCtx<'_>, map: A) -> Result<Keyframe<Self>, A::Error>
    where
        A: MapAccess<'de>;
}

impl KeyframeShape for PositionValue {
    const LIST_FIELD: &'static str = POSITION_KEYFRAMES;

    fn visit_keyframe<'de, A>(ctx: &DecodeCtx<'_>, mut map: A) -> Result<Keyframe<Self>, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut real_timestamp = 0;
        let mut pending = PositionValue::default();
        let mut sibling_entity_id = None;

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                // synonyms; a later one replaces an earlier one
                VALUE | POSITION => {
                    ctx.at(if key == VALUE { VALUE } else { POSITION });
                    let record = map.next_value_seed(PositionRecordSeed { ctx })?;
                    pending = decode_position_value(&record);
                }
                REAL_TIMESTAMP => {
                    ctx.at(REAL_TIMESTAMP);
                    real_timestamp = map.next_value()?;
                }
                SPECTATED_ENTITY_ID => {
                    ctx.at(SPECTATED_ENTITY_ID);
                    sibling_entity_id = Some(map.next_value()?);
                }
                _ => ctx.skip("position keyframe", &key, &mut map)?,
            }
        }

        let value = resolve_spectated::<A::Error>(ctx, pending, sibling_entity_id)?;
        Ok(Keyframe::new(real_timestamp, value))
    }
}

impl KeyframeShape for TimeValue {
    const LIST_FIELD: &'static str = TIME_KEYFRAMES;

    fn visit_keyframe<'de, A>(ctx: &DecodeCtx<'_>, mut map: A) -> Result<Keyframe<Self>, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut real_timestamp = 0;
        let mut value = TimeValue::default();

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                TIMESTAMP => {
                    ctx.at(TIMESTAMP);
                    value = decode_time_value(map.next_value()?);
                }
                VALUE => {
                    ctx.at(VALUE);
                    value = map.next_value_seed(TimeValueSeed { ctx })?;
                }
                REAL_TIMESTAMP => {
                    ctx.at(REAL_TIMESTAMP);
                    real_timestamp = map.next_value()?;
                }
                _ => ctx.skip("time keyframe", &key, &mut map)?,
            }
        }

        Ok(Keyframe::new(real_timestamp, value))
    }
}

/// Apply a sibling entity id once the keyframe object is fully read.
/// The inline id, when present, always wins over the sibling.
fn resolve_spectated<E: de::Error>(
    ctx: &DecodeCtx<'_>,
    pending: PositionValue,
    sibling_entity_id: Option<i32>,
) -> Result<PositionValue, E> {
    let Some(entity_id) = sibling_entity_id else {
        return Ok(pending);
    };
    match pending.spectated_entity_id() {
        None => {
            log::trace!("rebuilding plain position as spectating entity {entity_id}");
            Ok(pending.upgrade(entity_id))
        }
        Some(inline) if inline == entity_id => Ok(pending),
        Some(inline) => match ctx.config().entity_id_conflict {
            EntityIdConflict::PreferInline => {
                log::warn!(
                    "keyframe has inline entity id {inline} and sibling entity id {entity_id}; keeping {inline}"
                );
                Ok(pending)
            }
            EntityIdConflict::Reject => {
                ctx.at(SPECTATED_ENTITY_ID);
                Err(E::custom(format_args!(
                    "sibling entity id {entity_id} contradicts inline entity id {inline}"
                )))
            }
        },
    }
}
