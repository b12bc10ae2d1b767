use std::fmt;

use serde::de::{DeserializeSeed, Deserializer, MapAccess, SeqAccess, Visitor};

use super::fields::{CUSTOM_OBJECTS, NAME, POSITION_KEYFRAMES, ROOT, TIME_KEYFRAMES};
use super::list::KeyframeListSeed;
use super::DecodeCtx;
use crate::data::KeyframeSet;
use crate::objects::ObjectDecoder;
use crate::value::{PositionValue, TimeValue};

/// Root array of keyframe sets.
pub(super) struct KeyframeSetsSeed<'a, O> {
    ctx: &'a DecodeCtx<'a>,
    objects: &'a O,
}

impl<'a, O> KeyframeSetsSeed<'a, O> {
    pub(super) fn new(ctx: &'a DecodeCtx<'a>, objects: &'a O) -> Self {
        Self { ctx, objects }
    }
}

impl<'de, O: ObjectDecoder> DeserializeSeed<'de> for KeyframeSetsSeed<'_, O> {
    type Value = Vec<KeyframeSet<O::Object>>;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(self)
    }
}

impl<'de, O: ObjectDecoder> Visitor<'de> for KeyframeSetsSeed<'_, O> {
    type Value = Vec<KeyframeSet<O::Object>>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an array of keyframe sets")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut sets = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        loop {
            self.ctx.at(ROOT);
            let seed = KeyframeSetSeed {
                ctx: self.ctx,
                objects: self.objects,
            };
            match seq.next_element_seed(seed)? {
                Some(set) => sets.push(set),
                None => break,
            }
        }
        Ok(sets)
    }
}

/// One keyframe-set object. Missing fields keep their empty defaults.
struct KeyframeSetSeed<'a, O> {
    ctx: &'a DecodeCtx<'a>,
    objects: &'a O,
}

impl<'de, O: ObjectDecoder> DeserializeSeed<'de> for KeyframeSetSeed<'_, O> {
    type Value = KeyframeSet<O::Object>;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(self)
    }
}

impl<'de, O: ObjectDecoder> Visitor<'de> for KeyframeSetSeed<'_, O> {
    type Value = KeyframeSet<O::Object>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a keyframe set object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let ctx = self.ctx;
        let mut set = KeyframeSet::default();
        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                NAME => {
                    ctx.at(NAME);
                    set.name = map.next_value()?;
                }
                POSITION_KEYFRAMES => {
                    ctx.at(POSITION_KEYFRAMES);
                    set.position_keyframes =
                        map.next_value_seed(KeyframeListSeed::<PositionValue>::new(ctx))?;
                }
                TIME_KEYFRAMES => {
                    ctx.at(TIME_KEYFRAMES);
                    set.time_keyframes =
                        map.next_value_seed(KeyframeListSeed::<TimeValue>::new(ctx))?;
                }
                CUSTOM_OBJECTS => {
                    ctx.delegating(CUSTOM_OBJECTS);
                    set.custom_objects = map.next_value_seed(ObjectsSeed(self.objects))?;
                }
                _ => ctx.skip("keyframe set", &key, &mut map)?,
            }
        }
        Ok(set)
    }
}

/// Hands the `customObjects` array to the injected decoder.
struct ObjectsSeed<'a, O>(&'a O);

impl<'de, O: ObjectDecoder> DeserializeSeed<'de> for ObjectsSeed<'_, O> {
    type Value = Vec<O::Object>;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        self.0.decode_objects(deserializer)
    }
}
