use std::fmt;
use std::marker::PhantomData;

use serde::de::{DeserializeSeed, Deserializer, MapAccess, SeqAccess, Visitor};

use super::keyframe::KeyframeShape;
use super::DecodeCtx;
use crate::data::Keyframe;

/// Array of keyframe objects, kept in source order.
pub(super) struct KeyframeListSeed<'a, V> {
    ctx: &'a DecodeCtx<'a>,
    shape: PhantomData<fn() -> V>,
}

impl<'a, V> KeyframeListSeed<'a, V> {
    pub(super) fn new(ctx: &'a DecodeCtx<'a>) -> Self {
        Self {
            ctx,
            shape: PhantomData,
        }
    }
}

impl<'de, V: KeyframeShape> DeserializeSeed<'de> for KeyframeListSeed<'_, V> {
    type Value = Vec<Keyframe<V>>;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(self)
    }
}

impl<'de, V: KeyframeShape> Visitor<'de> for KeyframeListSeed<'_, V> {
    type Value = Vec<Keyframe<V>>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "an array of {} objects", V::LIST_FIELD)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut keyframes = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        loop {
            self.ctx.at(V::LIST_FIELD);
            let seed = KeyframeSeed::<V> {
                ctx: self.ctx,
                shape: PhantomData,
            };
            match seq.next_element_seed(seed)? {
                Some(keyframe) => keyframes.push(keyframe),
                None => break,
            }
        }
        Ok(keyframes)
    }
}

struct KeyframeSeed<'a, V> {
    ctx: &'a DecodeCtx<'a>,
    shape: PhantomData<fn() -> V>,
}

impl<'de, V: KeyframeShape> DeserializeSeed<'de> for KeyframeSeed<'_, V> {
    type Value = Keyframe<V>;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(self)
    }
}

impl<'de, V: KeyframeShape> Visitor<'de> for KeyframeSeed<'_, V> {
    type Value = Keyframe<V>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a keyframe object")
    }

    fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        V::visit_keyframe(self.ctx, map)
    }
}
