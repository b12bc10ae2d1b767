//! Decoding of the regions this crate treats as opaque.

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// Strategy that decodes a `customObjects` array.
///
/// The decoder hands over the cursor positioned at the array and takes the
/// result as is; the objects are never inspected by the keyframe decoders.
pub trait ObjectDecoder {
    type Object;

    fn decode_objects<'de, D>(&self, deserializer: D) -> Result<Vec<Self::Object>, D::Error>
    where
        D: Deserializer<'de>;
}

/// Decode custom objects with `T`'s own `Deserialize` implementation.
pub struct SerdeObjects<T>(PhantomData<fn() -> T>);

impl<T> SerdeObjects<T> {
    pub fn new() -> Self {
        SerdeObjects(PhantomData)
    }
}

impl<T> Default for SerdeObjects<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for SerdeObjects<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SerdeObjects<T> {}

impl<T> fmt::Debug for SerdeObjects<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SerdeObjects<{}>", std::any::type_name::<T>())
    }
}

impl<T: DeserializeOwned> ObjectDecoder for SerdeObjects<T> {
    type Object = T;

    fn decode_objects<'de, D>(&self, deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<T>::deserialize(deserializer)
    }
}
