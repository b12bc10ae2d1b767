//! Reader for the legacy keyframe-set format.
//!
//! The document is consumed in one forward pass through `serde_json`'s
//! streaming deserializer; the seeds in this module are the decoders for the
//! root array, each set, each keyframe list and each keyframe.
//!
//! Errors coming out of the cursor carry no field context, so the decode
//! context records which field is being read. At the boundary the
//! `serde_json` error category plus that site select the [`LegacyError`]
//! variant.

mod fields;
mod keyframe;
mod list;
mod record;
mod set;

use std::cell::Cell;
use std::io;

use serde::de::{DeserializeSeed, IgnoredAny, MapAccess};
use serde_json::error::Category;

use crate::config::Config;
use crate::data::KeyframeSet;
use crate::error::LegacyError;
use crate::objects::{ObjectDecoder, SerdeObjects};

use self::set::KeyframeSetsSeed;

/// Parse a legacy keyframe-set document with the default configuration,
/// keeping custom objects as raw JSON values.
pub fn parse_legacy_keyframe_sets(json: &str) -> crate::Result<Vec<KeyframeSet>> {
    LegacyDecoder::new().decode_str(json)
}

/// Configured legacy reader. `O` decodes the opaque `customObjects` arrays.
#[derive(Clone, Debug, Default)]
pub struct LegacyDecoder<O = SerdeObjects<serde_json::Value>> {
    config: Config,
    objects: O,
}

impl LegacyDecoder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<O> LegacyDecoder<O> {
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Replace the custom-object strategy.
    pub fn with_objects<P: ObjectDecoder>(self, objects: P) -> LegacyDecoder<P> {
        LegacyDecoder {
            config: self.config,
            objects,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl<O: ObjectDecoder> LegacyDecoder<O> {
    pub fn decode_str(&self, json: &str) -> crate::Result<Vec<KeyframeSet<O::Object>>> {
        self.decode(serde_json::Deserializer::from_str(json))
    }

    pub fn decode_slice(&self, bytes: &[u8]) -> crate::Result<Vec<KeyframeSet<O::Object>>> {
        self.decode(serde_json::Deserializer::from_slice(bytes))
    }

    /// Decode straight from a reader. Wrap unbuffered sources in a
    /// `BufReader`; the cursor reads byte by byte.
    pub fn decode_reader<R: io::Read>(
        &self,
        reader: R,
    ) -> crate::Result<Vec<KeyframeSet<O::Object>>> {
        self.decode(serde_json::Deserializer::from_reader(reader))
    }

    fn decode<'de, R>(
        &self,
        mut de: serde_json::Deserializer<R>,
    ) -> crate::Result<Vec<KeyframeSet<O::Object>>>
    where
        R: serde_json::de::Read<'de>,
    {
        let ctx = DecodeCtx::new(&self.config);
        let sets = KeyframeSetsSeed::new(&ctx, &self.objects)
            .deserialize(&mut de)
            .map_err(|err| ctx.classify(err))?;
        de.end().map_err(|err| ctx.classify(err))?;
        log::debug!("decoded {} legacy keyframe sets", sets.len());
        Ok(sets)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Site {
    /// A field this crate decodes itself.
    Value(&'static str),
    /// A region handed to a generic decoder.
    Delegate(&'static str),
}

/// Per-call state shared by the seeds of one decode.
pub(crate) struct DecodeCtx<'a> {
    config: &'a Config,
    site: Cell<Option<Site>>,
}

impl<'a> DecodeCtx<'a> {
    fn new(config: &'a Config) -> Self {
        Self {
            config,
            site: Cell::new(None),
        }
    }

    pub(crate) fn config(&self) -> &Config {
        self.config
    }

    /// Mark `field` as the value about to be read.
    pub(crate) fn at(&self, field: &'static str) {
        self.site.set(Some(Site::Value(field)));
    }

    /// Mark `field` as handed over to a generic decoder.
    pub(crate) fn delegating(&self, field: &'static str) {
        self.site.set(Some(Site::Delegate(field)));
    }

    /// Consume and discard the value of an unrecognised field.
    pub(crate) fn skip<'de, A>(&self, scope: &str, key: &str, map: &mut A) -> Result<(), A::Error>
    where
        A: MapAccess<'de>,
    {
        log::debug!("skipping unknown {scope} field '{key}'");
        map.next_value::<IgnoredAny>()?;
        Ok(())
    }

    fn classify(&self, err: serde_json::Error) -> LegacyError {
        match err.classify() {
            Category::Io | Category::Syntax | Category::Eof => LegacyError::StreamSyntax {
                line: err.line(),
                column: err.column(),
                reason: err.to_string(),
            },
            Category::Data => match self.site.get() {
                Some(Site::Delegate(field)) => LegacyError::DelegateDecode {
                    field,
                    reason: err.to_string(),
                },
                Some(Site::Value(field)) => LegacyError::MalformedValue {
                    field,
                    reason: err.to_string(),
                },
                None => LegacyError::MalformedValue {
                    field: fields::ROOT,
                    reason: err.to_string(),
                },
            },
        }
    }
}
