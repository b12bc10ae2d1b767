//! Decoder configuration.

use serde::{Deserialize, Serialize};

/// How a keyframe carrying two different spectated entity ids is resolved.
///
/// Legacy writers stored the id either inside the position object or as a
/// sibling of it. When both are present with the same id nothing needs
/// resolving; this only applies when they disagree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityIdConflict {
    /// Keep the inline id and ignore the sibling one.
    #[default]
    PreferInline,
    /// Fail the decode with a malformed `spectatedEntityID`.
    Reject,
}

/// Configuration for a [`LegacyDecoder`](crate::LegacyDecoder).
/// Every field has a default so hosts may pass a partial JSON object.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub entity_id_conflict: EntityIdConflict,
}

impl Config {
    /// Config that rejects inputs the legacy format leaves ambiguous.
    pub fn strict() -> Self {
        Self {
            entity_id_conflict: EntityIdConflict::Reject,
        }
    }
}
