//! Replay pathing core
//!
//! Decodes legacy camera-path keyframe sets into the current typed model in a
//! single forward pass over a `serde_json` token stream. Position keyframes
//! whose spectated entity id arrives as a sibling of the value object are
//! rebuilt as [`SpectatedPosition`] once the keyframe object closes.

pub mod config;
pub mod data;
pub mod error;
pub mod legacy;
pub mod objects;
pub mod value;

// Re-exports for consumers
pub use config::{Config, EntityIdConflict};
pub use data::{Keyframe, KeyframeSet};
pub use error::LegacyError;
pub use legacy::{parse_legacy_keyframe_sets, LegacyDecoder};
pub use objects::{ObjectDecoder, SerdeObjects};
pub use value::{PlainPosition, PositionRecord, PositionValue, SpectatedPosition, TimeValue};

/// Legacy decoding result type
pub type Result<T> = core::result::Result<T, LegacyError>;
