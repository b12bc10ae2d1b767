//! Field names of the legacy format.

pub const NAME: &str = "name";
pub const POSITION_KEYFRAMES: &str = "positionKeyframes";
pub const TIME_KEYFRAMES: &str = "timeKeyframes";
pub const CUSTOM_OBJECTS: &str = "customObjects";

pub const REAL_TIMESTAMP: &str = "realTimestamp";
pub const VALUE: &str = "value";
pub const POSITION: &str = "position";
pub const TIMESTAMP: &str = "timestamp";
pub const SPECTATED_ENTITY_ID: &str = "spectatedEntityID";

pub const X: &str = "x";
pub const Y: &str = "y";
pub const Z: &str = "z";
pub const YAW: &str = "yaw";
pub const PITCH: &str = "pitch";
pub const ROLL: &str = "roll";

/// Reported when the document root itself has the wrong shape.
pub const ROOT: &str = "<root>";
