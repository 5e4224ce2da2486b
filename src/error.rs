//! Error types
//!
//! Poll and publish tasks never surface these to the user; they are logged
//! and counted at the task boundary.

/// Invalid deployment configuration
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("ring must have at least one slot")]
    EmptyRing,

    #[error("ring radius must be positive and finite, got {0}")]
    Radius(f32),

    #[error("container must be positive and finite, got {width}x{height}")]
    Container { width: f32, height: f32 },

    #[error("dead zone radius {dead_zone} must be non-negative and smaller than the ring radius {radius}")]
    DeadZone { dead_zone: f32, radius: f32 },

    #[error("cadence must be a positive frequency, got {0} Hz")]
    Cadence(f32),

    #[error("two-actor mode needs a dead zone for the avatar control")]
    AvatarWithoutDeadZone,

    #[error("two-actor mode needs a player identity")]
    MissingIdentity,

    #[error("unknown player colour: {0}")]
    UnknownColor(String),

    #[error("unrecognized page path: {0}")]
    Route(String),
}

/// A snapshot body that can't be applied
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot length {actual} does not match {expected} ({slots} slots)")]
    WrongLength {
        expected: usize,
        actual: usize,
        slots: usize,
    },

    #[error("slot {slot} is not a 6-digit hex colour")]
    InvalidHex { slot: usize },

    #[error("snapshot body is not a valid JSON string: {0}")]
    Json(String),
}

/// A backend request that failed before producing a usable response
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("backend answered with status {0}")]
    Status(u16),

    #[error("response body unreadable: {0}")]
    Body(String),
}
