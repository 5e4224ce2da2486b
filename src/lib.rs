//! LED Ring - browser viewer and controller for an addressable light ring
//!
//! Core modules:
//! - `ring`: Geometry, slot colours and snapshot decoding
//! - `sync`: Backend boundary, poll loop and publish channel
//! - `control`: Pointer interaction, player identity and the controller
//! - `settings`: Deployment configuration
//! - `sim`: In-process simulated backend
//! - `platform`: Browser glue (fetch, DOM, timers, input)

pub mod control;
pub mod error;
pub mod platform;
pub mod ring;
pub mod settings;
pub mod sim;
pub mod sync;

pub use error::{ConfigError, SnapshotError, TransportError};
pub use settings::{Role, RingSettings};

use glam::Vec2;

/// Deployment defaults
pub mod consts {
    /// Number of slots on the physical ring
    pub const LED_COUNT: usize = 200;
    /// Gap between the ring and the container edge (pixels)
    pub const LED_SPACING: f32 = 2.0;
    /// Viewer poll frequency (cycles per second)
    pub const UPDATE_FREQUENCY: f32 = 20.0;
    /// Rendered slot diameter (pixels)
    pub const LED_SIZE: f32 = 10.0;
    /// Hex characters per slot in a snapshot
    pub const HEX_PER_SLOT: usize = 6;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: Vec2) -> (f32, f32) {
    (pos.length(), pos.y.atan2(pos.x))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_polar_round_trip() {
        let p = polar_to_cartesian(50.0, -PI / 3.0);
        let (r, theta) = cartesian_to_polar(p);
        assert!((r - 50.0).abs() < 1e-4);
        assert!((theta + PI / 3.0).abs() < 1e-5);
    }
}
