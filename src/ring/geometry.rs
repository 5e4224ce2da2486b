//! Ring geometry: slot index ↔ angle ↔ screen position
//!
//! Screen coordinates grow downward, so angles increase clockwise on screen.
//! Index 0 sits at the top of the ring.
//!
//! - angle(i) = i/N · 2π − π/2
//! - point(i) = C + R · (cos, sin)(angle(i))
//! - index_at(P) = round((atan2(P − C) + π/2) / 2π · N) mod N, or `None`
//!   inside the dead zone

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::{cartesian_to_polar, polar_to_cartesian};

/// Whether a pointer event previews or finalizes a choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Origin {
    Hover,
    Commit,
}

/// A pointer position resolved against the ring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// `None` inside the dead zone
    pub index: Option<usize>,
    pub origin: Origin,
}

/// Fixed layout of a ring of `count` slots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RingGeometry {
    count: usize,
    center: Vec2,
    radius: f32,
    /// Rendered slot diameter (pixels)
    slot_size: f32,
    /// Central exclusion radius (pixels)
    dead_zone: Option<f32>,
}

impl RingGeometry {
    pub fn new(
        count: usize,
        center: Vec2,
        radius: f32,
        slot_size: f32,
        dead_zone: Option<f32>,
    ) -> Result<Self, ConfigError> {
        if count == 0 {
            return Err(ConfigError::EmptyRing);
        }
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ConfigError::Radius(radius));
        }
        if !center.is_finite() {
            return Err(ConfigError::Container {
                width: center.x * 2.0,
                height: center.y * 2.0,
            });
        }
        if let Some(r0) = dead_zone {
            if !r0.is_finite() || r0 < 0.0 || r0 >= radius {
                return Err(ConfigError::DeadZone {
                    dead_zone: r0,
                    radius,
                });
            }
        }
        Ok(Self {
            count,
            center,
            radius,
            slot_size: slot_size.max(0.0),
            dead_zone,
        })
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.center
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn slot_size(&self) -> f32 {
        self.slot_size
    }

    #[inline]
    pub fn dead_zone(&self) -> Option<f32> {
        self.dead_zone
    }

    /// Angular width of one slot's sector
    #[inline]
    pub fn sector_width(&self) -> f32 {
        TAU / self.count as f32
    }

    /// Angle of slot `index` (radians, index 0 at −π/2)
    pub fn angle(&self, index: usize) -> f32 {
        (index % self.count) as f32 / self.count as f32 * TAU - FRAC_PI_2
    }

    /// Screen point the slot is centered on
    pub fn point(&self, index: usize) -> Vec2 {
        self.center + polar_to_cartesian(self.radius, self.angle(index))
    }

    /// Top-left corner for rendering a slot of `slot_size` centered on `point`
    pub fn slot_origin(&self, index: usize) -> Vec2 {
        self.point(index) - Vec2::splat(self.slot_size / 2.0)
    }

    /// Nearest slot for an angle measured like `angle()`
    ///
    /// Any angle is accepted; negative sectors wrap to the end of the ring.
    pub fn index_for_angle(&self, angle: f32) -> usize {
        let sector = ((angle + FRAC_PI_2) / TAU * self.count as f32).round() as i64;
        wrap_index(self.count, sector)
    }

    pub fn in_dead_zone(&self, point: Vec2) -> bool {
        match self.dead_zone {
            Some(r0) => (point - self.center).length() < r0,
            None => false,
        }
    }

    /// Nearest slot for a screen point, `None` inside the dead zone
    pub fn index_at(&self, point: Vec2) -> Option<usize> {
        if self.in_dead_zone(point) {
            return None;
        }
        let (_, theta) = cartesian_to_polar(point - self.center);
        Some(self.index_for_angle(theta))
    }

    pub fn select(&self, point: Vec2, origin: Origin) -> Selection {
        Selection {
            index: self.index_at(point),
            origin,
        }
    }

    /// Shortest signed step count from `from` to `to` (positive = clockwise)
    pub fn circular_distance(&self, from: usize, to: usize) -> i64 {
        circular_distance(self.count, from, to)
    }

    /// Index `delta` steps away from `index`, wrapping around the ring
    pub fn offset(&self, index: usize, delta: i64) -> usize {
        wrap_index(self.count, index as i64 + delta)
    }
}

/// Shortest signed step count between two indices on a ring of `count` slots
pub fn circular_distance(count: usize, from: usize, to: usize) -> i64 {
    let n = count as i64;
    let dist = (to as i64 - from as i64).rem_euclid(n);
    if dist > n / 2 { dist - n } else { dist }
}

/// Wrap any signed index into `[0, count)`
#[inline]
pub fn wrap_index(count: usize, index: i64) -> usize {
    index.rem_euclid(count as i64) as usize
}
