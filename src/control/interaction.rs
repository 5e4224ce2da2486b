//! Pointer interaction over the ring
//!
//! Moves preview a slot, clicks and taps commit it. A pointer inside the dead
//! zone produces no selection and leaves the state alone; in two-actor mode
//! that same disc is the avatar control, so every point belongs to exactly one
//! of the two.

use glam::Vec2;

use crate::ring::{Origin, RingGeometry, Selection};

/// What lies under a pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Ring(usize),
    /// Inside the dead zone with the avatar control enabled
    Avatar,
    /// Inside the dead zone with no avatar
    Excluded,
}

/// Per-pointer state: `Idle → Hover → Committed → Idle`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerState {
    #[default]
    Idle,
    Hover(usize),
    Committed(usize),
}

#[derive(Debug, Clone)]
pub struct InteractionZone {
    geometry: RingGeometry,
    avatar: bool,
    state: PointerState,
}

impl InteractionZone {
    pub fn new(geometry: RingGeometry, avatar: bool) -> Self {
        Self {
            geometry,
            avatar,
            state: PointerState::Idle,
        }
    }

    pub fn geometry(&self) -> &RingGeometry {
        &self.geometry
    }

    pub fn state(&self) -> PointerState {
        self.state
    }

    pub fn zone_at(&self, point: Vec2) -> Zone {
        match self.geometry.index_at(point) {
            Some(index) => Zone::Ring(index),
            None if self.avatar => Zone::Avatar,
            None => Zone::Excluded,
        }
    }

    /// Pointer moved. `None` inside the dead zone.
    pub fn hover(&mut self, point: Vec2) -> Option<Selection> {
        let selection = self.resolve(point, Origin::Hover)?;
        if let Some(index) = selection.index {
            self.state = PointerState::Hover(index);
        }
        Some(selection)
    }

    /// Click, tap or touch end. `None` inside the dead zone.
    pub fn commit(&mut self, point: Vec2) -> Option<Selection> {
        let selection = self.resolve(point, Origin::Commit)?;
        if let Some(index) = selection.index {
            self.state = PointerState::Committed(index);
        }
        Some(selection)
    }

    /// Pointer left the container or the gesture ended
    pub fn leave(&mut self) {
        self.state = PointerState::Idle;
    }

    fn resolve(&self, point: Vec2, origin: Origin) -> Option<Selection> {
        let selection = self.geometry.select(point, origin);
        selection.index.map(|_| selection)
    }
}
