//! Slots, the ring they form, and the one-way render capability

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use glam::Vec2;

use super::color::Rgb;
use super::geometry::RingGeometry;
use super::snapshot::Snapshot;
use crate::error::SnapshotError;

/// One addressable position on the ring
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub index: usize,
    /// Top-left render position (pixels), fixed at construction
    pub position: Vec2,
    pub color: Rgb,
}

/// Where slot changes are drawn. The engine only ever writes to it.
pub trait RenderTarget {
    /// Create the visual for a slot (called once per slot at startup)
    fn place_slot(&mut self, slot: &Slot);

    fn paint_slot(&mut self, index: usize, color: Rgb);

    /// Highlight a hovered slot, or clear the highlight
    fn preview(&mut self, index: Option<usize>);

    /// Draw the central avatar control
    fn place_avatar(&mut self, _center: Vec2, _radius: f32, _color: Rgb) {}
}

/// Fixed-size ring of slots
#[derive(Debug, Clone)]
pub struct Ring {
    geometry: RingGeometry,
    slots: Vec<Slot>,
}

impl Ring {
    pub fn new(geometry: RingGeometry, base: Rgb) -> Self {
        let slots = (0..geometry.count())
            .map(|index| Slot {
                index,
                position: geometry.slot_origin(index),
                color: base,
            })
            .collect();
        Self { geometry, slots }
    }

    pub fn geometry(&self) -> &RingGeometry {
        &self.geometry
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn color(&self, index: usize) -> Option<Rgb> {
        self.slots.get(index).map(|s| s.color)
    }

    pub fn colors(&self) -> Vec<Rgb> {
        self.slots.iter().map(|s| s.color).collect()
    }

    /// Returns true if the colour changed
    pub fn set_color(&mut self, index: usize, color: Rgb) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) if slot.color != color => {
                slot.color = color;
                true
            }
            _ => false,
        }
    }
}

/// A ring paired with the target that draws it
pub struct RingView {
    ring: Ring,
    target: Box<dyn RenderTarget>,
    preview: Option<usize>,
}

/// The view as shared between the poll loop and the controller
pub type SharedView = Rc<RefCell<RingView>>;

impl RingView {
    pub fn new(ring: Ring, mut target: Box<dyn RenderTarget>) -> Self {
        for slot in ring.slots() {
            target.place_slot(slot);
        }
        Self {
            ring,
            target,
            preview: None,
        }
    }

    pub fn shared(self) -> SharedView {
        Rc::new(RefCell::new(self))
    }

    pub fn ring(&self) -> &Ring {
        &self.ring
    }

    pub fn preview_index(&self) -> Option<usize> {
        self.preview
    }

    /// Overwrite every slot with the snapshot. Returns the number of slots repainted.
    pub fn apply_snapshot(&mut self, snapshot: &Snapshot) -> Result<usize, SnapshotError> {
        if snapshot.len() != self.ring.len() {
            return Err(SnapshotError::WrongLength {
                expected: self.ring.len() * crate::consts::HEX_PER_SLOT,
                actual: snapshot.len() * crate::consts::HEX_PER_SLOT,
                slots: self.ring.len(),
            });
        }
        let mut repainted = 0;
        for (index, &color) in snapshot.colors().iter().enumerate() {
            if self.ring.set_color(index, color) {
                self.target.paint_slot(index, color);
                repainted += 1;
            }
        }
        Ok(repainted)
    }

    pub fn paint(&mut self, index: usize, color: Rgb) {
        if self.ring.set_color(index, color) {
            self.target.paint_slot(index, color);
        }
    }

    /// Paint `index` and reset every other slot to `base`
    pub fn paint_exclusive(&mut self, index: usize, color: Rgb, base: Rgb) {
        for i in 0..self.ring.len() {
            self.paint(i, if i == index { color } else { base });
        }
    }

    pub fn set_preview(&mut self, index: Option<usize>) {
        if self.preview != index {
            self.preview = index;
            self.target.preview(index);
        }
    }

    pub fn place_avatar(&mut self, radius: f32, color: Rgb) {
        let center = self.ring.geometry().center();
        self.target.place_avatar(center, radius, color);
    }
}

/// Everything a [`MemoryRenderer`] has been told to draw
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub positions: Vec<Vec2>,
    pub colors: Vec<Rgb>,
    pub preview: Option<usize>,
    pub avatar: Option<(Vec2, f32, Rgb)>,
    /// Number of `paint_slot` calls received
    pub paints: usize,
}

/// Headless render target; clones share the same frame
#[derive(Debug, Clone, Default)]
pub struct MemoryRenderer {
    frame: Rc<RefCell<Frame>>,
}

impl MemoryRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame(&self) -> Ref<'_, Frame> {
        self.frame.borrow()
    }

    /// Ring rendered as one hex string, the same shape as a snapshot
    pub fn hex(&self) -> String {
        self.frame.borrow().colors.iter().map(Rgb::to_hex).collect()
    }
}

impl RenderTarget for MemoryRenderer {
    fn place_slot(&mut self, slot: &Slot) {
        let mut frame = self.frame.borrow_mut();
        if frame.positions.len() <= slot.index {
            frame.positions.resize(slot.index + 1, Vec2::ZERO);
            frame.colors.resize(slot.index + 1, slot.color);
        }
        frame.positions[slot.index] = slot.position;
        frame.colors[slot.index] = slot.color;
    }

    fn paint_slot(&mut self, index: usize, color: Rgb) {
        let mut frame = self.frame.borrow_mut();
        if let Some(c) = frame.colors.get_mut(index) {
            *c = color;
        }
        frame.paints += 1;
    }

    fn preview(&mut self, index: Option<usize>) {
        self.frame.borrow_mut().preview = index;
    }

    fn place_avatar(&mut self, center: Vec2, radius: f32, color: Rgb) {
        self.frame.borrow_mut().avatar = Some((center, radius, color));
    }
}
