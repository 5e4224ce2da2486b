//! In-process backend over a [`SimulatedRing`]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::ring::SimulatedRing;
use crate::error::TransportError;
use crate::ring::WireFormat;
use crate::sync::{Backend, PublishRequest};

/// Serves snapshots from a shared [`SimulatedRing`] and applies published
/// events to it immediately
pub struct SimulatedBackend {
    ring: Rc<RefCell<SimulatedRing>>,
    /// `JsonString` frames each snapshot as a quoted JSON string
    format: WireFormat,
    failing: Cell<bool>,
    published: RefCell<Vec<PublishRequest>>,
}

impl SimulatedBackend {
    pub fn new(ring: Rc<RefCell<SimulatedRing>>) -> Self {
        Self {
            ring,
            format: WireFormat::Raw,
            failing: Cell::new(false),
            published: RefCell::new(Vec::new()),
        }
    }

    pub fn with_format(mut self, format: WireFormat) -> Self {
        self.format = format;
        self
    }

    pub fn ring(&self) -> Rc<RefCell<SimulatedRing>> {
        Rc::clone(&self.ring)
    }

    /// While set, every request fails as a transport error
    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    /// Every event that reached the ring, oldest first
    pub fn published(&self) -> Vec<PublishRequest> {
        self.published.borrow().clone()
    }

    fn check(&self) -> Result<(), TransportError> {
        if self.failing.get() {
            return Err(TransportError::Request("simulated outage".into()));
        }
        Ok(())
    }
}

impl Backend for SimulatedBackend {
    async fn get_circle(&self) -> Result<String, TransportError> {
        self.check()?;
        let body = self.ring.borrow().get_circle();
        match self.format {
            WireFormat::JsonString => {
                serde_json::to_string(&body).map_err(|e| TransportError::Body(e.to_string()))
            }
            WireFormat::Raw | WireFormat::Auto => Ok(body),
        }
    }

    async fn publish(&self, request: PublishRequest) -> Result<(), TransportError> {
        self.check()?;
        let mut ring = self.ring.borrow_mut();
        match request {
            PublishRequest::TouchLed { index } => {
                ring.touch_led(index);
            }
            PublishRequest::PlayerPos { index, color } => ring.player_pos(color, index),
            PublishRequest::PlayerClick { color } => {
                ring.player_click(color);
            }
        }
        log::trace!("Simulated publish {:?}", request);
        self.published.borrow_mut().push(request);
        Ok(())
    }
}
