//! Controller role
//!
//! Turns pointer and touch positions into slot previews and commits, and
//! publishes commits and avatar activations to the backend.

pub mod controller;
pub mod identity;
pub mod interaction;

pub use controller::{Controller, Outcome, PointerEvent};
pub use identity::PlayerIdentity;
pub use interaction::{InteractionZone, PointerState, Zone};
