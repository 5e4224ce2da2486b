//! Simulated state owner
//!
//! Stands in for the HTTP backend in tests and the native demo. State lives
//! in memory and advances only when [`SimulatedRing::tick`] is called.

pub mod backend;
pub mod ring;

pub use backend::SimulatedBackend;
pub use ring::{SimPlayer, SimulatedRing};
