//! Ring model
//!
//! Pure geometry and colour handling. Nothing in here touches the network or
//! the DOM; rendering goes through the [`RenderTarget`] trait.

pub mod color;
pub mod geometry;
pub mod snapshot;
pub mod view;

pub use color::{ColorIdentity, Rgb};
pub use geometry::{Origin, RingGeometry, Selection};
pub use snapshot::{Snapshot, SnapshotCodec, WireFormat};
pub use view::{Frame, MemoryRenderer, RenderTarget, Ring, RingView, SharedView, Slot};
