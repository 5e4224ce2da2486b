//! Synchronization with the backend
//!
//! Everything runs on one cooperative thread. Network calls are the only
//! suspension points, nothing orders their responses, and nothing aborts a
//! request once issued.

pub mod backend;
pub mod cadence;
pub mod poll;
pub mod publish;

pub use backend::{Backend, FORM_CONTENT_TYPE, PublishRequest};
pub use cadence::{Cadence, CancelToken};
pub use poll::{PollLoop, PollStats};
pub use publish::{OptimisticPaint, PublishChannel, PublishStats};
