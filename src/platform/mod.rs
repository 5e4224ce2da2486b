//! Browser glue
//!
//! Handles the wasm side of:
//! - HTTP (`fetch`)
//! - Slot rendering (DOM)
//! - Task spawning and the poll clock
//! - Pointer and touch input

#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod http;
#[cfg(target_arch = "wasm32")]
pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod spawn;
#[cfg(target_arch = "wasm32")]
pub mod timer;

#[cfg(target_arch = "wasm32")]
pub use dom::DomRenderer;
#[cfg(target_arch = "wasm32")]
pub use http::FetchBackend;
#[cfg(target_arch = "wasm32")]
pub use spawn::BrowserSpawner;
#[cfg(target_arch = "wasm32")]
pub use timer::PollTimer;
