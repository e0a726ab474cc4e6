//! Host-facing extension points.
//!
//! Observers receive engine notifications; timelines add rows below the
//! graph and follow the engine's lazy loading.

pub mod observer;
pub mod timeline;

pub use observer::TeleperiodObserver;
pub use timeline::Timeline;
