//! teleperiod: working-time calendar core.
//!
//! An infinite horizontal day axis with lazily loaded working-time periods
//! and events, a navigation queue that keeps slides strictly ordered, and a
//! two-click selection snapped to working time. Drawing, pointer wiring and
//! data transport are left to the host through small traits.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{Teleperiod, TeleperiodConfig};
pub use error::{TeleperiodError, TeleperiodResult};
