mod config;
mod data_controller;
mod engine;
mod navigation_controller;
mod render_frame_builder;
mod selection_controller;

pub use config::{MAX_SPAN_DAYS, TeleperiodConfig};
pub use data_controller::{CalendarSource, LoadKind, LoadRequest};
pub use engine::Teleperiod;
