pub mod api;
pub mod board;
pub mod config;
pub mod errors;
pub mod logging;
pub mod session;
pub mod ui;
pub mod validation;

pub use taskboard_common as common;
