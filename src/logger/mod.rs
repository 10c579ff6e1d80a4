//! Tracing bootstrap. Starts at `info` and is reloaded from `log.filter` once
//! settings are parsed. See `bin/logger_demo.rs`.

mod logger;
pub use logger::*;

pub use tracing::{debug, error, info, trace, warn};
