mod api_error;
mod netback_api;

pub use api_error::*;
pub use netback_api::*;
