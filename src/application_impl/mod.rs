mod api_client;
mod netback_api_impl;

pub use api_client::*;
pub use netback_api_impl::*;
