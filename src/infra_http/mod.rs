mod cookie_source_jar;
mod transport_reqwest;

pub use cookie_source_jar::*;
pub use transport_reqwest::*;
