mod cookie;
mod cookie_source_static;
mod navigator_redirect;
mod transport_fake;

pub use cookie::*;
pub use cookie_source_static::*;
pub use navigator_redirect::*;
pub use transport_fake::*;
