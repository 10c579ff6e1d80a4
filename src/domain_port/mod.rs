mod cookie_source;
mod navigator;
mod transport;

pub use cookie_source::*;
pub use navigator::*;
pub use transport::*;
