mod id;
mod request;
mod resource;
mod session;
mod token;

pub use id::*;
pub use request::*;
pub use resource::*;
pub use session::*;
pub use token::*;
