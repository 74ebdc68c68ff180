pub mod endpoints;
pub mod token;

pub use endpoints::*;
pub use token::*;
