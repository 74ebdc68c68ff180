pub mod collab;
pub mod config;
pub mod controller;
pub mod error;
pub mod map;
pub mod messages;
pub mod phase;
pub mod trace;
pub mod ui;
pub mod verdict;

#[cfg(test)]
mod testing;

pub use collab::*;
pub use config::*;
pub use controller::*;
pub use error::*;
pub use map::*;
pub use messages::*;
pub use phase::*;
pub use trace::*;
pub use ui::*;
pub use verdict::*;
