pub mod area;
pub mod geo;

// Foundation crate: small, well-tested geographic primitives only.
pub use area::*;
pub use geo::*;
