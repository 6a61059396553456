//! The tiled FORCE kernel: halo staging, reflective walls, central
//! fluxes, conservative updates, and the stage orchestration that
//! ties them together.

pub mod barrier;
pub mod boundary;
pub mod flux;
pub mod halo_loader;
pub mod sweep;
pub mod tile;
pub mod update;

pub use barrier::*;
pub use boundary::*;
pub use flux::*;
pub use halo_loader::*;
pub use sweep::*;
pub use tile::*;
pub use update::*;
