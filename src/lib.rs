pub mod build_info;
pub mod config;
pub mod error;
pub mod field;
pub mod image;
pub mod initial_conditions;
pub mod kernel;
pub mod par_slice;
pub mod simulator;
pub mod state;
pub mod swe_example;
pub mod util;
pub mod vtk;
