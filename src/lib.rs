pub mod config;
pub mod error;
pub mod gamma;
pub mod geometric;
pub mod interp;
pub mod normalize;
pub mod profile;
pub mod raster;
pub mod stats;
pub mod threshold;
pub mod types;
pub mod utils;

pub use config::GammaConfig;
pub use error::{GammaError, Result};
pub use gamma::{GammaProfile, gamma_1d, gamma_2d, gamma_geometric};
pub use geometric::compute_distance;
pub use stats::GammaStats;
