// Module declarations for the grid emissions-intensity model

// Configuration: domain constants, GWP weights, scenarios, run settings
pub mod config {
    pub mod constants;
    pub mod gwp;
    pub mod scenario;
    pub mod run_config;
}

// Domain types
pub mod models {
    pub mod region;
    pub mod fuel_category;
    pub mod technology_split;
    pub mod intensity;
}

// Input loaders
pub mod data {
    pub mod csv_utils;
    pub mod sheet;
    pub mod generation_slicer;
    pub mod breakdowns;
    pub mod gas_overrides;
}

// Computation pipeline
pub mod core {
    pub mod emission_factors;
    pub mod compositor;
    pub mod pipeline;
}

// Utility functions
pub mod utils {
    pub mod errors;
    pub mod logging;
}

// CLI interface
pub mod cli {
    pub mod cli;
}

// Re-export commonly used items
pub use crate::config::gwp::{GwpPreset, GwpWeights, MassUnit};
pub use crate::config::scenario::Scenario;
pub use crate::core::pipeline::{compute_intensities, Pipeline};
pub use crate::data::breakdowns::BreakdownSources;
pub use crate::models::fuel_category::FuelCategory;
pub use crate::models::intensity::{IntensityResults, RegionResult};
pub use crate::models::region::Region;
pub use crate::utils::errors::{IntensityError, Result};
