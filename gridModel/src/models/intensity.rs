use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::gwp::{GwpWeights, MassUnit};
use crate::models::fuel_category::{CategoryValues, FuelCategory};
use crate::models::region::Region;

/// Per-category figures for one region and year.
///
/// Intensities are in the configured mass unit of CO2e per kWh, generation in
/// kWh and carbon in the configured mass unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryIntensity {
    pub category: FuelCategory,
    pub generation_kwh: f64,
    pub operating: f64,
    pub embodied: f64,
    pub total: f64,
    pub electricity_share: f64,
    pub total_carbon: f64,
    pub carbon_share: f64,
    pub grid_contribution: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearIntensity {
    pub year: u32,
    pub grid_intensity: f64,
    pub categories: Vec<CategoryIntensity>,
}

impl YearIntensity {
    pub fn category(&self, category: FuelCategory) -> &CategoryIntensity {
        &self.categories[category.index()]
    }

    pub fn total_generation(&self) -> f64 {
        self.categories.iter().map(|c| c.generation_kwh).sum()
    }

    pub fn total_carbon(&self) -> f64 {
        self.categories.iter().map(|c| c.total_carbon).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionResult {
    pub region: Region,
    pub years: BTreeMap<u32, YearIntensity>,
}

impl RegionResult {
    pub fn year(&self, year: u32) -> Option<&YearIntensity> {
        self.years.get(&year)
    }

    pub fn grid_intensity(&self, year: u32) -> Option<f64> {
        self.year(year).map(|y| y.grid_intensity)
    }

    /// Per-category rows for one year, in category order
    pub fn year_table(&self, year: u32) -> Option<&[CategoryIntensity]> {
        self.year(year).map(|y| y.categories.as_slice())
    }

    pub fn category(&self, year: u32, category: FuelCategory) -> Option<&CategoryIntensity> {
        self.year(year).map(|y| y.category(category))
    }

    /// Year-indexed grid intensity series
    pub fn grid_intensity_series(&self) -> BTreeMap<u32, f64> {
        self.years
            .iter()
            .map(|(&year, y)| (year, y.grid_intensity))
            .collect()
    }

    /// Year-indexed generation table in kWh, one column per fuel category
    pub fn generation_table(&self) -> BTreeMap<u32, CategoryValues> {
        self.years
            .iter()
            .map(|(&year, y)| {
                let mut volumes = [0.0; FuelCategory::COUNT];
                for c in &y.categories {
                    volumes[c.category.index()] = c.generation_kwh;
                }
                (year, volumes)
            })
            .collect()
    }
}

/// Full region x year x category result set handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntensityResults {
    pub gwp: GwpWeights,
    pub unit: MassUnit,
    pub regions: BTreeMap<Region, RegionResult>,
}

impl IntensityResults {
    pub fn region(&self, region: Region) -> &RegionResult {
        &self.regions[&region]
    }
}
