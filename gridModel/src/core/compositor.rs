// Per-region, per-year intensity composition
use rayon::prelude::*;
use std::collections::BTreeMap;
use tracing::debug;

use crate::config::constants::*;
use crate::config::gwp::MassUnit;
use crate::core::emission_factors::Co2eRates;
use crate::data::generation_slicer::{GenerationBlock, GenerationBlocks};
use crate::models::fuel_category::{CategoryValues, FuelCategory};
use crate::models::intensity::{CategoryIntensity, RegionResult, YearIntensity};
use crate::models::region::Region;
use crate::models::technology_split::{Technology, TechnologySplit, TechnologySplits};
use crate::utils::logging::{self, OperationCategory};

/// Operating intensity of every category for one region, weighted by its
/// technology split.
pub fn operating_intensity(split: &TechnologySplit, rates: &Co2eRates) -> CategoryValues {
    use Technology::*;

    let mut values = [0.0; FuelCategory::COUNT];
    values[FuelCategory::Hydro.index()] =
        split.hydro.reservoir * rates[HydroReservoir] + split.hydro.river * rates[HydroRiver];
    values[FuelCategory::Wind.index()] = rates[Wind];
    values[FuelCategory::Biomass.index()] = WOOD_COGENERATION_SHARE * rates[WoodCogeneration]
        + (1.0 - WOOD_COGENERATION_SHARE) * rates[WoodSimple];
    values[FuelCategory::Solar.index()] = rates[SolarPv];
    values[FuelCategory::Uranium.index()] = rates[Nuclear];
    values[FuelCategory::Coal.index()] = split.coal.bituminous * rates[CoalBituminous]
        + split.coal.sub_bituminous * rates[CoalSubBituminous]
        + split.coal.lignite * rates[CoalLignite];
    values[FuelCategory::NaturalGas.index()] = split.gas.combined_cycle * rates[GasCombinedCycle]
        + split.gas.cogeneration * rates[GasCogeneration]
        + split.gas.simple_cycle * rates[GasSimpleCycle];
    values[FuelCategory::Oil.index()] =
        split.oil.diesel * rates[Diesel] + split.oil.heavy * rates[HeavyOil];
    values
}

/// Lifecycle intensity of every category. Wind and solar scale with the
/// ratio of the reference capacity factor to the region's own.
pub fn embodied_intensity(split: &TechnologySplit, unit: MassUnit) -> CategoryValues {
    let mut values = [0.0; FuelCategory::COUNT];
    values[FuelCategory::Hydro.index()] =
        EMBODIED_HYDRO_RESERVOIR * split.hydro.reservoir + EMBODIED_HYDRO_RIVER * split.hydro.river;
    values[FuelCategory::Wind.index()] =
        EMBODIED_WIND * capacity_ratio(REFERENCE_WIND_CAPACITY_FACTOR, split.wind_capacity_factor);
    values[FuelCategory::Biomass.index()] = EMBODIED_BIOMASS;
    values[FuelCategory::Solar.index()] =
        EMBODIED_SOLAR * capacity_ratio(REFERENCE_SOLAR_CAPACITY_FACTOR, split.solar_capacity_factor);
    values[FuelCategory::Uranium.index()] = EMBODIED_URANIUM;
    values[FuelCategory::Coal.index()] = EMBODIED_COAL;
    values[FuelCategory::NaturalGas.index()] = EMBODIED_NATURAL_GAS;
    values[FuelCategory::Oil.index()] = EMBODIED_OIL;

    let factor = unit.to_kg_factor();
    values.map(|v| v * factor)
}

// A missing capacity factor leaves the constant unscaled
fn capacity_ratio(reference: f64, actual: f64) -> f64 {
    if actual > 0.0 && actual.is_finite() {
        reference / actual
    } else {
        1.0
    }
}

fn share(part: f64, total: f64) -> f64 {
    if total == 0.0 {
        0.0
    } else {
        part / total
    }
}

/// All derived figures for one region-year.
pub fn compose_year(year: u32, volumes: &CategoryValues, operating: &CategoryValues, embodied: &CategoryValues) -> YearIntensity {
    let total_generation: f64 = volumes.iter().sum();
    let totals: Vec<f64> = operating.iter().zip(embodied).map(|(o, e)| o + e).collect();
    let carbon: Vec<f64> = totals.iter().zip(volumes).map(|(t, v)| t * v).collect();
    let total_carbon: f64 = carbon.iter().sum();

    let grid_intensity: f64 = FuelCategory::ALL
        .iter()
        .map(|c| share(volumes[c.index()], total_generation) * totals[c.index()])
        .sum();

    let categories = FuelCategory::ALL
        .iter()
        .map(|&category| {
            let i = category.index();
            let carbon_share = share(carbon[i], total_carbon);
            CategoryIntensity {
                category,
                generation_kwh: volumes[i],
                operating: operating[i],
                embodied: embodied[i],
                total: totals[i],
                electricity_share: share(volumes[i], total_generation),
                total_carbon: carbon[i],
                carbon_share,
                grid_contribution: carbon_share * grid_intensity,
            }
        })
        .collect();

    YearIntensity {
        year,
        grid_intensity,
        categories,
    }
}

fn compose_region(block: &GenerationBlock, split: &TechnologySplit, rates: &Co2eRates, unit: MassUnit) -> RegionResult {
    let operating = operating_intensity(split, rates);
    let embodied = embodied_intensity(split, unit);
    let years = block
        .volumes
        .iter()
        .map(|(&year, volumes)| (year, compose_year(year, volumes, &operating, &embodied)))
        .collect();
    RegionResult {
        region: block.region,
        years,
    }
}

/// Compose every region. Regions are independent and run in parallel; the
/// output is ordered by region and identical to a sequential run.
pub fn compose(
    generation: &GenerationBlocks,
    splits: &TechnologySplits,
    rates: &Co2eRates,
    unit: MassUnit,
) -> BTreeMap<Region, RegionResult> {
    let _timing = logging::start_timing("compose", OperationCategory::Composition);

    let results: Vec<RegionResult> = Region::ALL
        .par_iter()
        .map(|&region| compose_region(&generation[region], splits.region(region), rates, unit))
        .collect();

    debug!("Composed intensities for {} regions", results.len());
    results.into_iter().map(|r| (r.region, r)).collect()
}
