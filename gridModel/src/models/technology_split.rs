use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::region::{Region, RegionTable};

/// Sub-technologies carrying their own emission rates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Technology {
    CoalBituminous,
    CoalLignite,
    CoalSubBituminous,
    Diesel,
    HeavyOil,
    HydroReservoir,
    HydroRiver,
    GasCogeneration,
    GasCombinedCycle,
    GasConverted,
    GasSimpleCycle,
    Nuclear,
    SolarConcentrated,
    SolarPv,
    Wind,
    WoodCogeneration,
    WoodSimple,
}

impl Technology {
    pub const COUNT: usize = 17;

    pub const ALL: [Technology; Technology::COUNT] = [
        Technology::CoalBituminous,
        Technology::CoalLignite,
        Technology::CoalSubBituminous,
        Technology::Diesel,
        Technology::HeavyOil,
        Technology::HydroReservoir,
        Technology::HydroRiver,
        Technology::GasCogeneration,
        Technology::GasCombinedCycle,
        Technology::GasConverted,
        Technology::GasSimpleCycle,
        Technology::Nuclear,
        Technology::SolarConcentrated,
        Technology::SolarPv,
        Technology::Wind,
        Technology::WoodCogeneration,
        Technology::WoodSimple,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Technology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HydroSplit {
    pub reservoir: f64,
    pub river: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoalSplit {
    pub bituminous: f64,
    pub sub_bituminous: f64,
    pub lignite: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OilSplit {
    pub heavy: f64,
    pub diesel: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GasSplit {
    pub combined_cycle: f64,
    pub cogeneration: f64,
    pub simple_cycle: f64,
}

impl HydroSplit {
    pub fn total(&self) -> f64 {
        self.reservoir + self.river
    }
}

impl CoalSplit {
    pub fn total(&self) -> f64 {
        self.bituminous + self.sub_bituminous + self.lignite
    }
}

impl OilSplit {
    pub const EVEN: OilSplit = OilSplit { heavy: 0.5, diesel: 0.5 };

    pub fn total(&self) -> f64 {
        self.heavy + self.diesel
    }
}

impl GasSplit {
    pub fn total(&self) -> f64 {
        self.combined_cycle + self.cogeneration + self.simple_cycle
    }
}

/// Composition of every fuel category for one region, plus the capacity
/// factors that scale wind and solar embodied emissions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TechnologySplit {
    pub hydro: HydroSplit,
    pub coal: CoalSplit,
    pub oil: OilSplit,
    pub gas: GasSplit,
    pub solar_capacity_factor: f64,
    pub wind_capacity_factor: f64,
}

/// Technology splits for all regions; built once and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnologySplits(RegionTable<TechnologySplit>);

impl TechnologySplits {
    pub fn new(table: RegionTable<TechnologySplit>) -> Self {
        TechnologySplits(table)
    }

    pub fn region(&self, region: Region) -> &TechnologySplit {
        &self.0[region]
    }

    pub fn region_mut(&mut self, region: Region) -> &mut TechnologySplit {
        &mut self.0[region]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Region, &TechnologySplit)> {
        self.0.iter()
    }
}
