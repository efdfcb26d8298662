// Per-technology emission rates and their CO2-equivalent weighting
use serde::{Deserialize, Serialize};
use std::ops::Index;
use tracing::debug;

use crate::config::constants::TRANSMISSION_EFFICIENCY;
use crate::config::gwp::{GwpWeights, MassUnit};
use crate::models::technology_split::Technology;
use crate::utils::errors::Result;
use crate::utils::logging::{self, OperationCategory};

/// Raw per-kWh emission rates of one technology.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GasRates {
    pub co2: f64,
    pub ch4: f64,
    pub n2o: f64,
    pub sf6: f64,
}

impl GasRates {
    pub const fn new(co2: f64, ch4: f64, n2o: f64, sf6: f64) -> Self {
        GasRates { co2, ch4, n2o, sf6 }
    }

    pub fn weighted(&self, gwp: &GwpWeights) -> f64 {
        self.co2 * gwp.co2 + self.ch4 * gwp.ch4 + self.n2o * gwp.n2o + self.sf6 * gwp.sf6
    }
}

// Indexed by Technology::index()
const PROCESS_RATES: [GasRates; Technology::COUNT] = [
    GasRates::new(1.08, 0.00134, 2.57e-6, 1.192e-9),     // coal, bituminous
    GasRates::new(0.956, 0.00079, 2.57e-6, 4.02e-10),    // coal, lignite
    GasRates::new(1.007, 0.00078, 1.86e-6, 1.74e-10),    // coal, sub-bituminous
    GasRates::new(0.993, 0.00096, 5.11e-5, 6.2e-9),      // diesel
    GasRates::new(1.135, 0.00074, 4.76e-5, 2.52e-9),     // heavy fuel oil
    GasRates::new(1.3e-4, 1.20e-7, 4.56e-9, 4e-12),      // hydro, reservoir
    GasRates::new(1.3e-4, 1.20e-7, 4.56e-9, 4e-12),      // hydro, run of river
    GasRates::new(0.29436, 0.00076, 5.11e-6, 1.53e-10),  // gas, cogeneration
    GasRates::new(0.349, 0.0009, 6.06e-6, 1.8e-10),      // gas, combined cycle
    GasRates::new(0.349, 0.00090, 6.06e-6, 1.8e-10),     // gas, converted steam
    GasRates::new(0.544, 0.00141, 9.47e-6, 2.16e-10),    // gas, simple cycle
    GasRates::new(0.00578, 1.06e-5, 4.17e-7, 2.23e-10),  // nuclear
    GasRates::new(0.00085, 1.126e-6, 5.28e-8, 3.61e-10), // concentrated solar
    GasRates::new(3.65e-6, 9.69e-9, 1.47e-10, 6.88e-13), // photovoltaic
    GasRates::new(5.35e-5, 1.94e-7, 1.74e-9, 4.53e-12),  // wind
    GasRates::new(0.03316, 5.93e-5, 4.03e-5, 4.82e-10),  // wood, cogeneration
    GasRates::new(0.06174, 0.00012, 8.62e-5, 8.77e-10),  // wood, simple
];

/// Static rate table. Constructed explicitly and passed down so composition
/// stays a pure function of its inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionFactorTable {
    rates: Vec<GasRates>,
}

impl Default for EmissionFactorTable {
    fn default() -> Self {
        EmissionFactorTable {
            rates: PROCESS_RATES.to_vec(),
        }
    }
}

impl EmissionFactorTable {
    pub fn rates(&self, technology: Technology) -> &GasRates {
        &self.rates[technology.index()]
    }

    pub fn with_rates(mut self, technology: Technology, rates: GasRates) -> Self {
        self.rates[technology.index()] = rates;
        self
    }

    /// One CO2e rate per technology:
    /// `(Σ rate·gwp) × unit factor / transmission efficiency`.
    ///
    /// Weights are validated first; nothing else can fail.
    pub fn co2e_rates(&self, gwp: &GwpWeights, unit: MassUnit) -> Result<Co2eRates> {
        let _timing = logging::start_timing("co2e_rates", OperationCategory::EmissionFactors);
        gwp.validate()?;

        let factor = unit.to_kg_factor();
        let mut values = [0.0; Technology::COUNT];
        for technology in Technology::ALL {
            values[technology.index()] =
                self.rates(technology).weighted(gwp) * factor / TRANSMISSION_EFFICIENCY;
        }
        debug!("CO2e rates computed for {} technologies in {}/kWh", Technology::COUNT, unit);
        Ok(Co2eRates { values, unit })
    }
}

/// CO2-equivalent emissions per kWh, per technology, in `unit`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Co2eRates {
    values: [f64; Technology::COUNT],
    unit: MassUnit,
}

impl Co2eRates {
    pub fn get(&self, technology: Technology) -> f64 {
        self.values[technology.index()]
    }

    pub fn unit(&self) -> MassUnit {
        self.unit
    }

    pub fn iter(&self) -> impl Iterator<Item = (Technology, f64)> + '_ {
        Technology::ALL.iter().map(move |&t| (t, self.get(t)))
    }
}

impl Index<Technology> for Co2eRates {
    type Output = f64;

    fn index(&self, technology: Technology) -> &f64 {
        &self.values[technology.index()]
    }
}
