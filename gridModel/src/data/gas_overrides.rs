// Regional natural gas splits that replace the plant-list default
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::config::constants::{
    COGENERATION_CAPACITY_FACTOR, COMBINED_CYCLE_CAPACITY_FACTOR, CONTRACT_OVERRIDE_REGION,
    DISPATCH_FIRST_YEAR, DISPATCH_OUTPUT, DISPATCH_OVERRIDE_REGION, DISPATCH_OVERRIDE_YEAR,
    DISPATCH_SCENARIO, SIMPLE_CYCLE_CAPACITY_FACTOR,
};
use crate::data::breakdowns::{round_fraction, BreakdownSources, GasBucket, GasGeneration};
use crate::data::csv_utils::{
    column_index, csv_reader, open_source, parse_number, parse_number_or_zero, required_column,
};
use crate::models::region::Region;
use crate::models::technology_split::{GasSplit, TechnologySplits};
use crate::utils::errors::Result;

/// Supplies a natural gas split for one region, applied after the default pass.
pub trait GasSplitOverride: Send + Sync {
    fn name(&self) -> &str;

    fn region(&self) -> Region;

    /// `None` keeps the default split.
    fn gas_split(&self) -> Option<GasSplit>;
}

pub fn apply_gas_overrides(splits: &mut TechnologySplits, overrides: &[Box<dyn GasSplitOverride>]) {
    for provider in overrides {
        let region = provider.region();
        match provider.gas_split() {
            Some(split) => {
                info!(
                    "{}: natural gas split for {} set to CC {:.3} / CO {:.3} / SC {:.3}",
                    provider.name(),
                    region,
                    split.combined_cycle,
                    split.cogeneration,
                    split.simple_cycle
                );
                splits.region_mut(region).gas = split;
            }
            None => warn!(
                "{}: no usable data, keeping default natural gas split for {}",
                provider.name(),
                region
            ),
        }
    }
}

/// The dispatch-projection override for AB and the contracted-capacity override for ON.
pub fn standard_overrides(sources: &BreakdownSources) -> Result<Vec<Box<dyn GasSplitOverride>>> {
    let dispatch = DispatchProjectionOverride::load(
        &sources.dispatch_projection,
        DISPATCH_OVERRIDE_REGION,
        DISPATCH_SCENARIO,
        DISPATCH_OVERRIDE_YEAR,
    )?;
    let contracts = ContractedCapacityOverride::load(&sources.contracted_generation, CONTRACT_OVERRIDE_REGION)?;
    Ok(vec![Box::new(dispatch), Box::new(contracts)])
}

/// Gas technology shares from a system operator's dispatch-scenario
/// generation projection, taken at a single year.
#[derive(Debug, Clone)]
pub struct DispatchProjectionOverride {
    region: Region,
    year: u32,
    /// Projected generation (MWh) per year
    projection: BTreeMap<u32, GasGeneration>,
}

impl DispatchProjectionOverride {
    pub fn load(path: &Path, region: Region, scenario: &str, year: u32) -> Result<Self> {
        let file = open_source(path, "dispatch scenario projection")?;
        Self::from_reader(file, &path.display().to_string(), region, scenario, year)
    }

    /// Rows matching `scenario` with generation output are read. Without a
    /// `Year` column, rows of each fuel type are numbered from the first
    /// projection year in file order.
    pub fn from_reader<R: Read>(reader: R, source_name: &str, region: Region, scenario: &str, year: u32) -> Result<Self> {
        let mut reader = csv_reader(reader);
        let headers = reader.headers()?.clone();
        let scenario_col = required_column(&headers, "Scenario", source_name)?;
        let output_col = required_column(&headers, "Output", source_name)?;
        let fuel_col = required_column(&headers, "Fuel Type", source_name)?;
        let value_col = required_column(&headers, "Value", source_name)?;
        let year_col = column_index(&headers, "Year");

        let mut projection: BTreeMap<u32, GasGeneration> = BTreeMap::new();
        let mut next_year: BTreeMap<GasBucket, u32> = BTreeMap::new();

        for record in reader.records() {
            let record = record?;
            if record.get(scenario_col).map(str::trim) != Some(scenario)
                || record.get(output_col).map(str::trim) != Some(DISPATCH_OUTPUT)
            {
                continue;
            }
            let bucket = match record.get(fuel_col).map(str::trim) {
                Some("Natural Gas Combined-Cycle") => GasBucket::CombinedCycle,
                Some("Cogeneration") => GasBucket::Cogeneration,
                Some("Natural Gas Simple-Cycle") => GasBucket::SimpleCycle,
                _ => continue,
            };
            let value = parse_number_or_zero(record.get(value_col).unwrap_or(""), source_name)?;
            let stated_year = match year_col.and_then(|c| record.get(c)) {
                Some(raw) => {
                    let parsed = parse_number(raw, source_name)?;
                    if parsed.is_none() {
                        debug!("{}: blank year for {:?}, numbering in file order", source_name, bucket);
                    }
                    parsed
                }
                None => None,
            };
            let row_year = match stated_year {
                Some(y) => y as u32,
                None => {
                    let counter = next_year.entry(bucket).or_insert(DISPATCH_FIRST_YEAR);
                    let y = *counter;
                    *counter += 1;
                    y
                }
            };
            projection.entry(row_year).or_default().add(bucket, value);
        }

        debug!("{}: {} projection years for scenario {}", source_name, projection.len(), scenario);
        Ok(Self { region, year, projection })
    }

    pub fn projection(&self) -> &BTreeMap<u32, GasGeneration> {
        &self.projection
    }
}

impl GasSplitOverride for DispatchProjectionOverride {
    fn name(&self) -> &str {
        "dispatch projection"
    }

    fn region(&self) -> Region {
        self.region
    }

    fn gas_split(&self) -> Option<GasSplit> {
        self.projection.get(&self.year).and_then(GasGeneration::shares)
    }
}

/// Gas technology shares from active contracted capacity, weighted by the
/// capacity factor of each turbine class.
#[derive(Debug, Clone)]
pub struct ContractedCapacityOverride {
    region: Region,
    /// Contracted capacity (MW) per bucket
    capacity: GasGeneration,
}

impl ContractedCapacityOverride {
    pub fn load(path: &Path, region: Region) -> Result<Self> {
        let file = open_source(path, "contracted generation list")?;
        Self::from_reader(file, &path.display().to_string(), region)
    }

    pub fn from_reader<R: Read>(reader: R, source_name: &str, region: Region) -> Result<Self> {
        let mut reader = csv_reader(reader);
        let headers = reader.headers()?.clone();
        let fuel_col = required_column(&headers, "Fuel Type", source_name)?;
        let tech_col = required_column(&headers, "Technology", source_name)?;
        let capacity_col = required_column(&headers, "Contract Capacity (MW)", source_name)?;

        let mut capacity = GasGeneration::default();
        for record in reader.records() {
            let record = record?;
            if record.get(fuel_col).map(str::trim) != Some("Natural Gas") {
                continue;
            }
            let technology = record.get(tech_col).unwrap_or("").trim();
            let Some(bucket) = Self::classify(technology) else {
                debug!("{}: unclassified gas technology \"{}\" skipped", source_name, technology);
                continue;
            };
            capacity.add(bucket, parse_number_or_zero(record.get(capacity_col).unwrap_or(""), source_name)?);
        }
        Ok(Self { region, capacity })
    }

    pub fn classify(technology: &str) -> Option<GasBucket> {
        match technology {
            "Rankine Cycle" | "Simple Cycle" | "Simple Cycle CHP" => Some(GasBucket::SimpleCycle),
            "Combined Cycle" | "Combined Cycle CHP" => Some(GasBucket::CombinedCycle),
            "Combined Heat and Power" => Some(GasBucket::Cogeneration),
            _ => None,
        }
    }
}

impl GasSplitOverride for ContractedCapacityOverride {
    fn name(&self) -> &str {
        "contracted capacity"
    }

    fn region(&self) -> Region {
        self.region
    }

    fn gas_split(&self) -> Option<GasSplit> {
        let sc = self.capacity.simple_cycle * SIMPLE_CYCLE_CAPACITY_FACTOR;
        let cc = self.capacity.combined_cycle * COMBINED_CYCLE_CAPACITY_FACTOR;
        let co = self.capacity.cogeneration * COGENERATION_CAPACITY_FACTOR;
        let total = sc.trunc() + cc.trunc() + co.trunc();
        if total == 0.0 {
            return None;
        }
        Some(GasSplit {
            combined_cycle: round_fraction(cc / total),
            cogeneration: round_fraction(co / total),
            simple_cycle: round_fraction(sc / total),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::region::RegionTable;
    use crate::models::technology_split::{CoalSplit, HydroSplit, OilSplit, TechnologySplit};

    const AESO: &str = "Scenario,Output,Fuel Type, Value
Dispatchable Dominant,Generation_MWh,Natural Gas Combined-Cycle,\"6,000,000\"
Dispatchable Dominant,Generation_MWh,Cogeneration,\"3,000,000\"
Dispatchable Dominant,Generation_MWh,Natural Gas Simple-Cycle,\"1,000,000\"
Renewables Dominant,Generation_MWh,Natural Gas Combined-Cycle,\"9,000,000\"
Dispatchable Dominant,Capacity_MW,Cogeneration,500
Dispatchable Dominant,Generation_MWh,Natural Gas Combined-Cycle,\"1,000\"
Dispatchable Dominant,Generation_MWh,Cogeneration,\"1,000\"
Dispatchable Dominant,Generation_MWh,Natural Gas Simple-Cycle,\"2,000\"
";

    #[test]
    fn test_dispatch_projection_uses_first_year() {
        let provider = DispatchProjectionOverride::from_reader(
            AESO.as_bytes(), "AESO", Region::AB, DISPATCH_SCENARIO, 2022,
        )
        .unwrap();
        assert_eq!(provider.projection().len(), 2);
        let split = provider.gas_split().unwrap();
        assert_eq!(split.combined_cycle, 0.6);
        assert_eq!(split.cogeneration, 0.3);
        assert_eq!(split.simple_cycle, 0.1);

        let later = DispatchProjectionOverride::from_reader(
            AESO.as_bytes(), "AESO", Region::AB, DISPATCH_SCENARIO, 2023,
        )
        .unwrap();
        assert_eq!(later.gas_split().unwrap().simple_cycle, 0.5);
    }

    #[test]
    fn test_dispatch_projection_explicit_years() {
        let data = "Scenario,Output,Fuel Type,Value,Year
Dispatchable Dominant,Generation_MWh,Cogeneration,10,2030
Dispatchable Dominant,Generation_MWh,Natural Gas Combined-Cycle,30,2030
";
        let provider = DispatchProjectionOverride::from_reader(
            data.as_bytes(), "AESO", Region::AB, DISPATCH_SCENARIO, 2022,
        )
        .unwrap();
        assert!(provider.gas_split().is_none());
        assert_eq!(provider.projection()[&2030].total(), 40.0);
    }

    #[test]
    fn test_dispatch_projection_blank_year_numbered_in_order() {
        let data = "Scenario,Output,Fuel Type,Value,Year
Dispatchable Dominant,Generation_MWh,Cogeneration,10,
Dispatchable Dominant,Generation_MWh,Natural Gas Combined-Cycle,30,
Dispatchable Dominant,Generation_MWh,Natural Gas Combined-Cycle,50,2030
";
        let provider = DispatchProjectionOverride::from_reader(
            data.as_bytes(), "AESO", Region::AB, DISPATCH_SCENARIO, 2022,
        )
        .unwrap();
        assert!(!provider.projection().contains_key(&0));
        assert_eq!(provider.projection()[&2022].total(), 40.0);
        assert_eq!(provider.gas_split().unwrap().combined_cycle, 0.75);
        assert_eq!(provider.projection()[&2030].combined_cycle, 50.0);
    }

    const IESO: &str = "Contract Type,Fuel Type,Technology,Contract Capacity (MW)
CES,Natural Gas,Combined Cycle,1000
CES,Natural Gas,Simple Cycle,500
CES,Natural Gas,Rankine Cycle,500
CES,Natural Gas,Combined Heat and Power,500
CES,Natural Gas,Reciprocating Engine,700
CES,Wind,Simple Cycle,900
";

    #[test]
    fn test_contracted_capacity_split() {
        let provider = ContractedCapacityOverride::from_reader(IESO.as_bytes(), "IESO", Region::ON).unwrap();
        let split = provider.gas_split().unwrap();
        // SC 1000 MW and CC 1000 MW at 0.141, CO 500 MW at 0.588
        assert_eq!(split.simple_cycle, 0.245);
        assert_eq!(split.combined_cycle, 0.245);
        assert_eq!(split.cogeneration, 0.51);
        assert!((split.total() - 1.0).abs() <= 1e-3);
    }

    #[test]
    fn test_contract_classification() {
        assert_eq!(ContractedCapacityOverride::classify("Simple Cycle CHP"), Some(GasBucket::SimpleCycle));
        assert_eq!(ContractedCapacityOverride::classify("Combined Cycle CHP"), Some(GasBucket::CombinedCycle));
        assert_eq!(ContractedCapacityOverride::classify("Combined Heat and Power"), Some(GasBucket::Cogeneration));
        assert_eq!(ContractedCapacityOverride::classify("Reciprocating Engine"), None);
    }

    struct Fixed(Option<GasSplit>);

    impl GasSplitOverride for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }
        fn region(&self) -> Region {
            Region::NB
        }
        fn gas_split(&self) -> Option<GasSplit> {
            self.0
        }
    }

    fn uniform_splits(gas: GasSplit) -> TechnologySplits {
        TechnologySplits::new(RegionTable::filled(TechnologySplit {
            hydro: HydroSplit { reservoir: 0.5, river: 0.5 },
            coal: CoalSplit { bituminous: 1.0, sub_bituminous: 0.0, lignite: 0.0 },
            oil: OilSplit::EVEN,
            gas,
            solar_capacity_factor: 0.15,
            wind_capacity_factor: 0.3,
        }))
    }

    #[test]
    fn test_apply_overrides_only_touches_their_region() {
        let default = GasSplit { combined_cycle: 1.0, cogeneration: 0.0, simple_cycle: 0.0 };
        let replaced = GasSplit { combined_cycle: 0.2, cogeneration: 0.3, simple_cycle: 0.5 };
        let mut splits = uniform_splits(default);
        let overrides: Vec<Box<dyn GasSplitOverride>> = vec![Box::new(Fixed(Some(replaced)))];
        apply_gas_overrides(&mut splits, &overrides);
        assert_eq!(splits.region(Region::NB).gas, replaced);
        assert_eq!(splits.region(Region::NS).gas, default);

        let mut splits = uniform_splits(default);
        let overrides: Vec<Box<dyn GasSplitOverride>> = vec![Box::new(Fixed(None))];
        apply_gas_overrides(&mut splits, &overrides);
        assert_eq!(splits.region(Region::NB).gas, default);
    }
}
