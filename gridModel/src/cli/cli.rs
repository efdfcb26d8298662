use clap::Parser;
use std::path::{Path, PathBuf};

use crate::config::gwp::{GwpPreset, GwpWeights, MassUnit};
use crate::config::run_config::RunConfig;
use crate::config::scenario::Scenario;
use crate::models::region::Region;
use crate::utils::errors::Result;

#[derive(Parser, Debug)]
#[command(author, version, about = "Greenhouse-gas intensity of Canadian electricity generation", long_about = None)]
pub struct Args {
    #[arg(short, long, default_value = "data", help = "Directory holding the workbooks and breakdown sources")]
    data_dir: PathBuf,

    #[arg(short, long, default_value_t = Scenario::default(), help = "Scenario label, e.g. \"2023 Current\"")]
    scenario: Scenario,

    #[arg(long, default_value_t = false, conflicts_with_all = ["scenario", "workbook"])]
    all_scenarios: bool,

    #[arg(short, long, help = "Explicit generation workbook (or CSV export), bypassing the scenario catalog")]
    workbook: Option<PathBuf>,

    #[arg(long, default_value = "AR6", help = "GWP100 preset: AR5 or AR6")]
    gwp: String,

    #[arg(long, value_name = "CO2,CH4,N2O,SF6", conflicts_with = "gwp", help = "Custom GWP100 weights")]
    gwp_custom: Option<String>,

    #[arg(short, long, default_value = "kg", help = "Mass unit of the emission-rate table: kg or g")]
    unit: String,

    #[arg(short, long, default_value_t = Region::NATIONAL, help = "Region to summarise (code or name)")]
    region: Region,

    #[arg(short, long, default_value_t = 2025, help = "Year to summarise")]
    year: u32,

    #[arg(short, long, help = "Write the full result set as JSON")]
    output: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    enable_timing: bool,

    #[arg(long, default_value_t = false)]
    debug_logging: bool,
}

impl Args {
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn scenario(&self) -> Scenario {
        self.scenario
    }

    pub fn all_scenarios(&self) -> bool {
        self.all_scenarios
    }

    pub fn workbook(&self) -> Option<&Path> {
        self.workbook.as_deref()
    }

    pub fn gwp(&self) -> &str {
        &self.gwp
    }

    pub fn gwp_custom(&self) -> Option<&str> {
        self.gwp_custom.as_deref()
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn year(&self) -> u32 {
        self.year
    }

    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }

    pub fn enable_timing(&self) -> bool {
        self.enable_timing
    }

    pub fn debug_logging(&self) -> bool {
        self.debug_logging
    }

    /// Resolve the weight and unit options into a run configuration.
    pub fn to_run_config(&self) -> Result<RunConfig> {
        let gwp = match self.gwp_custom() {
            Some(list) => GwpWeights::parse_list(list)?,
            None => GwpWeights::preset(self.gwp().parse::<GwpPreset>()?),
        };
        let scenarios = if self.all_scenarios {
            Scenario::ALL.to_vec()
        } else {
            vec![self.scenario]
        };
        Ok(RunConfig {
            data_dir: self.data_dir.clone(),
            scenarios,
            gwp,
            unit: self.unit().parse::<MassUnit>()?,
            workbook: self.workbook.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::errors::IntensityError;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["cangrid"]);
        let config = args.to_run_config().unwrap();
        assert_eq!(config.scenarios, vec![Scenario::Current2023]);
        assert_eq!(config.gwp, GwpWeights::preset(GwpPreset::Ar6));
        assert_eq!(config.unit, MassUnit::Kilograms);
        assert_eq!(args.region(), Region::Canada);
        assert_eq!(args.year(), 2025);
    }

    #[test]
    fn test_custom_weights_and_units() {
        let args = Args::parse_from([
            "cangrid", "--gwp-custom", "1,30,300,20000", "--unit", "g", "--region", "Ontario", "--all-scenarios",
        ]);
        let config = args.to_run_config().unwrap();
        assert_eq!(config.gwp.ch4, 30.0);
        assert_eq!(config.unit, MassUnit::Grams);
        assert_eq!(config.scenarios.len(), Scenario::ALL.len());
        assert_eq!(args.region(), Region::ON);
    }

    #[test]
    fn test_bad_weights_are_invalid_config() {
        let args = Args::parse_from(["cangrid", "--gwp-custom", "1,-2,3,4"]);
        assert!(matches!(args.to_run_config(), Err(IntensityError::InvalidConfig(_))));
        let args = Args::parse_from(["cangrid", "--gwp", "AR4"]);
        assert!(args.to_run_config().is_err());
    }

    #[test]
    fn test_scenario_flag() {
        let args = Args::parse_from(["cangrid", "--scenario", "2021 evolving"]);
        assert_eq!(args.scenario(), Scenario::Evolving2021);
        assert!(Args::try_parse_from(["cangrid", "--scenario", "2099 Utopia"]).is_err());
    }
}
