use std::path::Path;
use tracing::info;

use crate::config::gwp::{GwpWeights, MassUnit};
use crate::core::compositor::compose;
use crate::core::emission_factors::EmissionFactorTable;
use crate::data::breakdowns::{build_technology_splits, BreakdownSources};
use crate::data::gas_overrides::standard_overrides;
use crate::data::generation_slicer::{load_generation, GenerationBlocks};
use crate::models::intensity::IntensityResults;
use crate::models::technology_split::TechnologySplits;
use crate::utils::errors::Result;
use crate::utils::logging::{self, OperationCategory};

/// The scenario-independent inputs: technology splits and the rate table.
/// Load once, then run against as many workbooks and weightings as needed.
#[derive(Debug, Clone)]
pub struct Pipeline {
    splits: TechnologySplits,
    factors: EmissionFactorTable,
}

impl Pipeline {
    pub fn load(sources: &BreakdownSources) -> Result<Self> {
        let _timing = logging::start_timing("Pipeline::load", OperationCategory::DataLoad);
        sources.check()?;
        let overrides = standard_overrides(sources)?;
        let splits = build_technology_splits(sources, &overrides)?;
        Ok(Self::from_parts(splits, EmissionFactorTable::default()))
    }

    pub fn from_parts(splits: TechnologySplits, factors: EmissionFactorTable) -> Self {
        Self { splits, factors }
    }

    pub fn splits(&self) -> &TechnologySplits {
        &self.splits
    }

    /// Weights are checked before the workbook is touched.
    pub fn run(&self, workbook: &Path, gwp: &GwpWeights, unit: MassUnit) -> Result<IntensityResults> {
        gwp.validate()?;
        let generation = {
            let _timing = logging::start_timing("load_generation", OperationCategory::DataLoad);
            load_generation(workbook)?
        };
        self.run_generation(&generation, gwp, unit)
    }

    pub fn run_generation(&self, generation: &GenerationBlocks, gwp: &GwpWeights, unit: MassUnit) -> Result<IntensityResults> {
        let rates = self.factors.co2e_rates(gwp, unit)?;
        let regions = compose(generation, &self.splits, &rates, unit);
        info!("Computed intensities for {} regions ({}/kWh CO2e)", regions.len(), unit);
        Ok(IntensityResults {
            gwp: *gwp,
            unit,
            regions,
        })
    }
}

/// One-shot run: load every source, then compute for a single workbook.
pub fn compute_intensities(
    workbook: &Path,
    sources: &BreakdownSources,
    gwp: &GwpWeights,
    unit: MassUnit,
) -> Result<IntensityResults> {
    gwp.validate()?;
    Pipeline::load(sources)?.run(workbook, gwp, unit)
}
