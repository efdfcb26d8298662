// Fuel categories used for reporting generation and intensity
use serde::{Deserialize, Serialize};
use std::fmt;

/// Aggregate generation-source groupings, in the row order of the generation workbook.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FuelCategory {
    Hydro,
    Wind,
    Biomass,
    Solar,
    Uranium,
    Coal,
    NaturalGas,
    Oil,
}

/// One value per fuel category, indexed by [`FuelCategory::index`].
pub type CategoryValues = [f64; FuelCategory::COUNT];

impl FuelCategory {
    pub const COUNT: usize = 8;

    pub const ALL: [FuelCategory; FuelCategory::COUNT] = [
        FuelCategory::Hydro,
        FuelCategory::Wind,
        FuelCategory::Biomass,
        FuelCategory::Solar,
        FuelCategory::Uranium,
        FuelCategory::Coal,
        FuelCategory::NaturalGas,
        FuelCategory::Oil,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Label used by the presentation layer
    pub fn label(self) -> &'static str {
        match self {
            FuelCategory::Hydro => "Hydro / Wave / Tidal",
            FuelCategory::Wind => "Wind",
            FuelCategory::Biomass => "Biomass / Geothermal",
            FuelCategory::Solar => "Solar",
            FuelCategory::Uranium => "Uranium",
            FuelCategory::Coal => "Coal & Coke",
            FuelCategory::NaturalGas => "Natural Gas",
            FuelCategory::Oil => "Oil",
        }
    }

    pub fn is_fossil(self) -> bool {
        matches!(self, FuelCategory::Coal | FuelCategory::NaturalGas | FuelCategory::Oil)
    }
}

impl fmt::Display for FuelCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workbook_row_order() {
        let labels: Vec<&str> = FuelCategory::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(
            labels,
            vec![
                "Hydro / Wave / Tidal",
                "Wind",
                "Biomass / Geothermal",
                "Solar",
                "Uranium",
                "Coal & Coke",
                "Natural Gas",
                "Oil",
            ]
        );
    }
}
