use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::errors::{IntensityError, Result};

/// Historical 100-year global warming potential standards
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum GwpPreset {
    Ar5,
    Ar6,
}

impl Default for GwpPreset {
    fn default() -> Self {
        GwpPreset::Ar6
    }
}

impl FromStr for GwpPreset {
    type Err = IntensityError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AR5" => Ok(GwpPreset::Ar5),
            "AR6" => Ok(GwpPreset::Ar6),
            _ => Err(IntensityError::InvalidConfig(format!("Unknown GWP preset: {}", s))),
        }
    }
}

impl fmt::Display for GwpPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GwpPreset::Ar5 => write!(f, "AR5"),
            GwpPreset::Ar6 => write!(f, "AR6"),
        }
    }
}

/// GWP100 multipliers for the four gases carried by the emission-rate table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GwpWeights {
    pub co2: f64,
    pub ch4: f64,
    pub n2o: f64,
    pub sf6: f64,
}

impl GwpWeights {
    pub fn preset(preset: GwpPreset) -> Self {
        match preset {
            GwpPreset::Ar5 => GwpWeights { co2: 1.0, ch4: 28.0, n2o: 265.0, sf6: 23500.0 },
            GwpPreset::Ar6 => GwpWeights { co2: 1.0, ch4: 27.2, n2o: 273.0, sf6: 25200.0 },
        }
    }

    /// Custom weights; rejected unless all four are finite and positive.
    pub fn custom(co2: f64, ch4: f64, n2o: f64, sf6: f64) -> Result<Self> {
        let weights = GwpWeights { co2, ch4, n2o, sf6 };
        weights.validate()?;
        Ok(weights)
    }

    pub fn validate(&self) -> Result<()> {
        for (gas, value) in [("CO2", self.co2), ("CH4", self.ch4), ("N2O", self.n2o), ("SF6", self.sf6)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(IntensityError::InvalidConfig(format!(
                    "GWP weight for {} must be a positive finite number, got {}",
                    gas, value
                )));
            }
        }
        Ok(())
    }

    /// Parse "CO2,CH4,N2O,SF6" as given on the command line.
    pub fn parse_list(s: &str) -> Result<Self> {
        let values = s
            .split(',')
            .map(|v| {
                v.trim().parse::<f64>().map_err(|e| {
                    IntensityError::InvalidConfig(format!("Bad GWP weight \"{}\": {}", v.trim(), e))
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        match values.as_slice() {
            [co2, ch4, n2o, sf6] => GwpWeights::custom(*co2, *ch4, *n2o, *sf6),
            _ => Err(IntensityError::InvalidConfig(format!(
                "Expected 4 GWP weights (CO2,CH4,N2O,SF6), got {}",
                values.len()
            ))),
        }
    }
}

impl Default for GwpWeights {
    fn default() -> Self {
        GwpWeights::preset(GwpPreset::default())
    }
}

/// Mass unit the static emission-rate table is expressed in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MassUnit {
    Kilograms,
    Grams,
}

impl MassUnit {
    pub fn to_kg_factor(self) -> f64 {
        match self {
            MassUnit::Kilograms => 1.0,
            MassUnit::Grams => 1000.0,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            MassUnit::Kilograms => "kg",
            MassUnit::Grams => "g",
        }
    }
}

impl Default for MassUnit {
    fn default() -> Self {
        MassUnit::Kilograms
    }
}

impl FromStr for MassUnit {
    type Err = IntensityError;

    fn from_str(s: &str) -> Result<Self> {
        let unit = s.trim().to_ascii_lowercase();
        if unit.starts_with("kg") {
            Ok(MassUnit::Kilograms)
        } else if unit.starts_with('g') {
            Ok(MassUnit::Grams)
        } else {
            Err(IntensityError::InvalidConfig(format!("Unknown mass unit: {}", s)))
        }
    }
}

impl fmt::Display for MassUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
