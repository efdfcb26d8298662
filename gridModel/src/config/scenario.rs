use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Generation-mix scenarios, one workbook each.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Scenario {
    Current2021,
    Evolving2021,
    CanadaNetZero2023,
    Current2023,
    GlobalNetZero2023,
}

impl Scenario {
    pub const ALL: [Scenario; 5] = [
        Scenario::Current2021,
        Scenario::Evolving2021,
        Scenario::CanadaNetZero2023,
        Scenario::Current2023,
        Scenario::GlobalNetZero2023,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Scenario::Current2021 => "2021 Current",
            Scenario::Evolving2021 => "2021 Evolving",
            Scenario::CanadaNetZero2023 => "2023 Canada Net Zero",
            Scenario::Current2023 => "2023 Current",
            Scenario::GlobalNetZero2023 => "2023 Global Net Zero",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Scenario::Current2021 => "Electricity_Generation_2021_Current.xlsx",
            Scenario::Evolving2021 => "Electricity_Generation_2021_Evolving.xlsx",
            Scenario::CanadaNetZero2023 => "Electricity_Generation_2023_Canada_Net_Zero.xlsx",
            Scenario::Current2023 => "Electricity_Generation_2023_Current.xlsx",
            Scenario::GlobalNetZero2023 => "Electricity_Generation_2023_Global_Net_Zero.xlsx",
        }
    }

    pub fn workbook_path(self, data_dir: &Path) -> PathBuf {
        data_dir.join(self.file_name())
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Scenario::Current2023
    }
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl FromStr for Scenario {
    type Err = String;

    // Accepts the label in any case/punctuation, e.g. "2023 Current" or "2023-current"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Scenario::ALL
            .iter()
            .copied()
            .find(|sc| normalize(sc.label()) == wanted)
            .ok_or_else(|| format!("Unknown scenario: {}", s))
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scenario_labels() {
        assert_eq!("2023 Current".parse::<Scenario>().unwrap(), Scenario::Current2023);
        assert_eq!(
            "2023-canada-net-zero".parse::<Scenario>().unwrap(),
            Scenario::CanadaNetZero2023
        );
        assert!("2030 Current".parse::<Scenario>().is_err());
    }

    #[test]
    fn test_workbook_path() {
        let path = Scenario::Evolving2021.workbook_path(Path::new("data"));
        assert_eq!(path, PathBuf::from("data/Electricity_Generation_2021_Evolving.xlsx"));
    }
}
