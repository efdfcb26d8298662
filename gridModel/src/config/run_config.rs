use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::gwp::{GwpWeights, MassUnit};
use crate::config::scenario::Scenario;

/// Everything one pipeline invocation depends on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub data_dir: PathBuf,
    pub scenarios: Vec<Scenario>,
    pub gwp: GwpWeights,
    pub unit: MassUnit,
    /// Overrides the scenario catalog with an explicit workbook (or CSV export)
    pub workbook: Option<PathBuf>,
}

impl RunConfig {
    /// Workbooks to evaluate, labelled for reporting
    pub fn workbooks(&self) -> Vec<(String, PathBuf)> {
        match &self.workbook {
            Some(path) => vec![(path.display().to_string(), path.clone())],
            None => self
                .scenarios
                .iter()
                .map(|sc| (sc.label().to_string(), sc.workbook_path(&self.data_dir)))
                .collect(),
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            scenarios: vec![Scenario::default()],
            gwp: GwpWeights::default(),
            unit: MassUnit::default(),
            workbook: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_workbooks() {
        let config = RunConfig::default();
        let books = config.workbooks();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].0, "2023 Current");
        assert_eq!(books[0].1, PathBuf::from("data/Electricity_Generation_2023_Current.xlsx"));
    }

    #[test]
    fn test_explicit_workbook_wins() {
        let config = RunConfig {
            workbook: Some(PathBuf::from("mix.csv")),
            scenarios: Scenario::ALL.to_vec(),
            ..RunConfig::default()
        };
        assert_eq!(config.workbooks(), vec![("mix.csv".to_string(), PathBuf::from("mix.csv"))]);
    }
}
