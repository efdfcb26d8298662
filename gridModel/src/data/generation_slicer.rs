use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::constants::{
    region_row_range, years, FIRST_YEAR_COLUMN, GWH_TO_KWH, HEADER_ROWS, START_YEAR,
};
use crate::data::sheet::{load_sheet, Sheet};
use crate::models::fuel_category::{CategoryValues, FuelCategory};
use crate::models::region::{Region, RegionTable};
use crate::utils::errors::Result;

/// Year-indexed generation volumes for one region, in kWh per fuel category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationBlock {
    pub region: Region,
    pub volumes: BTreeMap<u32, CategoryValues>,
}

impl GenerationBlock {
    pub fn year(&self, year: u32) -> Option<&CategoryValues> {
        self.volumes.get(&year)
    }

    pub fn volume(&self, year: u32, category: FuelCategory) -> f64 {
        self.year(year).map(|v| v[category.index()]).unwrap_or(0.0)
    }
}

pub type GenerationBlocks = RegionTable<GenerationBlock>;

/// Read a scenario workbook and cut it into per-region generation blocks.
pub fn load_generation(path: &Path) -> Result<GenerationBlocks> {
    let sheet = load_sheet(path)?;
    let blocks = slice_generation(&sheet)?;
    info!("Sliced generation for {} regions from {}", Region::COUNT, path.display());
    Ok(blocks)
}

/// Cut the sheet along the fixed per-region row ranges.
///
/// Missing cells count as zero. The sheet geometry is not validated: a sheet
/// laid out differently produces wrong blocks rather than an error.
pub fn slice_generation(sheet: &Sheet) -> Result<GenerationBlocks> {
    RegionTable::try_from_fn(|region| slice_region(sheet, region))
}

fn slice_region(sheet: &Sheet, region: Region) -> Result<GenerationBlock> {
    let rows = region_row_range(region);
    let mut volumes = BTreeMap::new();

    for year in years() {
        let col = FIRST_YEAR_COLUMN + (year - START_YEAR) as usize;
        let mut values = [0.0; FuelCategory::COUNT];
        for (category, data_row) in FuelCategory::ALL.iter().zip(rows.clone()) {
            let gwh = sheet
                .get(HEADER_ROWS + data_row, col)
                .number_or_zero(sheet.name())?;
            values[category.index()] = gwh * GWH_TO_KWH;
        }
        volumes.insert(year, values);
    }

    debug!("{}: sliced rows {:?}", region, rows);
    Ok(GenerationBlock { region, volumes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::constants::END_YEAR;
    use crate::data::sheet::{sheet_from_csv, Cell};

    /// Sheet with the header row and 158 data rows; every value encodes its
    /// data row and column so slices can be checked by position.
    fn positional_sheet() -> Sheet {
        let mut rows = vec![vec![Cell::Text("header".to_string())]];
        for data_row in 0..160 {
            let mut row = vec![Cell::Text(format!("row {}", data_row))];
            for col in 1..=46 {
                row.push(Cell::Number((data_row * 100 + col) as f64));
            }
            rows.push(row);
        }
        Sheet::new("positional", rows)
    }

    #[test]
    fn test_slices_follow_region_ranges() {
        let blocks = slice_generation(&positional_sheet()).unwrap();

        let canada = &blocks[Region::Canada];
        // Canada starts at data row 7; 2005 is column 1
        assert_eq!(canada.volume(2005, FuelCategory::Hydro), 701.0 * GWH_TO_KWH);
        assert_eq!(canada.volume(2050, FuelCategory::Oil), 1446.0 * GWH_TO_KWH);

        let on = &blocks[Region::ON];
        assert_eq!(on.volume(2025, FuelCategory::NaturalGas), (79.0 * 100.0 + 21.0) * GWH_TO_KWH);
        assert_eq!(on.volumes.len(), (END_YEAR - START_YEAR + 1) as usize);
    }

    #[test]
    fn test_missing_cells_are_zero() {
        let sheet = sheet_from_csv("header\nonly,1,2\n".as_bytes(), "short").unwrap();
        let blocks = slice_generation(&sheet).unwrap();
        for (_, block) in blocks.iter() {
            for values in block.volumes.values() {
                assert!(values.iter().all(|v| *v == 0.0));
            }
        }
    }

    #[test]
    fn test_unparseable_cell_is_an_error() {
        let mut csv = String::from("header\n");
        for _ in 0..8 {
            csv.push_str("x\n");
        }
        // data row 8 lies inside Canada's range (7..15)
        csv.push_str("label,not-a-number\n");
        let sheet = sheet_from_csv(csv.as_bytes(), "bad").unwrap();
        assert!(slice_generation(&sheet).is_err());
    }
}
