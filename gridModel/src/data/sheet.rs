// Rectangular cell grid read from the first worksheet of a workbook, or from a
// CSV export of that worksheet.
use std::io::Read;
use std::path::Path;

use calamine::{open_workbook_auto, DataType, Reader};
use csv::ReaderBuilder;
use tracing::debug;

use crate::data::csv_utils::{parse_number, require_file};
use crate::utils::errors::{IntensityError, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Number(f64),
    Text(String),
}

impl Cell {
    /// Numeric value of the cell; empty cells count as zero.
    pub fn number_or_zero(&self, source_name: &str) -> Result<f64> {
        match self {
            Cell::Empty => Ok(0.0),
            Cell::Number(v) => Ok(*v),
            Cell::Text(s) => Ok(parse_number(s, source_name)?.unwrap_or(0.0)),
        }
    }
}

static EMPTY_CELL: Cell = Cell::Empty;

#[derive(Debug, Clone, Default)]
pub struct Sheet {
    name: String,
    rows: Vec<Vec<Cell>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { name: name.into(), rows }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Cells outside the used area read as empty.
    pub fn get(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY_CELL)
    }
}

/// Load the first worksheet. `.csv` files are read as a sheet export, anything
/// else goes through calamine.
pub fn load_sheet(path: &Path) -> Result<Sheet> {
    require_file(path, "generation workbook")?;
    let name = path.display().to_string();
    let is_csv = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    let sheet = if is_csv {
        let file = std::fs::File::open(path)?;
        sheet_from_csv(file, &name)?
    } else {
        sheet_from_workbook(path, &name)?
    };
    debug!("Loaded sheet {} with {} rows", sheet.name(), sheet.height());
    Ok(sheet)
}

fn sheet_from_workbook(path: &Path, name: &str) -> Result<Sheet> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| IntensityError::not_found(format!("first worksheet of {}", name), path))??;

    // calamine ranges start at the first used cell; pad back to A1
    let (row0, col0) = range.start().unwrap_or((0, 0));
    let mut rows = vec![Vec::new(); row0 as usize];
    for source_row in range.rows() {
        let mut row = vec![Cell::Empty; col0 as usize];
        row.extend(source_row.iter().map(|value| match value {
            DataType::Empty => Cell::Empty,
            DataType::Float(v) => Cell::Number(*v),
            DataType::Int(v) => Cell::Number(*v as f64),
            DataType::String(s) => Cell::Text(s.clone()),
            other => Cell::Text(other.to_string()),
        }));
        rows.push(row);
    }
    Ok(Sheet::new(name, rows))
}

pub fn sheet_from_csv<R: Read>(reader: R, name: &str) -> Result<Sheet> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row = record
            .iter()
            .map(|field| {
                let trimmed = field.trim();
                if trimmed.is_empty() {
                    Cell::Empty
                } else {
                    match trimmed.parse::<f64>() {
                        Ok(v) => Cell::Number(v),
                        Err(_) => Cell::Text(trimmed.to_string()),
                    }
                }
            })
            .collect();
        rows.push(row);
    }
    Ok(Sheet::new(name, rows))
}
