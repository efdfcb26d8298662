use std::ops::Range;

use crate::models::region::Region;

// Time Constants
pub const START_YEAR: u32 = 2005;
pub const END_YEAR: u32 = 2050;
pub const YEAR_COUNT: usize = (END_YEAR - START_YEAR + 1) as usize;

// Unit Conversion
pub const GWH_TO_KWH: f64 = 1e6;
pub const TRANSMISSION_EFFICIENCY: f64 = 1.0;

// Generation workbook layout: data rows below the header row, 8 rows per region
// in fuel category order. Column 0 holds the row label, years follow.
pub const REGION_ROW_RANGES: [(Region, Range<usize>); Region::COUNT] = [
    (Region::Canada, 7..15),
    (Region::AB, 95..103),
    (Region::BC, 106..114),
    (Region::MB, 84..92),
    (Region::NB, 51..59),
    (Region::NL, 18..26),
    (Region::NT, 139..147),
    (Region::NS, 40..48),
    (Region::NU, 150..158),
    (Region::ON, 73..81),
    (Region::PE, 29..37),
    (Region::QC, 62..70),
    (Region::SK, 117..125),
    (Region::YT, 128..136),
];
pub const HEADER_ROWS: usize = 1;
pub const FIRST_YEAR_COLUMN: usize = 1;

// Column order of the StatCan fuel-consumption tables (coal, oil)
pub const STATCAN_REGION_ORDER: [Region; Region::COUNT] = [
    Region::Canada,
    Region::NL,
    Region::PE,
    Region::NS,
    Region::NB,
    Region::QC,
    Region::ON,
    Region::MB,
    Region::SK,
    Region::AB,
    Region::BC,
    Region::YT,
    Region::NT,
    Region::NU,
];

// Cells StatCan uses for suppressed or unavailable data
pub const MISSING_MARKERS: [&str; 3] = ["..", "x", "F"];

// Breakdown normalisation
pub const FRACTION_DECIMALS: i32 = 3;
pub const OIL_TOTAL_EPSILON: f64 = 0.000001;
pub const NO_OIL_DATA_REGION: Region = Region::PE;

// Reservoir share of hydro generation (federal fuel life-cycle methodology);
// zero means no data and becomes an even split.
pub const HYDRO_RESERVOIR_SHARES: [(Region, f64); Region::COUNT] = [
    (Region::Canada, 0.78),
    (Region::AB, 0.66),
    (Region::BC, 0.95),
    (Region::MB, 0.998),
    (Region::NB, 0.91),
    (Region::NL, 0.97),
    (Region::NT, 0.56),
    (Region::NS, 0.0),
    (Region::NU, 0.0),
    (Region::ON, 0.856),
    (Region::PE, 0.0),
    (Region::QC, 0.629),
    (Region::SK, 0.97),
    (Region::YT, 0.0),
];

// Gas turbine capacity factors (EIA electric power monthly, table 6.07.A)
pub const COMBINED_CYCLE_CAPACITY_FACTOR: f64 = 0.141;
pub const COGENERATION_CAPACITY_FACTOR: f64 = 0.588;
pub const SIMPLE_CYCLE_CAPACITY_FACTOR: f64 = COMBINED_CYCLE_CAPACITY_FACTOR;

// Regional natural gas overrides
pub const DISPATCH_OVERRIDE_REGION: Region = Region::AB;
pub const DISPATCH_SCENARIO: &str = "Dispatchable Dominant";
pub const DISPATCH_OUTPUT: &str = "Generation_MWh";
pub const DISPATCH_FIRST_YEAR: u32 = 2022;
pub const DISPATCH_OVERRIDE_YEAR: u32 = 2022;
pub const CONTRACT_OVERRIDE_REGION: Region = Region::ON;

// Biomass / geothermal operating intensity blends the two wood technologies
pub const WOOD_COGENERATION_SHARE: f64 = 0.5;

// Reference capacity factors the wind and solar embodied values were derived at
pub const REFERENCE_SOLAR_CAPACITY_FACTOR: f64 = 0.15;
pub const REFERENCE_WIND_CAPACITY_FACTOR: f64 = 0.5;

// Embodied (lifecycle) emissions, kg CO2e per kWh
pub const EMBODIED_HYDRO_RESERVOIR: f64 = 0.018;
pub const EMBODIED_HYDRO_RIVER: f64 = 0.008;
pub const EMBODIED_WIND: f64 = 0.0001070049744;
pub const EMBODIED_BIOMASS: f64 = 0.032 + 0.0613;
pub const EMBODIED_SOLAR: f64 = 0.00112363578;
pub const EMBODIED_URANIUM: f64 = 0.2653938859 / (650.0 * 30.0 * 365.0 * 24.0 * 0.89 * 1000.0);
pub const EMBODIED_COAL: f64 = 35437946.91 / (100.0 * 150000.0 * 1000.0);
pub const EMBODIED_NATURAL_GAS: f64 = 5496684.453 / (100.0 * 180000.0 * 1000.0);
pub const EMBODIED_OIL: f64 = 500821.3393 / (10.0 * 100000.0 * 1000.0);

pub fn region_row_range(region: Region) -> Range<usize> {
    REGION_ROW_RANGES[region.index()].1.clone()
}

pub fn years() -> impl Iterator<Item = u32> {
    START_YEAR..=END_YEAR
}
