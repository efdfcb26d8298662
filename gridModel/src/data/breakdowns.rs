// Technology composition tables: hydro, coal, oil, natural gas, solar and wind
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::constants::*;
use crate::data::csv_utils::{
    csv_reader, open_source, parse_number, parse_number_or_zero, required_column,
};
use crate::data::gas_overrides::{apply_gas_overrides, GasSplitOverride};
use crate::models::region::{Region, RegionTable};
use crate::models::technology_split::{
    CoalSplit, GasSplit, HydroSplit, OilSplit, TechnologySplit, TechnologySplits,
};
use crate::utils::errors::{IntensityError, Result};
use crate::utils::logging::{self, OperationCategory};

pub const NATGAS_PLANTS_FILE: &str = "Natgas_breakdown.csv";
pub const COAL_FILE: &str = "coal_breakdown(edited).csv";
pub const OIL_FILE: &str = "Oil_breakdown(edited).csv";
pub const SOLAR_FILE: &str = "solar_breakdown.csv";
pub const WIND_FILE: &str = "wind_breakdown.csv";
pub const DISPATCH_PROJECTION_FILE: &str = "AESO.csv";
pub const CONTRACTED_GENERATION_FILE: &str = "IESO-Active-Contracted-Generation-List.csv";

pub const SOLAR_CF_COLUMN: &str = "cf";
pub const WIND_CF_COLUMN: &str = "cf to 5%";

/// Locations of every flat source the normalizer reads.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownSources {
    pub natgas_plants: PathBuf,
    pub coal: PathBuf,
    pub oil: PathBuf,
    pub solar: PathBuf,
    pub wind: PathBuf,
    pub dispatch_projection: PathBuf,
    pub contracted_generation: PathBuf,
}

impl BreakdownSources {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            natgas_plants: dir.join(NATGAS_PLANTS_FILE),
            coal: dir.join(COAL_FILE),
            oil: dir.join(OIL_FILE),
            solar: dir.join(SOLAR_FILE),
            wind: dir.join(WIND_FILE),
            dispatch_projection: dir.join(DISPATCH_PROJECTION_FILE),
            contracted_generation: dir.join(CONTRACTED_GENERATION_FILE),
        }
    }

    fn all(&self) -> [&PathBuf; 7] {
        [
            &self.natgas_plants,
            &self.coal,
            &self.oil,
            &self.solar,
            &self.wind,
            &self.dispatch_projection,
            &self.contracted_generation,
        ]
    }

    /// Fail before reading anything if any source is missing, listing every
    /// missing location.
    pub fn check(&self) -> Result<()> {
        let missing: Vec<PathBuf> = self
            .all()
            .iter()
            .filter(|p| !p.is_file())
            .map(|p| (*p).clone())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(IntensityError::NotFound {
                what: "breakdown source".to_string(),
                attempted: missing,
            })
        }
    }
}

/// Per-region values before the national fallback; `None` marks a missing sector.
pub type RegionColumn = RegionTable<Option<f64>>;

/// Fill every missing region from the aggregate row of the same column.
pub fn fill_from_aggregate(column: &RegionColumn, aggregate: Region, label: &str) -> RegionTable<f64> {
    let fallback = match column[aggregate] {
        Some(v) if v.is_finite() => v,
        _ => {
            warn!("{}: aggregate row {} has no value, using 0", label, aggregate);
            0.0
        }
    };
    column.map(|region, value| match value {
        Some(v) if v.is_finite() => *v,
        _ => {
            if region != aggregate {
                debug!("{}: {} missing, using {} value {}", label, region, aggregate, fallback);
            }
            fallback
        }
    })
}

pub fn round_fraction(value: f64) -> f64 {
    let scale = 10f64.powi(FRACTION_DECIMALS);
    (value * scale).round() / scale
}

/// `part / total`, or `None` when either side is missing or the total is zero.
fn fraction(part: Option<f64>, total: Option<f64>) -> Option<f64> {
    match (part, total) {
        (Some(p), Some(t)) if t != 0.0 => Some(p / t).filter(|f| f.is_finite()),
        _ => None,
    }
}

fn fallback_fractions(column: &RegionColumn, label: &str) -> RegionTable<f64> {
    fill_from_aggregate(column, Region::NATIONAL, label).map(|_, v| round_fraction(*v))
}

/// National fallback for a whole split group. A region with any undefined
/// member is missing as a group, so it never mixes its own fractions with
/// national ones.
fn fallback_group<const N: usize>(
    parts: [&RegionColumn; N],
    labels: [&str; N],
) -> RegionTable<[f64; N]> {
    let complete = RegionTable::from_fn(|r| parts.iter().all(|part| part[r].is_some()));
    let filled: Vec<RegionTable<f64>> = parts
        .iter()
        .zip(labels)
        .map(|(part, label)| {
            let masked = part.map(|r, v| if complete[r] { *v } else { None });
            fallback_fractions(&masked, label)
        })
        .collect();
    RegionTable::from_fn(|r| std::array::from_fn(|i| filled[i][r]))
}

/// Built-in reservoir/run-of-river split.
pub fn hydro_splits() -> RegionTable<HydroSplit> {
    RegionTable::from_fn(|region| {
        let reservoir = HYDRO_RESERVOIR_SHARES[region.index()].1;
        if reservoir == 0.0 {
            HydroSplit { reservoir: 0.5, river: 0.5 }
        } else {
            HydroSplit {
                reservoir,
                river: round_fraction(1.0 - reservoir),
            }
        }
    })
}

/// Rows of a StatCan table: a label column, then one column per region.
struct StatcanTable {
    rows: Vec<(String, RegionColumn)>,
}

impl StatcanTable {
    fn read<R: Read>(reader: R, source_name: &str) -> Result<Self> {
        let mut reader = csv_reader(reader);
        let headers = reader.headers()?.clone();

        // Columns named after a region are taken by name, others by StatCan position
        let columns: Vec<Option<Region>> = (1..headers.len())
            .map(|i| {
                Region::from_name(&headers[i]).or_else(|| STATCAN_REGION_ORDER.get(i - 1).copied())
            })
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let label = record.get(0).unwrap_or("").trim().to_string();
            let mut values = RegionTable::filled(None);
            for (offset, region) in columns.iter().enumerate() {
                if let (Some(region), Some(raw)) = (region, record.get(offset + 1)) {
                    values[*region] = parse_number(raw, source_name)?;
                }
            }
            rows.push((label, values));
        }
        Ok(Self { rows })
    }

    /// Row by label, else by position.
    fn row(&self, label: &str, position: usize) -> Option<&RegionColumn> {
        self.rows
            .iter()
            .find(|(l, _)| l.eq_ignore_ascii_case(label))
            .or_else(|| self.rows.get(position))
            .map(|(_, values)| values)
    }
}

pub fn load_coal_splits(path: &Path) -> Result<RegionTable<CoalSplit>> {
    let file = open_source(path, "coal breakdown")?;
    coal_splits_from_reader(file, &path.display().to_string())
}

/// Coal rank split from bituminous / sub-bituminous / lignite / total volumes.
pub fn coal_splits_from_reader<R: Read>(reader: R, source_name: &str) -> Result<RegionTable<CoalSplit>> {
    let table = StatcanTable::read(reader, source_name)?;
    let empty = RegionTable::filled(None);
    let bit = table.row("bit", 0).unwrap_or(&empty);
    let sub = table.row("sub", 1).unwrap_or(&empty);
    let lig = table.row("lig", 2).unwrap_or(&empty);
    let total = match table.row("total", 3) {
        Some(total) => total.clone(),
        None => RegionTable::from_fn(|r| Some(bit[r].unwrap_or(0.0) + sub[r].unwrap_or(0.0) + lig[r].unwrap_or(0.0))),
    };

    let bit = RegionTable::from_fn(|r| fraction(bit[r], total[r]));
    let sub = RegionTable::from_fn(|r| fraction(sub[r], total[r]));
    let lig = RegionTable::from_fn(|r| fraction(lig[r], total[r]));

    let coal = fallback_group([&bit, &sub, &lig], ["coal bit%", "coal sub%", "coal lig%"]);
    Ok(coal.map(|_, [bit, sub, lig]| CoalSplit {
        bituminous: *bit,
        sub_bituminous: *sub,
        lignite: *lig,
    }))
}

pub fn load_oil_splits(path: &Path) -> Result<RegionTable<OilSplit>> {
    let file = open_source(path, "oil breakdown")?;
    oil_splits_from_reader(file, &path.display().to_string())
}

/// Heavy oil / diesel split. Zero totals are replaced by a negligible epsilon
/// rather than raising; regions reporting no oil at all get an even split.
/// A suppressed or blank cell takes the national split for that region.
pub fn oil_splits_from_reader<R: Read>(reader: R, source_name: &str) -> Result<RegionTable<OilSplit>> {
    let table = StatcanTable::read(reader, source_name)?;
    let empty = RegionTable::filled(None);
    let heavy = table.row("heavy oil", 0).unwrap_or(&empty);
    let diesel = table.row("diesel", 1).unwrap_or(&empty);

    let reported: RegionTable<Option<OilSplit>> = RegionTable::from_fn(|region| {
        let (h, d) = (heavy[region]?, diesel[region]?);
        let mut total = h + d;
        if total == 0.0 {
            total = OIL_TOTAL_EPSILON;
        }
        let split = OilSplit {
            heavy: round_fraction(h / total),
            diesel: round_fraction(d / total),
        };
        if split.total() == 0.0 {
            if region != NO_OIL_DATA_REGION {
                warn!("oil: no data for {}, using an even split", region);
            }
            Some(OilSplit::EVEN)
        } else {
            Some(split)
        }
    });

    let heavy = fill_from_aggregate(&reported.map(|_, s| s.map(|s| s.heavy)), Region::NATIONAL, "oil heavy%");
    let diesel = fill_from_aggregate(&reported.map(|_, s| s.map(|s| s.diesel)), Region::NATIONAL, "oil diesel%");

    Ok(RegionTable::from_fn(|region| {
        let split = OilSplit { heavy: heavy[region], diesel: diesel[region] };
        if region == NO_OIL_DATA_REGION || split.total() == 0.0 {
            OilSplit::EVEN
        } else {
            split
        }
    }))
}

/// Bucket a plant-list technology tag. Plants tagged neither CC nor CO are
/// counted as simple cycle, the least efficient turbine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GasBucket {
    CombinedCycle,
    Cogeneration,
    SimpleCycle,
}

impl GasBucket {
    pub fn from_plant_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_uppercase().as_str() {
            "CC" => GasBucket::CombinedCycle,
            "CO" => GasBucket::Cogeneration,
            _ => GasBucket::SimpleCycle,
        }
    }

    pub fn capacity_factor(self) -> f64 {
        match self {
            GasBucket::CombinedCycle => COMBINED_CYCLE_CAPACITY_FACTOR,
            GasBucket::Cogeneration => COGENERATION_CAPACITY_FACTOR,
            GasBucket::SimpleCycle => SIMPLE_CYCLE_CAPACITY_FACTOR,
        }
    }
}

/// Capacity-factor-weighted generation per gas bucket
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GasGeneration {
    pub combined_cycle: f64,
    pub cogeneration: f64,
    pub simple_cycle: f64,
}

impl GasGeneration {
    pub fn add(&mut self, bucket: GasBucket, generation: f64) {
        match bucket {
            GasBucket::CombinedCycle => self.combined_cycle += generation,
            GasBucket::Cogeneration => self.cogeneration += generation,
            GasBucket::SimpleCycle => self.simple_cycle += generation,
        }
    }

    pub fn total(&self) -> f64 {
        self.combined_cycle + self.cogeneration + self.simple_cycle
    }

    /// Shares of the total, `None` when nothing was generated.
    pub fn shares(&self) -> Option<GasSplit> {
        let total = self.total();
        if total == 0.0 || !total.is_finite() {
            return None;
        }
        Some(GasSplit {
            combined_cycle: self.combined_cycle / total,
            cogeneration: self.cogeneration / total,
            simple_cycle: self.simple_cycle / total,
        })
    }
}

pub fn load_gas_splits(path: &Path) -> Result<RegionTable<GasSplit>> {
    let file = open_source(path, "natural gas plant list")?;
    gas_splits_from_reader(file, &path.display().to_string())
}

/// Default natural gas split from the plant list: each plant contributes
/// `trunc(capacity * capacity factor)` to its region and to the national row.
pub fn gas_splits_from_reader<R: Read>(reader: R, source_name: &str) -> Result<RegionTable<GasSplit>> {
    let mut reader = csv_reader(reader);
    let headers = reader.headers()?.clone();
    let province_col = required_column(&headers, "Province", source_name)?;
    let type_col = required_column(&headers, "Type of plant", source_name)?;
    let capacity_col = required_column(&headers, "MWh Capacity", source_name)?;

    let mut generation: RegionTable<GasGeneration> = RegionTable::filled(GasGeneration::default());
    for record in reader.records() {
        let record = record?;
        let capacity = parse_number_or_zero(record.get(capacity_col).unwrap_or(""), source_name)?;
        let bucket = GasBucket::from_plant_tag(record.get(type_col).unwrap_or(""));
        let weighted = (capacity * bucket.capacity_factor()).trunc();

        generation[Region::NATIONAL].add(bucket, weighted);
        let province = record.get(province_col).unwrap_or("");
        match Region::from_name(province) {
            Some(region) if !region.is_national() => generation[region].add(bucket, weighted),
            Some(_) => {}
            None => debug!("gas plant in unknown province \"{}\" counted nationally only", province),
        }
    }

    let shares = generation.map(|_, g| g.shares());
    let cc = shares.map(|_, s| s.map(|s| s.combined_cycle));
    let co = shares.map(|_, s| s.map(|s| s.cogeneration));
    let sc = shares.map(|_, s| s.map(|s| s.simple_cycle));

    let gas = fallback_group([&cc, &co, &sc], ["gas CC%", "gas CO%", "gas SC%"]);
    Ok(gas.map(|_, [cc, co, sc]| GasSplit {
        combined_cycle: *cc,
        cogeneration: *co,
        simple_cycle: *sc,
    }))
}

pub fn load_capacity_factors(path: &Path, column: &str, what: &str) -> Result<RegionTable<f64>> {
    let file = open_source(path, what)?;
    capacity_factors_from_reader(file, column, &path.display().to_string())
}

/// Per-region capacity factors keyed by the `Sector` column. Absent or
/// non-positive factors fall back to the national row.
pub fn capacity_factors_from_reader<R: Read>(reader: R, column: &str, source_name: &str) -> Result<RegionTable<f64>> {
    let mut reader = csv_reader(reader);
    let headers = reader.headers()?.clone();
    let sector_col = required_column(&headers, "Sector", source_name)?;
    let value_col = required_column(&headers, column, source_name)?;

    let mut factors: RegionColumn = RegionTable::filled(None);
    for record in reader.records() {
        let record = record?;
        let sector = record.get(sector_col).unwrap_or("");
        let Some(region) = Region::from_name(sector) else {
            debug!("{}: ignoring unknown sector \"{}\"", source_name, sector);
            continue;
        };
        factors[region] = parse_number(record.get(value_col).unwrap_or(""), source_name)?
            .filter(|cf| *cf > 0.0);
    }
    Ok(fill_from_aggregate(&factors, Region::NATIONAL, column))
}

/// Default pass over every source, then the regional gas overrides.
pub fn build_technology_splits(
    sources: &BreakdownSources,
    overrides: &[Box<dyn GasSplitOverride>],
) -> Result<TechnologySplits> {
    let _timing = logging::start_timing("build_technology_splits", OperationCategory::Breakdown);
    sources.check()?;

    let hydro = hydro_splits();
    let coal = load_coal_splits(&sources.coal)?;
    let oil = load_oil_splits(&sources.oil)?;
    let gas = load_gas_splits(&sources.natgas_plants)?;
    let solar = load_capacity_factors(&sources.solar, SOLAR_CF_COLUMN, "solar breakdown")?;
    let wind = load_capacity_factors(&sources.wind, WIND_CF_COLUMN, "wind breakdown")?;

    let mut splits = TechnologySplits::new(RegionTable::from_fn(|r| TechnologySplit {
        hydro: hydro[r],
        coal: coal[r],
        oil: oil[r],
        gas: gas[r],
        solar_capacity_factor: solar[r],
        wind_capacity_factor: wind[r],
    }));
    apply_gas_overrides(&mut splits, overrides);

    info!("Technology splits ready for {} regions", Region::COUNT);
    Ok(splits)
}

#[cfg(test)]
mod tests {
    use super::*;

    const COAL: &str = "Geography,Canada,Newfoundland and Labrador,Prince Edward Island,Nova Scotia,New Brunswick,Quebec,Ontario,Manitoba,Saskatchewan,Alberta,British Columbia,Yukon,Northwest Territories,Nunavut
bit,\"4,000\",0,0,900,100,0,0,0,0,\"3,000\",0,0,0,0
sub,\"4,000\",0,0,0,0,0,0,0,1000,\"3,000\",0,0,0,0
lig,\"2,000\",0,0,0,0,0,0,0,1000,\"1,000\",0,0,0,0
total,\"10,000\",0,0,900,100,0,0,0,2000,\"7,000\",0,0,0,0
";

    #[test]
    fn test_coal_fractions_and_fallback() {
        let coal = coal_splits_from_reader(COAL.as_bytes(), "coal").unwrap();
        assert_eq!(coal[Region::Canada], CoalSplit { bituminous: 0.4, sub_bituminous: 0.4, lignite: 0.2 });
        assert_eq!(coal[Region::SK], CoalSplit { bituminous: 0.0, sub_bituminous: 0.5, lignite: 0.5 });
        assert_eq!(coal[Region::AB].bituminous, 0.429);
        assert_eq!(coal[Region::AB].lignite, 0.143);
        // no coal in Quebec: national fractions
        assert_eq!(coal[Region::QC], coal[Region::Canada]);
        assert_eq!(coal[Region::NS].bituminous, 1.0);
    }

    #[test]
    fn test_oil_even_split_without_data() {
        let oil = "Geography,Canada,NL,PE,NS,NB,QC,ON,MB,SK,AB,BC,YT,NT,NU
Heavy fuel oil,300,100,0,200,0,0,0,0,0,0,0,0,0,0
Diesel,700,100,0,0,50,0,0,0,0,0,0,25,25,0
";
        let splits = oil_splits_from_reader(oil.as_bytes(), "oil").unwrap();
        assert_eq!(splits[Region::Canada], OilSplit { heavy: 0.3, diesel: 0.7 });
        assert_eq!(splits[Region::PE], OilSplit::EVEN);
        assert_eq!(splits[Region::QC], OilSplit::EVEN);
        assert_eq!(splits[Region::NS], OilSplit { heavy: 1.0, diesel: 0.0 });
        assert_eq!(splits[Region::NB], OilSplit { heavy: 0.0, diesel: 1.0 });
        for (_, split) in splits.iter() {
            assert!((split.total() - 1.0).abs() <= 1e-3);
        }
    }

    #[test]
    fn test_suppressed_coal_cell_takes_national_group() {
        let coal = "Geography,Canada,NL,PE,NS,NB,QC,ON,MB,SK,AB,BC,YT,NT,NU
bit,\"4,000\",0,0,\"2,800\",0,0,0,0,0,0,0,0,0,0
sub,\"4,000\",0,0,x,0,0,0,0,0,0,0,0,0,0
lig,\"2,000\",0,0,0,0,0,0,0,0,0,0,0,0,0
total,\"10,000\",0,0,\"2,800\",0,0,0,0,0,0,0,0,0,0
";
        let coal = coal_splits_from_reader(coal.as_bytes(), "coal").unwrap();
        assert_eq!(coal[Region::NS], coal[Region::Canada]);
        for (region, split) in coal.iter() {
            assert!((split.total() - 1.0).abs() <= 1e-3, "{} coal sums to {}", region, split.total());
        }
    }

    #[test]
    fn test_suppressed_oil_cell_takes_national_split() {
        let oil = "Geography,Canada,NL,PE,NS,NB,QC,ON,MB,SK,AB,BC,YT,NT,NU
Heavy fuel oil,300,100,0,x,0,0,0,0,0,0,0,0,0,
Diesel,700,100,0,90,50,0,0,0,0,0,0,25,25,
";
        let splits = oil_splits_from_reader(oil.as_bytes(), "oil").unwrap();
        assert_eq!(splits[Region::NS], OilSplit { heavy: 0.3, diesel: 0.7 });
        assert_eq!(splits[Region::NU], OilSplit { heavy: 0.3, diesel: 0.7 });
        assert_eq!(splits[Region::NB], OilSplit { heavy: 0.0, diesel: 1.0 });
        assert_eq!(splits[Region::QC], OilSplit::EVEN);
        assert_eq!(splits[Region::PE], OilSplit::EVEN);
    }

    #[test]
    fn test_unclassified_gas_plant_counts_as_simple_cycle() {
        let plants = "Province,Type of plant,MWh Capacity,Cogeneration
Alberta,CC,1000,
Alberta,X,1000,
Ontario,CO,500,yes
Ontario,CC,\"2,000\",
";
        let gas = gas_splits_from_reader(plants.as_bytes(), "plants").unwrap();

        // Alberta: CC trunc(141) and the unclassified plant as SC trunc(141), CC not double counted
        assert_eq!(gas[Region::AB], GasSplit { combined_cycle: 0.5, cogeneration: 0.0, simple_cycle: 0.5 });

        // Ontario: CO trunc(294), CC trunc(282)
        let on = gas[Region::ON];
        assert_eq!(on.cogeneration, round_fraction(294.0 / 576.0));
        assert_eq!(on.combined_cycle, round_fraction(282.0 / 576.0));
        assert_eq!(on.simple_cycle, 0.0);

        // National row sees every plant; regions without plants inherit it
        let canada = gas[Region::Canada];
        assert_eq!(canada.combined_cycle, round_fraction(423.0 / 858.0));
        assert_eq!(gas[Region::NU], canada);
    }

    #[test]
    fn test_gas_bucket_tags() {
        assert_eq!(GasBucket::from_plant_tag("CC"), GasBucket::CombinedCycle);
        assert_eq!(GasBucket::from_plant_tag("co"), GasBucket::Cogeneration);
        assert_eq!(GasBucket::from_plant_tag("SC"), GasBucket::SimpleCycle);
        assert_eq!(GasBucket::from_plant_tag("X"), GasBucket::SimpleCycle);
        assert_eq!(GasBucket::from_plant_tag(""), GasBucket::SimpleCycle);
    }

    #[test]
    fn test_capacity_factor_fallback() {
        let wind = "Sector,cf to 5%\nCanada,0.3\nAB,0.35\nON,0\nAtlantis,0.9\n";
        let cf = capacity_factors_from_reader(wind.as_bytes(), "cf to 5%", "wind").unwrap();
        assert_eq!(cf[Region::AB], 0.35);
        assert_eq!(cf[Region::ON], 0.3);
        assert_eq!(cf[Region::YT], 0.3);
    }

    #[test]
    fn test_missing_value_column_is_parse_error() {
        let solar = "Sector,capacity\nCanada,0.13\n";
        assert!(matches!(
            capacity_factors_from_reader(solar.as_bytes(), "cf", "solar"),
            Err(IntensityError::Parse { .. })
        ));
    }

    #[test]
    fn test_hydro_splits() {
        let hydro = hydro_splits();
        assert_eq!(hydro[Region::Canada], HydroSplit { reservoir: 0.78, river: 0.22 });
        assert_eq!(hydro[Region::PE], HydroSplit { reservoir: 0.5, river: 0.5 });
        assert_eq!(hydro[Region::MB].river, 0.002);
        for (_, split) in hydro.iter() {
            assert!((split.total() - 1.0).abs() <= 1e-3);
        }
    }

    #[test]
    fn test_fill_from_aggregate() {
        let mut column = RegionTable::filled(None);
        column[Region::Canada] = Some(0.25);
        column[Region::BC] = Some(0.75);
        column[Region::MB] = Some(f64::NAN);
        let filled = fill_from_aggregate(&column, Region::Canada, "t");
        assert_eq!(filled[Region::BC], 0.75);
        assert_eq!(filled[Region::MB], 0.25);
        assert_eq!(filled[Region::NU], 0.25);
    }

    #[test]
    fn test_check_lists_every_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(WIND_FILE), "Sector,cf to 5%\n").unwrap();
        match BreakdownSources::in_dir(dir.path()).check() {
            Err(IntensityError::NotFound { attempted, .. }) => {
                assert_eq!(attempted.len(), 6);
                assert!(!attempted.contains(&dir.path().join(WIND_FILE)));
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
    }
}
