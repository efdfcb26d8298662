use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

/// Reporting regions: the national aggregate followed by the provinces and territories.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    Canada,
    AB,
    BC,
    MB,
    NB,
    NL,
    NT,
    NS,
    NU,
    ON,
    PE,
    QC,
    SK,
    YT,
}

impl Region {
    pub const COUNT: usize = 14;

    pub const ALL: [Region; Region::COUNT] = [
        Region::Canada,
        Region::AB,
        Region::BC,
        Region::MB,
        Region::NB,
        Region::NL,
        Region::NT,
        Region::NS,
        Region::NU,
        Region::ON,
        Region::PE,
        Region::QC,
        Region::SK,
        Region::YT,
    ];

    /// The aggregate row every table falls back to.
    pub const NATIONAL: Region = Region::Canada;

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn code(self) -> &'static str {
        match self {
            Region::Canada => "Canada",
            Region::AB => "AB",
            Region::BC => "BC",
            Region::MB => "MB",
            Region::NB => "NB",
            Region::NL => "NL",
            Region::NT => "NT",
            Region::NS => "NS",
            Region::NU => "NU",
            Region::ON => "ON",
            Region::PE => "PE",
            Region::QC => "QC",
            Region::SK => "SK",
            Region::YT => "YT",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Region::Canada => "Canada",
            Region::AB => "Alberta",
            Region::BC => "British Columbia",
            Region::MB => "Manitoba",
            Region::NB => "New Brunswick",
            Region::NL => "Newfoundland and Labrador",
            Region::NT => "Northwest Territories",
            Region::NS => "Nova Scotia",
            Region::NU => "Nunavut",
            Region::ON => "Ontario",
            Region::PE => "Prince Edward Island",
            Region::QC => "Quebec",
            Region::SK => "Saskatchewan",
            Region::YT => "Yukon",
        }
    }

    pub fn is_national(self) -> bool {
        self == Region::NATIONAL
    }

    /// Resolve either a region code or a full province/territory name.
    pub fn from_name(name: &str) -> Option<Region> {
        let name = name.trim();
        Region::ALL.iter().copied().find(|r| {
            r.code().eq_ignore_ascii_case(name) || r.name().eq_ignore_ascii_case(name)
        })
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::from_name(s).ok_or_else(|| format!("Unknown region: {}", s))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One value per region, addressable by [`Region`] so lookups are total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionTable<T>(Vec<T>);

impl<T> RegionTable<T> {
    pub fn from_fn(mut f: impl FnMut(Region) -> T) -> Self {
        RegionTable(Region::ALL.iter().map(|&r| f(r)).collect())
    }

    pub fn try_from_fn<E>(mut f: impl FnMut(Region) -> Result<T, E>) -> Result<Self, E> {
        Region::ALL
            .iter()
            .map(|&r| f(r))
            .collect::<Result<Vec<T>, E>>()
            .map(RegionTable)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Region, &T)> {
        Region::ALL.iter().copied().zip(self.0.iter())
    }

    pub fn map<U>(&self, mut f: impl FnMut(Region, &T) -> U) -> RegionTable<U> {
        RegionTable::from_fn(|r| f(r, &self[r]))
    }
}

impl<T: Clone> RegionTable<T> {
    pub fn filled(value: T) -> Self {
        RegionTable::from_fn(|_| value.clone())
    }
}

impl<T> Index<Region> for RegionTable<T> {
    type Output = T;

    fn index(&self, region: Region) -> &T {
        &self.0[region.index()]
    }
}

impl<T> IndexMut<Region> for RegionTable<T> {
    fn index_mut(&mut self, region: Region) -> &mut T {
        &mut self.0[region.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_accepts_codes_and_names() {
        assert_eq!(Region::from_name("AB"), Some(Region::AB));
        assert_eq!(Region::from_name("British Columbia"), Some(Region::BC));
        assert_eq!(Region::from_name(" quebec "), Some(Region::QC));
        assert_eq!(Region::from_name("canada"), Some(Region::Canada));
        assert_eq!(Region::from_name("Atlantis"), None);
    }

    #[test]
    fn test_index_matches_declaration_order() {
        for (i, region) in Region::ALL.iter().enumerate() {
            assert_eq!(region.index(), i);
        }
    }

    #[test]
    fn test_region_table_indexing() {
        let mut table = RegionTable::filled(0.0);
        table[Region::ON] = 2.5;
        assert_eq!(table[Region::ON], 2.5);
        assert_eq!(table[Region::QC], 0.0);
        assert_eq!(table.iter().count(), Region::COUNT);
    }
}
