use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ProcessingError, Result};

/// Winter climate zone, mildest first
///
/// `a` is the CTE's α zone (Canary Islands coast). Ordering follows severity,
/// so `WinterZone::Alpha < WinterZone::E`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WinterZone {
    #[serde(rename = "a", alias = "α")]
    Alpha,
    A,
    B,
    C,
    D,
    E,
}

impl WinterZone {
    pub const ALL: [WinterZone; 6] = [
        WinterZone::Alpha,
        WinterZone::A,
        WinterZone::B,
        WinterZone::C,
        WinterZone::D,
        WinterZone::E,
    ];

    /// Ordinal level used to compare two winter classifications (a = 1 .. E = 6)
    pub fn level(self) -> i32 {
        match self {
            WinterZone::Alpha => 1,
            WinterZone::A => 2,
            WinterZone::B => 3,
            WinterZone::C => 4,
            WinterZone::D => 5,
            WinterZone::E => 6,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WinterZone::Alpha => "a",
            WinterZone::A => "A",
            WinterZone::B => "B",
            WinterZone::C => "C",
            WinterZone::D => "D",
            WinterZone::E => "E",
        }
    }
}

impl fmt::Display for WinterZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WinterZone {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "a" | "α" => Ok(WinterZone::Alpha),
            "A" => Ok(WinterZone::A),
            "B" => Ok(WinterZone::B),
            "C" => Ok(WinterZone::C),
            "D" => Ok(WinterZone::D),
            "E" => Ok(WinterZone::E),
            other => Err(ProcessingError::InvalidZoneCode(other.to_string())),
        }
    }
}

/// Summer climate zone 1 (mildest) to 4
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum SummerZone {
    One,
    Two,
    Three,
    Four,
}

impl SummerZone {
    pub const ALL: [SummerZone; 4] = [
        SummerZone::One,
        SummerZone::Two,
        SummerZone::Three,
        SummerZone::Four,
    ];

    pub fn level(self) -> i32 {
        i32::from(u8::from(self))
    }
}

impl From<SummerZone> for u8 {
    fn from(zone: SummerZone) -> u8 {
        match zone {
            SummerZone::One => 1,
            SummerZone::Two => 2,
            SummerZone::Three => 3,
            SummerZone::Four => 4,
        }
    }
}

impl TryFrom<u8> for SummerZone {
    type Error = ProcessingError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(SummerZone::One),
            2 => Ok(SummerZone::Two),
            3 => Ok(SummerZone::Three),
            4 => Ok(SummerZone::Four),
            other => Err(ProcessingError::InvalidZoneCode(other.to_string())),
        }
    }
}

impl fmt::Display for SummerZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}

impl FromStr for SummerZone {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self> {
        let value = s
            .trim()
            .parse::<u8>()
            .map_err(|_| ProcessingError::InvalidZoneCode(s.to_string()))?;
        SummerZone::try_from(value)
    }
}

/// Composite zone code such as "D3" or "a3"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClimateZone {
    pub winter: WinterZone,
    pub summer: SummerZone,
}

impl ClimateZone {
    pub fn new(winter: WinterZone, summer: SummerZone) -> Self {
        Self { winter, summer }
    }
}

impl fmt::Display for ClimateZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.winter, self.summer)
    }
}

impl FromStr for ClimateZone {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let letter = chars
            .next()
            .ok_or_else(|| ProcessingError::InvalidZoneCode(s.to_string()))?;
        let number = chars.as_str();

        let winter = letter
            .to_string()
            .parse::<WinterZone>()
            .map_err(|_| ProcessingError::InvalidZoneCode(s.to_string()))?;
        let summer = number
            .parse::<SummerZone>()
            .map_err(|_| ProcessingError::InvalidZoneCode(s.to_string()))?;

        Ok(Self { winter, summer })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_winter_levels_increase_with_severity() {
        let levels: Vec<i32> = WinterZone::ALL.iter().map(|z| z.level()).collect();
        assert_eq!(levels, vec![1, 2, 3, 4, 5, 6]);
        assert!(levels.windows(2).all(|w| w[0] < w[1]));
        assert!(WinterZone::Alpha < WinterZone::E);
    }

    #[test]
    fn test_parse_climate_zone() {
        let zone: ClimateZone = "D3".parse().unwrap();
        assert_eq!(zone, ClimateZone::new(WinterZone::D, SummerZone::Three));

        let canary: ClimateZone = "α3".parse().unwrap();
        assert_eq!(canary.winter, WinterZone::Alpha);
        assert_eq!(canary.to_string(), "a3");

        assert_eq!("a3".parse::<ClimateZone>().unwrap(), canary);
    }

    #[test]
    fn test_invalid_zone_codes() {
        assert!("".parse::<ClimateZone>().is_err());
        assert!("F1".parse::<ClimateZone>().is_err());
        assert!("D5".parse::<ClimateZone>().is_err());
        assert!("D".parse::<ClimateZone>().is_err());
        assert!(matches!(
            "b".parse::<WinterZone>(),
            Err(ProcessingError::InvalidZoneCode(_))
        ));
        assert!(SummerZone::try_from(0).is_err());
    }

    #[test]
    fn test_summer_zone_round_trip_through_u8() {
        for zone in SummerZone::ALL {
            assert_eq!(SummerZone::try_from(u8::from(zone)).unwrap(), zone);
        }
        assert_eq!(SummerZone::Four.level(), 4);
    }
}
