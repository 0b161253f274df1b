//! Weight and volume units
//!
//! Unit codes parse case-insensitively. A code that is not recognised is kept
//! verbatim in the `Other` variant so it survives a round trip through storage;
//! conversion treats it as the canonical unit.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::str::FromStr;

/// Weight unit (canonical: kilogram)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WeightUnit {
    #[default]
    Kilogram,
    Gram,
    Pound,
    Ounce,
    Other(String),
}

impl WeightUnit {
    pub fn parse(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "KILOGRAM" | "KILOGRAMS" | "KG" => WeightUnit::Kilogram,
            "GRAM" | "GRAMS" | "G" => WeightUnit::Gram,
            "POUND" | "POUNDS" | "LB" | "LBS" => WeightUnit::Pound,
            "OUNCE" | "OUNCES" | "OZ" => WeightUnit::Ounce,
            _ => WeightUnit::Other(code.trim().to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            WeightUnit::Kilogram => "KILOGRAM",
            WeightUnit::Gram => "GRAM",
            WeightUnit::Pound => "POUND",
            WeightUnit::Ounce => "OUNCE",
            WeightUnit::Other(code) => code,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, WeightUnit::Other(_))
    }
}

impl From<String> for WeightUnit {
    fn from(code: String) -> Self {
        WeightUnit::parse(&code)
    }
}

impl From<WeightUnit> for String {
    fn from(unit: WeightUnit) -> Self {
        unit.code().to_string()
    }
}

impl FromStr for WeightUnit {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(WeightUnit::parse(s))
    }
}

impl std::fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Volume unit (canonical: liter)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VolumeUnit {
    #[default]
    Liter,
    Milliliter,
    CubicCentimeter,
    CubicInch,
    Other(String),
}

impl VolumeUnit {
    pub fn parse(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "LITER" | "LITERS" | "LITRE" | "L" => VolumeUnit::Liter,
            "ML" | "MILLILITER" | "MILLILITRE" => VolumeUnit::Milliliter,
            "CU_CM" | "CM3" | "CC" => VolumeUnit::CubicCentimeter,
            "CU_IN" | "IN3" => VolumeUnit::CubicInch,
            _ => VolumeUnit::Other(code.trim().to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            VolumeUnit::Liter => "LITER",
            VolumeUnit::Milliliter => "ML",
            VolumeUnit::CubicCentimeter => "CU_CM",
            VolumeUnit::CubicInch => "CU_IN",
            VolumeUnit::Other(code) => code,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, VolumeUnit::Other(_))
    }
}

impl From<String> for VolumeUnit {
    fn from(code: String) -> Self {
        VolumeUnit::parse(&code)
    }
}

impl From<VolumeUnit> for String {
    fn from(unit: VolumeUnit) -> Self {
        unit.code().to_string()
    }
}

impl FromStr for VolumeUnit {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(VolumeUnit::parse(s))
    }
}

impl std::fmt::Display for VolumeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
