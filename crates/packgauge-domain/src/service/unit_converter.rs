//! Unit conversion into canonical units (kilogram, liter)
//!
//! Unrecognised units convert with a multiplier of 1, so the converter is
//! total over its input domain.

use packgauge_types::{VolumeUnit, WeightUnit};

pub const GRAMS_PER_KILOGRAM: f64 = 1000.0;
pub const KILOGRAMS_PER_POUND: f64 = 0.453592;
pub const KILOGRAMS_PER_OUNCE: f64 = 0.0283495;
pub const LITERS_PER_CUBIC_INCH: f64 = 0.0163871;

pub fn weight_multiplier(unit: &WeightUnit) -> f64 {
    match unit {
        WeightUnit::Kilogram => 1.0,
        WeightUnit::Gram => 1.0 / GRAMS_PER_KILOGRAM,
        WeightUnit::Pound => KILOGRAMS_PER_POUND,
        WeightUnit::Ounce => KILOGRAMS_PER_OUNCE,
        WeightUnit::Other(code) => {
            tracing::debug!(unit = %code, "unrecognised weight unit, assuming kilograms");
            1.0
        }
    }
}

pub fn volume_multiplier(unit: &VolumeUnit) -> f64 {
    match unit {
        VolumeUnit::Liter => 1.0,
        VolumeUnit::Milliliter | VolumeUnit::CubicCentimeter => 1.0 / 1000.0,
        VolumeUnit::CubicInch => LITERS_PER_CUBIC_INCH,
        VolumeUnit::Other(code) => {
            tracing::debug!(unit = %code, "unrecognised volume unit, assuming liters");
            1.0
        }
    }
}

/// Convert a weight into kilograms
pub fn convert_weight(value: f64, unit: &WeightUnit) -> f64 {
    value * weight_multiplier(unit)
}

/// Convert a volume into liters
pub fn convert_volume(value: f64, unit: &VolumeUnit) -> f64 {
    value * volume_multiplier(unit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_gram_to_kilogram() {
        assert_eq!(convert_weight(1000.0, &WeightUnit::Gram), 1.0);
    }

    #[test]
    fn test_milliliter_to_liter() {
        assert_eq!(convert_volume(1000.0, &VolumeUnit::Milliliter), 1.0);
        assert_eq!(convert_volume(1000.0, &VolumeUnit::CubicCentimeter), 1.0);
    }

    #[test]
    fn test_imperial_units() {
        assert!((convert_weight(1.0, &WeightUnit::Pound) - 0.453592).abs() < 1e-12);
        assert!((convert_weight(16.0, &WeightUnit::Ounce) - 0.453592).abs() < 1e-4);
        assert!((convert_volume(61.0237, &VolumeUnit::CubicInch) - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_unknown_unit_is_canonical() {
        let stone = WeightUnit::Other("STONE".to_string());
        assert_eq!(convert_weight(3.5, &stone), 3.5);
        let gallon = VolumeUnit::Other("GALLON".to_string());
        assert_eq!(convert_volume(2.0, &gallon), 2.0);
    }

    proptest! {
        #[test]
        fn kilogram_is_identity(x in -1.0e9f64..1.0e9) {
            prop_assert_eq!(convert_weight(x, &WeightUnit::Kilogram), x);
        }

        #[test]
        fn liter_is_identity(x in -1.0e9f64..1.0e9) {
            prop_assert_eq!(convert_volume(x, &VolumeUnit::Liter), x);
        }
    }
}
