//! Aggregation of contained items into canonical totals
//!
//! Sums are rounded to two decimals once, after summation. Rounding per item
//! would compound drift, so `raw_*` sums stay unrounded until the end.
//! Contributions are added in sorted order, so the rounded total does not
//! depend on the order items are listed in.

use crate::model::ContainedItem;
use crate::rounding::round2;
use crate::service::unit_converter::{convert_volume, convert_weight};

fn sorted_sum(values: impl Iterator<Item = f64>) -> f64 {
    let mut values: Vec<f64> = values.collect();
    values.sort_by(f64::total_cmp);
    values.into_iter().sum()
}

/// Unrounded weight sum in kilograms
pub fn raw_weight<'a, I>(items: I) -> f64
where
    I: IntoIterator<Item = &'a ContainedItem>,
{
    sorted_sum(
        items
            .into_iter()
            .map(|c| convert_weight(c.item.weight, &c.item.weight_unit) * f64::from(c.quantity)),
    )
}

/// Unrounded volume sum in liters
pub fn raw_capacity<'a, I>(items: I) -> f64
where
    I: IntoIterator<Item = &'a ContainedItem>,
{
    sorted_sum(
        items
            .into_iter()
            .map(|c| convert_volume(c.item.volume, &c.item.volume_unit) * f64::from(c.quantity)),
    )
}

/// Contents weight in kilograms, rounded to 2 decimals. Empty input gives 0.
pub fn current_weight<'a, I>(items: I) -> f64
where
    I: IntoIterator<Item = &'a ContainedItem>,
{
    round2(raw_weight(items))
}

/// Contents volume in liters, rounded to 2 decimals. Empty input gives 0.
pub fn current_capacity<'a, I>(items: I) -> f64
where
    I: IntoIterator<Item = &'a ContainedItem>,
{
    round2(raw_capacity(items))
}

/// Contents weight plus the container's own weight
pub fn total_weight_with_container<'a, I>(items: I, tare_weight: f64) -> f64
where
    I: IntoIterator<Item = &'a ContainedItem>,
{
    round2(current_weight(items) + tare_weight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Item;
    use packgauge_types::{VolumeUnit, WeightUnit};
    use proptest::prelude::*;

    fn item(weight: f64, weight_unit: WeightUnit, volume: f64, volume_unit: VolumeUnit) -> Item {
        Item {
            id: "i".to_string(),
            name: "test".to_string(),
            weight,
            weight_unit,
            volume,
            volume_unit,
        }
    }

    #[test]
    fn test_empty_and_missing() {
        let empty: Vec<ContainedItem> = Vec::new();
        assert_eq!(current_weight(&empty), 0.0);
        assert_eq!(current_capacity(&empty), 0.0);

        let missing: Option<&Vec<ContainedItem>> = None;
        assert_eq!(current_weight(missing.into_iter().flatten()), 0.0);
    }

    #[test]
    fn test_pounds_round_to_one_kilogram() {
        let items = vec![ContainedItem::new(
            item(2.20462, WeightUnit::Pound, 0.0, VolumeUnit::Liter),
            1,
        )];
        assert_eq!(current_weight(&items), 1.0);
    }

    #[test]
    fn test_quantity_multiplies() {
        let items = vec![
            ContainedItem::new(item(250.0, WeightUnit::Gram, 500.0, VolumeUnit::Milliliter), 4),
            ContainedItem::new(item(1.5, WeightUnit::Kilogram, 2.0, VolumeUnit::Liter), 2),
        ];
        assert_eq!(current_weight(&items), 4.0);
        assert_eq!(current_capacity(&items), 6.0);
    }

    #[test]
    fn test_rounds_once_at_the_end() {
        // 3 x 0.004 kg = 0.012 -> 0.01; per-item rounding would give 0.0
        let items: Vec<_> = (0..3)
            .map(|_| ContainedItem::new(item(4.0, WeightUnit::Gram, 0.0, VolumeUnit::Liter), 1))
            .collect();
        assert_eq!(current_weight(&items), 0.01);
    }

    #[test]
    fn test_total_includes_tare() {
        let items = vec![ContainedItem::new(
            item(3.333, WeightUnit::Kilogram, 1.0, VolumeUnit::Liter),
            1,
        )];
        assert_eq!(total_weight_with_container(&items, 2.5), 5.83);
    }

    #[test]
    fn test_boundary_total_same_in_every_order() {
        let kg = |w: f64| ContainedItem::new(item(w, WeightUnit::Kilogram, w, VolumeUnit::Liter), 1);
        let (a, b, c) = (kg(41.027), kg(31.911), kg(60.457));
        let orders = [
            vec![a.clone(), b.clone(), c.clone()],
            vec![a.clone(), c.clone(), b.clone()],
            vec![b.clone(), a.clone(), c.clone()],
            vec![b.clone(), c.clone(), a.clone()],
            vec![c.clone(), a.clone(), b.clone()],
            vec![c.clone(), b.clone(), a.clone()],
        ];

        let weight = current_weight(&orders[0]);
        let capacity = current_capacity(&orders[0]);
        assert!((weight - 133.395).abs() <= 0.0051);
        for order in &orders {
            assert_eq!(current_weight(order), weight);
            assert_eq!(current_capacity(order), capacity);
        }
    }

    fn arb_contained() -> impl Strategy<Value = ContainedItem> {
        let weight_unit = prop_oneof![
            Just(WeightUnit::Kilogram),
            Just(WeightUnit::Gram),
            Just(WeightUnit::Pound),
            Just(WeightUnit::Ounce),
        ];
        (0.0f64..50.0, weight_unit, 0.0f64..20.0, 1u32..10).prop_map(|(w, unit, v, qty)| {
            ContainedItem::new(item(w, unit, v, VolumeUnit::Liter), qty)
        })
    }

    proptest! {
        #[test]
        fn weight_is_order_independent(
            items in proptest::collection::vec(arb_contained(), 0..12),
            shift in 0usize..12,
        ) {
            let mut reversed = items.clone();
            reversed.reverse();
            let mut rotated = items.clone();
            if !rotated.is_empty() {
                let len = rotated.len();
                rotated.rotate_left(shift % len);
            }
            for other in [&reversed, &rotated] {
                prop_assert_eq!(current_weight(&items), current_weight(other));
                prop_assert_eq!(current_capacity(&items), current_capacity(other));
            }
        }
    }
}
