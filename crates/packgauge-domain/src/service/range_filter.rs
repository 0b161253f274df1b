//! Numeric range filter validation
//!
//! `RangeFilterValidator` sanitizes `{min, max}` input for one
//! (entity, metric) field. `RangeFilterState` wraps it for interactive
//! editing, where an invalid in-progress edit is dropped instead of emitted.

use packgauge_types::{FieldKey, ValidationError};
use serde_json::Value;

use crate::model::{NumberFieldConfig, NumberFieldTable, NumberRangeValue};

const ALLOWED_KEYS: [&str; 2] = ["min", "max"];

#[derive(Debug, Clone, Copy)]
pub struct RangeFilterValidator<'a> {
    key: FieldKey,
    config: &'a NumberFieldConfig,
}

impl<'a> RangeFilterValidator<'a> {
    pub fn new(key: FieldKey, config: &'a NumberFieldConfig) -> Self {
        Self { key, config }
    }

    /// Validator for `key`, or `None` if the table has no such field
    pub fn for_field(table: &'a NumberFieldTable, key: FieldKey) -> Option<Self> {
        table.get(key).map(|config| Self::new(key, config))
    }

    pub fn key(&self) -> FieldKey {
        self.key
    }

    pub fn config(&self) -> &'a NumberFieldConfig {
        self.config
    }

    /// Validate and normalize a range.
    ///
    /// Rejects an empty range and an inverted range, then clamps each present
    /// bound into `[gte, lte]` and rounds it to the configured decimals.
    pub fn parse(&self, input: &NumberRangeValue) -> Result<NumberRangeValue, ValidationError> {
        if input.is_empty() {
            return Err(ValidationError::EmptyRange {
                message: self.config.messages.required.clone(),
            });
        }

        for (name, bound) in [("min", input.min), ("max", input.max)] {
            if bound.is_some_and(|v| !v.is_finite()) {
                return Err(ValidationError::NotFinite {
                    field: format!("{}.{}", self.key, name),
                });
            }
        }

        if let (Some(min), Some(max)) = (input.min, input.max) {
            if min > max {
                return Err(ValidationError::InvertedRange {
                    min,
                    max,
                    message: self.config.messages.min_gt_max.clone(),
                });
            }
        }

        Ok(NumberRangeValue {
            min: input.min.map(|v| self.config.normalize(v)),
            max: input.max.map(|v| self.config.normalize(v)),
        })
    }

    /// Validate a raw JSON object.
    ///
    /// Only `min` and `max` keys are accepted; each must be a number or null.
    pub fn parse_json(&self, input: &Value) -> Result<NumberRangeValue, ValidationError> {
        self.parse(&range_from_json(input)?)
    }
}

/// Allow-list check for the `{min, max}` input shape
pub fn range_from_json(input: &Value) -> Result<NumberRangeValue, ValidationError> {
    let object = input.as_object().ok_or(ValidationError::NotAnObject)?;

    if let Some(key) = object.keys().find(|k| !ALLOWED_KEYS.contains(&k.as_str())) {
        return Err(ValidationError::UnknownKey {
            key: key.clone(),
            expected: ALLOWED_KEYS.join(", "),
        });
    }

    let bound = |name: &str| -> Result<Option<f64>, ValidationError> {
        match object.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => n.as_f64().map(Some).ok_or_else(|| ValidationError::NotANumber {
                field: name.to_string(),
            }),
            Some(_) => Err(ValidationError::NotANumber {
                field: name.to_string(),
            }),
        }
    };

    Ok(NumberRangeValue {
        min: bound("min")?,
        max: bound("max")?,
    })
}

/// Emitted by `RangeFilterState` when the effective filter changes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RangeEvent {
    Changed(NumberRangeValue),
    /// Both bounds cleared; filter is inactive
    Cleared,
}

#[derive(Debug, Clone, Copy)]
enum Bound {
    Min,
    Max,
}

/// Local editing state for an interactive range filter
#[derive(Debug, Clone)]
pub struct RangeFilterState<'a> {
    validator: RangeFilterValidator<'a>,
    min_text: String,
    max_text: String,
    value: Option<NumberRangeValue>,
}

impl<'a> RangeFilterState<'a> {
    /// Inactive state
    pub fn new(validator: RangeFilterValidator<'a>) -> Self {
        Self {
            validator,
            min_text: String::new(),
            max_text: String::new(),
            value: None,
        }
    }

    /// Last valid filter, `None` when inactive
    pub fn value(&self) -> Option<&NumberRangeValue> {
        self.value.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.value.is_some()
    }

    pub fn min_text(&self) -> &str {
        &self.min_text
    }

    pub fn max_text(&self) -> &str {
        &self.max_text
    }

    /// Mirror an externally supplied filter into local state.
    ///
    /// An external value that does not validate leaves the local value as is.
    pub fn sync(&mut self, external: Option<&NumberRangeValue>) {
        match external {
            None => {
                self.min_text.clear();
                self.max_text.clear();
                self.value = None;
            }
            Some(range) => match self.validator.parse(range) {
                Ok(normalized) => {
                    self.min_text = format_bound(normalized.min);
                    self.max_text = format_bound(normalized.max);
                    self.value = Some(normalized);
                }
                Err(err) => {
                    tracing::debug!(field = %self.validator.key(), error = %err, "ignoring invalid external range");
                }
            },
        }
    }

    pub fn edit_min(&mut self, text: &str) -> Option<RangeEvent> {
        self.edit(Bound::Min, text)
    }

    pub fn edit_max(&mut self, text: &str) -> Option<RangeEvent> {
        self.edit(Bound::Max, text)
    }

    /// Explicitly clear both bounds
    pub fn clear(&mut self) -> Option<RangeEvent> {
        self.min_text.clear();
        self.max_text.clear();
        self.value.take().map(|_| RangeEvent::Cleared)
    }

    /// Both bounds are re-read from the visible text on every edit, so the
    /// emitted value always matches what is shown. Text that does not form a
    /// valid range keeps the last valid value.
    fn edit(&mut self, bound: Bound, text: &str) -> Option<RangeEvent> {
        let trimmed = text.trim().to_string();
        match bound {
            Bound::Min => self.min_text = trimmed,
            Bound::Max => self.max_text = trimmed,
        }

        let candidate = match (parse_bound(&self.min_text), parse_bound(&self.max_text)) {
            (Ok(min), Ok(max)) => NumberRangeValue::new(min, max),
            _ => {
                tracing::trace!(
                    field = %self.validator.key(),
                    min = %self.min_text,
                    max = %self.max_text,
                    "unparseable edit"
                );
                return None;
            }
        };

        if candidate.is_empty() {
            return self.value.take().map(|_| RangeEvent::Cleared);
        }

        match self.validator.parse(&candidate) {
            Ok(normalized) if self.value != Some(normalized) => {
                self.value = Some(normalized);
                Some(RangeEvent::Changed(normalized))
            }
            Ok(_) => None,
            Err(err) => {
                tracing::trace!(field = %self.validator.key(), error = %err, "keeping last valid range");
                None
            }
        }
    }
}

/// Empty text is an absent bound
fn parse_bound(text: &str) -> Result<Option<f64>, std::num::ParseFloatError> {
    if text.is_empty() {
        return Ok(None);
    }
    text.parse::<f64>().map(Some)
}

fn format_bound(bound: Option<f64>) -> String {
    bound.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use packgauge_types::{Entity, Metric};
    use proptest::prelude::*;
    use serde_json::json;

    fn table() -> NumberFieldTable {
        NumberFieldTable::builtin()
    }

    fn bag_max_weight(table: &NumberFieldTable) -> RangeFilterValidator<'_> {
        RangeFilterValidator::for_field(table, FieldKey::new(Entity::Bag, Metric::MaxWeight)).unwrap()
    }

    fn range(min: Option<f64>, max: Option<f64>) -> NumberRangeValue {
        NumberRangeValue::new(min, max)
    }

    #[test]
    fn test_empty_range_rejected_for_every_field() {
        let table = table();
        for key in table.keys() {
            let validator = RangeFilterValidator::for_field(&table, key).unwrap();
            assert!(
                matches!(validator.parse(&range(None, None)), Err(ValidationError::EmptyRange { .. })),
                "{} accepted an empty range",
                key
            );
        }
    }

    #[test]
    fn test_inverted_range_rejected_for_every_field() {
        let table = table();
        for key in table.keys() {
            let validator = RangeFilterValidator::for_field(&table, key).unwrap();
            assert!(matches!(
                validator.parse(&range(Some(10.0), Some(5.0))),
                Err(ValidationError::InvertedRange { .. })
            ));
        }
    }

    #[test]
    fn test_clamps_and_rounds() {
        let table = table();
        let validator = bag_max_weight(&table);
        let parsed = validator.parse(&range(Some(-4.0), Some(12.345))).unwrap();
        assert_eq!(parsed, range(Some(0.0), Some(12.3)));

        let parsed = validator.parse(&range(None, Some(80.0))).unwrap();
        assert_eq!(parsed, range(None, Some(50.0)));
    }

    #[test]
    fn test_rejects_non_finite() {
        let table = table();
        let validator = bag_max_weight(&table);
        assert!(matches!(
            validator.parse(&range(Some(f64::NAN), None)),
            Err(ValidationError::NotFinite { .. })
        ));
        assert!(matches!(
            validator.parse(&range(None, Some(f64::INFINITY))),
            Err(ValidationError::NotFinite { .. })
        ));
    }

    #[test]
    fn test_custom_messages_are_used() {
        let mut config = NumberFieldConfig::new(0.0, 10.0, 0);
        config.messages.min_gt_max = "from must be before to".to_string();
        let validator = RangeFilterValidator::new(FieldKey::new(Entity::Item, Metric::Weight), &config);
        let err = validator.parse(&range(Some(3.0), Some(1.0))).unwrap_err();
        assert!(err.to_string().starts_with("from must be before to"));
    }

    #[test]
    fn test_parse_json_allow_list() {
        let table = table();
        let validator = bag_max_weight(&table);

        let parsed = validator.parse_json(&json!({"min": 2, "max": null})).unwrap();
        assert_eq!(parsed, range(Some(2.0), None));

        assert!(matches!(
            validator.parse_json(&json!({"min": 1, "step": 2})),
            Err(ValidationError::UnknownKey { key, .. }) if key == "step"
        ));
        assert!(matches!(
            validator.parse_json(&json!({"min": "3"})),
            Err(ValidationError::NotANumber { .. })
        ));
        assert!(matches!(validator.parse_json(&json!([1, 2])), Err(ValidationError::NotAnObject)));
        assert!(matches!(validator.parse_json(&json!({})), Err(ValidationError::EmptyRange { .. })));
    }

    #[test]
    fn test_state_emits_valid_edits() {
        let table = table();
        let mut state = RangeFilterState::new(bag_max_weight(&table));
        assert!(!state.is_active());

        assert_eq!(state.edit_min("5"), Some(RangeEvent::Changed(range(Some(5.0), None))));
        assert_eq!(
            state.edit_max("20"),
            Some(RangeEvent::Changed(range(Some(5.0), Some(20.0))))
        );
        assert_eq!(state.value(), Some(&range(Some(5.0), Some(20.0))));
    }

    #[test]
    fn test_state_keeps_last_valid_on_inverted_edit() {
        let table = table();
        let mut state = RangeFilterState::new(bag_max_weight(&table));
        state.sync(Some(&range(Some(5.0), Some(20.0))));

        assert_eq!(state.edit_min("25"), None);
        assert_eq!(state.min_text(), "25");
        assert_eq!(state.value(), Some(&range(Some(5.0), Some(20.0))));
    }

    #[test]
    fn test_state_ignores_unparseable_text() {
        let table = table();
        let mut state = RangeFilterState::new(bag_max_weight(&table));
        state.edit_min("3");
        assert_eq!(state.edit_min("3x"), None);
        assert_eq!(state.min_text(), "3x");
        assert_eq!(state.value(), Some(&range(Some(3.0), None)));

        // the bad min text still blocks a max edit until it is fixed
        assert_eq!(state.edit_max("10"), None);
        assert_eq!(state.edit_min("4"), Some(RangeEvent::Changed(range(Some(4.0), Some(10.0)))));
    }

    #[test]
    fn test_state_applies_what_is_shown_after_rejected_min() {
        let table = table();
        let mut state = RangeFilterState::new(bag_max_weight(&table));
        state.sync(Some(&range(Some(5.0), Some(20.0))));

        assert_eq!(state.edit_min("25"), None);
        assert_eq!(
            state.edit_max("30"),
            Some(RangeEvent::Changed(range(Some(25.0), Some(30.0))))
        );
        assert_eq!((state.min_text(), state.max_text()), ("25", "30"));
        assert_eq!(state.value(), Some(&range(Some(25.0), Some(30.0))));
    }

    #[test]
    fn test_state_applies_what_is_shown_after_rejected_max() {
        let table = table();
        let mut state = RangeFilterState::new(bag_max_weight(&table));
        state.sync(Some(&range(Some(5.0), None)));

        assert_eq!(state.edit_max("3"), None);
        assert_eq!(state.value(), Some(&range(Some(5.0), None)));

        assert_eq!(state.edit_min(""), Some(RangeEvent::Changed(range(None, Some(3.0)))));
        assert_eq!((state.min_text(), state.max_text()), ("", "3"));
        assert_eq!(state.value(), Some(&range(None, Some(3.0))));
    }

    #[test]
    fn test_state_collapses_only_when_both_cleared() {
        let table = table();
        let mut state = RangeFilterState::new(bag_max_weight(&table));
        state.sync(Some(&range(Some(5.0), Some(20.0))));

        assert_eq!(state.edit_min(""), Some(RangeEvent::Changed(range(None, Some(20.0)))));
        assert!(state.is_active());
        assert_eq!(state.edit_max(""), Some(RangeEvent::Cleared));
        assert!(!state.is_active());
        assert_eq!(state.clear(), None);
    }

    #[test]
    fn test_state_sync_mirrors_external() {
        let table = table();
        let mut state = RangeFilterState::new(bag_max_weight(&table));
        state.sync(Some(&range(Some(1.25), None)));
        assert_eq!(state.min_text(), "1.3");
        assert_eq!(state.max_text(), "");

        // invalid external value keeps local state
        state.sync(Some(&range(Some(9.0), Some(2.0))));
        assert_eq!(state.value(), Some(&range(Some(1.3), None)));

        state.sync(None);
        assert!(!state.is_active());
        assert_eq!(state.min_text(), "");
    }

    #[test]
    fn test_state_clear() {
        let table = table();
        let mut state = RangeFilterState::new(bag_max_weight(&table));
        state.edit_max("10");
        assert_eq!(state.clear(), Some(RangeEvent::Cleared));
        assert!(state.value().is_none());
    }

    proptest! {
        #[test]
        fn parse_is_idempotent(
            key_index in 0usize..13,
            min in proptest::option::of(-500.0f64..500.0),
            max in proptest::option::of(-500.0f64..500.0),
        ) {
            let table = table();
            let keys = table.keys();
            let validator = RangeFilterValidator::for_field(&table, keys[key_index % keys.len()]).unwrap();
            if let Ok(once) = validator.parse(&range(min, max)) {
                let twice = validator.parse(&once).unwrap();
                prop_assert_eq!(once, twice);
            }
        }

        #[test]
        fn parsed_bounds_stay_ordered(a in -500.0f64..500.0, b in -500.0f64..500.0) {
            let table = table();
            let validator = bag_max_weight(&table);
            let (min, max) = if a <= b { (a, b) } else { (b, a) };
            let parsed = validator.parse(&range(Some(min), Some(max))).unwrap();
            prop_assert!(parsed.min.unwrap() <= parsed.max.unwrap());
        }
    }
}
