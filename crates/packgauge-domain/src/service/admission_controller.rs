//! Admission gate for packing mutations
//!
//! Evaluates the prospective state (current contents plus every candidate,
//! summed and rounded once) before any write happens. A batch is admitted or
//! rejected as a whole.

use packgauge_types::ConstraintViolation;
use serde::{Deserialize, Serialize};

use crate::model::{ContainedItem, Container, ContainerMetrics};
use crate::service::constraint_evaluator::evaluate_contents;

/// How breaches of the two limits combine into a rejection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdmissionRule {
    /// Reject when either limit would be exceeded
    #[default]
    AnyLimit,
    /// Reject only when both limits would be exceeded at once
    AllLimits,
}

/// Outcome of an admission check, with the would-be metrics for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Admission {
    Accepted {
        metrics: ContainerMetrics,
    },
    Rejected {
        /// Weight first when both limits are breached; never empty
        violations: Vec<ConstraintViolation>,
        metrics: ContainerMetrics,
    },
}

impl Admission {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Admission::Accepted { .. })
    }

    pub fn metrics(&self) -> &ContainerMetrics {
        match self {
            Admission::Accepted { metrics } | Admission::Rejected { metrics, .. } => metrics,
        }
    }

    /// The violation reported to callers
    pub fn violation(&self) -> Option<ConstraintViolation> {
        match self {
            Admission::Accepted { .. } => None,
            Admission::Rejected { violations, .. } => violations.first().copied(),
        }
    }

    pub fn into_result(self) -> Result<ContainerMetrics, ConstraintViolation> {
        match self {
            Admission::Accepted { metrics } => Ok(metrics),
            Admission::Rejected { violations, metrics } => match violations.first() {
                Some(violation) => Err(*violation),
                None => Ok(metrics),
            },
        }
    }
}

/// Decide whether `candidates` fit into `container` under the default rule
pub fn can_admit(container: &Container, candidates: &[ContainedItem]) -> Admission {
    can_admit_with(AdmissionRule::default(), container, candidates)
}

pub fn can_admit_with(
    rule: AdmissionRule,
    container: &Container,
    candidates: &[ContainedItem],
) -> Admission {
    let prospective = container.contents.iter().chain(candidates.iter());
    let metrics = evaluate_contents(container, prospective);

    let mut breaches = Vec::with_capacity(2);
    if metrics.current_weight > container.max_weight {
        breaches.push(ConstraintViolation::Weight {
            prospective: metrics.current_weight,
            max: container.max_weight,
        });
    }
    if metrics.current_capacity > container.max_capacity {
        breaches.push(ConstraintViolation::Capacity {
            prospective: metrics.current_capacity,
            max: container.max_capacity,
        });
    }

    let rejected = match rule {
        AdmissionRule::AnyLimit => !breaches.is_empty(),
        AdmissionRule::AllLimits => breaches.len() == 2,
    };

    if rejected {
        tracing::info!(
            container = %container.id,
            candidates = candidates.len(),
            metric = %breaches[0].metric(),
            "admission rejected"
        );
        Admission::Rejected {
            violations: breaches,
            metrics,
        }
    } else {
        tracing::info!(
            container = %container.id,
            weight = metrics.current_weight,
            capacity = metrics.current_capacity,
            "admission accepted"
        );
        Admission::Accepted { metrics }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContainerKind, Item};
    use packgauge_types::{Limit, VolumeUnit, WeightUnit};
    use proptest::prelude::*;

    fn item(id: &str, weight_kg: f64, volume_l: f64) -> Item {
        Item {
            id: id.to_string(),
            name: id.to_string(),
            weight: weight_kg,
            weight_unit: WeightUnit::Kilogram,
            volume: volume_l,
            volume_unit: VolumeUnit::Liter,
        }
    }

    fn suitcase(contents: Vec<ContainedItem>) -> Container {
        Container {
            id: "s1".to_string(),
            name: "checked".to_string(),
            kind: ContainerKind::Suitcase,
            max_capacity: 20.0,
            max_weight: 23.0,
            tare_weight: 4.0,
            contents,
        }
    }

    #[test]
    fn test_accepts_within_limits() {
        let c = suitcase(vec![ContainedItem::new(item("shoes", 2.0, 6.0), 1)]);
        let decision = can_admit(&c, &[ContainedItem::new(item("jacket", 1.5, 4.0), 2)]);
        assert!(decision.is_accepted());
        assert_eq!(decision.metrics().current_weight, 5.0);
        assert_eq!(decision.metrics().current_capacity, 14.0);
        assert_eq!(decision.metrics().item_count, 3);
    }

    #[test]
    fn test_capacity_overflow_is_capacity_violation() {
        let c = suitcase(vec![ContainedItem::new(item("clothes", 5.0, 18.0), 1)]);
        let decision = can_admit(&c, &[ContainedItem::new(item("pillow", 0.5, 3.0), 1)]);
        assert!(!decision.is_accepted());
        let violation = decision.violation().unwrap();
        assert_eq!(violation.metric(), Limit::Capacity);
        assert_eq!(
            violation,
            ConstraintViolation::Capacity {
                prospective: 21.0,
                max: 20.0
            }
        );
        assert_eq!(decision.metrics().capacity_percentage, 105.0);
        // input untouched
        assert_eq!(c.contents.len(), 1);
    }

    #[test]
    fn test_weight_reported_first_when_both_breached() {
        let c = suitcase(Vec::new());
        let decision = can_admit(&c, &[ContainedItem::new(item("anvil", 30.0, 25.0), 1)]);
        match decision {
            Admission::Rejected { violations, .. } => {
                assert_eq!(violations.len(), 2);
                assert_eq!(violations[0].metric(), Limit::Weight);
                assert_eq!(violations[1].metric(), Limit::Capacity);
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_exactly_at_limit_is_accepted() {
        let c = suitcase(vec![ContainedItem::new(item("books", 20.0, 10.0), 1)]);
        let decision = can_admit(&c, &[ContainedItem::new(item("laptop", 3.0, 10.0), 1)]);
        assert!(decision.is_accepted());
        assert_eq!(decision.metrics().weight_percentage, 100.0);
        assert_eq!(decision.metrics().remaining_weight, 0.0);
    }

    #[test]
    fn test_batch_is_all_or_nothing() {
        let c = suitcase(Vec::new());
        // each fits alone, together they do not
        let a = ContainedItem::new(item("a", 12.0, 5.0), 1);
        let b = ContainedItem::new(item("b", 12.0, 5.0), 1);
        assert!(can_admit(&c, std::slice::from_ref(&a)).is_accepted());
        assert!(can_admit(&c, std::slice::from_ref(&b)).is_accepted());
        let decision = can_admit(&c, &[a, b]);
        assert_eq!(decision.violation().map(|v| v.metric()), Some(Limit::Weight));
    }

    #[test]
    fn test_missing_max_rejects_any_load() {
        let mut c = suitcase(Vec::new());
        c.max_weight = 0.0;
        let decision = can_admit(&c, &[ContainedItem::new(item("sock", 0.05, 0.1), 1)]);
        assert_eq!(decision.violation().map(|v| v.metric()), Some(Limit::Weight));
    }

    #[test]
    fn test_batch_rounded_once() {
        let mut c = suitcase(Vec::new());
        c.max_weight = 0.01;
        // three 4 g items: 0.012 kg rounds to 0.01, within the limit
        let batch: Vec<_> = (0..3)
            .map(|i| {
                let mut it = item(&format!("clip{}", i), 4.0, 0.0);
                it.weight_unit = WeightUnit::Gram;
                ContainedItem::new(it, 1)
            })
            .collect();
        assert!(can_admit(&c, &batch).is_accepted());
    }

    #[test]
    fn test_into_result() {
        let c = suitcase(Vec::new());
        let ok = can_admit(&c, &[ContainedItem::new(item("hat", 0.2, 1.0), 1)]);
        assert!(ok.into_result().is_ok());
        let err = can_admit(&c, &[ContainedItem::new(item("tent", 4.0, 30.0), 1)]);
        assert_eq!(err.into_result().unwrap_err().metric(), Limit::Capacity);
    }

    #[test]
    fn test_all_limits_rule_tolerates_single_breach() {
        let c = suitcase(Vec::new());
        let candidate = [ContainedItem::new(item("tent", 4.0, 30.0), 1)];
        assert!(!can_admit_with(AdmissionRule::AnyLimit, &c, &candidate).is_accepted());
        assert!(can_admit_with(AdmissionRule::AllLimits, &c, &candidate).is_accepted());
    }

    proptest! {
        #[test]
        fn any_limit_is_stricter_than_all_limits(
            current_w in 0.0f64..30.0,
            current_v in 0.0f64..30.0,
            add_w in 0.0f64..10.0,
            add_v in 0.0f64..10.0,
            qty in 1u32..4,
        ) {
            let c = suitcase(vec![ContainedItem::new(item("base", current_w, current_v), 1)]);
            let candidate = [ContainedItem::new(item("new", add_w, add_v), qty)];
            let any = can_admit_with(AdmissionRule::AnyLimit, &c, &candidate);
            let all = can_admit_with(AdmissionRule::AllLimits, &c, &candidate);
            if !all.is_accepted() {
                prop_assert!(!any.is_accepted());
            }
            prop_assert_eq!(any.metrics(), all.metrics());
        }

        #[test]
        fn any_limit_rejects_single_metric_breach(
            over_w in 23.01f64..40.0,
            within_v in 0.0f64..20.0,
        ) {
            let c = suitcase(Vec::new());
            let candidate = [ContainedItem::new(item("heavy", over_w, within_v), 1)];
            let decision = can_admit(&c, &candidate);
            prop_assert_eq!(decision.violation().map(|v| v.metric()), Some(Limit::Weight));
            prop_assert!(can_admit_with(AdmissionRule::AllLimits, &c, &candidate).is_accepted());
        }

        #[test]
        fn accepted_state_is_within_limits(
            add_w in 0.0f64..30.0,
            add_v in 0.0f64..30.0,
        ) {
            let c = suitcase(Vec::new());
            let decision = can_admit(&c, &[ContainedItem::new(item("x", add_w, add_v), 1)]);
            if decision.is_accepted() {
                prop_assert!(!decision.metrics().is_full);
            } else {
                prop_assert!(decision.metrics().is_full);
            }
        }
    }

    #[derive(Clone, Default)]
    struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_both_decisions_log_at_info() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let c = suitcase(Vec::new());
            assert!(can_admit(&c, &[ContainedItem::new(item("scarf", 0.2, 1.0), 1)]).is_accepted());
            assert!(!can_admit(&c, &[ContainedItem::new(item("anvil", 30.0, 1.0), 1)]).is_accepted());
        });

        let logs = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("admission accepted"), "{}", logs);
        assert!(logs.contains("admission rejected"), "{}", logs);
    }
}
