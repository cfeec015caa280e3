//! Tests for the cross-module invariants of the data model: the feature
//! schema and label taxonomy orderings everything downstream relies on.

use vitaband_structures::{
    FeatureVector, Label, LabelClass, PredictionResult, SensorMetric, FEATURE_COUNT, LABEL_COUNT,
};

#[test]
fn feature_schema_and_taxonomy_sizes() {
    assert_eq!(SensorMetric::ALL.len(), FEATURE_COUNT);
    assert_eq!(Label::ALL.len(), LABEL_COUNT);
}

#[test]
fn snapshot_is_always_complete() {
    // A vector with zero observed readings still yields 12 finite values.
    let fv = FeatureVector::defaults();
    let array = fv.as_array();
    assert_eq!(array.len(), FEATURE_COUNT);
    assert!(array.iter().all(|v| v.is_finite()));
}

#[test]
fn availability_distinguishes_defaults_from_observations() {
    let mut fv = FeatureVector::defaults();
    fv.set(SensorMetric::BodyTemp, 36.6);
    fv.set(SensorMetric::Spo2Pct, 98.0);

    let unavailable: Vec<SensorMetric> = fv
        .availability()
        .filter(|(_, observed)| !observed)
        .map(|(metric, _)| metric)
        .collect();

    assert_eq!(unavailable.len(), FEATURE_COUNT - 2);
    assert!(!unavailable.contains(&SensorMetric::BodyTemp));
    assert!(!unavailable.contains(&SensorMetric::Spo2Pct));
    // The unavailable metrics read back their static defaults.
    for metric in unavailable {
        assert_eq!(fv.get(metric), metric.default_value());
    }
}

#[test]
fn binary_vector_bits_map_to_taxonomy_positions() {
    let mut bits = [0u8; LABEL_COUNT];
    bits[0] = 1; // Resting
    bits[23] = 1; // Critical
    let result = PredictionResult::from_binary_vector(bits, FeatureVector::defaults());
    assert_eq!(result.active_labels, vec![Label::Resting, Label::Critical]);
}

#[test]
fn unknown_priority_defaults_to_zero() {
    // Status labels other than Critical carry no explicit ranking.
    assert_eq!(Label::Normal.priority(), 0);
    assert_eq!(Label::Healthy.priority(), 0);
    assert_eq!(Label::Warning.priority(), 0);
    assert_eq!(Label::EarlyIllnessIndication.priority(), 0);
}

#[test]
fn condition_class_covers_the_seven_conditions() {
    let conditions: Vec<Label> = Label::ALL
        .iter()
        .copied()
        .filter(|l| l.class() == LabelClass::Condition)
        .collect();
    assert_eq!(
        conditions,
        vec![
            Label::Stressed,
            Label::Fatigued,
            Label::Dehydrated,
            Label::PossibleFever,
            Label::LowOxygenState,
            Label::Overexertion,
            Label::EarlyIllnessIndication,
        ]
    );
}
