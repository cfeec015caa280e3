// Copyright 2026 VitaBand Project
// SPDX-License-Identifier: Apache-2.0

//! Partitions an active-label set into its semantic classes and picks
//! the single most urgent label.

use vitaband_structures::{Label, LabelClass};

/// Classified view of one cycle's active labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub activity: Vec<Label>,
    pub conditions: Vec<Label>,
    pub environment: Vec<Label>,
    pub status: Vec<Label>,
    /// Highest-priority active label; `None` when nothing is active.
    /// Ties go to the earliest label in input order.
    pub main_label: Option<Label>,
}

/// Pure taxonomy lookup; stateless and deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelClassifier;

impl LabelClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, active_labels: &[Label]) -> Classification {
        let mut activity = Vec::new();
        let mut conditions = Vec::new();
        let mut environment = Vec::new();
        let mut status = Vec::new();
        for label in active_labels {
            match label.class() {
                LabelClass::Activity => activity.push(*label),
                LabelClass::Condition => conditions.push(*label),
                LabelClass::Environment => environment.push(*label),
                LabelClass::Status => status.push(*label),
            }
        }
        Classification {
            activity,
            conditions,
            environment,
            status,
            main_label: select_main_label(active_labels),
        }
    }
}

/// First label with the maximum priority value.
fn select_main_label(labels: &[Label]) -> Option<Label> {
    labels.iter().copied().fold(None, |best, candidate| match best {
        None => Some(candidate),
        Some(current) if candidate.priority() > current.priority() => Some(candidate),
        _ => best,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partitions_by_class() {
        let classifier = LabelClassifier::new();
        let result = classifier.classify(&[
            Label::Walking,
            Label::Dehydrated,
            Label::HotEnvironment,
            Label::Warning,
        ]);
        assert_eq!(result.activity, vec![Label::Walking]);
        assert_eq!(result.conditions, vec![Label::Dehydrated]);
        assert_eq!(result.environment, vec![Label::HotEnvironment]);
        assert_eq!(result.status, vec![Label::Warning]);
        assert_eq!(result.main_label, Some(Label::Dehydrated));
    }

    #[test]
    fn critical_outranks_everything() {
        let classifier = LabelClassifier::new();
        let result = classifier.classify(&[Label::Walking, Label::Stressed, Label::Critical]);
        assert_eq!(result.main_label, Some(Label::Critical));
    }

    #[test]
    fn ties_keep_first_in_input_order() {
        // Sleeping and HumidEnvironment share a priority value
        assert_eq!(
            select_main_label(&[Label::Sleeping, Label::HumidEnvironment]),
            Some(Label::Sleeping)
        );
        assert_eq!(
            select_main_label(&[Label::HumidEnvironment, Label::Sleeping]),
            Some(Label::HumidEnvironment)
        );
    }

    #[test]
    fn zero_priority_labels_can_still_be_main() {
        assert_eq!(select_main_label(&[Label::Normal]), Some(Label::Normal));
        assert_eq!(select_main_label(&[]), None);
    }

    #[test]
    fn classification_is_deterministic() {
        let classifier = LabelClassifier::new();
        let labels = [Label::Running, Label::Dehydrated, Label::HighActivity];
        assert_eq!(classifier.classify(&labels), classifier.classify(&labels));
    }
}
