// Copyright 2026 VitaBand Project
// SPDX-License-Identifier: Apache-2.0

//! Classification label taxonomy.
//!
//! The 24 labels are partitioned into four disjoint semantic classes.
//! [`Label::ALL`] is in training column order; the per-label priority is a
//! static urgency ranking used for tie-breaking and message ordering only,
//! it plays no part in classification itself.

use serde::{Deserialize, Serialize};

/// Number of labels in the taxonomy.
pub const LABEL_COUNT: usize = 24;

/// Semantic class of a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelClass {
    Activity,
    Condition,
    Environment,
    Status,
}

/// One element of the fixed classification taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Resting,
    LightActivity,
    ModerateActivity,
    HighActivity,
    Sleeping,
    Walking,
    Running,
    Sedentary,
    Normal,
    Stressed,
    Fatigued,
    Dehydrated,
    PossibleFever,
    LowOxygenState,
    Overexertion,
    EarlyIllnessIndication,
    HotEnvironment,
    ColdEnvironment,
    HumidEnvironment,
    LowPressureEnvironment,
    Healthy,
    SlightAbnormality,
    Warning,
    Critical,
}

impl Label {
    /// All labels in training column order. Bit `i` of a binary prediction
    /// vector refers to `ALL[i]`; never reorder.
    pub const ALL: [Label; LABEL_COUNT] = [
        Label::Resting,
        Label::LightActivity,
        Label::ModerateActivity,
        Label::HighActivity,
        Label::Sleeping,
        Label::Walking,
        Label::Running,
        Label::Sedentary,
        Label::Normal,
        Label::Stressed,
        Label::Fatigued,
        Label::Dehydrated,
        Label::PossibleFever,
        Label::LowOxygenState,
        Label::Overexertion,
        Label::EarlyIllnessIndication,
        Label::HotEnvironment,
        Label::ColdEnvironment,
        Label::HumidEnvironment,
        Label::LowPressureEnvironment,
        Label::Healthy,
        Label::SlightAbnormality,
        Label::Warning,
        Label::Critical,
    ];

    /// Human-readable label name as used in training data and messages.
    pub fn name(&self) -> &'static str {
        match self {
            Label::Resting => "Resting",
            Label::LightActivity => "Light activity",
            Label::ModerateActivity => "Moderate activity",
            Label::HighActivity => "High activity",
            Label::Sleeping => "Sleeping",
            Label::Walking => "Walking",
            Label::Running => "Running",
            Label::Sedentary => "Sedentary",
            Label::Normal => "Normal",
            Label::Stressed => "Stressed",
            Label::Fatigued => "Fatigued",
            Label::Dehydrated => "Dehydrated",
            Label::PossibleFever => "Possible fever",
            Label::LowOxygenState => "Low oxygen state",
            Label::Overexertion => "Overexertion",
            Label::EarlyIllnessIndication => "Early illness indication",
            Label::HotEnvironment => "Hot environment",
            Label::ColdEnvironment => "Cold environment",
            Label::HumidEnvironment => "Humid environment",
            Label::LowPressureEnvironment => "Low-pressure environment",
            Label::Healthy => "Healthy",
            Label::SlightAbnormality => "Slight abnormality",
            Label::Warning => "Warning",
            Label::Critical => "Critical",
        }
    }

    /// Position in the taxonomy, i.e. the binary-vector bit this label owns.
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|l| l == self).unwrap_or(0)
    }

    /// Look up a label by its training-data name.
    pub fn from_name(name: &str) -> Option<Label> {
        Self::ALL.iter().copied().find(|l| l.name() == name)
    }

    /// Semantic class this label belongs to.
    pub fn class(&self) -> LabelClass {
        match self {
            Label::Resting
            | Label::LightActivity
            | Label::ModerateActivity
            | Label::HighActivity
            | Label::Sleeping
            | Label::Walking
            | Label::Running
            | Label::Sedentary => LabelClass::Activity,
            Label::Stressed
            | Label::Fatigued
            | Label::Dehydrated
            | Label::PossibleFever
            | Label::LowOxygenState
            | Label::Overexertion
            | Label::EarlyIllnessIndication => LabelClass::Condition,
            Label::HotEnvironment
            | Label::ColdEnvironment
            | Label::HumidEnvironment
            | Label::LowPressureEnvironment => LabelClass::Environment,
            Label::Normal
            | Label::Healthy
            | Label::SlightAbnormality
            | Label::Warning
            | Label::Critical => LabelClass::Status,
        }
    }

    /// Static urgency ranking (higher = more urgent). Labels without an
    /// explicit entry rank 0.
    pub fn priority(&self) -> u32 {
        match self {
            Label::Critical => 100,
            Label::LowOxygenState => 90,
            Label::PossibleFever => 85,
            Label::Overexertion => 80,
            Label::Dehydrated => 75,
            Label::Fatigued => 70,
            Label::Stressed => 65,
            Label::Running => 40,
            Label::HighActivity => 38,
            Label::ModerateActivity => 35,
            Label::Walking => 30,
            Label::LightActivity => 25,
            Label::Resting => 20,
            Label::Sedentary => 15,
            Label::HotEnvironment => 12,
            Label::ColdEnvironment => 11,
            Label::Sleeping => 10,
            Label::HumidEnvironment => 10,
            Label::LowPressureEnvironment => 9,
            _ => 0,
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
