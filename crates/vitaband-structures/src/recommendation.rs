// Copyright 2026 VitaBand Project
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// Urgency of a recommendation, ordered from least to most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityLevel {
    Normal,
    Caution,
    Warning,
    Critical,
}

impl PriorityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityLevel::Normal => "normal",
            PriorityLevel::Caution => "caution",
            PriorityLevel::Warning => "warning",
            PriorityLevel::Critical => "critical",
        }
    }

    /// Levels that downstream consumers treat as alerts.
    pub fn is_alert(&self) -> bool {
        *self >= PriorityLevel::Warning
    }
}

impl std::fmt::Display for PriorityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Human-readable interpretation of one prediction.
///
/// Derived deterministically from a [`crate::PredictionResult`] apart from
/// the choice of introductory phrase, which is cosmetic.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    /// Narrative opening describing what the readings show.
    pub summary: String,
    /// Suggested action(s); mode-dependent (first action or all joined).
    pub action_text: String,
    pub priority: PriorityLevel,
    /// Complete message as shown to the user.
    pub full_message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_levels_are_ordered() {
        assert!(PriorityLevel::Normal < PriorityLevel::Caution);
        assert!(PriorityLevel::Caution < PriorityLevel::Warning);
        assert!(PriorityLevel::Warning < PriorityLevel::Critical);
    }

    #[test]
    fn only_warning_and_critical_alert() {
        assert!(!PriorityLevel::Normal.is_alert());
        assert!(!PriorityLevel::Caution.is_alert());
        assert!(PriorityLevel::Warning.is_alert());
        assert!(PriorityLevel::Critical.is_alert());
    }
}
