// Copyright 2026 VitaBand Project
// SPDX-License-Identifier: Apache-2.0

//! Recommendation composer: turns an active-label set plus the feature
//! snapshot into a humanized, priority-tagged recommendation.
//!
//! All narrative text lives in the per-label tables below. The only
//! non-deterministic element is the choice of intro phrase, which is
//! purely stylistic; everything else is a pure function of the inputs.

use ahash::AHashMap;
use rand::seq::SliceRandom;
use vitaband_structures::{
    FeatureVector, Label, LabelClass, PriorityLevel, Recommendation, SensorMetric,
};

use crate::classifier::LabelClassifier;

/// How strongly a condition is present, scaling its phrasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intensity {
    Mild,
    Moderate,
    High,
}

impl Intensity {
    pub fn from_name(name: &str) -> Option<Intensity> {
        match name {
            "mild" => Some(Intensity::Mild),
            "moderate" => Some(Intensity::Moderate),
            "high" => Some(Intensity::High),
            _ => None,
        }
    }
}

/// Output verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// First action only; full message is summary plus that action.
    Short,
    /// All actions, a "what this means" block and the sensor context.
    Detailed,
}

impl OutputMode {
    pub fn from_name(name: &str) -> Option<OutputMode> {
        match name {
            "short" => Some(OutputMode::Short),
            "detailed" => Some(OutputMode::Detailed),
            _ => None,
        }
    }
}

const INTRO_PHRASES: [&str; 3] = [
    "From your readings,",
    "Based on the sensors,",
    "From what the data shows,",
];

const FALLBACK_ACTION: &str =
    "Keep monitoring your readings and stay hydrated. Take rest if you feel unwell.";

/// Labels that escalate straight to `warning` when active.
const URGENT_LABELS: [Label; 3] = [Label::LowOxygenState, Label::PossibleFever, Label::Warning];

pub struct RecommendationComposer {
    mode: OutputMode,
    classifier: LabelClassifier,
}

impl RecommendationComposer {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            classifier: LabelClassifier::new(),
        }
    }

    /// Compose a recommendation. Never fails: missing sensor context is
    /// omitted, an empty label set reads as "everything looks normal".
    pub fn compose(
        &self,
        active_labels: &[Label],
        snapshot: &FeatureVector,
        intensity_hints: &AHashMap<Label, Intensity>,
    ) -> Recommendation {
        let intro = INTRO_PHRASES
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(INTRO_PHRASES[0]);
        self.compose_with_intro(intro, active_labels, snapshot, intensity_hints)
    }

    /// Deterministic core; the public entry point only picks the intro.
    pub fn compose_with_intro(
        &self,
        intro: &str,
        active_labels: &[Label],
        snapshot: &FeatureVector,
        intensity_hints: &AHashMap<Label, Intensity>,
    ) -> Recommendation {
        let classified = self.classifier.classify(active_labels);
        let main_label = classified.main_label;
        let priority = priority_for(active_labels);

        let mut parts: Vec<String> = Vec::new();

        // main condition first, with its intensity phrasing
        if let Some(main) = main_label.filter(|l| l.class() == LabelClass::Condition) {
            parts.push(condition_message(main, intensity_hints.get(&main).copied()).to_string());
        }

        let other_conditions: Vec<Label> = classified
            .conditions
            .iter()
            .copied()
            .filter(|c| Some(*c) != main_label)
            .collect();
        if !other_conditions.is_empty() {
            let briefs: Vec<String> = other_conditions
                .iter()
                .map(|c| condition_message(*c, intensity_hints.get(c).copied()).to_string())
                .collect();
            let brief = format_list(&briefs);
            if !brief.is_empty() {
                parts.push(brief);
            }
        }

        if let Some(first_activity) = classified.activity.first() {
            parts.push(activity_description(*first_activity).to_string());
        }

        if !classified.environment.is_empty() {
            let descriptions: Vec<String> = classified
                .environment
                .iter()
                .map(|e| environment_description(*e).to_string())
                .collect();
            let env_text = format_list(&descriptions);
            if !env_text.is_empty() {
                parts.push(env_text);
            }
        }

        let non_normal_status: Vec<String> = classified
            .status
            .iter()
            .filter(|s| !matches!(s, Label::Normal | Label::Healthy))
            .map(|s| s.name().to_string())
            .collect();
        if !non_normal_status.is_empty() {
            parts.push(format!(
                "{} health indicators present",
                format_list(&non_normal_status).to_lowercase()
            ));
        }

        let summary = if parts.is_empty() {
            format!("{intro} everything looks normal.")
        } else {
            let joined = parts
                .iter()
                .map(|p| capitalize(p))
                .collect::<Vec<_>>()
                .join(" ");
            format!("{intro} {joined}")
        };

        // actions: main first, then conditions, activity, environment
        let mut actions: Vec<&'static str> = Vec::new();
        if let Some(action) = main_label.and_then(action_for) {
            actions.push(action);
        }
        for label in other_conditions
            .iter()
            .chain(classified.activity.iter())
            .chain(classified.environment.iter())
        {
            if let Some(action) = action_for(*label) {
                if !actions.contains(&action) {
                    actions.push(action);
                }
            }
        }
        if actions.is_empty() {
            actions.push(FALLBACK_ACTION);
        }

        let (action_text, full_message) = match self.mode {
            OutputMode::Short => {
                let first = actions[0].to_string();
                let full = format!("{summary} {first}");
                (first, full)
            }
            OutputMode::Detailed => {
                let paragraph = actions.join(" ");
                let sensor_block = sensor_block(snapshot);
                let full = format!(
                    "{summary}\n\nWhat this means:\n{paragraph}\n\n{sensor_block}Suggested next step: {}",
                    actions[0]
                );
                (paragraph, full)
            }
        };

        Recommendation {
            summary,
            action_text,
            priority,
            full_message,
        }
    }
}

/// Escalation rules: Critical wins, then the urgent subset, then any
/// active condition, else normal.
pub fn priority_for(active_labels: &[Label]) -> PriorityLevel {
    if active_labels.contains(&Label::Critical) {
        PriorityLevel::Critical
    } else if active_labels.iter().any(|l| URGENT_LABELS.contains(l)) {
        PriorityLevel::Warning
    } else if active_labels.iter().any(|l| l.class() == LabelClass::Condition) {
        PriorityLevel::Caution
    } else {
        PriorityLevel::Normal
    }
}

/// Natural-language list join with order-preserving dedupe:
/// "a", "a and b", "a, b, and c".
fn format_list(items: &[String]) -> String {
    let mut unique: Vec<&str> = Vec::with_capacity(items.len());
    for item in items {
        if !unique.contains(&item.as_str()) {
            unique.push(item);
        }
    }
    match unique.len() {
        0 => String::new(),
        1 => unique[0].to_string(),
        2 => format!("{} and {}", unique[0], unique[1]),
        n => format!("{}, and {}", unique[..n - 1].join(", "), unique[n - 1]),
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Formatted block of the sensor readings backing this cycle; defaulted
/// metrics are omitted so the user only sees real measurements.
fn sensor_block(snapshot: &FeatureVector) -> String {
    let observed = |metric: SensorMetric| -> Option<f64> {
        snapshot.is_observed(metric).then(|| snapshot.get(metric))
    };
    let mut lines: Vec<String> = Vec::new();
    if let Some(bt) = observed(SensorMetric::BodyTemp) {
        lines.push(format!("Body temp: {bt:.1}°C"));
    }
    if let Some(hr) = observed(SensorMetric::HeartRateBpm) {
        lines.push(format!("Heart rate: {hr:.0} BPM"));
    }
    if let Some(sp) = observed(SensorMetric::Spo2Pct) {
        lines.push(format!("SpO₂: {sp:.1}%"));
    }
    if let (Some(at), Some(hu)) = (
        observed(SensorMetric::AmbientTemp),
        observed(SensorMetric::HumidityPct),
    ) {
        lines.push(format!("Ambient: {at:.1}°C, {hu:.1}%"));
    }
    if lines.is_empty() {
        String::new()
    } else {
        format!("{}\n\n", lines.join("\n"))
    }
}

fn activity_description(label: Label) -> &'static str {
    match label {
        Label::Resting => "Your body is calm and you're not doing any physical activity.",
        Label::LightActivity => {
            "You're moving lightly, maybe walking around or doing something small."
        }
        Label::ModerateActivity => {
            "You're fairly active, like walking fast or doing light exercise."
        }
        Label::HighActivity => "Your body is working hard, similar to jogging or physical work.",
        Label::Sleeping => "You're currently in a relaxed sleep state.",
        Label::Walking => "You're moving at a steady walking pace.",
        Label::Running => "You're engaged in a high-effort activity like running.",
        Label::Sedentary => "You've been sitting or staying in one position for a while.",
        _ => "",
    }
}

fn environment_description(label: Label) -> &'static str {
    match label {
        Label::HotEnvironment => "The temperature around you is higher than normal.",
        Label::ColdEnvironment => "The surrounding temperature is quite low.",
        Label::HumidEnvironment => "The humidity level is high where you are.",
        Label::LowPressureEnvironment => "The air pressure around you is lower than normal.",
        _ => "",
    }
}

fn condition_description(label: Label) -> &'static str {
    match label {
        Label::Stressed => "Your body is showing signs of stress.",
        Label::Fatigued => "You're showing signs of tiredness.",
        Label::Dehydrated => "Your hydration level may be low.",
        Label::PossibleFever => "Your temperature is higher than normal.",
        Label::LowOxygenState => "Your oxygen level is lower than it should be.",
        Label::Overexertion => "Your body is working harder than normal.",
        Label::EarlyIllnessIndication => {
            "Some patterns suggest you might be coming down with something."
        }
        _ => "",
    }
}

/// Intensity-aware condition phrasing; moderate when no hint is given,
/// base description for conditions with no intensity table.
fn condition_message(label: Label, intensity: Option<Intensity>) -> &'static str {
    let intensity = intensity.unwrap_or(Intensity::Moderate);
    let message = match (label, intensity) {
        (Label::Stressed, Intensity::Mild) => "Your stress level is slightly raised.",
        (Label::Stressed, Intensity::Moderate) => "You're showing noticeable signs of stress.",
        (Label::Stressed, Intensity::High) => {
            "Your stress level is high and it's worth taking immediate steps to relax."
        }
        (Label::Fatigued, Intensity::Mild) => "You seem a bit tired.",
        (Label::Fatigued, Intensity::Moderate) => {
            "You're getting noticeably fatigued; consider resting soon."
        }
        (Label::Fatigued, Intensity::High) => "You're very fatigued and need proper rest.",
        (Label::Dehydrated, Intensity::Mild) => "You might need to drink a little more water.",
        (Label::Dehydrated, Intensity::Moderate) => {
            "You're getting dehydrated and should drink water soon."
        }
        (Label::Dehydrated, Intensity::High) => {
            "You're likely very dehydrated — rehydrate as soon as possible."
        }
        (Label::PossibleFever, Intensity::Mild) => "Your temperature is slightly above normal.",
        (Label::PossibleFever, Intensity::Moderate) => "Your temperature is fairly high.",
        (Label::PossibleFever, Intensity::High) => {
            "Your temperature is very high and may need urgent attention."
        }
        (Label::LowOxygenState, Intensity::Mild) => "Your oxygen level is a bit below normal.",
        (Label::LowOxygenState, Intensity::Moderate) => {
            "Your oxygen level is low and needs attention."
        }
        (Label::LowOxygenState, Intensity::High) => {
            "Your oxygen level is dangerously low — seek help immediately."
        }
        (Label::Overexertion, Intensity::Mild) => "You're pushing yourself a little.",
        (Label::Overexertion, Intensity::Moderate) => {
            "You're working your body harder than usual."
        }
        (Label::Overexertion, Intensity::High) => {
            "You're overexerting and should stop to rest right away."
        }
        (Label::EarlyIllnessIndication, Intensity::Mild) => {
            "There are a few small signs that something may be starting."
        }
        (Label::EarlyIllnessIndication, Intensity::Moderate) => {
            "There are several signs that could mean you're getting unwell."
        }
        (Label::EarlyIllnessIndication, Intensity::High) => {
            "Strong signs suggest you may be getting ill — monitor closely or consult a clinician."
        }
        _ => "",
    };
    if message.is_empty() {
        condition_description(label)
    } else {
        message
    }
}

fn action_for(label: Label) -> Option<&'static str> {
    let action = match label {
        Label::Critical => "Please get medical help immediately. It's not safe to ignore this.",
        Label::LowOxygenState => {
            "Move to a place with better airflow. If it does not improve, seek medical support."
        }
        Label::PossibleFever => {
            "Try to rest and drink water. Check your temperature again later. If it stays high, consult a doctor."
        }
        Label::Dehydrated => "Drink water and rest in a cool spot for a while.",
        Label::Overexertion => "Stop and rest. Allow your body to recover before continuing.",
        Label::Stressed => "Pause for a moment, take slow breaths, and try to relax.",
        Label::Fatigued => "Consider resting or taking a short nap if possible.",
        Label::HotEnvironment => "Move somewhere cooler and hydrate if you can.",
        Label::ColdEnvironment => "Try to warm up or move to a warmer place.",
        Label::HumidEnvironment => "Ensure good ventilation and drink water.",
        Label::LowPressureEnvironment => {
            "If you feel dizzy, sit down and allow your body to adjust."
        }
        Label::Running => "Slow down if needed and make sure you drink enough water.",
        Label::Walking => "Keep a steady pace and stay hydrated if outdoors.",
        Label::Sedentary => "Stand up, stretch, or go for a short walk.",
        Label::Resting => "No action needed right now.",
        Label::LightActivity => "You can continue what you're doing.",
        Label::ModerateActivity => "You're doing okay; slow down if you feel tired.",
        Label::HighActivity => "Be careful and hydrate; slow down if you feel strained.",
        _ => return None,
    };
    Some(action)
}
