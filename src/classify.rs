//! Surge classifier: predicted patient count → alert tier.

use serde::Serialize;

use crate::models::{SurgePrediction, SurgeTier};

/// Counts strictly above this are a high surge.
pub const HIGH_SURGE_ABOVE: u32 = 50;
/// Counts strictly above this (and not high) are a medium surge.
pub const MEDIUM_SURGE_ABOVE: u32 = 30;

pub const HIGH_SURGE_MESSAGE: &str = "Significant surge expected. Activate emergency protocols.";
pub const MEDIUM_SURGE_MESSAGE: &str = "Moderate surge expected. Prepare additional resources.";
pub const LOW_SURGE_MESSAGE: &str = "Normal operations. Monitor for changes.";

/// Tier with its operator-facing label and message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SurgeAssessment {
    pub tier: SurgeTier,
    pub label: &'static str,
    pub message: &'static str,
}

/// Assessment plus the figures shown alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurgeAlert {
    #[serde(flatten)]
    pub assessment: SurgeAssessment,
    pub expected_patients: u32,
    pub confidence_pct: u32,
}

impl SurgeTier {
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "🔴 HIGH",
            Self::Medium => "🟡 MEDIUM",
            Self::Low => "🟢 LOW",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::High => HIGH_SURGE_MESSAGE,
            Self::Medium => MEDIUM_SURGE_MESSAGE,
            Self::Low => LOW_SURGE_MESSAGE,
        }
    }
}

/// Classify a predicted patient count.
pub fn classify(predicted_patients: u32) -> SurgeAssessment {
    let tier = if predicted_patients > HIGH_SURGE_ABOVE {
        SurgeTier::High
    } else if predicted_patients > MEDIUM_SURGE_ABOVE {
        SurgeTier::Medium
    } else {
        SurgeTier::Low
    };

    SurgeAssessment {
        tier,
        label: tier.label(),
        message: tier.message(),
    }
}

/// Build the alert card for a prediction.
pub fn assess(prediction: &SurgePrediction) -> SurgeAlert {
    SurgeAlert {
        assessment: classify(prediction.predicted_patients),
        expected_patients: prediction.predicted_patients,
        confidence_pct: prediction.confidence_pct(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback;

    #[test]
    fn boundaries_are_exact() {
        assert_eq!(classify(51).tier, SurgeTier::High);
        assert_eq!(classify(50).tier, SurgeTier::Medium);
        assert_eq!(classify(31).tier, SurgeTier::Medium);
        assert_eq!(classify(30).tier, SurgeTier::Low);
    }

    #[test]
    fn extremes_are_classified() {
        assert_eq!(classify(0).tier, SurgeTier::Low);
        assert_eq!(classify(u32::MAX).tier, SurgeTier::High);
    }

    #[test]
    fn high_surge_message_is_exact() {
        let assessment = classify(67);
        assert_eq!(assessment.tier, SurgeTier::High);
        assert_eq!(assessment.label, "🔴 HIGH");
        assert_eq!(
            assessment.message,
            "Significant surge expected. Activate emergency protocols."
        );
    }

    #[test]
    fn medium_and_low_messages() {
        assert_eq!(classify(45).message, MEDIUM_SURGE_MESSAGE);
        assert_eq!(classify(45).label, "🟡 MEDIUM");
        assert_eq!(classify(12).message, "Normal operations. Monitor for changes.");
        assert_eq!(classify(12).label, "🟢 LOW");
    }

    #[test]
    fn tiers_are_monotonic_in_patient_count() {
        let rank = |t: SurgeTier| match t {
            SurgeTier::Low => 0,
            SurgeTier::Medium => 1,
            SurgeTier::High => 2,
        };
        let mut previous = 0;
        for n in 0..=200 {
            let current = rank(classify(n).tier);
            assert!(current >= previous, "tier dropped at {n}");
            previous = current;
        }
    }

    #[test]
    fn assess_fallback_prediction() {
        let alert = assess(&fallback::surge_prediction());
        assert_eq!(alert.assessment.tier, SurgeTier::High);
        assert_eq!(alert.expected_patients, 67);
        assert_eq!(alert.confidence_pct, 82);
    }

    #[test]
    fn alert_serializes_flat() {
        let alert = assess(&fallback::surge_prediction());
        let json = serde_json::to_value(&alert).unwrap();
        assert_eq!(json["tier"], "high");
        assert_eq!(json["message"], HIGH_SURGE_MESSAGE);
        assert_eq!(json["expected_patients"], 67);
    }
}
