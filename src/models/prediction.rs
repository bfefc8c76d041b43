use serde::{Deserialize, Serialize};

use super::enums::Priority;

pub const DEFAULT_CATEGORY: &str = "General";
pub const DEFAULT_DEPARTMENT: &str = "All";
pub const DEFAULT_TIMELINE: &str = "ASAP";

/// Shown in place of an empty reasoning text.
pub const NO_REASONING_PLACEHOLDER: &str = "No prediction data available";

/// One action suggested by the surge forecaster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedAction {
    pub action: String,
    pub priority: Priority,
    pub category: String,
    pub department: String,
    pub timeline: String,
}

impl RecommendedAction {
    /// An action with every optional field at its default.
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            priority: Priority::default(),
            category: DEFAULT_CATEGORY.to_string(),
            department: DEFAULT_DEPARTMENT.to_string(),
            timeline: DEFAULT_TIMELINE.to_string(),
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    pub fn with_timeline(mut self, timeline: impl Into<String>) -> Self {
        self.timeline = timeline.into();
        self
    }
}

/// Forecast of incoming patients over the next 24 hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurgePrediction {
    pub predicted_patients: u32,
    /// Model confidence in `[0, 1]`.
    pub confidence: f64,
    pub reasoning: String,
    pub recommendations: Vec<RecommendedAction>,
}

impl SurgePrediction {
    /// Confidence as a whole percentage. Halves round to even.
    pub fn confidence_pct(&self) -> u32 {
        (self.confidence.clamp(0.0, 1.0) * 100.0).round_ties_even() as u32
    }

    pub fn reasoning_or_placeholder(&self) -> &str {
        if self.reasoning.trim().is_empty() {
            NO_REASONING_PLACEHOLDER
        } else {
            &self.reasoning
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction(confidence: f64, reasoning: &str) -> SurgePrediction {
        SurgePrediction {
            predicted_patients: 10,
            confidence,
            reasoning: reasoning.to_string(),
            recommendations: Vec::new(),
        }
    }

    #[test]
    fn new_action_uses_defaults() {
        let action = RecommendedAction::new("Open overflow ward");
        assert_eq!(action.priority, Priority::Medium);
        assert_eq!(action.category, "General");
        assert_eq!(action.department, "All");
        assert_eq!(action.timeline, "ASAP");
    }

    #[test]
    fn builder_overrides_defaults() {
        let action = RecommendedAction::new("Call in staff")
            .with_priority(Priority::Urgent)
            .with_category("staffing")
            .with_department("Emergency")
            .with_timeline("Next 2 hours");
        assert_eq!(action.priority, Priority::Urgent);
        assert_eq!(action.category, "staffing");
        assert_eq!(action.department, "Emergency");
        assert_eq!(action.timeline, "Next 2 hours");
    }

    #[test]
    fn confidence_pct_rounds_to_whole_percent() {
        assert_eq!(prediction(0.82, "").confidence_pct(), 82);
        assert_eq!(prediction(0.666, "").confidence_pct(), 67);
        assert_eq!(prediction(0.0, "").confidence_pct(), 0);
        assert_eq!(prediction(1.0, "").confidence_pct(), 100);
    }

    #[test]
    fn confidence_pct_rounds_halves_to_even() {
        assert_eq!(prediction(0.125, "").confidence_pct(), 12);
        assert_eq!(prediction(0.375, "").confidence_pct(), 38);
    }

    #[test]
    fn empty_reasoning_uses_placeholder() {
        assert_eq!(prediction(0.5, "").reasoning_or_placeholder(), NO_REASONING_PLACEHOLDER);
        assert_eq!(prediction(0.5, "  ").reasoning_or_placeholder(), NO_REASONING_PLACEHOLDER);
        assert_eq!(prediction(0.5, "Festival").reasoning_or_placeholder(), "Festival");
    }
}
