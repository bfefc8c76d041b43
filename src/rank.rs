//! Recommendation ranker.
//!
//! Annotates recommended actions with their display tier. Order is the
//! forecaster's order; nothing is re-sorted by priority.

use serde::Serialize;

use crate::models::{Priority, RecommendedAction};

pub const NO_RECOMMENDATIONS_MESSAGE: &str =
    "No urgent recommendations at this time. System is operating normally.";

/// How a priority tier is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriorityDisplay {
    /// Higher is more pressing.
    pub weight: u8,
    pub color: &'static str,
    pub icon: &'static str,
}

const PRIORITY_DISPLAY: [(Priority, PriorityDisplay); 4] = [
    (
        Priority::Urgent,
        PriorityDisplay { weight: 4, color: "#ef4444", icon: "🚨" },
    ),
    (
        Priority::High,
        PriorityDisplay { weight: 3, color: "#f59e0b", icon: "⚠️" },
    ),
    (
        Priority::Medium,
        PriorityDisplay { weight: 2, color: "#3b82f6", icon: "💡" },
    ),
    (
        Priority::Low,
        PriorityDisplay { weight: 1, color: "#10b981", icon: "ℹ️" },
    ),
];

/// Display attributes for a priority.
pub fn display_for(priority: Priority) -> PriorityDisplay {
    PRIORITY_DISPLAY
        .iter()
        .find(|(p, _)| *p == priority)
        .map(|(_, display)| *display)
        .unwrap_or(PRIORITY_DISPLAY[2].1)
}

/// An action ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedAction {
    /// Zero-based position in the forecaster's list.
    pub position: usize,
    pub action: RecommendedAction,
    pub badge: &'static str,
    pub display: PriorityDisplay,
    pub category_label: String,
}

/// Ranked actions, or the explicit all-clear when there are none.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RankedRecommendations {
    Pending { actions: Vec<RankedAction> },
    NonePending { message: &'static str },
}

impl RankedRecommendations {
    pub fn actions(&self) -> &[RankedAction] {
        match self {
            Self::Pending { actions } => actions,
            Self::NonePending { .. } => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.actions().len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions().is_empty()
    }
}

/// Annotate actions for display, preserving input order.
pub fn rank(actions: &[RecommendedAction]) -> RankedRecommendations {
    if actions.is_empty() {
        return RankedRecommendations::NonePending {
            message: NO_RECOMMENDATIONS_MESSAGE,
        };
    }

    let actions = actions
        .iter()
        .enumerate()
        .map(|(position, action)| RankedAction {
            position,
            badge: action.priority.badge(),
            display: display_for(action.priority),
            category_label: category_label(&action.category),
            action: action.clone(),
        })
        .collect();

    RankedRecommendations::Pending { actions }
}

/// `bed_management` → `Bed Management`.
///
/// Title-casing restarts after every non-alphabetic character, so
/// `icu_2nd-floor` becomes `Icu 2Nd-Floor`.
pub fn category_label(category: &str) -> String {
    let mut label = String::with_capacity(category.len());
    let mut after_letter = false;

    for c in category.chars() {
        let c = if c == '_' { ' ' } else { c };
        if c.is_alphabetic() {
            if after_letter {
                label.extend(c.to_lowercase());
            } else {
                label.extend(c.to_uppercase());
            }
            after_letter = true;
        } else {
            label.push(c);
            after_letter = false;
        }
    }
    label
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback;

    fn action(name: &str, priority: Priority) -> RecommendedAction {
        RecommendedAction::new(name).with_priority(priority)
    }

    #[test]
    fn empty_input_means_nothing_pending() {
        let ranked = rank(&[]);
        assert_eq!(
            ranked,
            RankedRecommendations::NonePending {
                message: NO_RECOMMENDATIONS_MESSAGE
            }
        );
        assert!(ranked.is_empty());
    }

    #[test]
    fn input_order_is_preserved() {
        let actions = vec![
            action("low first", Priority::Low),
            action("urgent second", Priority::Urgent),
            action("medium third", Priority::Medium),
            action("high fourth", Priority::High),
        ];
        let ranked = rank(&actions);
        let names: Vec<_> = ranked.actions().iter().map(|a| a.action.action.as_str()).collect();
        assert_eq!(names, ["low first", "urgent second", "medium third", "high fourth"]);
        let positions: Vec<_> = ranked.actions().iter().map(|a| a.position).collect();
        assert_eq!(positions, [0, 1, 2, 3]);
    }

    #[test]
    fn lookup_table_matches_tiers() {
        assert_eq!(display_for(Priority::Urgent).color, "#ef4444");
        assert_eq!(display_for(Priority::High).icon, "⚠️");
        assert_eq!(display_for(Priority::Medium).weight, 2);
        assert_eq!(display_for(Priority::Low).color, "#10b981");
        assert!(display_for(Priority::Urgent).weight > display_for(Priority::High).weight);
        assert!(display_for(Priority::High).weight > display_for(Priority::Medium).weight);
        assert!(display_for(Priority::Medium).weight > display_for(Priority::Low).weight);
    }

    #[test]
    fn unrecognized_priority_gets_medium_display() {
        let unknown = action("Check oxygen", Priority::resolve(Some("urgent-ish")));
        let ranked = rank(&[unknown]);
        let first = &ranked.actions()[0];
        assert_eq!(first.display, display_for(Priority::Medium));
        assert_eq!(first.badge, "MEDIUM");
    }

    #[test]
    fn category_label_title_cases() {
        assert_eq!(category_label("bed_management"), "Bed Management");
        assert_eq!(category_label("staffing"), "Staffing");
        assert_eq!(category_label("SUPPLIES"), "Supplies");
        assert_eq!(category_label("icu_2nd-floor"), "Icu 2Nd-Floor");
        assert_eq!(category_label(""), "");
    }

    #[test]
    fn ranking_leaves_action_untouched() {
        let prediction = fallback::surge_prediction();
        let ranked = rank(&prediction.recommendations);
        assert_eq!(ranked.len(), 3);
        let second = &ranked.actions()[1];
        assert_eq!(second.action.category, "bed_management");
        assert_eq!(second.category_label, "Bed Management");
        assert_eq!(second.action, prediction.recommendations[1]);
    }

    #[test]
    fn ranked_recommendations_serialize_with_status() {
        let none = serde_json::to_value(rank(&[])).unwrap();
        assert_eq!(none["status"], "none_pending");
        assert_eq!(none["message"], NO_RECOMMENDATIONS_MESSAGE);

        let pending = serde_json::to_value(rank(&[action("a", Priority::High)])).unwrap();
        assert_eq!(pending["status"], "pending");
        assert_eq!(pending["actions"][0]["badge"], "HIGH");
        assert_eq!(pending["actions"][0]["display"]["color"], "#f59e0b");
    }
}
