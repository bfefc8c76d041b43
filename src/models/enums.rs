use serde::{Deserialize, Serialize};

/// A string did not name any variant of the target enum.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid {field} value: '{value}'")]
pub struct UnknownVariant {
    pub field: String,
    pub value: String,
}

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(UnknownVariant {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(Priority {
    Urgent => "urgent",
    High => "high",
    Medium => "medium",
    Low => "low",
});

str_enum!(SurgeTier {
    Low => "low",
    Medium => "medium",
    High => "high",
});

str_enum!(OccupancyLevel {
    Normal => "normal",
    Elevated => "elevated",
    Critical => "critical",
});

impl Priority {
    /// Resolve a raw priority label. Missing or unrecognized labels are medium.
    pub fn resolve(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.parse().ok()).unwrap_or_default()
    }

    /// Upper-case badge text shown next to an action.
    pub fn badge(&self) -> &'static str {
        match self {
            Self::Urgent => "URGENT",
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn priority_round_trip() {
        for (variant, s) in [
            (Priority::Urgent, "urgent"),
            (Priority::High, "high"),
            (Priority::Medium, "medium"),
            (Priority::Low, "low"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(Priority::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn surge_tier_round_trip() {
        for (variant, s) in [
            (SurgeTier::Low, "low"),
            (SurgeTier::Medium, "medium"),
            (SurgeTier::High, "high"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(SurgeTier::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn invalid_enum_returns_error() {
        let err = Priority::from_str("urgent-ish").unwrap_err();
        assert_eq!(err.field, "Priority");
        assert_eq!(err.value, "urgent-ish");
        assert!(SurgeTier::from_str("").is_err());
        assert!(OccupancyLevel::from_str("full").is_err());
    }

    #[test]
    fn resolve_defaults_to_medium() {
        assert_eq!(Priority::resolve(None), Priority::Medium);
        assert_eq!(Priority::resolve(Some("urgent-ish")), Priority::Medium);
        assert_eq!(Priority::resolve(Some("HIGH")), Priority::Medium);
        assert_eq!(Priority::resolve(Some("urgent")), Priority::Urgent);
        assert_eq!(Priority::resolve(Some("low")), Priority::Low);
    }

    #[test]
    fn badge_is_upper_case_name() {
        assert_eq!(Priority::Urgent.badge(), "URGENT");
        assert_eq!(Priority::Medium.badge(), Priority::Medium.as_str().to_uppercase());
    }

    #[test]
    fn enums_serialize_snake_case() {
        assert_eq!(serde_json::to_string(&SurgeTier::High).unwrap(), "\"high\"");
        assert_eq!(serde_json::to_string(&OccupancyLevel::Critical).unwrap(), "\"critical\"");
    }
}
