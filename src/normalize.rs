//! Normalization layer.
//!
//! Turns whatever the gateway produced into strict domain records. Raw
//! bodies are decoded into structs with optional fields, missing fields are
//! resolved through explicit defaults, and anything structurally wrong makes
//! the whole record fall back to the built-in dataset. The caller always
//! gets a value; `Provenance` says whether it is live or substituted.
//!
//! Resolution order for bed occupancy:
//! 1. a bare JSON array is the department list
//! 2. an object wrapping an array under `"beds"`, then `"data"`
//! 3. anything else → fallback

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::fallback;
use crate::gateway::GatewayError;
use crate::models::prediction::{DEFAULT_CATEGORY, DEFAULT_DEPARTMENT, DEFAULT_TIMELINE};
use crate::models::{DashboardSummary, DepartmentOccupancy, Priority, RecommendedAction, SurgePrediction};

/// Keys checked, in order, when the bed list arrives wrapped in an object.
pub const BED_LIST_KEYS: [&str; 2] = ["beds", "data"];

// ═══════════════════════════════════════════════════════════
// Provenance
// ═══════════════════════════════════════════════════════════

/// Why a record was replaced by fallback data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FallbackReason {
    /// Transport failure or non-success status.
    Unavailable(String),
    /// The body arrived but had an unexpected shape.
    Malformed(String),
}

impl std::fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(detail) => write!(f, "data service unavailable: {detail}"),
            Self::Malformed(detail) => write!(f, "unexpected response shape: {detail}"),
        }
    }
}

/// Where a normalized record came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", content = "reason", rename_all = "snake_case")]
pub enum Provenance {
    Live,
    Fallback(FallbackReason),
}

/// A normalized record tagged with its provenance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sourced<T> {
    pub value: T,
    pub provenance: Provenance,
}

impl<T> Sourced<T> {
    pub fn live(value: T) -> Self {
        Self {
            value,
            provenance: Provenance::Live,
        }
    }

    pub fn fallback(value: T, reason: FallbackReason) -> Self {
        Self {
            value,
            provenance: Provenance::Fallback(reason),
        }
    }

    pub fn is_live(&self) -> bool {
        self.provenance == Provenance::Live
    }

    pub fn is_fallback(&self) -> bool {
        !self.is_live()
    }
}

// ═══════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════

/// Structural problems found while normalizing a body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
    #[error("expected a department list, found {0}")]
    NoDepartmentList(&'static str),

    #[error("department list is empty")]
    EmptyDepartmentList,

    #[error("department row {index}: {reason}")]
    InvalidDepartment { index: usize, reason: String },

    #[error("duplicate department '{0}'")]
    DuplicateDepartment(String),

    #[error("expected an object, found {0}")]
    NotAnObject(&'static str),

    #[error("field '{field}' is invalid: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("could not decode record: {0}")]
    Decode(String),
}

/// JSON type name used in error messages.
fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ═══════════════════════════════════════════════════════════
// Raw wire shapes
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
struct RawDepartment {
    department: Option<String>,
    total_beds: Option<i64>,
    occupied_beds: Option<i64>,
    // Derived; recomputed from the counts, so any JSON value is accepted.
    available_beds: Option<Value>,
    occupancy_rate: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RawDashboardSummary {
    today_admissions: Option<i64>,
    occupancy_rate: Option<f64>,
    total_patients: Option<i64>,
    available_beds: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RawSurgePrediction {
    predicted_patients: Option<i64>,
    confidence: Option<f64>,
    reasoning: Option<String>,
    recommendations: Option<RawRecommendations>,
}

#[derive(Debug, Deserialize)]
struct RawRecommendations {
    actions: Option<Vec<RawAction>>,
}

/// Every field is optional and loosely typed: a bad value degrades to its
/// default instead of discarding the forecast.
#[derive(Debug, Deserialize)]
struct RawAction {
    action: Option<Value>,
    priority: Option<Value>,
    category: Option<Value>,
    department: Option<Value>,
    timeline: Option<Value>,
}

// ═══════════════════════════════════════════════════════════
// Default resolution
// ═══════════════════════════════════════════════════════════

/// A required non-negative count.
fn require_count(field: &'static str, raw: Option<i64>) -> Result<u32, NormalizeError> {
    match raw {
        None => Err(NormalizeError::InvalidField {
            field,
            reason: "missing".into(),
        }),
        Some(n) => to_count(field, n),
    }
}

/// An optional non-negative count, 0 when absent.
fn count_or_zero(field: &'static str, raw: Option<i64>) -> Result<u32, NormalizeError> {
    raw.map_or(Ok(0), |n| to_count(field, n))
}

fn to_count(field: &'static str, n: i64) -> Result<u32, NormalizeError> {
    u32::try_from(n).map_err(|_| NormalizeError::InvalidField {
        field,
        reason: format!("{n} is not a valid count"),
    })
}

/// An optional non-negative rate, 0 when absent.
fn rate_or_zero(field: &'static str, raw: Option<f64>) -> Result<f64, NormalizeError> {
    match raw {
        None => Ok(0.0),
        Some(r) if r.is_finite() && r >= 0.0 => Ok(r),
        Some(r) => Err(NormalizeError::InvalidField {
            field,
            reason: format!("{r} is negative"),
        }),
    }
}

/// A text field; absent or non-string values take `default`.
fn text_or(raw: Option<&Value>, default: &str) -> String {
    raw.and_then(Value::as_str).unwrap_or(default).to_string()
}

// ═══════════════════════════════════════════════════════════
// Bed occupancy
// ═══════════════════════════════════════════════════════════

/// Locate the department array in a body, following the resolution order.
pub fn resolve_bed_list(body: &Value) -> Option<&Vec<Value>> {
    match body {
        Value::Array(rows) => Some(rows),
        Value::Object(map) => BED_LIST_KEYS
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_array)),
        _ => None,
    }
}

/// Decode and validate a department list body.
pub fn parse_bed_occupancy(body: &Value) -> Result<Vec<DepartmentOccupancy>, NormalizeError> {
    let rows = resolve_bed_list(body).ok_or(NormalizeError::NoDepartmentList(json_kind(body)))?;
    if rows.is_empty() {
        return Err(NormalizeError::EmptyDepartmentList);
    }

    let mut seen = HashSet::with_capacity(rows.len());
    let mut departments = Vec::with_capacity(rows.len());

    for (index, row) in rows.iter().enumerate() {
        let dept = parse_department(row).map_err(|reason| NormalizeError::InvalidDepartment {
            index,
            reason,
        })?;
        if !seen.insert(dept.department.clone()) {
            return Err(NormalizeError::DuplicateDepartment(dept.department));
        }
        departments.push(dept);
    }

    Ok(departments)
}

fn parse_department(row: &Value) -> Result<DepartmentOccupancy, String> {
    if !row.is_object() {
        return Err(format!("expected an object, found {}", json_kind(row)));
    }
    let raw: RawDepartment = serde_json::from_value(row.clone()).map_err(|e| e.to_string())?;

    let name = raw
        .department
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
        .ok_or_else(|| "department name is missing".to_string())?;

    let total = require_count("total_beds", raw.total_beds).map_err(|e| e.to_string())?;
    let occupied = require_count("occupied_beds", raw.occupied_beds).map_err(|e| e.to_string())?;
    if occupied > total {
        return Err(format!("{name}: occupied_beds {occupied} exceeds total_beds {total}"));
    }

    let dept = DepartmentOccupancy::new(name, total, occupied);
    let available_differs = raw
        .available_beds
        .is_some_and(|a| a.as_i64() != Some(i64::from(dept.available_beds)));
    let rate_differs = raw.occupancy_rate.is_some_and(|r| {
        r.as_f64()
            .map_or(true, |r| (r - dept.occupancy_rate).abs() >= 1.0)
    });
    if available_differs || rate_differs {
        tracing::debug!(
            department = %dept.department,
            "Recomputed inconsistent derived bed figures"
        );
    }
    Ok(dept)
}

/// Normalize a bed-occupancy fetch. Never empty, never fails.
pub fn normalize_bed_occupancy(
    fetched: Result<Value, GatewayError>,
) -> Sourced<Vec<DepartmentOccupancy>> {
    normalize_with(fetched, "bed occupancy", parse_bed_occupancy, fallback::bed_occupancy)
}

// ═══════════════════════════════════════════════════════════
// Dashboard summary
// ═══════════════════════════════════════════════════════════

pub fn parse_dashboard_summary(body: &Value) -> Result<DashboardSummary, NormalizeError> {
    if !body.is_object() {
        return Err(NormalizeError::NotAnObject(json_kind(body)));
    }
    let raw: RawDashboardSummary =
        serde_json::from_value(body.clone()).map_err(|e| NormalizeError::Decode(e.to_string()))?;

    Ok(DashboardSummary {
        today_admissions: count_or_zero("today_admissions", raw.today_admissions)?,
        occupancy_rate: rate_or_zero("occupancy_rate", raw.occupancy_rate)?,
        total_patients: count_or_zero("total_patients", raw.total_patients)?,
        available_beds: count_or_zero("available_beds", raw.available_beds)?,
    })
}

pub fn normalize_dashboard_summary(fetched: Result<Value, GatewayError>) -> Sourced<DashboardSummary> {
    normalize_with(
        fetched,
        "dashboard summary",
        parse_dashboard_summary,
        fallback::dashboard_summary,
    )
}

// ═══════════════════════════════════════════════════════════
// Surge prediction
// ═══════════════════════════════════════════════════════════

pub fn parse_surge_prediction(body: &Value) -> Result<SurgePrediction, NormalizeError> {
    if !body.is_object() {
        return Err(NormalizeError::NotAnObject(json_kind(body)));
    }
    let raw: RawSurgePrediction =
        serde_json::from_value(body.clone()).map_err(|e| NormalizeError::Decode(e.to_string()))?;

    let confidence = rate_or_zero("confidence", raw.confidence)?;
    if confidence > 1.0 {
        return Err(NormalizeError::InvalidField {
            field: "confidence",
            reason: format!("{confidence} is outside [0, 1]"),
        });
    }

    let recommendations = raw
        .recommendations
        .and_then(|r| r.actions)
        .unwrap_or_default()
        .into_iter()
        .map(resolve_action)
        .collect();

    Ok(SurgePrediction {
        predicted_patients: count_or_zero("predicted_patients", raw.predicted_patients)?,
        confidence,
        reasoning: raw.reasoning.unwrap_or_default(),
        recommendations,
    })
}

fn resolve_action(raw: RawAction) -> RecommendedAction {
    RecommendedAction {
        action: text_or(raw.action.as_ref(), ""),
        priority: Priority::resolve(raw.priority.as_ref().and_then(Value::as_str)),
        category: text_or(raw.category.as_ref(), DEFAULT_CATEGORY),
        department: text_or(raw.department.as_ref(), DEFAULT_DEPARTMENT),
        timeline: text_or(raw.timeline.as_ref(), DEFAULT_TIMELINE),
    }
}

pub fn normalize_surge_prediction(fetched: Result<Value, GatewayError>) -> Sourced<SurgePrediction> {
    normalize_with(
        fetched,
        "surge prediction",
        parse_surge_prediction,
        fallback::surge_prediction,
    )
}

// ═══════════════════════════════════════════════════════════
// Shared fallback path
// ═══════════════════════════════════════════════════════════

fn normalize_with<T>(
    fetched: Result<Value, GatewayError>,
    record: &'static str,
    parse: fn(&Value) -> Result<T, NormalizeError>,
    fallback: fn() -> T,
) -> Sourced<T> {
    let reason = match fetched {
        Ok(body) => match parse(&body) {
            Ok(value) => return Sourced::live(value),
            Err(e) => FallbackReason::Malformed(e.to_string()),
        },
        Err(e) => FallbackReason::Unavailable(e.to_string()),
    };

    tracing::warn!(record, %reason, "Using fallback data");
    Sourced::fallback(fallback(), reason)
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
