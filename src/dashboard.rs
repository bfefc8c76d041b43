//! Dashboard service.
//!
//! Single entry point for the presentation layer: fetches the three records
//! through the gateway (memoized per fetch kind), normalizes them, and runs
//! aggregation, classification and ranking to produce a `DashboardSnapshot`.
//! Also owns the two operator actions, refresh and staff notification.
//!
//! All calls are blocking. The cache lock is never held across a gateway
//! call, so a slow endpoint does not stall readers of the other two.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::Serialize;

use crate::aggregate::{self, CapacityTotals, DepartmentView};
use crate::cache::{Clock, SystemClock, TtlCache};
use crate::classify::{self, SurgeAlert};
use crate::gateway::{FetchKind, GatewayError, SurgeGateway};
use crate::models::{DashboardSummary, DepartmentOccupancy, SurgePrediction};
use crate::normalize::{self, Sourced};
use crate::rank::{self, RankedRecommendations};

pub const NOTIFY_SENT_MESSAGE: &str = "Staff notifications sent successfully!";
pub const NOTIFY_REJECTED_MESSAGE: &str = "Failed to send notifications";
pub const NOTIFY_UNREACHABLE_MESSAGE: &str = "Error connecting to notification service";

// ═══════════════════════════════════════════════════════════
// Types
// ═══════════════════════════════════════════════════════════

/// One cached, already-normalized fetch.
#[derive(Debug, Clone)]
enum CachedRecord {
    Summary(Sourced<DashboardSummary>),
    Prediction(Sourced<SurgePrediction>),
    Beds(Sourced<Vec<DepartmentOccupancy>>),
}

/// Whether the dashboard is showing live data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ApiStatus {
    Connected,
    #[serde(rename = "Demo Mode")]
    DemoMode,
}

/// Headline metrics row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub today_admissions: u32,
    /// e.g. `+67 predicted`
    pub admissions_delta: String,
    pub occupancy_rate: f64,
    pub predicted_patients: u32,
    pub confidence_pct: u32,
}

/// Everything the presentation layer renders, computed from one fetch cycle.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub generated_at: String,
    pub api_status: ApiStatus,
    pub overview: Overview,
    pub summary: Sourced<DashboardSummary>,
    pub prediction: Sourced<SurgePrediction>,
    pub reasoning: String,
    pub alert: SurgeAlert,
    pub beds: Sourced<Vec<DepartmentOccupancy>>,
    pub departments: Vec<DepartmentView>,
    pub capacity: CapacityTotals,
    pub recommendations: RankedRecommendations,
}

/// Result of a staff-notification request, phrased for the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationOutcome {
    pub delivered: bool,
    pub message: &'static str,
}

impl NotificationOutcome {
    fn from_result(result: &Result<(), GatewayError>) -> Self {
        match result {
            Ok(()) => Self {
                delivered: true,
                message: NOTIFY_SENT_MESSAGE,
            },
            Err(GatewayError::Status { .. }) => Self {
                delivered: false,
                message: NOTIFY_REJECTED_MESSAGE,
            },
            Err(_) => Self {
                delivered: false,
                message: NOTIFY_UNREACHABLE_MESSAGE,
            },
        }
    }
}

// ═══════════════════════════════════════════════════════════
// SurgeDashboard
// ═══════════════════════════════════════════════════════════

pub struct SurgeDashboard {
    gateway: Arc<dyn SurgeGateway>,
    cache: Mutex<TtlCache<FetchKind, CachedRecord>>,
}

impl SurgeDashboard {
    pub fn new(gateway: Arc<dyn SurgeGateway>, ttl: Duration) -> Self {
        Self::with_clock(gateway, ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(gateway: Arc<dyn SurgeGateway>, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            gateway,
            cache: Mutex::new(TtlCache::new(ttl, clock)),
        }
    }

    // ── Records ──────────────────────────────────────────

    pub fn dashboard_summary(&self) -> Sourced<DashboardSummary> {
        self.cached(
            FetchKind::DashboardSummary,
            |record| match record {
                CachedRecord::Summary(s) => Some(s),
                _ => None,
            },
            normalize::normalize_dashboard_summary,
            CachedRecord::Summary,
        )
    }

    pub fn surge_prediction(&self) -> Sourced<SurgePrediction> {
        self.cached(
            FetchKind::SurgePrediction,
            |record| match record {
                CachedRecord::Prediction(p) => Some(p),
                _ => None,
            },
            normalize::normalize_surge_prediction,
            CachedRecord::Prediction,
        )
    }

    pub fn bed_occupancy(&self) -> Sourced<Vec<DepartmentOccupancy>> {
        self.cached(
            FetchKind::BedOccupancy,
            |record| match record {
                CachedRecord::Beds(b) => Some(b),
                _ => None,
            },
            normalize::normalize_bed_occupancy,
            CachedRecord::Beds,
        )
    }

    // ── Derived views ────────────────────────────────────

    /// Assemble the full dashboard from (possibly cached) records.
    pub fn snapshot(&self) -> DashboardSnapshot {
        let summary = self.dashboard_summary();
        let prediction = self.surge_prediction();
        let beds = self.bed_occupancy();

        let api_status = if summary.is_live() {
            ApiStatus::Connected
        } else {
            ApiStatus::DemoMode
        };

        let alert = classify::assess(&prediction.value);
        let overview = Overview {
            today_admissions: summary.value.today_admissions,
            admissions_delta: format!("+{} predicted", prediction.value.predicted_patients),
            occupancy_rate: summary.value.occupancy_rate,
            predicted_patients: prediction.value.predicted_patients,
            confidence_pct: alert.confidence_pct,
        };

        DashboardSnapshot {
            generated_at: chrono::Utc::now().to_rfc3339(),
            api_status,
            overview,
            reasoning: prediction.value.reasoning_or_placeholder().to_string(),
            alert,
            departments: aggregate::department_views(&beds.value),
            capacity: aggregate::aggregate(&beds.value),
            recommendations: rank::rank(&prediction.value.recommendations),
            summary,
            prediction,
            beds,
        }
    }

    /// Drop every cached record and rebuild the snapshot.
    pub fn refresh(&self) -> DashboardSnapshot {
        self.invalidate();
        self.snapshot()
    }

    pub fn invalidate(&self) {
        self.lock_cache().invalidate();
        tracing::info!("Dashboard cache invalidated");
    }

    // ── Operator actions ─────────────────────────────────

    /// Ask the data service to alert staff. Not retried.
    pub fn notify_staff(&self) -> NotificationOutcome {
        let result = self.gateway.notify_staff();
        if let Err(e) = &result {
            tracing::warn!(error = %e, "Staff notification failed");
        } else {
            tracing::info!("Staff notification dispatched");
        }
        NotificationOutcome::from_result(&result)
    }

    // ── Internal ─────────────────────────────────────────

    fn lock_cache(&self) -> MutexGuard<'_, TtlCache<FetchKind, CachedRecord>> {
        // Entries are immutable snapshots, so a poisoned cache is still usable.
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn cached<T: Clone>(
        &self,
        kind: FetchKind,
        unwrap: fn(CachedRecord) -> Option<Sourced<T>>,
        normalize: fn(Result<serde_json::Value, GatewayError>) -> Sourced<T>,
        wrap: fn(Sourced<T>) -> CachedRecord,
    ) -> Sourced<T> {
        if let Some(hit) = self.lock_cache().get(&kind).and_then(unwrap) {
            tracing::debug!(%kind, "Cache hit");
            return hit;
        }
        tracing::debug!(%kind, "Cache miss, fetching");

        let fresh = normalize(self.gateway.fetch(kind));
        self.lock_cache().insert(kind, wrap(fresh.clone()));
        fresh
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
