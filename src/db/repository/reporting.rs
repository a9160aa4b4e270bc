//! Reporting repository trait for dashboard queries.
//!
//! Read-only views over the ledger: the provider's day sheet, a patient's
//! appointment history, and per-date status totals. Terminal appointments
//! are retained and therefore appear in these views.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::SchedulingResult;
use crate::models::{Appointment, DayStatusCounts, PatientId, ProviderId};

/// Repository trait for reporting queries.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait ReportingRepository: Send + Sync {
    /// All of a provider's appointments on one date, ordered by start time.
    /// Includes cancelled and completed appointments.
    async fn provider_day_view(
        &self,
        provider_id: ProviderId,
        date: NaiveDate,
    ) -> SchedulingResult<Vec<Appointment>>;

    /// All of a patient's appointments across providers and dates, ordered
    /// by (date, start).
    async fn patient_appointments(
        &self,
        patient_id: PatientId,
    ) -> SchedulingResult<Vec<Appointment>>;

    /// Appointment totals for one date across all providers, broken down
    /// by status.
    async fn daily_status_counts(&self, date: NaiveDate) -> SchedulingResult<DayStatusCounts>;
}
