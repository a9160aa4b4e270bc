//! High-level scheduling service layer.
//!
//! This module provides repository-agnostic scheduling operations that work
//! with any implementation of the repository traits. These functions contain
//! the cross-cutting behavior that must stay consistent regardless of the
//! storage backend, notably notification dispatch after successful mutations.
//!
//! # Architecture
//!
//! The database module follows a layered architecture:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (REST API, server binary)            │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs) - Orchestration            │
//! │  - Booking, cancellation, status changes                 │
//! │  - Notification dispatch (best-effort)                   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository/) - Abstract Interface    │
//! │  - AvailabilityRepository (weekly windows)               │
//! │  - BookingRepository (reserve / cancel / status)         │
//! │  - ReportingRepository (day sheets, counts)              │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Local Ledger (in-memory, sharded per provider-day)     │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use medsched::db::{repositories::LocalLedger, services};
//! use medsched::models::WeekSchedule;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = LocalLedger::new();
//!     repo.set_week_schedule(1.into(), WeekSchedule::standard_week());
//!
//!     let date = chrono::NaiveDate::from_ymd_opt(2030, 6, 3).unwrap();
//!     let open = services::list_available_slots(&repo, 1.into(), date, 30).await?;
//!     println!("{} open slots", open.len());
//!
//!     Ok(())
//! }
//! ```

use chrono::{NaiveDate, NaiveTime, Weekday};
use log::{info, warn};

use crate::db::repository::LedgerRepository;
use crate::error::SchedulingResult;
use crate::models::{
    ActorId, ActorRole, Appointment, AppointmentId, AppointmentStatus, AvailabilityWindow,
    DayStatusCounts, NewAppointment, PatientId, ProviderId, WeekSchedule,
};
use crate::services::{NotificationEvent, NotificationKind, Notifier};

/// Deliver one event, logging failure instead of propagating it. The
/// scheduling mutation is already committed when this runs.
async fn dispatch(notifier: &dyn Notifier, kind: NotificationKind, appointment: &Appointment) {
    let event = NotificationEvent::new(kind, appointment.clone());
    if let Err(e) = notifier.notify(&event).await {
        warn!(
            "Service layer: notification delivery failed for appointment {}: {}",
            appointment.id, e
        );
    }
}

// ==================== Health & Connection ====================

/// Check if the ledger backend is healthy.
///
/// This is a simple pass-through to the repository's health check.
///
/// # Arguments
/// * `repo` - Repository implementation
///
/// # Returns
/// * `Ok(true)` if the backend is healthy
/// * `Err` if the check fails
pub async fn health_check<R: LedgerRepository + ?Sized>(repo: &R) -> SchedulingResult<bool> {
    repo.health_check().await
}

// ==================== Booking Operations ====================

/// Book an appointment and notify the parties.
///
/// The repository runs the full validation gate and the atomic slot
/// reservation; this function adds the `Created` notification on top.
/// Notification failure is logged and never rolls the booking back.
///
/// # Arguments
/// * `repo` - Repository implementation
/// * `notifier` - Delivery channel for the `Created` event
/// * `request` - The booking request
///
/// # Returns
/// * `Ok(Appointment)` - The stored appointment, status `Pending`
/// * `Err` if validation fails or the slot is already taken
pub async fn create_appointment<R: LedgerRepository + ?Sized>(
    repo: &R,
    notifier: &dyn Notifier,
    request: NewAppointment,
) -> SchedulingResult<Appointment> {
    info!(
        "Service layer: booking patient {} with provider {} on {} {} ({} min, {})",
        request.patient_id,
        request.provider_id,
        request.date,
        request.start.format("%H:%M"),
        request.duration_minutes,
        request.appointment_type,
    );

    let appointment = repo.reserve(request).await?;
    dispatch(notifier, NotificationKind::Created, &appointment).await;
    Ok(appointment)
}

/// Cancel an appointment on behalf of one of its parties.
///
/// The acting party must be the appointment's patient or its provider;
/// anyone else is rejected. A successful cancellation frees the slot and
/// emits a `Cancelled` notification.
///
/// # Arguments
/// * `repo` - Repository implementation
/// * `notifier` - Delivery channel for the `Cancelled` event
/// * `appointment_id` - The appointment to cancel
/// * `acting_party` - Who is asking
///
/// # Returns
/// * `Ok(Appointment)` - The appointment, now `Cancelled`
/// * `Err` if unknown, already terminal, or the party is a stranger
pub async fn cancel_appointment<R: LedgerRepository + ?Sized>(
    repo: &R,
    notifier: &dyn Notifier,
    appointment_id: AppointmentId,
    acting_party: ActorId,
) -> SchedulingResult<Appointment> {
    info!(
        "Service layer: party {} cancelling appointment {}",
        acting_party, appointment_id
    );

    let appointment = repo.cancel(appointment_id, acting_party).await?;
    dispatch(notifier, NotificationKind::Cancelled, &appointment).await;
    Ok(appointment)
}

/// Move an appointment through its lifecycle.
///
/// The transition table decides which role may perform which move. A move
/// to `Cancelled` emits the `Cancelled` notification kind, everything else
/// emits `StatusChanged`.
///
/// # Arguments
/// * `repo` - Repository implementation
/// * `notifier` - Delivery channel for the resulting event
/// * `appointment_id` - The appointment to update
/// * `new_status` - The requested status
/// * `acting_role` - The role performing the move
///
/// # Returns
/// * `Ok(Appointment)` - The appointment with its new status
/// * `Err` if unknown, terminal, illegal, or the role may not do it
pub async fn set_appointment_status<R: LedgerRepository + ?Sized>(
    repo: &R,
    notifier: &dyn Notifier,
    appointment_id: AppointmentId,
    new_status: AppointmentStatus,
    acting_role: ActorRole,
) -> SchedulingResult<Appointment> {
    info!(
        "Service layer: {} setting appointment {} to {}",
        acting_role, appointment_id, new_status
    );

    let appointment = repo.set_status(appointment_id, new_status, acting_role).await?;
    let kind = if new_status == AppointmentStatus::Cancelled {
        NotificationKind::Cancelled
    } else {
        NotificationKind::StatusChanged
    };
    dispatch(notifier, kind, &appointment).await;
    Ok(appointment)
}

/// Retrieve a single appointment by ID.
///
/// # Arguments
/// * `repo` - Repository implementation
/// * `appointment_id` - The ID of the appointment
///
/// # Returns
/// * `Ok(Appointment)` - The appointment
/// * `Err` if not found
pub async fn get_appointment<R: LedgerRepository + ?Sized>(
    repo: &R,
    appointment_id: AppointmentId,
) -> SchedulingResult<Appointment> {
    repo.get_appointment(appointment_id).await
}

/// List a provider's open slots for one date.
///
/// # Arguments
/// * `repo` - Repository implementation
/// * `provider_id` - The provider
/// * `date` - The calendar date
/// * `duration_minutes` - Slot length used to generate candidates
///
/// # Returns
/// * `Ok(Vec<NaiveTime>)` - Start times still free, ascending
/// * `Err` if the query fails
pub async fn list_available_slots<R: LedgerRepository + ?Sized>(
    repo: &R,
    provider_id: ProviderId,
    date: NaiveDate,
    duration_minutes: u32,
) -> SchedulingResult<Vec<NaiveTime>> {
    repo.list_available_slots(provider_id, date, duration_minutes).await
}

// ==================== Availability Operations ====================

/// Set one weekday's window for a provider.
///
/// # Arguments
/// * `repo` - Repository implementation
/// * `provider_id` - The provider
/// * `weekday` - Which weekday to change
/// * `window` - The new window
///
/// # Returns
/// * `Ok(())` on success
/// * `Err` if the window is active with start >= end
pub async fn set_availability_window<R: LedgerRepository + ?Sized>(
    repo: &R,
    provider_id: ProviderId,
    weekday: Weekday,
    window: AvailabilityWindow,
) -> SchedulingResult<()> {
    info!(
        "Service layer: provider {} updating {:?} window",
        provider_id, weekday
    );
    repo.set_window(provider_id, weekday, window).await
}

/// Get a provider's full recurring week.
///
/// # Arguments
/// * `repo` - Repository implementation
/// * `provider_id` - The provider
///
/// # Returns
/// * `Ok(WeekSchedule)` - Seven windows, unset days inactive
pub async fn week_schedule<R: LedgerRepository + ?Sized>(
    repo: &R,
    provider_id: ProviderId,
) -> SchedulingResult<WeekSchedule> {
    repo.week_schedule(provider_id).await
}

// ==================== Reporting Operations ====================

/// A provider's appointment sheet for one date.
///
/// # Arguments
/// * `repo` - Repository implementation
/// * `provider_id` - The provider
/// * `date` - The calendar date
///
/// # Returns
/// * `Ok(Vec<Appointment>)` - Ordered by start time, terminal included
pub async fn provider_day_view<R: LedgerRepository + ?Sized>(
    repo: &R,
    provider_id: ProviderId,
    date: NaiveDate,
) -> SchedulingResult<Vec<Appointment>> {
    repo.provider_day_view(provider_id, date).await
}

/// Every appointment a patient has ever booked.
///
/// # Arguments
/// * `repo` - Repository implementation
/// * `patient_id` - The patient
///
/// # Returns
/// * `Ok(Vec<Appointment>)` - Ordered by date then start time
pub async fn patient_appointments<R: LedgerRepository + ?Sized>(
    repo: &R,
    patient_id: PatientId,
) -> SchedulingResult<Vec<Appointment>> {
    repo.patient_appointments(patient_id).await
}

/// Status breakdown across all providers for one date.
///
/// # Arguments
/// * `repo` - Repository implementation
/// * `date` - The calendar date
///
/// # Returns
/// * `Ok(DayStatusCounts)` - Totals per status
pub async fn daily_status_counts<R: LedgerRepository + ?Sized>(
    repo: &R,
    date: NaiveDate,
) -> SchedulingResult<DayStatusCounts> {
    repo.daily_status_counts(date).await
}
