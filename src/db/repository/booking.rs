//! Booking repository trait: the ledger's mutation surface.
//!
//! Everything that writes appointment state goes through here. The
//! correctness contract for implementations: the conflict check of
//! `reserve` and the insertion of the new appointment are one indivisible
//! operation per (provider, date) key, and `cancel`/`set_status` apply the
//! transition table at the same serialization point where the status is
//! written. Operations on different (provider, date) keys must not block
//! each other.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};

use crate::error::SchedulingResult;
use crate::models::{
    ActorId, ActorRole, Appointment, AppointmentId, AppointmentStatus, NewAppointment, ProviderId,
};

/// Repository trait for reservations and lifecycle changes.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    // ==================== Health & Connection ====================

    /// Check if the ledger backend is healthy.
    ///
    /// # Returns
    /// - `Ok(true)` if the backend is healthy
    /// - `Ok(false)` if the backend is unhealthy but no error occurred
    /// - `Err` if an error occurred during the check
    async fn health_check(&self) -> SchedulingResult<bool>;

    // ==================== Reservations ====================

    /// Atomically reserve a slot.
    ///
    /// Validation runs first (field shape, `date >= today`, slot membership
    /// in the day's active window), then the conflict check and insert run
    /// as one critical section for the (provider, date) key.
    ///
    /// # Arguments
    /// * `request` - The booking request; id, Pending status and creation
    ///   timestamp are assigned here on success
    ///
    /// # Returns
    /// * `Ok(Appointment)` - The new appointment, status Pending
    /// * `Err(SchedulingError::Validation)` - Malformed request fields
    /// * `Err(SchedulingError::PastDate)` - Date before today
    /// * `Err(SchedulingError::InvalidSlot)` - Start is not a bookable slot
    /// * `Err(SchedulingError::SlotTaken)` - A non-cancelled appointment
    ///   already holds (provider, date, start)
    async fn reserve(&self, request: NewAppointment) -> SchedulingResult<Appointment>;

    /// Cancel on behalf of one of the appointment's parties, freeing the
    /// slot for rebooking.
    ///
    /// The acting party must be the appointment's patient or provider; the
    /// patient/provider role is derived from which one matched and checked
    /// against the transition table.
    ///
    /// # Returns
    /// * `Ok(Appointment)` - The appointment, now Cancelled
    /// * `Err(SchedulingError::NotFound)` - Unknown id
    /// * `Err(SchedulingError::AlreadyTerminal)` - Already Completed/Cancelled
    /// * `Err(SchedulingError::Authorization)` - Party is neither side of
    ///   the appointment, or the table forbids that side cancelling now
    async fn cancel(
        &self,
        appointment_id: AppointmentId,
        acting_party: ActorId,
    ) -> SchedulingResult<Appointment>;

    /// Apply one status transition as `acting_role`.
    ///
    /// Delegates legality to the transition table. Moving to Cancelled
    /// frees the slot exactly like [`Self::cancel`].
    ///
    /// # Returns
    /// * `Ok(Appointment)` - The updated appointment
    /// * `Err(SchedulingError::NotFound)` - Unknown id
    /// * `Err(SchedulingError::AlreadyTerminal)` - Current status terminal
    /// * `Err(SchedulingError::IllegalTransition)` - Pair not in the table
    /// * `Err(SchedulingError::Authorization)` - Role not allowed for pair
    async fn set_status(
        &self,
        appointment_id: AppointmentId,
        new_status: AppointmentStatus,
        acting_role: ActorRole,
    ) -> SchedulingResult<Appointment>;

    // ==================== Queries ====================

    /// Fetch one appointment by id.
    ///
    /// # Returns
    /// * `Ok(Appointment)` - The appointment
    /// * `Err(SchedulingError::NotFound)` - Unknown id
    async fn get_appointment(&self, appointment_id: AppointmentId)
        -> SchedulingResult<Appointment>;

    /// The presently bookable start times for a provider/date: the slot
    /// generator's candidates minus starts held by non-cancelled
    /// appointments, in ascending order.
    async fn list_available_slots(
        &self,
        provider_id: ProviderId,
        date: NaiveDate,
        duration_minutes: u32,
    ) -> SchedulingResult<Vec<NaiveTime>>;
}
