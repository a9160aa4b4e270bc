//! Appointment lifecycle state machine.
//!
//! One table drives every status change: each legal (from, to) pair lists
//! the roles allowed to perform it. Anything outside the table is an
//! illegal transition; anything out of a terminal status fails before the
//! table is even consulted. The ledger calls [`check_transition`] inside
//! its per-day critical section, so the table is enforced at the same
//! point where the status is written.

use crate::error::{SchedulingError, SchedulingResult};
use crate::models::{ActorRole, AppointmentStatus};

const PROVIDER_ONLY: &[ActorRole] = &[ActorRole::Provider];
const PATIENT_OR_PROVIDER: &[ActorRole] = &[ActorRole::Patient, ActorRole::Provider];

/// The roles allowed to move an appointment from `from` to `to`, or `None`
/// when the pair is not a legal transition at all.
pub fn allowed_actors(
    from: AppointmentStatus,
    to: AppointmentStatus,
) -> Option<&'static [ActorRole]> {
    use AppointmentStatus::*;
    match (from, to) {
        (Pending, Confirmed) => Some(PROVIDER_ONLY),
        (Pending, Cancelled) => Some(PATIENT_OR_PROVIDER),
        (Confirmed, InProgress) => Some(PROVIDER_ONLY),
        (Confirmed, Cancelled) => Some(PATIENT_OR_PROVIDER),
        (InProgress, Completed) => Some(PROVIDER_ONLY),
        // Aborting a visit that already started is a provider-only call
        (InProgress, Cancelled) => Some(PROVIDER_ONLY),
        _ => None,
    }
}

/// All statuses reachable from `from` in one legal step, in lifecycle
/// order. Terminal statuses have none.
pub fn valid_transitions(from: AppointmentStatus) -> Vec<AppointmentStatus> {
    AppointmentStatus::all()
        .into_iter()
        .filter(|to| allowed_actors(from, *to).is_some())
        .collect()
}

/// Checks one attempted transition for `role`.
///
/// Precedence: a terminal current status fails `AlreadyTerminal`; a pair
/// outside the table fails `IllegalTransition`; a legal pair attempted by a
/// role not in its actor list fails `Authorization`.
pub fn check_transition(
    from: AppointmentStatus,
    to: AppointmentStatus,
    role: ActorRole,
) -> SchedulingResult<()> {
    if from.is_terminal() {
        return Err(SchedulingError::AlreadyTerminal(from));
    }
    match allowed_actors(from, to) {
        None => Err(SchedulingError::IllegalTransition { from, to }),
        Some(roles) if roles.contains(&role) => Ok(()),
        Some(_) => Err(SchedulingError::Authorization(format!(
            "{} may not move an appointment from {} to {}",
            role, from, to
        ))),
    }
}
