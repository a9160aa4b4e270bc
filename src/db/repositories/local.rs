//! In-memory local ledger implementation.
//!
//! This module provides a local implementation of all repository traits
//! suitable for unit testing and local development. All data is stored in
//! memory, sharded into one "day book" per (provider, date) so concurrent
//! bookings for unrelated providers or dates never contend.
//!
//! # Locking
//!
//! Two levels of locks:
//!
//! - an outer `RwLock` over the ledger map (day shards, the appointment
//!   index, availability, the id counter)
//! - one `Mutex` per day book
//!
//! Lock order: a day mutex is never acquired while a guard on the outer
//! map is held (shard `Arc`s are cloned out first, then the guard drops).
//! A thread already holding a day mutex may briefly take the outer write
//! lock to allocate an id and update the index. This keeps the order
//! acyclic while making conflict-check-plus-insert a single critical
//! section per (provider, date) key.

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, NaiveTime, Utc, Weekday};
use log::{info, warn};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use crate::db::repository::*;
use crate::error::{SchedulingError, SchedulingResult};
use crate::models::*;
use crate::services::{slots, transitions, validation};

type DayKey = (ProviderId, NaiveDate);

/// One provider-day of bookings.
///
/// `by_start` holds only the slots occupied by non-cancelled appointments;
/// `appointments` retains everything ever booked that day, terminal
/// statuses included.
#[derive(Debug, Default)]
struct DayBook {
    by_start: HashMap<NaiveTime, AppointmentId>,
    appointments: HashMap<AppointmentId, Appointment>,
}

struct LedgerState {
    days: HashMap<DayKey, Arc<Mutex<DayBook>>>,
    index: HashMap<AppointmentId, DayKey>,
    availability: HashMap<ProviderId, WeekSchedule>,

    // ID counter
    next_appointment_id: i64,

    // Connection health
    is_healthy: bool,
}

impl Default for LedgerState {
    fn default() -> Self {
        Self {
            days: HashMap::new(),
            index: HashMap::new(),
            availability: HashMap::new(),
            next_appointment_id: 1,
            is_healthy: true,
        }
    }
}

/// In-memory booking ledger.
///
/// The authoritative record of reservations: the conflict check for a slot
/// and the insertion of the winning appointment run under that day's mutex,
/// so exactly one of N simultaneous reservations for the same key succeeds.
///
/// # Example
/// ```
/// use medsched::db::repositories::LocalLedger;
/// use medsched::models::WeekSchedule;
///
/// let ledger = LocalLedger::new();
/// ledger.set_week_schedule(1.into(), WeekSchedule::standard_week());
/// ```
#[derive(Clone)]
pub struct LocalLedger {
    state: Arc<RwLock<LedgerState>>,
}

impl LocalLedger {
    /// Create a new empty ledger.
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(LedgerState::default())),
        }
    }

    /// Replace a provider's entire week in one call.
    ///
    /// Helper for seeding: tests and local bootstrapping set a whole
    /// template this way instead of seven `set_window` round trips.
    pub fn set_week_schedule(&self, provider_id: ProviderId, schedule: WeekSchedule) {
        let mut state = self.state.write().unwrap();
        state.availability.insert(provider_id, schedule);
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        let mut state = self.state.write().unwrap();
        state.is_healthy = healthy;
    }

    /// Clear all data from the ledger, keeping the health flag.
    pub fn clear(&self) {
        let mut state = self.state.write().unwrap();
        *state = LedgerState {
            is_healthy: state.is_healthy,
            ..Default::default()
        };
    }

    /// Number of appointments ever booked, terminal ones included.
    pub fn appointment_count(&self) -> usize {
        self.state.read().unwrap().index.len()
    }

    /// Number of providers with a configured week.
    pub fn provider_count(&self) -> usize {
        self.state.read().unwrap().availability.len()
    }

    /// Helper to check health and return error if unhealthy.
    fn check_health(&self) -> SchedulingResult<()> {
        let state = self.state.read().unwrap();
        if !state.is_healthy {
            return Err(RepositoryError::ConnectionError(
                "Ledger backend is not healthy".to_string(),
            )
            .into());
        }
        Ok(())
    }

    /// The provider's week, or the all-inactive sentinel when unset.
    fn week_schedule_impl(&self, provider_id: ProviderId) -> WeekSchedule {
        let state = self.state.read().unwrap();
        state
            .availability
            .get(&provider_id)
            .copied()
            .unwrap_or_default()
    }

    /// Resolve an appointment id to its day shard.
    fn day_book(&self, appointment_id: AppointmentId) -> SchedulingResult<Arc<Mutex<DayBook>>> {
        let state = self.state.read().unwrap();
        let key = state
            .index
            .get(&appointment_id)
            .copied()
            .ok_or(SchedulingError::NotFound(appointment_id))?;
        state.days.get(&key).cloned().ok_or_else(|| {
            RepositoryError::InternalError(format!(
                "Ledger index points at a missing day book for appointment {}",
                appointment_id
            ))
            .into()
        })
    }

    /// Get or create the day shard for a key.
    fn day_book_for_key(&self, key: DayKey) -> Arc<Mutex<DayBook>> {
        let mut state = self.state.write().unwrap();
        state.days.entry(key).or_default().clone()
    }

    /// Apply one transition under the day lock. Shared by `cancel` and
    /// `set_status`; moving to Cancelled releases the slot.
    fn transition_locked(
        book: &mut DayBook,
        appointment_id: AppointmentId,
        new_status: AppointmentStatus,
        acting_role: ActorRole,
    ) -> SchedulingResult<Appointment> {
        let appointment = book
            .appointments
            .get_mut(&appointment_id)
            .ok_or(SchedulingError::NotFound(appointment_id))?;

        transitions::check_transition(appointment.status, new_status, acting_role)?;

        let from = appointment.status;
        appointment.status = new_status;
        let start = appointment.start;
        let updated = appointment.clone();

        if new_status == AppointmentStatus::Cancelled {
            book.by_start.remove(&start);
        }

        info!(
            "Appointment {} moved {} -> {} by {}",
            appointment_id, from, new_status, acting_role
        );
        Ok(updated)
    }
}

impl Default for LocalLedger {
    fn default() -> Self {
        Self::new()
    }
}

// ==================== Availability Repository ====================

#[async_trait]
impl AvailabilityRepository for LocalLedger {
    async fn set_window(
        &self,
        provider_id: ProviderId,
        weekday: Weekday,
        window: AvailabilityWindow,
    ) -> SchedulingResult<()> {
        self.check_health()?;
        validation::validate_window(window.active, window.start, window.end)?;

        let mut state = self.state.write().unwrap();
        state
            .availability
            .entry(provider_id)
            .or_default()
            .set_window(weekday, window);

        info!(
            "Provider {} window for {:?} set to {}-{} (active: {})",
            provider_id,
            weekday,
            window.start.format("%H:%M"),
            window.end.format("%H:%M"),
            window.active
        );
        Ok(())
    }

    async fn get_window(
        &self,
        provider_id: ProviderId,
        weekday: Weekday,
    ) -> SchedulingResult<AvailabilityWindow> {
        self.check_health()?;
        Ok(*self.week_schedule_impl(provider_id).window(weekday))
    }

    async fn week_schedule(&self, provider_id: ProviderId) -> SchedulingResult<WeekSchedule> {
        self.check_health()?;
        Ok(self.week_schedule_impl(provider_id))
    }

    async fn list_active_windows(
        &self,
        provider_id: ProviderId,
    ) -> SchedulingResult<Vec<(Weekday, AvailabilityWindow)>> {
        self.check_health()?;
        Ok(self
            .week_schedule_impl(provider_id)
            .active_windows()
            .map(|(weekday, window)| (weekday, *window))
            .collect())
    }
}

// ==================== Booking Repository ====================

#[async_trait]
impl BookingRepository for LocalLedger {
    async fn health_check(&self) -> SchedulingResult<bool> {
        let state = self.state.read().unwrap();
        Ok(state.is_healthy)
    }

    async fn reserve(&self, request: NewAppointment) -> SchedulingResult<Appointment> {
        self.check_health()?;

        let today = Utc::now().date_naive();
        let schedule = self.week_schedule_impl(request.provider_id);
        validation::validate_booking(&request, &schedule, today)?;

        let day = self.day_book_for_key((request.provider_id, request.date));
        let mut book = day.lock().unwrap();

        if book.by_start.contains_key(&request.start) {
            warn!(
                "Slot conflict: provider {} {} {} already booked",
                request.provider_id,
                request.date,
                request.start.format("%H:%M")
            );
            return Err(SchedulingError::SlotTaken {
                provider_id: request.provider_id,
                date: request.date,
                start: request.start,
            });
        }

        // The slot is free; allocate an id and register the day in the
        // index while still holding the day mutex.
        let id = {
            let mut state = self.state.write().unwrap();
            let id = AppointmentId::new(state.next_appointment_id);
            state.next_appointment_id += 1;
            state.index.insert(id, (request.provider_id, request.date));
            id
        };

        let appointment = Appointment {
            id,
            patient_id: request.patient_id,
            provider_id: request.provider_id,
            date: request.date,
            start: request.start,
            duration_minutes: request.duration_minutes,
            appointment_type: request.appointment_type,
            notes: request.notes,
            status: AppointmentStatus::Pending,
            created_at: Utc::now(),
        };

        book.by_start.insert(appointment.start, id);
        book.appointments.insert(id, appointment.clone());

        info!(
            "Reserved appointment {}: patient {} with provider {} on {} {}",
            id,
            appointment.patient_id,
            appointment.provider_id,
            appointment.date,
            appointment.start.format("%H:%M")
        );
        Ok(appointment)
    }

    async fn cancel(
        &self,
        appointment_id: AppointmentId,
        acting_party: ActorId,
    ) -> SchedulingResult<Appointment> {
        self.check_health()?;

        let day = self.day_book(appointment_id)?;
        let mut book = day.lock().unwrap();

        // Terminal first, then party membership, so a stranger probing a
        // cancelled appointment learns nothing about its parties.
        let appointment = book
            .appointments
            .get(&appointment_id)
            .ok_or(SchedulingError::NotFound(appointment_id))?;
        if appointment.status.is_terminal() {
            return Err(SchedulingError::AlreadyTerminal(appointment.status));
        }
        let role = appointment.role_of_party(acting_party).ok_or_else(|| {
            SchedulingError::Authorization(format!(
                "Party {} is neither the patient nor the provider of appointment {}",
                acting_party, appointment_id
            ))
        })?;

        Self::transition_locked(&mut book, appointment_id, AppointmentStatus::Cancelled, role)
    }

    async fn set_status(
        &self,
        appointment_id: AppointmentId,
        new_status: AppointmentStatus,
        acting_role: ActorRole,
    ) -> SchedulingResult<Appointment> {
        self.check_health()?;

        let day = self.day_book(appointment_id)?;
        let mut book = day.lock().unwrap();
        Self::transition_locked(&mut book, appointment_id, new_status, acting_role)
    }

    async fn get_appointment(
        &self,
        appointment_id: AppointmentId,
    ) -> SchedulingResult<Appointment> {
        self.check_health()?;

        let day = self.day_book(appointment_id)?;
        let book = day.lock().unwrap();
        book.appointments
            .get(&appointment_id)
            .cloned()
            .ok_or(SchedulingError::NotFound(appointment_id))
    }

    async fn list_available_slots(
        &self,
        provider_id: ProviderId,
        date: NaiveDate,
        duration_minutes: u32,
    ) -> SchedulingResult<Vec<NaiveTime>> {
        self.check_health()?;

        let schedule = self.week_schedule_impl(provider_id);
        let day = {
            let state = self.state.read().unwrap();
            state.days.get(&(provider_id, date)).cloned()
        };

        let candidates = slots::slots_in_window(schedule.window(date.weekday()), duration_minutes);
        match day {
            None => Ok(candidates.collect()),
            Some(day) => {
                let book = day.lock().unwrap();
                Ok(candidates
                    .filter(|start| !book.by_start.contains_key(start))
                    .collect())
            }
        }
    }
}

// ==================== Reporting Repository ====================

#[async_trait]
impl ReportingRepository for LocalLedger {
    async fn provider_day_view(
        &self,
        provider_id: ProviderId,
        date: NaiveDate,
    ) -> SchedulingResult<Vec<Appointment>> {
        self.check_health()?;

        let day = {
            let state = self.state.read().unwrap();
            state.days.get(&(provider_id, date)).cloned()
        };

        let mut appointments = match day {
            None => Vec::new(),
            Some(day) => {
                let book = day.lock().unwrap();
                book.appointments.values().cloned().collect()
            }
        };
        appointments.sort_by_key(|a| (a.start, a.id));
        Ok(appointments)
    }

    async fn patient_appointments(
        &self,
        patient_id: PatientId,
    ) -> SchedulingResult<Vec<Appointment>> {
        self.check_health()?;

        let day_books: Vec<Arc<Mutex<DayBook>>> = {
            let state = self.state.read().unwrap();
            state.days.values().cloned().collect()
        };

        let mut appointments = Vec::new();
        for day in day_books {
            let book = day.lock().unwrap();
            appointments.extend(
                book.appointments
                    .values()
                    .filter(|a| a.patient_id == patient_id)
                    .cloned(),
            );
        }
        appointments.sort_by_key(|a| (a.date, a.start, a.id));
        Ok(appointments)
    }

    async fn daily_status_counts(&self, date: NaiveDate) -> SchedulingResult<DayStatusCounts> {
        self.check_health()?;

        let day_books: Vec<Arc<Mutex<DayBook>>> = {
            let state = self.state.read().unwrap();
            state
                .days
                .iter()
                .filter(|(key, _)| key.1 == date)
                .map(|(_, day)| day.clone())
                .collect()
        };

        let mut counts = DayStatusCounts::default();
        for day in day_books {
            let book = day.lock().unwrap();
            for appointment in book.appointments.values() {
                counts.record(appointment.status);
            }
        }
        Ok(counts)
    }
}
