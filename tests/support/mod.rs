//! Shared helpers for integration tests.

use std::sync::Mutex;

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Utc, Weekday};
use medsched::db::repositories::LocalLedger;
use medsched::models::{
    AppointmentType, NewAppointment, PatientId, ProviderId, WeekSchedule,
};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// Serializes access to process-global env vars so parallel tests cannot
/// observe each other's changes, and restores the previous values when the
/// closure returns or panics.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
#[allow(dead_code)]
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().expect("ENV_LOCK poisoned");
    let _guard = ScopedEnv::apply(changes);
    f()
}

struct ScopedEnv {
    previous: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn apply(changes: &[(&str, Option<&str>)]) -> Self {
        let previous = changes
            .iter()
            .map(|(k, _)| (k.to_string(), std::env::var(k).ok()))
            .collect();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { previous }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.previous.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// First date strictly after today falling on `weekday`. Keeps test
/// bookings in the future regardless of when the suite runs.
#[allow(dead_code)]
pub fn upcoming(weekday: Weekday) -> NaiveDate {
    let mut date = Utc::now().date_naive() + Duration::days(1);
    while date.weekday() != weekday {
        date += Duration::days(1);
    }
    date
}

#[allow(dead_code)]
pub fn yesterday() -> NaiveDate {
    Utc::now().date_naive() - Duration::days(1)
}

#[allow(dead_code)]
pub fn time(hour: u32, min: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, min, 0).unwrap()
}

/// A ledger with the stock Monday-Friday week for each given provider.
#[allow(dead_code)]
pub fn standard_ledger(provider_ids: &[i64]) -> LocalLedger {
    let ledger = LocalLedger::new();
    for id in provider_ids {
        ledger.set_week_schedule(ProviderId::new(*id), WeekSchedule::standard_week());
    }
    ledger
}

/// A 30 minute routine booking request.
#[allow(dead_code)]
pub fn booking(provider_id: i64, patient_id: i64, date: NaiveDate, start: NaiveTime) -> NewAppointment {
    NewAppointment {
        provider_id: ProviderId::new(provider_id),
        patient_id: PatientId::new(patient_id),
        date,
        start,
        duration_minutes: 30,
        appointment_type: AppointmentType::Routine,
        notes: None,
    }
}
