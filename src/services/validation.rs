//! Validation gate for scheduling mutations.
//!
//! Pure rule composition applied before anything reaches the booking
//! ledger. Rules run in a fixed order and the first violation is returned
//! as a typed error, so a request failing several rules reports the most
//! fundamental one (shape, then dates, then slot membership). Role and
//! transition legality for status changes live in [`super::transitions`]
//! and are enforced at the ledger's critical section.

use chrono::{Datelike, NaiveDate, NaiveTime};
use log::debug;

use crate::error::{SchedulingError, SchedulingResult};
use crate::models::{NewAppointment, WeekSchedule};
use crate::services::slots;

/// Upper bound on a single appointment; no working-day window is longer.
pub const MAX_DURATION_MINUTES: u32 = 8 * 60;

fn require_positive_id(field: &'static str, value: i64) -> SchedulingResult<()> {
    if value <= 0 {
        return Err(SchedulingError::validation(field, "must be a positive id"));
    }
    Ok(())
}

fn require_duration(duration_minutes: u32) -> SchedulingResult<()> {
    if duration_minutes == 0 {
        return Err(SchedulingError::validation(
            "duration_minutes",
            "must be positive",
        ));
    }
    if duration_minutes > MAX_DURATION_MINUTES {
        return Err(SchedulingError::validation(
            "duration_minutes",
            format!("must be at most {} minutes", MAX_DURATION_MINUTES),
        ));
    }
    Ok(())
}

/// Validates a booking request against the provider's week schedule.
///
/// Rule order: required fields, then `date >= today`, then slot membership
/// in the day's active window. `today` is passed in by the caller so the
/// rules themselves never read the clock.
pub fn validate_booking(
    request: &NewAppointment,
    schedule: &WeekSchedule,
    today: NaiveDate,
) -> SchedulingResult<()> {
    debug!(
        "Validating booking request: provider {} patient {} at {} {}",
        request.provider_id,
        request.patient_id,
        request.date,
        request.start.format("%H:%M")
    );

    require_positive_id("provider_id", request.provider_id.value())?;
    require_positive_id("patient_id", request.patient_id.value())?;
    require_duration(request.duration_minutes)?;

    if request.date < today {
        return Err(SchedulingError::PastDate {
            date: request.date,
            today,
        });
    }

    let window = schedule.window(request.date.weekday());
    if !slots::is_valid_slot(window, request.start, request.duration_minutes) {
        return Err(SchedulingError::InvalidSlot {
            provider_id: request.provider_id,
            date: request.date,
            start: request.start,
        });
    }

    Ok(())
}

/// Validates an availability window update: an active window needs
/// start < end. Inactive windows keep whatever hours they carry.
pub fn validate_window(active: bool, start: NaiveTime, end: NaiveTime) -> SchedulingResult<()> {
    if active && start >= end {
        return Err(SchedulingError::InvalidWindow { start, end });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AppointmentType, AvailabilityWindow, PatientId, ProviderId, WeekSchedule,
    };
    use chrono::Weekday;

    fn time(hour: u32, min: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, min, 0).unwrap()
    }

    // 2030-06-03 is a Monday
    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 6, 3).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 6, 1).unwrap()
    }

    fn request(date: NaiveDate, start: NaiveTime, duration_minutes: u32) -> NewAppointment {
        NewAppointment {
            provider_id: ProviderId::new(1),
            patient_id: PatientId::new(2),
            date,
            start,
            duration_minutes,
            appointment_type: AppointmentType::Routine,
            notes: None,
        }
    }

    #[test]
    fn test_valid_request_passes() {
        let schedule = WeekSchedule::standard_week();
        let result = validate_booking(&request(monday(), time(8, 0), 30), &schedule, today());
        assert!(result.is_ok());
    }

    #[test]
    fn test_non_positive_ids_rejected() {
        let schedule = WeekSchedule::standard_week();
        let mut bad = request(monday(), time(8, 0), 30);
        bad.provider_id = ProviderId::new(0);
        let result = validate_booking(&bad, &schedule, today());
        assert!(matches!(
            result,
            Err(SchedulingError::Validation {
                field: "provider_id",
                ..
            })
        ));

        let mut bad = request(monday(), time(8, 0), 30);
        bad.patient_id = PatientId::new(-3);
        let result = validate_booking(&bad, &schedule, today());
        assert!(matches!(
            result,
            Err(SchedulingError::Validation {
                field: "patient_id",
                ..
            })
        ));
    }

    #[test]
    fn test_zero_and_oversized_durations_rejected() {
        let schedule = WeekSchedule::standard_week();
        for duration in [0, MAX_DURATION_MINUTES + 1] {
            let result = validate_booking(&request(monday(), time(8, 0), duration), &schedule, today());
            assert!(matches!(
                result,
                Err(SchedulingError::Validation {
                    field: "duration_minutes",
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_past_date_rejected() {
        let schedule = WeekSchedule::standard_week();
        let yesterday = today().pred_opt().unwrap();
        let result = validate_booking(&request(yesterday, time(8, 0), 30), &schedule, today());
        assert!(matches!(result, Err(SchedulingError::PastDate { .. })));
    }

    #[test]
    fn test_today_is_bookable() {
        let mut schedule = WeekSchedule::unset();
        // today() above is a Saturday
        schedule.set_window(
            Weekday::Sat,
            AvailabilityWindow::new(true, time(8, 0), time(12, 0)),
        );
        let result = validate_booking(&request(today(), time(8, 0), 30), &schedule, today());
        assert!(result.is_ok());
    }

    #[test]
    fn test_inactive_day_rejected_as_invalid_slot() {
        let schedule = WeekSchedule::standard_week();
        // Standard week has Saturdays inactive; 2030-06-08 is a Saturday
        let saturday = NaiveDate::from_ymd_opt(2030, 6, 8).unwrap();
        let result = validate_booking(&request(saturday, time(8, 0), 30), &schedule, today());
        assert!(matches!(result, Err(SchedulingError::InvalidSlot { .. })));
    }

    #[test]
    fn test_off_grid_start_rejected() {
        let schedule = WeekSchedule::standard_week();
        let result = validate_booking(&request(monday(), time(8, 10), 30), &schedule, today());
        assert!(matches!(result, Err(SchedulingError::InvalidSlot { .. })));
    }

    #[test]
    fn test_past_date_reported_before_invalid_slot() {
        // A request violating both the date rule and the slot rule reports
        // the date rule first.
        let schedule = WeekSchedule::standard_week();
        let last_week = today().pred_opt().unwrap().pred_opt().unwrap();
        let result = validate_booking(&request(last_week, time(3, 33), 30), &schedule, today());
        assert!(matches!(result, Err(SchedulingError::PastDate { .. })));
    }

    #[test]
    fn test_window_validation() {
        assert!(validate_window(true, time(8, 0), time(17, 0)).is_ok());
        assert!(matches!(
            validate_window(true, time(17, 0), time(8, 0)),
            Err(SchedulingError::InvalidWindow { .. })
        ));
        assert!(matches!(
            validate_window(true, time(9, 0), time(9, 0)),
            Err(SchedulingError::InvalidWindow { .. })
        ));
        // Inactive windows may carry any hours
        assert!(validate_window(false, time(17, 0), time(8, 0)).is_ok());
    }
}
