//! Slot derivation.
//!
//! Translates one availability window into the ordered sequence of bookable
//! start times for a date: `start, start + d, start + 2d, …` while the slot
//! still ends inside the window. The generator knows nothing about existing
//! bookings; the ledger filters taken slots afterwards, which keeps this
//! module pure and independently testable.
//!
//! All arithmetic runs on whole seconds from the window start, so a start
//! time with stray seconds (08:00:30 on a 30-minute grid) is rejected and
//! nothing ever wraps past midnight.

use chrono::{Duration, NaiveDate, NaiveTime, Weekday};

use crate::models::{AvailabilityWindow, WeekSchedule};

/// Lazy iterator over the candidate start times of one window.
///
/// Finite by construction (the slot count is fixed up front) and cheap to
/// clone, so callers can restart the sequence by cloning or by calling the
/// generator again.
#[derive(Debug, Clone)]
pub struct SlotIter {
    start: NaiveTime,
    step_seconds: i64,
    index: u32,
    count: u32,
}

impl Iterator for SlotIter {
    type Item = NaiveTime;

    fn next(&mut self) -> Option<NaiveTime> {
        if self.index >= self.count {
            return None;
        }
        let offset = self.step_seconds * self.index as i64;
        self.index += 1;
        Some(self.start + Duration::seconds(offset))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.count - self.index) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SlotIter {}

/// How many slots of `duration_minutes` fit in the window:
/// `floor((end - start) / duration)`. Zero for inactive windows, zero
/// durations and inverted intervals.
pub fn slot_count(window: &AvailabilityWindow, duration_minutes: u32) -> u32 {
    if !window.active || duration_minutes == 0 {
        return 0;
    }
    let span = (window.end - window.start).num_seconds();
    if span <= 0 {
        return 0;
    }
    (span / (duration_minutes as i64 * 60)) as u32
}

/// The candidate start times of `window` for slots of `duration_minutes`.
pub fn slots_in_window(window: &AvailabilityWindow, duration_minutes: u32) -> SlotIter {
    SlotIter {
        start: window.start,
        step_seconds: duration_minutes as i64 * 60,
        index: 0,
        count: slot_count(window, duration_minutes),
    }
}

/// The candidate start times for a provider's schedule on a concrete date.
/// Empty when that weekday's window is inactive.
pub fn generate_slots(schedule: &WeekSchedule, date: NaiveDate, duration_minutes: u32) -> SlotIter {
    use chrono::Datelike;
    slots_in_window(schedule.window(date.weekday()), duration_minutes)
}

/// True iff `start` is one of the values [`slots_in_window`] would yield.
///
/// Decided arithmetically instead of by iterating: `start` must sit on the
/// duration grid anchored at the window start, and the slot must end at or
/// before the window end.
pub fn is_valid_slot(window: &AvailabilityWindow, start: NaiveTime, duration_minutes: u32) -> bool {
    if !window.active || duration_minutes == 0 {
        return false;
    }
    let offset = (start - window.start).num_seconds();
    if offset < 0 {
        return false;
    }
    let step = duration_minutes as i64 * 60;
    if offset % step != 0 {
        return false;
    }
    offset / step < slot_count(window, duration_minutes) as i64
}

/// Weekday-level convenience used by availability listings: the slot starts
/// a window would produce on its weekday, regardless of date.
pub fn weekday_slots(
    schedule: &WeekSchedule,
    weekday: Weekday,
    duration_minutes: u32,
) -> SlotIter {
    slots_in_window(schedule.window(weekday), duration_minutes)
}
