use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

crate::define_id_type!(i64, ProviderId);

/// Weekdays in calendar order, Monday first. Used wherever the week is
/// walked so listings always come out in weekday order.
pub const WEEKDAY_ORDER: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Array index for a weekday: 0 = Monday .. 6 = Sunday.
pub fn weekday_index(weekday: Weekday) -> usize {
    weekday.num_days_from_monday() as usize
}

/// Inverse of [`weekday_index`]. Returns `None` for indices outside 0..=6.
pub fn weekday_from_index(index: u8) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Mon),
        1 => Some(Weekday::Tue),
        2 => Some(Weekday::Wed),
        3 => Some(Weekday::Thu),
        4 => Some(Weekday::Fri),
        5 => Some(Weekday::Sat),
        6 => Some(Weekday::Sun),
        _ => None,
    }
}

fn hm(hour: u32, min: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, min, 0).unwrap_or(NaiveTime::MIN)
}

/// One weekday's recurring booking interval for a provider.
///
/// Deactivating a window keeps its start/end so it can be re-enabled with
/// the previous hours intact. Invariant (enforced at the validation gate,
/// not here): an active window has start < end.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityWindow {
    pub active: bool,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl AvailabilityWindow {
    pub fn new(active: bool, start: NaiveTime, end: NaiveTime) -> Self {
        Self { active, start, end }
    }

    /// The "unset" sentinel: inactive, 08:00-12:00 retained for re-enabling.
    pub fn unset() -> Self {
        Self::new(false, hm(8, 0), hm(12, 0))
    }

    /// Minutes between start and end; zero when the interval is inverted.
    pub fn span_minutes(&self) -> u32 {
        let span = (self.end - self.start).num_minutes();
        if span > 0 {
            span as u32
        } else {
            0
        }
    }
}

impl Default for AvailabilityWindow {
    fn default() -> Self {
        Self::unset()
    }
}

/// A provider's full recurring week: one window per weekday, fixed-size and
/// indexed by weekday, so "no window yet" is an explicit inactive sentinel
/// rather than a missing key.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSchedule {
    windows: [AvailabilityWindow; 7],
}

impl WeekSchedule {
    /// All seven windows unset (inactive).
    pub fn unset() -> Self {
        Self {
            windows: [AvailabilityWindow::unset(); 7],
        }
    }

    /// The clinic's stock template: Monday-Friday 08:00-17:00 active,
    /// Saturday and Sunday 08:00-12:00 inactive.
    pub fn standard_week() -> Self {
        let mut schedule = Self::unset();
        for weekday in [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
        ] {
            schedule.set_window(weekday, AvailabilityWindow::new(true, hm(8, 0), hm(17, 0)));
        }
        schedule
    }

    pub fn window(&self, weekday: Weekday) -> &AvailabilityWindow {
        &self.windows[weekday_index(weekday)]
    }

    /// Replaces the window for one weekday.
    pub fn set_window(&mut self, weekday: Weekday, window: AvailabilityWindow) {
        self.windows[weekday_index(weekday)] = window;
    }

    /// All seven windows in weekday order.
    pub fn windows(&self) -> impl Iterator<Item = (Weekday, &AvailabilityWindow)> {
        WEEKDAY_ORDER
            .iter()
            .map(move |weekday| (*weekday, self.window(*weekday)))
    }

    /// Only the active windows, in weekday order.
    pub fn active_windows(&self) -> impl Iterator<Item = (Weekday, &AvailabilityWindow)> {
        self.windows().filter(|(_, window)| window.active)
    }
}

impl Default for WeekSchedule {
    fn default() -> Self {
        Self::unset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_index_roundtrip() {
        for (i, weekday) in WEEKDAY_ORDER.iter().enumerate() {
            assert_eq!(weekday_index(*weekday), i);
            assert_eq!(weekday_from_index(i as u8), Some(*weekday));
        }
        assert_eq!(weekday_from_index(7), None);
    }

    #[test]
    fn test_unset_window_is_inactive() {
        let window = AvailabilityWindow::unset();
        assert!(!window.active);
        assert_eq!(window.start, hm(8, 0));
        assert_eq!(window.end, hm(12, 0));
    }

    #[test]
    fn test_span_minutes() {
        let window = AvailabilityWindow::new(true, hm(8, 0), hm(17, 0));
        assert_eq!(window.span_minutes(), 9 * 60);

        let inverted = AvailabilityWindow::new(false, hm(17, 0), hm(8, 0));
        assert_eq!(inverted.span_minutes(), 0);
    }

    #[test]
    fn test_standard_week_shape() {
        let schedule = WeekSchedule::standard_week();
        for weekday in [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
        ] {
            let window = schedule.window(weekday);
            assert!(window.active);
            assert_eq!(window.start, hm(8, 0));
            assert_eq!(window.end, hm(17, 0));
        }
        assert!(!schedule.window(Weekday::Sat).active);
        assert!(!schedule.window(Weekday::Sun).active);
    }

    #[test]
    fn test_set_window_replaces_only_that_weekday() {
        let mut schedule = WeekSchedule::unset();
        let window = AvailabilityWindow::new(true, hm(9, 30), hm(12, 0));
        schedule.set_window(Weekday::Wed, window);

        assert_eq!(*schedule.window(Weekday::Wed), window);
        assert!(!schedule.window(Weekday::Tue).active);
        assert!(!schedule.window(Weekday::Thu).active);
    }

    #[test]
    fn test_deactivate_preserves_hours() {
        let mut schedule = WeekSchedule::standard_week();
        let mut window = *schedule.window(Weekday::Mon);
        window.active = false;
        schedule.set_window(Weekday::Mon, window);

        let stored = schedule.window(Weekday::Mon);
        assert!(!stored.active);
        assert_eq!(stored.start, hm(8, 0));
        assert_eq!(stored.end, hm(17, 0));
    }

    #[test]
    fn test_active_windows_in_weekday_order() {
        let schedule = WeekSchedule::standard_week();
        let weekdays: Vec<Weekday> = schedule.active_windows().map(|(weekday, _)| weekday).collect();
        assert_eq!(
            weekdays,
            vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri
            ]
        );
    }

    #[test]
    fn test_week_schedule_serde_roundtrip() {
        let schedule = WeekSchedule::standard_week();
        let json = serde_json::to_string(&schedule).unwrap();
        let parsed: WeekSchedule = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, schedule);
    }
}
