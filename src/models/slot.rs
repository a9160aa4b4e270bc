use std::fmt;

use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::ProviderId;

/// A concrete bookable time on a provider's calendar.
///
/// Slots are derived on demand from availability windows and never stored;
/// the ledger keys reservations by (provider, date, start) instead. A slot
/// produced from a valid window never crosses midnight.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub provider_id: ProviderId,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub duration_minutes: u32,
}

impl Slot {
    pub fn end(&self) -> NaiveTime {
        self.start + Duration::minutes(self.duration_minutes as i64)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({} min, provider {})",
            self.date,
            self.start.format("%H:%M"),
            self.duration_minutes,
            self.provider_id
        )
    }
}
