//! Availability repository trait for recurring weekly windows.
//!
//! This trait covers the calendar side of the engine: one window per
//! (provider, weekday), with an explicit inactive sentinel for providers
//! or weekdays that were never configured.

use async_trait::async_trait;
use chrono::Weekday;

use crate::error::SchedulingResult;
use crate::models::{AvailabilityWindow, ProviderId, WeekSchedule};

/// Repository trait for provider availability windows.
///
/// Window reads are frequent and pure; writes replace a single weekday's
/// window. Updating a window never touches existing appointments, so a
/// deactivated weekday simply stops producing slots from then on.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait AvailabilityRepository: Send + Sync {
    /// Replace the window for one provider/weekday.
    ///
    /// # Arguments
    /// * `provider_id` - The provider whose week is being edited
    /// * `weekday` - Which weekday the window applies to
    /// * `window` - The new window (active flag, start, end)
    ///
    /// # Returns
    /// * `Ok(())` - Window stored
    /// * `Err(SchedulingError::InvalidWindow)` - Active window with start >= end
    async fn set_window(
        &self,
        provider_id: ProviderId,
        weekday: Weekday,
        window: AvailabilityWindow,
    ) -> SchedulingResult<()>;

    /// The window for one provider/weekday, or the inactive sentinel when
    /// the provider or weekday was never configured.
    async fn get_window(
        &self,
        provider_id: ProviderId,
        weekday: Weekday,
    ) -> SchedulingResult<AvailabilityWindow>;

    /// The provider's full week, unset weekdays included.
    async fn week_schedule(&self, provider_id: ProviderId) -> SchedulingResult<WeekSchedule>;

    /// Only the active windows of the provider's week, in weekday order
    /// (Monday first).
    async fn list_active_windows(
        &self,
        provider_id: ProviderId,
    ) -> SchedulingResult<Vec<(Weekday, AvailabilityWindow)>>;
}
