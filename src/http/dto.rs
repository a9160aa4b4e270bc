//! Data Transfer Objects for the HTTP API.
//!
//! These DTOs are used for request/response serialization in the REST API.
//! Times travel as `"HH:MM"` strings on the wire; dates use ISO `YYYY-MM-DD`
//! via chrono's serde support.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::models::{
    Appointment, AppointmentStatus, AppointmentType, AvailabilityWindow, DayStatusCounts,
    NewAppointment, PatientId, ProviderId,
};

/// Parse a wire time. Accepts `"HH:MM"` and `"HH:MM:SS"`.
pub fn parse_time(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| format!("Invalid time '{}', expected HH:MM", s))
}

/// Format a time for the wire.
pub fn format_time(t: NaiveTime) -> String {
    t.format("%H:%M").to_string()
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Ledger backend status
    pub ledger: String,
}

/// Request body for booking an appointment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    /// Provider being booked
    pub provider_id: i64,
    /// Patient booking the visit
    pub patient_id: i64,
    /// Calendar date (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Slot start time (HH:MM)
    pub start: String,
    /// Duration in minutes; defaults from the appointment type when absent
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    /// Kind of visit
    pub appointment_type: AppointmentType,
    /// Free-form notes shown to the provider
    #[serde(default)]
    pub notes: Option<String>,
}

impl CreateAppointmentRequest {
    /// Convert into the service-layer booking request.
    pub fn to_new_appointment(&self) -> Result<NewAppointment, String> {
        let start = parse_time(&self.start)?;
        Ok(NewAppointment {
            provider_id: ProviderId::new(self.provider_id),
            patient_id: PatientId::new(self.patient_id),
            date: self.date,
            start,
            duration_minutes: self.appointment_type.resolve_duration(self.duration_minutes),
            appointment_type: self.appointment_type,
            notes: self.notes.clone(),
        })
    }
}

/// Request body for cancelling an appointment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelAppointmentRequest {
    /// Party requesting the cancellation (patient or provider id)
    pub acting_party_id: i64,
}

/// Request body for a lifecycle move.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetStatusRequest {
    /// Requested status
    pub status: AppointmentStatus,
    /// Role performing the move
    pub acting_role: crate::models::ActorRole,
}

/// Appointment as exposed over the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentDto {
    pub id: i64,
    pub patient_id: i64,
    pub provider_id: i64,
    pub date: NaiveDate,
    pub start: String,
    pub end: String,
    pub duration_minutes: u32,
    pub appointment_type: AppointmentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Appointment> for AppointmentDto {
    fn from(a: Appointment) -> Self {
        let end = a.slot().end();
        Self {
            id: a.id.value(),
            patient_id: a.patient_id.value(),
            provider_id: a.provider_id.value(),
            date: a.date,
            start: format_time(a.start),
            end: format_time(end),
            duration_minutes: a.duration_minutes,
            appointment_type: a.appointment_type,
            notes: a.notes,
            status: a.status,
            created_at: a.created_at,
        }
    }
}

/// Query parameters for the slot listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotsQuery {
    /// Calendar date (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Slot length; falls back to the configured default when absent
    #[serde(default)]
    pub duration_minutes: Option<u32>,
}

/// Open slots for one provider-date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotListResponse {
    pub provider_id: i64,
    pub date: NaiveDate,
    pub duration_minutes: u32,
    /// Free start times (HH:MM), ascending
    pub slots: Vec<String>,
    pub total: usize,
}

/// Query parameters for day-scoped listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayQuery {
    /// Calendar date (YYYY-MM-DD)
    pub date: NaiveDate,
}

/// A provider's appointment sheet for one date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayViewResponse {
    pub provider_id: i64,
    pub date: NaiveDate,
    pub appointments: Vec<AppointmentDto>,
    pub total: usize,
}

/// Everything a patient has booked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientAppointmentsResponse {
    pub patient_id: i64,
    pub appointments: Vec<AppointmentDto>,
    pub total: usize,
}

/// Daily totals broken down by status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayStatsResponse {
    pub date: NaiveDate,
    pub total: u32,
    pub pending: u32,
    pub confirmed: u32,
    pub in_progress: u32,
    pub completed: u32,
    pub cancelled: u32,
}

impl DayStatsResponse {
    pub fn new(date: NaiveDate, counts: DayStatusCounts) -> Self {
        Self {
            date,
            total: counts.total,
            pending: counts.pending,
            confirmed: counts.confirmed,
            in_progress: counts.in_progress,
            completed: counts.completed,
            cancelled: counts.cancelled,
        }
    }
}

/// Request body for setting one weekday's window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetWindowRequest {
    pub active: bool,
    /// Window start (HH:MM)
    pub start: String,
    /// Window end (HH:MM)
    pub end: String,
}

impl SetWindowRequest {
    /// Convert into the model window.
    pub fn to_window(&self) -> Result<AvailabilityWindow, String> {
        Ok(AvailabilityWindow::new(
            self.active,
            parse_time(&self.start)?,
            parse_time(&self.end)?,
        ))
    }
}

/// One weekday's window as exposed over the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowDto {
    /// 0 = Monday .. 6 = Sunday
    pub weekday: u8,
    pub weekday_name: String,
    pub active: bool,
    pub start: String,
    pub end: String,
}

impl WindowDto {
    pub fn new(weekday: Weekday, window: &AvailabilityWindow) -> Self {
        Self {
            weekday: weekday.num_days_from_monday() as u8,
            weekday_name: weekday_name(weekday).to_string(),
            active: window.active,
            start: format_time(window.start),
            end: format_time(window.end),
        }
    }
}

/// A provider's full recurring week.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekScheduleResponse {
    pub provider_id: i64,
    /// Seven windows in weekday order
    pub windows: Vec<WindowDto>,
}
