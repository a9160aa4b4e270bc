use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ActorId, ActorRole, ProviderId, Slot};

crate::define_id_type!(i64, AppointmentId);
crate::define_id_type!(i64, PatientId);

/// Lifecycle status of an appointment.
///
/// Completed and Cancelled are terminal: once reached, the appointment is
/// immutable and retained for history.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AppointmentStatus::Completed | AppointmentStatus::Cancelled
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::InProgress => "in_progress",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }

    /// Every status, in lifecycle order. Handy for exhaustive checks.
    pub fn all() -> [AppointmentStatus; 5] {
        [
            AppointmentStatus::Pending,
            AppointmentStatus::Confirmed,
            AppointmentStatus::InProgress,
            AppointmentStatus::Completed,
            AppointmentStatus::Cancelled,
        ]
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of visit being booked. Each kind carries a default duration used
/// when a booking request does not specify one.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentType {
    Routine,
    FirstVisit,
    FollowUp,
    Urgent,
    Exam,
}

impl AppointmentType {
    pub fn default_duration_minutes(&self) -> u32 {
        match self {
            AppointmentType::Routine => 30,
            AppointmentType::FirstVisit => 60,
            AppointmentType::FollowUp => 30,
            AppointmentType::Urgent => 30,
            AppointmentType::Exam => 45,
        }
    }

    /// Explicit duration if given, otherwise this kind's default.
    pub fn resolve_duration(&self, requested: Option<u32>) -> u32 {
        requested.unwrap_or_else(|| self.default_duration_minutes())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentType::Routine => "routine",
            AppointmentType::FirstVisit => "first_visit",
            AppointmentType::FollowUp => "follow_up",
            AppointmentType::Urgent => "urgent",
            AppointmentType::Exam => "exam",
        }
    }
}

impl fmt::Display for AppointmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A booking request before the ledger has accepted it. The ledger assigns
/// the id, the Pending status and the creation timestamp on success.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAppointment {
    pub provider_id: ProviderId,
    pub patient_id: PatientId,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub duration_minutes: u32,
    pub appointment_type: AppointmentType,
    pub notes: Option<String>,
}

/// A booked appointment. Status is mutated only by the booking ledger
/// through the transition table; no other component writes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,
    pub patient_id: PatientId,
    pub provider_id: ProviderId,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub duration_minutes: u32,
    pub appointment_type: AppointmentType,
    pub notes: Option<String>,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    /// Which side of the appointment an acting party is, if either.
    /// Used to derive the role for party-based operations like cancel.
    pub fn role_of_party(&self, party: ActorId) -> Option<ActorRole> {
        if party.value() == self.patient_id.value() {
            Some(ActorRole::Patient)
        } else if party.value() == self.provider_id.value() {
            Some(ActorRole::Provider)
        } else {
            None
        }
    }

    /// The slot this appointment occupies.
    pub fn slot(&self) -> Slot {
        Slot {
            provider_id: self.provider_id,
            date: self.date,
            start: self.start,
            duration_minutes: self.duration_minutes,
        }
    }
}

/// Per-date appointment totals broken down by status, as shown on the
/// admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayStatusCounts {
    pub total: u32,
    pub pending: u32,
    pub confirmed: u32,
    pub in_progress: u32,
    pub completed: u32,
    pub cancelled: u32,
}

impl DayStatusCounts {
    pub fn record(&mut self, status: AppointmentStatus) {
        self.total += 1;
        match status {
            AppointmentStatus::Pending => self.pending += 1,
            AppointmentStatus::Confirmed => self.confirmed += 1,
            AppointmentStatus::InProgress => self.in_progress += 1,
            AppointmentStatus::Completed => self.completed += 1,
            AppointmentStatus::Cancelled => self.cancelled += 1,
        }
    }
}
