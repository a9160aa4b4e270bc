//! Notification collaborator seam.
//!
//! The engine emits one event after every successful create, cancel or
//! status change. Delivery is best-effort: the caller logs failures and
//! never rolls the scheduling mutation back. Real delivery channels (mail,
//! SMS) implement [`Notifier`] outside this crate; the in-tree impls cover
//! logging and test capture.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::info;
use parking_lot::RwLock;
use serde::Serialize;
use uuid::Uuid;

use crate::models::Appointment;

/// What happened to the appointment.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Created,
    Cancelled,
    StatusChanged,
}

/// One notification, carrying a snapshot of the appointment as it looked
/// right after the mutation.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationEvent {
    pub event_id: Uuid,
    pub kind: NotificationKind,
    pub appointment: Appointment,
    pub emitted_at: DateTime<Utc>,
}

impl NotificationEvent {
    pub fn new(kind: NotificationKind, appointment: Appointment) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            kind,
            appointment,
            emitted_at: Utc::now(),
        }
    }
}

/// Delivery channel for notification events.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Delivers one event. An error here is reported for logging only;
    /// scheduling mutations are already committed when this runs.
    async fn notify(&self, event: &NotificationEvent) -> anyhow::Result<()>;
}

/// Writes every event to the log. The default wiring when no real delivery
/// channel is configured.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, event: &NotificationEvent) -> anyhow::Result<()> {
        info!(
            "notification {}: appointment {} {:?} (patient {}, provider {}, {} {})",
            event.event_id,
            event.appointment.id,
            event.kind,
            event.appointment.patient_id,
            event.appointment.provider_id,
            event.appointment.date,
            event.appointment.start.format("%H:%M")
        );
        Ok(())
    }
}

/// Records every event in memory. Used by tests and local development to
/// assert what the engine emitted.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    events: Arc<RwLock<Vec<NotificationEvent>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn events(&self) -> Vec<NotificationEvent> {
        self.events.read().clone()
    }

    pub fn count(&self) -> usize {
        self.events.read().len()
    }

    pub fn clear(&self) {
        self.events.write().clear();
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, event: &NotificationEvent) -> anyhow::Result<()> {
        self.events.write().push(event.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AppointmentId, AppointmentStatus, AppointmentType, PatientId, ProviderId,
    };
    use chrono::{NaiveDate, NaiveTime};

    fn sample_appointment() -> Appointment {
        Appointment {
            id: AppointmentId::new(1),
            patient_id: PatientId::new(10),
            provider_id: ProviderId::new(20),
            date: NaiveDate::from_ymd_opt(2030, 6, 3).unwrap(),
            start: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            duration_minutes: 30,
            appointment_type: AppointmentType::Routine,
            notes: None,
            status: AppointmentStatus::Pending,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_event_ids_are_unique() {
        let a = NotificationEvent::new(NotificationKind::Created, sample_appointment());
        let b = NotificationEvent::new(NotificationKind::Created, sample_appointment());
        assert_ne!(a.event_id, b.event_id);
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&NotificationKind::StatusChanged).unwrap();
        assert_eq!(json, "\"status_changed\"");
    }

    #[tokio::test]
    async fn test_recording_notifier_captures_events() {
        let notifier = RecordingNotifier::new();
        let event = NotificationEvent::new(NotificationKind::Cancelled, sample_appointment());
        notifier.notify(&event).await.unwrap();

        assert_eq!(notifier.count(), 1);
        assert_eq!(notifier.events()[0].event_id, event.event_id);
        assert_eq!(notifier.events()[0].kind, NotificationKind::Cancelled);

        notifier.clear();
        assert_eq!(notifier.count(), 0);
    }

    #[tokio::test]
    async fn test_log_notifier_accepts_events() {
        let event = NotificationEvent::new(NotificationKind::Created, sample_appointment());
        assert!(LogNotifier.notify(&event).await.is_ok());
    }
}
