//! Service layer for the scheduling engine's pure logic.
//!
//! This module contains the components the booking ledger composes: slot
//! derivation, the appointment lifecycle state machine, the validation gate,
//! and the notification seam. Everything here except notification delivery
//! is pure and safe to call concurrently without coordination.

pub mod notify;

pub mod slots;

pub mod transitions;

pub mod validation;

pub use notify::{LogNotifier, NotificationEvent, NotificationKind, Notifier, RecordingNotifier};
pub use slots::{generate_slots, is_valid_slot, slot_count, slots_in_window, SlotIter};
pub use transitions::{allowed_actors, check_transition, valid_transitions};
pub use validation::{validate_booking, validate_window};
