//! # MedSched Backend
//!
//! Medical-appointment scheduling engine.
//!
//! This crate implements the scheduling core of a clinic booking system:
//! providers publish recurring weekly availability, patients reserve discrete
//! time slots against it, and every appointment moves through a guarded
//! status lifecycle. The engine is safe under concurrent callers and exposes
//! a REST API via Axum for frontend integration.
//!
//! ## Features
//!
//! - **Availability**: Recurring weekly windows per provider, one per weekday
//! - **Slot Derivation**: Lazy, finite sequences of bookable start times
//! - **Booking Ledger**: Atomic, per-provider-day conflict checking
//! - **Lifecycle**: Role-aware appointment status state machine
//! - **Reporting**: Provider day views, patient histories, daily counts
//! - **HTTP API**: RESTful endpoints for frontend integration
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`models`]: Domain data types (windows, slots, appointments, actors)
//! - [`services`]: Pure engine logic (slot generation, transitions, validation)
//! - [`db`]: Repository pattern, in-memory ledger backend, and configuration
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! All mutation funnels through the booking ledger, which is the only
//! serialization point; everything above it is pure and freely concurrent.

pub mod error;

pub mod db;
pub mod models;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;

pub use error::{SchedulingError, SchedulingResult};
