//! Repository trait definitions for ledger storage.
//!
//! This module provides a collection of focused repository traits that
//! abstract the storage behind the scheduling engine. By splitting
//! responsibilities across multiple traits, implementations can be more
//! focused and testable.
//!
//! # Module Organization
//!
//! - [`error`]: Error types for repository operations
//! - [`availability`]: Recurring weekly windows per provider
//! - [`booking`]: Atomic reservations and lifecycle transitions
//! - [`reporting`]: Read-only dashboard queries
//!
//! # Trait Composition
//!
//! A complete backend implements all three traits:
//!
//! ```ignore
//! impl AvailabilityRepository for MyBackend { ... }
//! impl BookingRepository for MyBackend { ... }
//! impl ReportingRepository for MyBackend { ... }
//! ```
//!
//! # Convenience Trait Bound
//!
//! For functions that need the whole ledger, use the [`LedgerRepository`]
//! trait bound:
//!
//! ```ignore
//! async fn my_service<R: LedgerRepository>(repo: &R) -> SchedulingResult<()> {
//!     let appointment = repo.reserve(request).await?;
//!     let sheet = repo.provider_day_view(appointment.provider_id, appointment.date).await?;
//!     Ok(())
//! }
//! ```

pub mod availability;
pub mod booking;
pub mod error;
pub mod reporting;

// Re-export error types
pub use error::{RepositoryError, RepositoryResult};

// Re-export all traits
pub use availability::AvailabilityRepository;
pub use booking::BookingRepository;
pub use reporting::ReportingRepository;

/// Composite trait bound for a complete ledger backend.
///
/// Automatically implemented for any type that implements all three
/// repository traits. Use this as the bound (or trait object) whenever a
/// caller needs the full storage surface.
pub trait LedgerRepository:
    AvailabilityRepository + BookingRepository + ReportingRepository
{
}

// Blanket implementation: any type implementing all three traits is a full ledger
impl<T> LedgerRepository for T where
    T: AvailabilityRepository + BookingRepository + ReportingRepository
{
}
