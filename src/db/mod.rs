//! Storage module for the booking ledger.
//!
//! This module provides abstractions for ledger operations via the
//! Repository pattern, allowing different storage backends to be swapped
//! easily.
//!
//! # Architecture
//!
//! The module follows a layered architecture:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (REST API, server binary)            │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs) - Orchestration            │
//! │  - Booking, cancellation, status changes                 │
//! │  - Notification dispatch                                 │
//! └───────────────────┬─────────────────────────────────────┘
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository/) - Abstract Interface   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌──────────────────────────────────────────────┐
//!     │               Local Ledger                    │
//!     │     (in-memory, sharded per provider-day)     │
//!     └──────────────────────────────────────────────┘
//! ```
//!
//! # Repository Pattern
//! The module includes:
//! - `services`: High-level scheduling functions (use these in your application!)
//! - `repository`: Trait definitions for ledger operations
//! - `repositories::local`: In-memory implementation for unit testing and local deployments
//! - `factory`: Factory for creating repository instances
//!
//! # Recommended Usage
//!
//! **For new code, use the service layer:**
//! ```no_run
//! use medsched::db::{services, RepositoryFactory};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = RepositoryFactory::from_env()?;
//!
//!     let healthy = services::health_check(repo.as_ref()).await?;
//!     println!("ledger healthy: {}", healthy);
//!     Ok(())
//! }
//! ```

#[cfg(not(feature = "local-repo"))]
compile_error!("Enable at least one repository backend feature.");

pub mod factory;
pub mod repo_config;
pub mod repositories;
pub mod repository;
pub mod services;

// ==================== Service Layer (Recommended for new code) ====================
// Use these high-level functions that work with any repository implementation

pub use services::{
    cancel_appointment, create_appointment, daily_status_counts, get_appointment, health_check,
    list_available_slots, patient_appointments, provider_day_view, set_appointment_status,
    set_availability_window, week_schedule,
};

// ==================== Repository Pattern Exports ====================

pub use repo_config::RepositoryConfig;

// Repository traits and implementations
pub use factory::{RepositoryBuilder, RepositoryFactory, RepositoryType};
#[cfg(feature = "local-repo")]
pub use repositories::LocalLedger;
pub use repository::{
    AvailabilityRepository, BookingRepository, LedgerRepository, ReportingRepository,
    RepositoryError, RepositoryResult,
};

use anyhow::{Context, Result};
use std::sync::{Arc, OnceLock};

/// Global repository instance initialized once per process.
static REPOSITORY: OnceLock<Arc<dyn LedgerRepository>> = OnceLock::new();

/// Initialize the global repository singleton for the selected backend.
pub fn init_repository() -> Result<()> {
    if REPOSITORY.get().is_some() {
        return Ok(());
    }

    let repo = RepositoryFactory::from_env().map_err(|e| anyhow::Error::msg(e.to_string()))?;
    let _ = REPOSITORY.set(repo);
    Ok(())
}

/// Get a reference to the global repository instance.
pub fn get_repository() -> Result<&'static Arc<dyn LedgerRepository>> {
    if REPOSITORY.get().is_none() {
        let _ = init_repository();
    }

    REPOSITORY
        .get()
        .context("Ledger not initialized. Call init_repository() first.")
}
