//! Repository factory for dependency injection.
//!
//! This module provides utilities for creating and configuring repository
//! instances based on runtime configuration.

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use super::repo_config::RepositoryConfig;
#[cfg(feature = "local-repo")]
use super::repositories::LocalLedger;
use super::repository::{LedgerRepository, RepositoryError, RepositoryResult};

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// In-memory local ledger
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    /// Parse repository type from string.
    ///
    /// # Arguments
    /// * `s` - String representation ("local", "memory")
    ///
    /// # Returns
    /// * `Ok(RepositoryType)` if valid
    /// * `Err` if invalid
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" | "memory" => Ok(Self::Local),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl RepositoryType {
    /// Get repository type from environment variable.
    ///
    /// Reads the `REPOSITORY_TYPE` environment variable. Defaults to Local
    /// when unset or unparseable.
    pub fn from_env() -> Self {
        if let Ok(val) = std::env::var("REPOSITORY_TYPE") {
            return val.parse().unwrap_or(Self::Local);
        }

        Self::Local
    }
}

/// Repository factory for creating repository instances.
///
/// This factory provides a centralized way to create repository instances
/// with proper initialization and configuration.
///
/// # Example
/// ```
/// use medsched::db::RepositoryFactory;
///
/// let repo = RepositoryFactory::create_local();
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance based on type.
    ///
    /// # Arguments
    /// * `repo_type` - Type of repository to create
    ///
    /// # Returns
    /// * `Ok(Arc<dyn LedgerRepository>)` - Boxed repository instance
    /// * `Err(RepositoryError)` - If creation fails
    pub fn create(repo_type: RepositoryType) -> RepositoryResult<Arc<dyn LedgerRepository>> {
        match repo_type {
            RepositoryType::Local => {
                #[cfg(feature = "local-repo")]
                {
                    Ok(Self::create_local())
                }
                #[cfg(not(feature = "local-repo"))]
                {
                    Err(RepositoryError::ConfigurationError(
                        "Local repository feature not enabled".to_string(),
                    ))
                }
            }
        }
    }

    /// Create an in-memory local ledger.
    ///
    /// # Returns
    /// Boxed local ledger instance
    #[cfg(feature = "local-repo")]
    pub fn create_local() -> Arc<dyn LedgerRepository> {
        Arc::new(LocalLedger::new())
    }

    /// Create repository from environment configuration.
    ///
    /// Reads the `REPOSITORY_TYPE` environment variable to determine which
    /// repository to create. Defaults to Local.
    ///
    /// # Returns
    /// * `Ok(Arc<dyn LedgerRepository>)` - Repository instance
    /// * `Err(RepositoryError)` - If creation fails
    pub fn from_env() -> RepositoryResult<Arc<dyn LedgerRepository>> {
        Self::create(RepositoryType::from_env())
    }

    /// Create repository from a TOML configuration file.
    ///
    /// # Arguments
    /// * `config_path` - Path to the medsched.toml configuration file
    ///
    /// # Returns
    /// * `Ok(Arc<dyn LedgerRepository>)` - Repository instance
    /// * `Err(RepositoryError)` - If creation fails
    pub fn from_config_file<P: AsRef<Path>>(
        config_path: P,
    ) -> RepositoryResult<Arc<dyn LedgerRepository>> {
        let config = RepositoryConfig::from_file(config_path)?;
        Self::from_repository_config(&config)
    }

    /// Create repository from the default configuration file location.
    ///
    /// Searches for `medsched.toml` in standard locations and creates the
    /// appropriate repository instance.
    ///
    /// # Returns
    /// * `Ok(Arc<dyn LedgerRepository>)` - Repository instance
    /// * `Err(RepositoryError)` - If creation fails
    pub fn from_default_config() -> RepositoryResult<Arc<dyn LedgerRepository>> {
        let config = RepositoryConfig::from_default_location()?;
        Self::from_repository_config(&config)
    }

    /// Create repository from a RepositoryConfig instance.
    fn from_repository_config(
        config: &RepositoryConfig,
    ) -> RepositoryResult<Arc<dyn LedgerRepository>> {
        let repo_type = config.repository_type().map_err(|e| {
            RepositoryError::ConfigurationError(format!("Invalid repository type: {}", e))
        })?;

        Self::create(repo_type)
    }
}

/// Builder for configuring repository creation.
///
/// This provides a fluent API for configuring and creating repository
/// instances.
///
/// # Example
/// ```
/// use medsched::db::{RepositoryBuilder, RepositoryType};
///
/// # fn main() -> Result<(), medsched::db::RepositoryError> {
/// let repo = RepositoryBuilder::new()
///     .repository_type(RepositoryType::Local)
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct RepositoryBuilder {
    repo_type: RepositoryType,
}

impl RepositoryBuilder {
    /// Create a new repository builder with default settings.
    pub fn new() -> Self {
        Self {
            repo_type: RepositoryType::from_env(),
        }
    }

    /// Set the repository type.
    pub fn repository_type(mut self, repo_type: RepositoryType) -> Self {
        self.repo_type = repo_type;
        self
    }

    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `config_path` - Path to the medsched.toml configuration file
    ///
    /// # Returns
    /// * `Ok(Self)` - Builder with loaded configuration
    /// * `Err(RepositoryError)` - If file cannot be read or parsed
    pub fn from_config_file<P: AsRef<Path>>(
        mut self,
        config_path: P,
    ) -> Result<Self, RepositoryError> {
        let repo_config = RepositoryConfig::from_file(config_path)?;

        self.repo_type = repo_config.repository_type().map_err(|e| {
            RepositoryError::ConfigurationError(format!("Invalid repository type: {}", e))
        })?;

        Ok(self)
    }

    /// Build the repository instance.
    ///
    /// # Returns
    /// * `Ok(Arc<dyn LedgerRepository>)` - Configured repository
    /// * `Err(RepositoryError)` - If build fails
    pub fn build(self) -> RepositoryResult<Arc<dyn LedgerRepository>> {
        RepositoryFactory::create(self.repo_type)
    }
}

impl Default for RepositoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_type_from_str() {
        assert_eq!(
            RepositoryType::from_str("local").unwrap(),
            RepositoryType::Local
        );
        assert_eq!(
            RepositoryType::from_str("Memory").unwrap(),
            RepositoryType::Local
        );
        assert!(RepositoryType::from_str("invalid").is_err());
    }

    #[tokio::test]
    async fn test_create_local_repository() {
        let repo = RepositoryFactory::create_local();
        assert!(repo.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_builder_local_repository() {
        let repo = RepositoryBuilder::new()
            .repository_type(RepositoryType::Local)
            .build()
            .unwrap();

        assert!(repo.health_check().await.unwrap());
    }
}
