//! Tests for repository selection: string parsing, environment variables,
//! TOML configuration files and the builder.

mod support;

use std::io::Write;
use std::str::FromStr;

use medsched::db::factory::{RepositoryBuilder, RepositoryFactory, RepositoryType};
use medsched::db::repo_config::RepositoryConfig;
use medsched::db::repository::{BookingRepository, RepositoryError};
use tempfile::NamedTempFile;

// ==================== Repository Type Parsing ====================

#[test]
fn test_repository_type_from_str_local() {
    assert_eq!(RepositoryType::from_str("local").unwrap(), RepositoryType::Local);
    assert_eq!(RepositoryType::from_str("LOCAL").unwrap(), RepositoryType::Local);
    assert_eq!(RepositoryType::from_str("memory").unwrap(), RepositoryType::Local);
    assert_eq!(RepositoryType::from_str("Memory").unwrap(), RepositoryType::Local);
}

#[test]
fn test_repository_type_from_str_invalid() {
    let result = RepositoryType::from_str("postgres");
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("Unknown repository type"));
}

#[test]
fn test_repository_type_from_env_default() {
    support::with_scoped_env(&[("REPOSITORY_TYPE", None)], || {
        assert_eq!(RepositoryType::from_env(), RepositoryType::Local);
    });
}

#[test]
fn test_repository_type_from_env_explicit() {
    support::with_scoped_env(&[("REPOSITORY_TYPE", Some("memory"))], || {
        assert_eq!(RepositoryType::from_env(), RepositoryType::Local);
    });
}

#[test]
fn test_repository_type_from_env_invalid_defaults_to_local() {
    support::with_scoped_env(&[("REPOSITORY_TYPE", Some("sqlite"))], || {
        assert_eq!(RepositoryType::from_env(), RepositoryType::Local);
    });
}

// ==================== Factory ====================

#[tokio::test]
async fn test_create_local_repository_is_usable() {
    let repo = RepositoryFactory::create_local();
    assert!(repo.health_check().await.unwrap());
}

#[tokio::test]
async fn test_create_via_type() {
    let repo = RepositoryFactory::create(RepositoryType::Local).unwrap();
    assert!(repo.health_check().await.unwrap());
}

#[test]
fn test_factory_from_env() {
    support::with_scoped_env(&[("REPOSITORY_TYPE", Some("local"))], || {
        assert!(RepositoryFactory::from_env().is_ok());
    });
}

// ==================== Configuration Files ====================

#[test]
fn test_config_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(
        temp_file,
        "[repository]\ntype = \"local\"\n\n[scheduling]\ndefault_slot_minutes = 45\n"
    )
    .unwrap();

    let config = RepositoryConfig::from_file(temp_file.path()).unwrap();
    assert_eq!(config.repository.repo_type, "local");
    assert_eq!(config.scheduling.default_slot_minutes, 45);
    assert_eq!(config.repository_type().unwrap(), RepositoryType::Local);
}

#[test]
fn test_config_scheduling_section_is_optional() {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "[repository]\ntype = \"local\"\n").unwrap();

    let config = RepositoryConfig::from_file(temp_file.path()).unwrap();
    assert_eq!(config.scheduling.default_slot_minutes, 30);
}

#[test]
fn test_config_missing_file() {
    let result = RepositoryConfig::from_file("/nonexistent/medsched.toml");
    assert!(matches!(
        result,
        Err(RepositoryError::ConfigurationError(_))
    ));
}

#[test]
fn test_config_malformed_toml() {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "[repository\ntype = local").unwrap();

    let result = RepositoryConfig::from_file(temp_file.path());
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("Failed to parse config file"));
}

#[tokio::test]
async fn test_factory_from_config_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "[repository]\ntype = \"local\"\n").unwrap();

    let repo = RepositoryFactory::from_config_file(temp_file.path()).unwrap();
    assert!(repo.health_check().await.unwrap());
}

#[test]
fn test_factory_from_config_file_with_unknown_type() {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "[repository]\ntype = \"oracle\"\n").unwrap();

    let result = RepositoryFactory::from_config_file(temp_file.path());
    assert!(matches!(
        result,
        Err(RepositoryError::ConfigurationError(_))
    ));
}

// ==================== Builder ====================

#[tokio::test]
async fn test_builder_defaults_to_local() {
    let repo = RepositoryBuilder::new().build().unwrap();
    assert!(repo.health_check().await.unwrap());
}

#[tokio::test]
async fn test_builder_explicit_type() {
    let repo = RepositoryBuilder::new()
        .repository_type(RepositoryType::Local)
        .build()
        .unwrap();
    assert!(repo.health_check().await.unwrap());
}

#[test]
fn test_builder_from_config_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "[repository]\ntype = \"memory\"\n").unwrap();

    let builder = RepositoryBuilder::new()
        .from_config_file(temp_file.path())
        .unwrap();
    assert!(builder.build().is_ok());
}
