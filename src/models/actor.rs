use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

crate::define_id_type!(i64, ActorId);

/// Role under which an actor invokes the scheduling API.
///
/// Identity is established by an external collaborator; the engine trusts
/// the `(ActorId, ActorRole)` pair handed to it and only enforces what each
/// role may do. Admins participate in reporting, not in lifecycle changes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    Patient,
    Provider,
    Admin,
}

impl ActorRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActorRole::Patient => "patient",
            ActorRole::Provider => "provider",
            ActorRole::Admin => "admin",
        }
    }
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ActorRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "patient" => Ok(ActorRole::Patient),
            "provider" | "doctor" => Ok(ActorRole::Provider),
            "admin" => Ok(ActorRole::Admin),
            other => Err(format!(
                "Unknown actor role: {}. Valid options: patient, provider, admin",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_as_str() {
        assert_eq!(ActorRole::Patient.as_str(), "patient");
        assert_eq!(ActorRole::Provider.as_str(), "provider");
        assert_eq!(ActorRole::Admin.as_str(), "admin");
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("patient".parse::<ActorRole>(), Ok(ActorRole::Patient));
        assert_eq!("Provider".parse::<ActorRole>(), Ok(ActorRole::Provider));
        // The legacy frontend called providers doctors
        assert_eq!("doctor".parse::<ActorRole>(), Ok(ActorRole::Provider));
        assert!("receptionist".parse::<ActorRole>().is_err());
    }

    #[test]
    fn test_role_serde_snake_case() {
        let json = serde_json::to_string(&ActorRole::Provider).unwrap();
        assert_eq!(json, "\"provider\"");
        let role: ActorRole = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, ActorRole::Admin);
    }

    #[test]
    fn test_actor_id_roundtrip() {
        let id = ActorId::new(42);
        assert_eq!(id.value(), 42);
        assert_eq!(i64::from(id), 42);
        assert_eq!(ActorId::from(42), id);
        assert_eq!(id.to_string(), "42");
    }
}
