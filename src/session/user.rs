use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    #[default]
    Contractor,
    Vendor,
    Oem,
    Consultant,
    /// Forward-compat: a role string this client does not know yet.
    #[serde(other)]
    Unknown,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::Contractor => "contractor",
            Role::Vendor => "vendor",
            Role::Oem => "oem",
            Role::Consultant => "consultant",
            Role::Unknown => "unknown",
        }
    }

    pub fn is_admin(&self) -> bool { matches!(self, Role::SuperAdmin) }
}

/// Authenticated user record as returned by `/auth/me` and the login and
/// registration endpoints. Extra fields the backend adds are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub full_name: String,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub kyc_verified: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool { true }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_decodes_with_minimal_fields() {
        let u: User = serde_json::from_str(
            r#"{"id":"u1","email":"jane@x.com","full_name":"Jane Doe","role":"contractor"}"#,
        )
        .unwrap();
        assert_eq!(u.role, Role::Contractor);
        assert!(u.is_active);
        assert!(!u.kyc_verified);
        assert!(u.company_name.is_none());
    }

    #[test]
    fn unknown_role_does_not_fail_decode() {
        let u: User = serde_json::from_str(
            r#"{"id":"u2","email":"a@b.c","full_name":"A","role":"auditor","extra":42}"#,
        )
        .unwrap();
        assert_eq!(u.role, Role::Unknown);
    }

    #[test]
    fn role_snake_case_round_trip() {
        assert_eq!(serde_json::to_string(&Role::SuperAdmin).unwrap(), "\"super_admin\"");
        assert_eq!(serde_json::from_str::<Role>("\"oem\"").unwrap(), Role::Oem);
    }
}
