//! The persisted user record.

use serde::{Deserialize, Serialize};

/// The logged-in principal, as issued by the external auth service.
///
/// A record without an `id` does not deserialize and is treated as
/// "not authenticated" by the vault, whatever the token says.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    /// The user ID.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Contact email.
    #[serde(default)]
    pub email: Option<String>,
    /// Assigned role with its permission strings.
    #[serde(default)]
    pub role: Option<RoleRecord>,
}

/// A role assignment carried on the user record.
///
/// Permissions are opaque strings consumed by the shell's screens; this
/// layer stores and returns them untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleRecord {
    /// Role name.
    pub name: String,
    /// Permission identifiers granted by the role.
    #[serde(default)]
    pub permissions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_full_record() {
        let json = serde_json::json!({
            "id": "u-17",
            "name": "Asha Verma",
            "email": "asha@example.com",
            "role": {"name": "advisor", "permissions": ["projects.read", "vendors.read"]},
        });
        let user: UserRecord = serde_json::from_value(json).unwrap();
        assert_eq!(user.id, "u-17");
        assert_eq!(user.role.unwrap().permissions.len(), 2);
    }

    #[test]
    fn id_is_required() {
        let json = serde_json::json!({"name": "No Id"});
        assert!(serde_json::from_value::<UserRecord>(json).is_err());
    }

    #[test]
    fn optional_fields_default() {
        let json = serde_json::json!({"id": "u-1"});
        let user: UserRecord = serde_json::from_value(json).unwrap();
        assert_eq!(user.name, None);
        assert!(user.role.is_none());
    }
}
