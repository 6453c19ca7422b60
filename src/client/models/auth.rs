//! Authentication and setup models

use serde::{Deserialize, Serialize};

/// Login payload
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Whether the service still needs first-run setup
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupStatus {
    #[serde(default)]
    pub setup_required: bool,
}

/// First-run setup: the initial super admin and their store
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupRequest {
    pub username: String,
    pub password: String,
    pub store_title: String,
    pub store_address: String,
    /// Always `ACTIVE` for the first store
    pub status: String,
}

impl SetupRequest {
    pub fn new(username: String, password: String, store_title: String, store_address: String) -> Self {
        Self {
            username,
            password,
            store_title,
            store_address,
            status: "ACTIVE".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_request_payload() {
        let req = SetupRequest::new(
            "admin".into(),
            "secret".into(),
            "Central".into(),
            "Main St 1".into(),
        );
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["storeTitle"], "Central");
        assert_eq!(json["storeAddress"], "Main St 1");
        assert_eq!(json["status"], "ACTIVE");
    }

    #[test]
    fn test_change_password_payload() {
        let req = ChangePasswordRequest {
            current_password: "old".into(),
            new_password: "new".into(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["currentPassword"], "old");
        assert_eq!(json["newPassword"], "new");
    }
}
