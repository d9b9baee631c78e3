use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A user account as the service returns it, with unrecognized fields kept
/// in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    #[serde(rename = "orgId", default)]
    pub org_id: i64,
    pub login: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "isAdmin", default)]
    pub is_admin: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_service_payload() {
        let user: UserRecord = serde_json::from_value(serde_json::json!({
            "id": 3,
            "orgId": 1,
            "login": "ops.oncall",
            "name": "Ops Oncall",
            "email": "oncall@example.com",
            "isAdmin": true,
            "theme": "dark"
        }))
        .unwrap();

        assert_eq!(user.login, "ops.oncall");
        assert!(user.is_admin);
        assert_eq!(user.extra["theme"], serde_json::json!("dark"));
    }
}
