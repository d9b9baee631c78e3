use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Full datasource configuration as the service returns it. Known fields are
/// typed; everything else lands in `extra` so the export carries the complete
/// upstream record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasourceRecord {
    pub id: i64,
    #[serde(rename = "orgId", default)]
    pub org_id: i64,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub access: String,
    #[serde(default)]
    pub url: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extra_fields_survive_round_trip() {
        let record: DatasourceRecord = serde_json::from_value(serde_json::json!({
            "id": 7,
            "orgId": 2,
            "name": "graphite",
            "type": "graphite",
            "access": "proxy",
            "url": "http://graphite:8080",
            "basicAuth": true,
            "jsonData": { "timeout": 30 }
        }))
        .unwrap();

        assert_eq!(record.org_id, 2);
        assert_eq!(record.kind, "graphite");
        assert_eq!(record.extra["basicAuth"], serde_json::json!(true));

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back["jsonData"]["timeout"], serde_json::json!(30));
        assert_eq!(back["orgId"], serde_json::json!(2));
    }
}
