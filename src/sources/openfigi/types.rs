//! OpenFIGI wire types

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    pub query: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub data: Vec<FigiEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MappingRequest {
    #[serde(rename = "idType")]
    pub id_type: String,
    #[serde(rename = "idValue")]
    pub id_value: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MappingResponse {
    #[serde(default)]
    pub data: Vec<FigiEntry>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FigiEntry {
    pub figi: String,
    pub name: Option<String>,
    pub ticker: Option<String>,
    #[serde(rename = "marketSector")]
    pub market_sector: Option<String>,
    #[serde(rename = "securityType")]
    pub security_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_parses() {
        let json = r#"{
            "data": [
                {
                    "figi": "BBG00XYZ12345",
                    "name": "SDART 2025-1 A2",
                    "ticker": "SDART",
                    "marketSector": "Mtge",
                    "securityType": "ABS"
                }
            ]
        }"#;
        let parsed: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.data.len(), 1);
        assert_eq!(parsed.data[0].security_type.as_deref(), Some("ABS"));
    }

    #[test]
    fn test_mapping_error_entry_parses() {
        let json = r#"{"data": [], "error": "No identifier found."}"#;
        let parsed: MappingResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.data.is_empty());
        assert!(parsed.error.is_some());
    }
}
