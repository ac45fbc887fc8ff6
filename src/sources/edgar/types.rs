//! SEC EDGAR wire types

use serde::{Deserialize, Serialize};

/// Full-text search response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FtsResponse {
    pub hits: FtsHits,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FtsHits {
    #[serde(default)]
    pub hits: Vec<FtsHit>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FtsHit {
    #[serde(rename = "_source")]
    pub source: FtsSource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FtsSource {
    /// Display names carry the filer name plus a "(CIK 0001234567)" suffix
    #[serde(default)]
    pub display_names: Vec<String>,
    #[serde(default)]
    pub ciks: Vec<String>,
    pub file_type: Option<String>,
    pub file_date: Option<String>,
    /// Accession number, dashed form
    pub adsh: Option<String>,
}

/// Subset of the submissions (registrant) response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submissions {
    pub name: String,
    pub ein: Option<String>,
    #[serde(rename = "stateOfIncorporation")]
    pub state_of_incorporation: Option<String>,
    pub addresses: Option<SubmissionAddresses>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionAddresses {
    pub business: Option<SubmissionAddress>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionAddress {
    pub street1: Option<String>,
    pub city: Option<String>,
    #[serde(rename = "stateOrCountry")]
    pub state_or_country: Option<String>,
    #[serde(rename = "zipCode")]
    pub zip_code: Option<String>,
}

impl SubmissionAddress {
    pub fn formatted(&self) -> String {
        [
            self.street1.as_deref(),
            self.city.as_deref(),
            self.state_or_country.as_deref(),
            self.zip_code.as_deref(),
        ]
        .iter()
        .flatten()
        .copied()
        .collect::<Vec<_>>()
        .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fts_response_parses() {
        let json = r#"{
            "hits": {
                "hits": [
                    {
                        "_source": {
                            "display_names": ["SANTANDER DRIVE AUTO RECEIVABLES TRUST 2025-1  (CIK 0002001234)"],
                            "ciks": ["0002001234"],
                            "file_type": "SF-3",
                            "file_date": "2025-03-14",
                            "adsh": "0001193125-25-070123"
                        }
                    }
                ]
            }
        }"#;
        let parsed: FtsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.hits.hits.len(), 1);
        assert_eq!(
            parsed.hits.hits[0].source.file_type.as_deref(),
            Some("SF-3")
        );
    }

    #[test]
    fn test_address_formatting_skips_missing_parts() {
        let addr = SubmissionAddress {
            street1: Some("1601 Elm St".to_string()),
            city: Some("Dallas".to_string()),
            state_or_country: Some("TX".to_string()),
            zip_code: None,
        };
        assert_eq!(addr.formatted(), "1601 Elm St, Dallas, TX");
    }
}
