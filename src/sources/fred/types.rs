//! FRED observation wire types

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ObservationsResponse {
    #[serde(default)]
    pub observations: Vec<Observation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Observation {
    pub date: String,
    /// "." marks a missing observation
    pub value: String,
}

impl Observation {
    pub fn parsed(&self) -> Option<rust_decimal::Decimal> {
        if self.value.trim() == "." {
            return None;
        }
        self.value.trim().parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_observation_parses() {
        let obs = Observation {
            date: "2025-06-01".to_string(),
            value: "6.72".to_string(),
        };
        assert_eq!(obs.parsed(), Some(dec!(6.72)));
    }

    #[test]
    fn test_missing_marker_is_none() {
        let obs = Observation {
            date: "2025-06-01".to_string(),
            value: ".".to_string(),
        };
        assert_eq!(obs.parsed(), None);
    }
}
