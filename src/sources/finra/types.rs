//! FINRA trade-report wire types

use serde::{Deserialize, Serialize};

/// Filter clause in a FINRA Query API request body
#[derive(Debug, Clone, Serialize)]
pub struct CompareFilter {
    #[serde(rename = "fieldName")]
    pub field_name: String,
    #[serde(rename = "compareType")]
    pub compare_type: String,
    #[serde(rename = "fieldValue")]
    pub field_value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TradeQuery {
    pub limit: usize,
    #[serde(rename = "compareFilters")]
    pub compare_filters: Vec<CompareFilter>,
}

/// One reported trade row
#[derive(Debug, Clone, Deserialize)]
pub struct TradeRow {
    #[serde(rename = "tradeDate")]
    pub trade_date: String,
    #[serde(rename = "executionTime")]
    pub execution_time: Option<String>,
    pub price: Option<String>,
    #[serde(rename = "yield")]
    pub yield_rate: Option<String>,
    pub quantity: Option<u64>,
    pub side: Option<String>,
    #[serde(rename = "reportingParty")]
    pub reporting_party: Option<String>,
    #[serde(rename = "reportType")]
    pub report_type: Option<String>,
}
