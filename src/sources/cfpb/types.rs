//! CFPB consumer-complaint API wire types

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ComplaintResponse {
    pub hits: HitsEnvelope,
    #[serde(default)]
    pub aggregations: Option<Aggregations>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HitsEnvelope {
    pub total: TotalCount,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TotalCount {
    pub value: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Aggregations {
    pub issue: Option<IssueAggregation>,
}

/// The issue aggregation nests a bucket list under its own name
#[derive(Debug, Clone, Deserialize)]
pub struct IssueAggregation {
    pub issue: BucketList,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BucketList {
    #[serde(default)]
    pub buckets: Vec<Bucket>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Bucket {
    pub key: String,
    pub doc_count: u64,
}
