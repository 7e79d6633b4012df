use indexmap::IndexMap;
use serde::Serialize;

use crate::normalize::counts::CountSummary;

/// Machine-readable report: canonical record, count descriptions and scores.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a, R: Serialize> {
    pub source: String,
    pub record: &'a R,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counts: Option<&'a CountSummary>,
    /// Pre-formatted, in scorer order.
    pub scores: &'a IndexMap<String, String>,
}

pub fn render<R: Serialize>(report: &JsonReport<'_, R>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
