//! Dashboard metric card shown on the admin overview page.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Positive,
    Negative,
}

impl ChangeType {
    pub fn of(percent: i32) -> Self {
        if percent >= 0 {
            Self::Positive
        } else {
            Self::Negative
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetric {
    pub title: String,
    /// Display value, e.g. `₹29,431`.
    pub value: String,
    /// Sign-prefixed percentage, e.g. `+12%`.
    pub change: String,
    pub change_type: ChangeType,
    pub icon: String,
    pub raw_value: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}
