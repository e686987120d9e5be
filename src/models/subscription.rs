use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SubscriptionTier {
    #[serde(rename = "ad-supported")]
    AdSupported,
    #[serde(rename = "premium")]
    Premium,
}

impl SubscriptionTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionTier::AdSupported => "ad-supported",
            SubscriptionTier::Premium => "premium",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "ad-supported" => Some(SubscriptionTier::AdSupported),
            "premium" => Some(SubscriptionTier::Premium),
            _ => None,
        }
    }

    /// Premium renews monthly; the free tier never expires
    pub fn renewal_days(&self) -> Option<i64> {
        match self {
            SubscriptionTier::AdSupported => None,
            SubscriptionTier::Premium => Some(30),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub user_id: i64,
    pub tier: SubscriptionTier,
    pub renewal_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSubscriptionRequest {
    pub user_id: Option<i64>,
    pub tier: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SubscriptionUpdated {
    pub message: String,
    pub tier: SubscriptionTier,
    pub renewal_date: Option<NaiveDate>,
}
