use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const AUDIENCE_AD_SUPPORTED: &str = "ad-supported";
pub const AUDIENCE_ALL: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Ad {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub image_url: Option<String>,
    pub cta_label: Option<String>,
    pub cta_url: Option<String>,
    pub target_tier: String,
}

impl Ad {
    /// Whether this ad may be shown to an ad-supported account
    pub fn targets_ad_supported(&self) -> bool {
        self.target_tier == AUDIENCE_AD_SUPPORTED || self.target_tier == AUDIENCE_ALL
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct AdImpression {
    pub user_id: i64,
    pub ad_id: i64,
    pub served_on: NaiveDate,
}

/// Result of asking for today's ad
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DailyAd {
    Served { ad: Ad, served_on: NaiveDate },
    AlreadyServed,
    NoAdsNeeded,
}

#[derive(Debug, Deserialize)]
pub struct DailyAdRequest {
    pub user_id: Option<i64>,
}
