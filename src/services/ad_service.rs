use chrono::NaiveDate;
use rand::seq::SliceRandom;
use tracing::{debug, info};

use crate::error::AppError;
use crate::models::{Ad, AdImpression, DailyAd, SubscriptionTier};
use crate::store::{ImpressionWrite, SharedStore};

#[derive(Clone)]
pub struct AdService {
    store: SharedStore,
}

impl AdService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Serve at most one ad per ad-supported user per day.
    ///
    /// Repeat calls on the same day return [`DailyAd::AlreadyServed`]. The
    /// impression insert is conditional, so a concurrent request that loses
    /// the race also gets `AlreadyServed` rather than a second ad.
    pub async fn serve_daily_ad(&self, user_id: i64, today: NaiveDate) -> Result<DailyAd, AppError> {
        let subscription = self
            .store
            .get_subscription(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("No subscription found"))?;

        if subscription.tier != SubscriptionTier::AdSupported {
            debug!(user_id, "Premium user, no ad needed");
            return Ok(DailyAd::NoAdsNeeded);
        }

        if self.store.find_impression(user_id, today).await?.is_some() {
            debug!(user_id, %today, "Daily ad already served");
            return Ok(DailyAd::AlreadyServed);
        }

        let eligible: Vec<Ad> = self
            .store
            .ads()
            .await?
            .into_iter()
            .filter(Ad::targets_ad_supported)
            .collect();

        let ad = eligible
            .choose(&mut rand::thread_rng())
            .cloned()
            .ok_or_else(|| AppError::not_found("No ads available"))?;

        let impression = AdImpression {
            user_id,
            ad_id: ad.id,
            served_on: today,
        };

        match self.store.record_impression(impression).await? {
            ImpressionWrite::Recorded => {
                info!(user_id, ad_id = ad.id, %today, "Daily ad served");
                Ok(DailyAd::Served { ad, served_on: today })
            }
            ImpressionWrite::SlotTaken => {
                debug!(user_id, %today, "Concurrent request served today's ad first");
                Ok(DailyAd::AlreadyServed)
            }
        }
    }
}
