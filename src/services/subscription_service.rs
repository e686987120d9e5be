use chrono::{Duration, NaiveDate};
use tracing::info;

use crate::error::AppError;
use crate::models::{Subscription, SubscriptionTier};
use crate::store::SharedStore;

#[derive(Clone)]
pub struct SubscriptionService {
    store: SharedStore,
}

impl SubscriptionService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Switch a user's tier. Premium renews 30 days after `today`.
    pub async fn update(
        &self,
        user_id: Option<i64>,
        tier: Option<&str>,
        today: NaiveDate,
    ) -> Result<Subscription, AppError> {
        let user_id = user_id.filter(|id| *id > 0);
        let tier = tier.and_then(SubscriptionTier::from_str);

        let (user_id, tier) = match (user_id, tier) {
            (Some(user_id), Some(tier)) => (user_id, tier),
            _ => return Err(AppError::validation("Invalid subscription details")),
        };

        let subscription = Subscription {
            user_id,
            tier,
            renewal_date: tier.renewal_days().map(|days| today + Duration::days(days)),
        };

        self.store.upsert_subscription(subscription.clone()).await?;
        info!(user_id, tier = tier.as_str(), "Subscription updated");

        Ok(subscription)
    }

    pub async fn get(&self, user_id: i64) -> Result<Subscription, AppError> {
        self.store
            .get_subscription(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("No subscription found"))
    }
}
