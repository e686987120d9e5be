use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{ContentStore, ImpressionWrite, StoreError};
use crate::models::{
    Ad, AdImpression, MachineGuide, MealTemplate, NewUser, Subscription, SubscriptionTier, User,
    UserPreference, WorkoutTemplate,
};

#[derive(Debug, Default)]
struct Tables {
    next_user_id: i64,
    users: Vec<User>,
    preferences: HashMap<i64, UserPreference>,
    subscriptions: HashMap<i64, Subscription>,
    workouts: Vec<WorkoutTemplate>,
    meals: Vec<MealTemplate>,
    machine_guides: Vec<MachineGuide>,
    ads: Vec<Ad>,
    impressions: HashMap<(i64, NaiveDate), AdImpression>,
}

impl Tables {
    fn require_user(&self, user_id: i64) -> Result<(), StoreError> {
        if self.users.iter().any(|user| user.id == user_id) {
            Ok(())
        } else {
            Err(StoreError::MissingReference("user"))
        }
    }
}

/// Process-local store for development and tests.
///
/// A single lock guards every table, so each write (including the
/// impression check-and-insert) happens under one write guard.
#[derive(Debug, Default)]
pub struct InMemoryContentStore {
    tables: RwLock<Tables>,
}

impl InMemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load catalog content. Entries keep the order given, which becomes catalog order.
    pub async fn load_catalog(
        &self,
        workouts: Vec<WorkoutTemplate>,
        meals: Vec<MealTemplate>,
        machine_guides: Vec<MachineGuide>,
        ads: Vec<Ad>,
    ) {
        let mut tables = self.tables.write().await;
        tables.workouts.extend(workouts);
        tables.meals.extend(meals);
        tables.machine_guides.extend(machine_guides);
        tables.ads.extend(ads);
    }

    pub async fn impressions_for_user(&self, user_id: i64) -> Vec<AdImpression> {
        let tables = self.tables.read().await;
        let mut impressions: Vec<AdImpression> = tables
            .impressions
            .values()
            .filter(|impression| impression.user_id == user_id)
            .cloned()
            .collect();
        impressions.sort_by_key(|impression| impression.served_on);
        impressions
    }
}

#[async_trait]
impl ContentStore for InMemoryContentStore {
    async fn create_user(&self, user: NewUser, tier: SubscriptionTier) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;

        if tables.users.iter().any(|existing| existing.email == user.email) {
            return Err(StoreError::Duplicate("email"));
        }

        tables.next_user_id += 1;
        let now = Utc::now();
        let created = User {
            id: tables.next_user_id,
            email: user.email,
            password_hash: user.password_hash,
            name: user.name,
            created_at: now,
            updated_at: now,
        };

        tables.subscriptions.insert(
            created.id,
            Subscription {
                user_id: created.id,
                tier,
                renewal_date: None,
            },
        );
        tables.users.push(created.clone());

        Ok(created)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|user| user.email == email).cloned())
    }

    async fn upsert_preference(&self, preference: UserPreference) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        tables.require_user(preference.user_id)?;
        tables.preferences.insert(preference.user_id, preference);
        Ok(())
    }

    async fn get_preference(&self, user_id: i64) -> Result<Option<UserPreference>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.preferences.get(&user_id).cloned())
    }

    async fn upsert_subscription(&self, subscription: Subscription) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        tables.require_user(subscription.user_id)?;
        tables.subscriptions.insert(subscription.user_id, subscription);
        Ok(())
    }

    async fn get_subscription(&self, user_id: i64) -> Result<Option<Subscription>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.subscriptions.get(&user_id).cloned())
    }

    async fn workout_templates(&self, goal: &str) -> Result<Vec<WorkoutTemplate>, StoreError> {
        let tables = self.tables.read().await;
        let mut templates: Vec<WorkoutTemplate> = tables
            .workouts
            .iter()
            .filter(|template| template.goal == goal)
            .cloned()
            .collect();
        templates.sort_by_key(|template| (template.day, template.id));
        Ok(templates)
    }

    async fn meal_templates(&self, goal: &str) -> Result<Vec<MealTemplate>, StoreError> {
        let tables = self.tables.read().await;
        let mut templates: Vec<MealTemplate> = tables
            .meals
            .iter()
            .filter(|template| template.goal == goal)
            .cloned()
            .collect();
        templates.sort_by(|a, b| a.meal_type.cmp(&b.meal_type).then(a.id.cmp(&b.id)));
        Ok(templates)
    }

    async fn machine_guides(&self) -> Result<Vec<MachineGuide>, StoreError> {
        let tables = self.tables.read().await;
        let mut guides = tables.machine_guides.clone();
        guides.sort_by_key(|guide| guide.id);
        Ok(guides)
    }

    async fn ads(&self) -> Result<Vec<Ad>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.ads.clone())
    }

    async fn find_impression(
        &self,
        user_id: i64,
        served_on: NaiveDate,
    ) -> Result<Option<AdImpression>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.impressions.get(&(user_id, served_on)).cloned())
    }

    async fn record_impression(&self, impression: AdImpression) -> Result<ImpressionWrite, StoreError> {
        let mut tables = self.tables.write().await;
        tables.require_user(impression.user_id)?;
        if !tables.ads.iter().any(|ad| ad.id == impression.ad_id) {
            return Err(StoreError::MissingReference("ad"));
        }

        let slot = (impression.user_id, impression.served_on);

        if tables.impressions.contains_key(&slot) {
            return Ok(ImpressionWrite::SlotTaken);
        }

        tables.impressions.insert(slot, impression);
        Ok(ImpressionWrite::Recorded)
    }
}
