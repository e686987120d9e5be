//! Content Store: the persistence boundary for users, preferences,
//! subscriptions, catalog content and ad impressions.
//!
//! Services receive an [`SharedStore`] at construction time; nothing in the
//! crate reaches for a global connection.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use thiserror::Error;

use crate::models::{
    Ad, AdImpression, MachineGuide, MealTemplate, NewUser, Subscription, SubscriptionTier, User,
    UserPreference, WorkoutTemplate,
};

pub use memory::InMemoryContentStore;
pub use postgres::PgContentStore;

pub type SharedStore = Arc<dyn ContentStore>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Duplicate {0}")]
    Duplicate(&'static str),
    #[error("Unknown {0}")]
    MissingReference(&'static str),
    #[error("Invalid stored value: {0}")]
    InvalidData(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Outcome of the atomic insert-if-absent on the (user, day) impression slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpressionWrite {
    Recorded,
    SlotTaken,
}

#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Create a user together with its initial subscription in one unit of work.
    /// Fails with [`StoreError::Duplicate`] when the email is already registered.
    async fn create_user(&self, user: NewUser, tier: SubscriptionTier) -> Result<User, StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn upsert_preference(&self, preference: UserPreference) -> Result<(), StoreError>;

    async fn get_preference(&self, user_id: i64) -> Result<Option<UserPreference>, StoreError>;

    async fn upsert_subscription(&self, subscription: Subscription) -> Result<(), StoreError>;

    async fn get_subscription(&self, user_id: i64) -> Result<Option<Subscription>, StoreError>;

    /// Workout templates for a goal, ordered by day then catalog id
    async fn workout_templates(&self, goal: &str) -> Result<Vec<WorkoutTemplate>, StoreError>;

    /// Meal templates for a goal, ordered by meal type then catalog id
    async fn meal_templates(&self, goal: &str) -> Result<Vec<MealTemplate>, StoreError>;

    /// Every machine guide in catalog (id) order
    async fn machine_guides(&self) -> Result<Vec<MachineGuide>, StoreError>;

    async fn ads(&self) -> Result<Vec<Ad>, StoreError>;

    async fn find_impression(
        &self,
        user_id: i64,
        served_on: NaiveDate,
    ) -> Result<Option<AdImpression>, StoreError>;

    /// Insert the impression unless one already exists for (user_id, served_on).
    /// Must be atomic with respect to concurrent callers.
    async fn record_impression(&self, impression: AdImpression) -> Result<ImpressionWrite, StoreError>;
}
