use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

use super::{ContentStore, ImpressionWrite, StoreError};
use crate::models::{
    Ad, AdImpression, MachineGuide, MealTemplate, NewUser, Subscription, SubscriptionTier, User,
    UserPreference, WorkoutTemplate,
};

// List-valued columns are JSONB; these rows are the only place they are decoded.

#[derive(Debug, FromRow)]
struct PreferenceRow {
    user_id: i64,
    primary_goal: Option<String>,
    experience_level: Option<String>,
    dietary_preference: Option<String>,
    allergies: Json<Vec<String>>,
    training_frequency: i32,
}

impl From<PreferenceRow> for UserPreference {
    fn from(row: PreferenceRow) -> Self {
        Self {
            user_id: row.user_id,
            primary_goal: row.primary_goal,
            experience_level: row.experience_level,
            dietary_preference: row.dietary_preference,
            allergies: row.allergies.0,
            training_frequency: row.training_frequency,
        }
    }
}

#[derive(Debug, FromRow)]
struct SubscriptionRow {
    user_id: i64,
    tier: String,
    renewal_date: Option<NaiveDate>,
}

impl TryFrom<SubscriptionRow> for Subscription {
    type Error = StoreError;

    fn try_from(row: SubscriptionRow) -> Result<Self, Self::Error> {
        let tier = SubscriptionTier::from_str(&row.tier)
            .ok_or_else(|| StoreError::InvalidData(format!("subscription tier '{}'", row.tier)))?;

        Ok(Self {
            user_id: row.user_id,
            tier,
            renewal_date: row.renewal_date,
        })
    }
}

#[derive(Debug, FromRow)]
struct WorkoutRow {
    id: i64,
    goal: String,
    level: String,
    day: i32,
    title: String,
    description: Option<String>,
    duration_minutes: Option<i32>,
    equipment: Option<String>,
    primary_muscles: Json<Vec<String>>,
    instructions: Json<Vec<String>>,
}

impl From<WorkoutRow> for WorkoutTemplate {
    fn from(row: WorkoutRow) -> Self {
        Self {
            id: row.id,
            goal: row.goal,
            level: row.level,
            day: row.day,
            title: row.title,
            description: row.description,
            duration_minutes: row.duration_minutes,
            equipment: row.equipment,
            primary_muscles: row.primary_muscles.0,
            instructions: row.instructions.0,
        }
    }
}

#[derive(Debug, FromRow)]
struct MachineGuideRow {
    id: i64,
    label: String,
    machine_name: String,
    primary_muscles: Json<Vec<String>>,
    cues: Json<Vec<String>>,
    instructions: Json<Vec<String>>,
    aliases: Json<Vec<String>>,
}

impl From<MachineGuideRow> for MachineGuide {
    fn from(row: MachineGuideRow) -> Self {
        Self {
            id: row.id,
            label: row.label,
            machine_name: row.machine_name,
            primary_muscles: row.primary_muscles.0,
            cues: row.cues.0,
            instructions: row.instructions.0,
            aliases: row.aliases.0,
        }
    }
}

/// Map constraint violations to their domain meaning, pass everything else through
fn classify(err: sqlx::Error, entity: &'static str, reference: &'static str) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return StoreError::Duplicate(entity);
        }
        if db_err.is_foreign_key_violation() {
            return StoreError::MissingReference(reference);
        }
    }
    StoreError::Database(err)
}

/// PostgreSQL-backed content store
#[derive(Debug, Clone)]
pub struct PgContentStore {
    db: PgPool,
}

impl PgContentStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn run_migrations(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.db).await?;
        Ok(())
    }
}

#[async_trait]
impl ContentStore for PgContentStore {
    async fn create_user(&self, user: NewUser, tier: SubscriptionTier) -> Result<User, StoreError> {
        let mut tx = self.db.begin().await?;

        let created = sqlx::query_as::<_, User>(
            "INSERT INTO users (email, password_hash, name, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $4)
             RETURNING id, email, password_hash, name, created_at, updated_at",
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.name)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| classify(e, "email", "user"))?;

        sqlx::query(
            "INSERT INTO subscriptions (user_id, tier, renewal_date) VALUES ($1, $2, NULL)
             ON CONFLICT (user_id) DO UPDATE SET tier = EXCLUDED.tier, renewal_date = NULL",
        )
        .bind(created.id)
        .bind(tier.as_str())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, name, created_at, updated_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;

        Ok(user)
    }

    async fn upsert_preference(&self, preference: UserPreference) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO user_preferences (
                user_id, primary_goal, experience_level, dietary_preference, allergies, training_frequency
             ) VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (user_id) DO UPDATE SET
                primary_goal = EXCLUDED.primary_goal,
                experience_level = EXCLUDED.experience_level,
                dietary_preference = EXCLUDED.dietary_preference,
                allergies = EXCLUDED.allergies,
                training_frequency = EXCLUDED.training_frequency",
        )
        .bind(preference.user_id)
        .bind(&preference.primary_goal)
        .bind(&preference.experience_level)
        .bind(&preference.dietary_preference)
        .bind(Json(&preference.allergies))
        .bind(preference.training_frequency)
        .execute(&self.db)
        .await
        .map_err(|e| classify(e, "preference", "user"))?;

        Ok(())
    }

    async fn get_preference(&self, user_id: i64) -> Result<Option<UserPreference>, StoreError> {
        let row = sqlx::query_as::<_, PreferenceRow>(
            "SELECT user_id, primary_goal, experience_level, dietary_preference, allergies, training_frequency
             FROM user_preferences WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(UserPreference::from))
    }

    async fn upsert_subscription(&self, subscription: Subscription) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO subscriptions (user_id, tier, renewal_date) VALUES ($1, $2, $3)
             ON CONFLICT (user_id) DO UPDATE SET
                tier = EXCLUDED.tier,
                renewal_date = EXCLUDED.renewal_date",
        )
        .bind(subscription.user_id)
        .bind(subscription.tier.as_str())
        .bind(subscription.renewal_date)
        .execute(&self.db)
        .await
        .map_err(|e| classify(e, "subscription", "user"))?;

        Ok(())
    }

    async fn get_subscription(&self, user_id: i64) -> Result<Option<Subscription>, StoreError> {
        let row = sqlx::query_as::<_, SubscriptionRow>(
            "SELECT user_id, tier, renewal_date FROM subscriptions WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        row.map(Subscription::try_from).transpose()
    }

    async fn workout_templates(&self, goal: &str) -> Result<Vec<WorkoutTemplate>, StoreError> {
        let rows = sqlx::query_as::<_, WorkoutRow>(
            "SELECT id, goal, level, day, title, description, duration_minutes, equipment,
                    primary_muscles, instructions
             FROM workouts
             WHERE goal = $1
             ORDER BY day ASC, id ASC",
        )
        .bind(goal)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(WorkoutTemplate::from).collect())
    }

    async fn meal_templates(&self, goal: &str) -> Result<Vec<MealTemplate>, StoreError> {
        let meals = sqlx::query_as::<_, MealTemplate>(
            "SELECT id, goal, diet_type, meal_type, title, calories, protein, carbs, fats, instructions
             FROM meals
             WHERE goal = $1
             ORDER BY meal_type ASC, id ASC",
        )
        .bind(goal)
        .fetch_all(&self.db)
        .await?;

        Ok(meals)
    }

    async fn machine_guides(&self) -> Result<Vec<MachineGuide>, StoreError> {
        let rows = sqlx::query_as::<_, MachineGuideRow>(
            "SELECT id, label, machine_name, primary_muscles, cues, instructions, aliases
             FROM machine_guides
             ORDER BY id ASC",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(MachineGuide::from).collect())
    }

    async fn ads(&self) -> Result<Vec<Ad>, StoreError> {
        let ads = sqlx::query_as::<_, Ad>(
            "SELECT id, title, body, image_url, cta_label, cta_url, target_tier FROM ads ORDER BY id ASC",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(ads)
    }

    async fn find_impression(
        &self,
        user_id: i64,
        served_on: NaiveDate,
    ) -> Result<Option<AdImpression>, StoreError> {
        let impression = sqlx::query_as::<_, AdImpression>(
            "SELECT user_id, ad_id, served_on FROM user_ad_impressions
             WHERE user_id = $1 AND served_on = $2",
        )
        .bind(user_id)
        .bind(served_on)
        .fetch_optional(&self.db)
        .await?;

        Ok(impression)
    }

    async fn record_impression(&self, impression: AdImpression) -> Result<ImpressionWrite, StoreError> {
        let result = sqlx::query(
            "INSERT INTO user_ad_impressions (user_id, ad_id, served_on) VALUES ($1, $2, $3)
             ON CONFLICT (user_id, served_on) DO NOTHING",
        )
        .bind(impression.user_id)
        .bind(impression.ad_id)
        .bind(impression.served_on)
        .execute(&self.db)
        .await
        .map_err(|e| classify(e, "impression", "user or ad"))?;

        if result.rows_affected() == 0 {
            Ok(ImpressionWrite::SlotTaken)
        } else {
            Ok(ImpressionWrite::Recorded)
        }
    }
}
