use tracing::{debug, info};

use crate::error::AppError;
use crate::models::{
    ResolvedContext, UpsertPreferenceRequest, UserPreference, DEFAULT_DIET, DEFAULT_LEVEL,
    DEFAULT_TRAINING_FREQUENCY,
};
use crate::store::SharedStore;

/// Treat blank strings the same as a missing value
fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[derive(Clone)]
pub struct PreferenceService {
    store: SharedStore,
}

impl PreferenceService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Create or replace the stored preference for a user
    pub async fn upsert(&self, request: UpsertPreferenceRequest) -> Result<UserPreference, AppError> {
        let user_id = request
            .user_id
            .filter(|id| *id > 0)
            .ok_or_else(|| AppError::validation("user_id is required"))?;

        let training_frequency = request.training_frequency.unwrap_or(DEFAULT_TRAINING_FREQUENCY);
        if training_frequency < 0 {
            return Err(AppError::validation("training_frequency must not be negative"));
        }

        let preference = UserPreference {
            user_id,
            primary_goal: non_blank(request.primary_goal.as_deref()),
            experience_level: non_blank(request.experience_level.as_deref()),
            dietary_preference: non_blank(request.dietary_preference.as_deref()),
            allergies: request.allergies,
            training_frequency,
        };

        self.store.upsert_preference(preference.clone()).await?;
        info!(user_id, "Preferences saved");

        Ok(preference)
    }

    pub async fn get(&self, user_id: i64) -> Result<UserPreference, AppError> {
        self.store
            .get_preference(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("No preferences found for user"))
    }

    /// Merge explicit values, the user's stored preference and defaults.
    ///
    /// Each field resolves independently: a non-blank explicit value wins,
    /// then the stored value, then the field default. Goal has no default.
    pub async fn resolve(
        &self,
        user_id: Option<i64>,
        goal: Option<&str>,
        level: Option<&str>,
        diet: Option<&str>,
    ) -> Result<ResolvedContext, AppError> {
        let mut goal = non_blank(goal);
        let mut level = non_blank(level);
        let mut diet = non_blank(diet);

        let needs_stored = goal.is_none() || level.is_none() || diet.is_none();
        if let (Some(user_id), true) = (user_id, needs_stored) {
            if let Some(stored) = self.store.get_preference(user_id).await? {
                goal = goal.or_else(|| non_blank(stored.primary_goal.as_deref()));
                level = level.or_else(|| non_blank(stored.experience_level.as_deref()));
                diet = diet.or_else(|| non_blank(stored.dietary_preference.as_deref()));
            }
        }

        let goal = goal.ok_or_else(|| AppError::validation("A goal is required to build a plan"))?;
        let resolved = ResolvedContext {
            goal,
            level: level.unwrap_or_else(|| DEFAULT_LEVEL.to_string()),
            diet: diet.unwrap_or_else(|| DEFAULT_DIET.to_string()),
        };

        debug!(?user_id, ?resolved, "Resolved coaching context");
        Ok(resolved)
    }
}
