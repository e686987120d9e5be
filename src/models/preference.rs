use serde::{Deserialize, Serialize};

pub const DEFAULT_TRAINING_FREQUENCY: i32 = 3;
pub const DEFAULT_LEVEL: &str = "beginner";
pub const DEFAULT_DIET: &str = "standard";

/// Stored coaching context for a single user, keyed by `user_id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreference {
    pub user_id: i64,
    pub primary_goal: Option<String>,
    pub experience_level: Option<String>,
    pub dietary_preference: Option<String>,
    pub allergies: Vec<String>,
    pub training_frequency: i32,
}

#[derive(Debug, Deserialize)]
pub struct UpsertPreferenceRequest {
    pub user_id: Option<i64>,
    pub primary_goal: Option<String>,
    pub experience_level: Option<String>,
    pub dietary_preference: Option<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    pub training_frequency: Option<i32>,
}

/// Goal, level and diet after merging request values, stored preferences and defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedContext {
    pub goal: String,
    pub level: String,
    pub diet: String,
}
