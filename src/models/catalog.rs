use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Level value that matches every experience level
pub const LEVEL_WILDCARD: &str = "all";
/// Diet value that matches every dietary preference
pub const DIET_WILDCARD: &str = "standard";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutTemplate {
    pub id: i64,
    pub goal: String,
    pub level: String,
    pub day: i32,
    pub title: String,
    pub description: Option<String>,
    pub duration_minutes: Option<i32>,
    pub equipment: Option<String>,
    pub primary_muscles: Vec<String>,
    pub instructions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct MealTemplate {
    pub id: i64,
    pub goal: String,
    pub diet_type: String,
    pub meal_type: String,
    pub title: String,
    pub calories: Option<i32>,
    pub protein: Option<i32>,
    pub carbs: Option<i32>,
    pub fats: Option<i32>,
    pub instructions: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineGuide {
    pub id: i64,
    pub label: String,
    pub machine_name: String,
    pub primary_muscles: Vec<String>,
    pub cues: Vec<String>,
    pub instructions: Vec<String>,
    pub aliases: Vec<String>,
}

impl MachineGuide {
    /// Case-folded names this guide answers to: aliases plus label and machine name
    pub fn match_keys(&self) -> Vec<String> {
        self.aliases
            .iter()
            .chain([&self.label, &self.machine_name])
            .map(|key| key.trim().to_lowercase())
            .filter(|key| !key.is_empty())
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct PlanQuery {
    pub user_id: Option<i64>,
    pub goal: Option<String>,
    pub level: Option<String>,
    pub diet_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct IdentifyMachineRequest {
    #[serde(default)]
    pub labels: Vec<String>,
    pub machine_name: Option<String>,
}

/// Outcome of a machine lookup; a miss is a soft result, not an error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MachineMatch {
    Matched(MachineGuide),
    NoMatch { labels_tested: Vec<String> },
}
