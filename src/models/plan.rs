use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeMap;

use super::{MealTemplate, WorkoutTemplate};

/// Workout templates grouped by training day, days ascending
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutPlan {
    pub goal: String,
    pub level: String,
    pub days: BTreeMap<i32, Vec<WorkoutTemplate>>,
}

impl WorkoutPlan {
    pub fn template_count(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }
}

/// Meal templates grouped by meal type with the day's calorie total
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealPlan {
    pub goal: String,
    pub diet_type: String,
    pub total_daily_calories: i64,
    pub meals: BTreeMap<String, Vec<MealTemplate>>,
}

#[derive(Debug, Serialize)]
pub struct WorkoutItem {
    pub title: String,
    pub description: Option<String>,
    pub duration_minutes: Option<i32>,
    pub equipment: Option<String>,
    pub primary_muscles: Vec<String>,
    pub instructions: Vec<String>,
    pub level: String,
    pub goal: String,
}

impl From<WorkoutTemplate> for WorkoutItem {
    fn from(template: WorkoutTemplate) -> Self {
        Self {
            title: template.title,
            description: template.description,
            duration_minutes: template.duration_minutes,
            equipment: template.equipment,
            primary_muscles: template.primary_muscles,
            instructions: template.instructions,
            level: template.level,
            goal: template.goal,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MealItem {
    pub title: String,
    pub calories: Option<i32>,
    pub protein: Option<i32>,
    pub carbs: Option<i32>,
    pub fats: Option<i32>,
    pub instructions: Option<String>,
    pub diet_type: String,
}

impl From<MealTemplate> for MealItem {
    fn from(template: MealTemplate) -> Self {
        Self {
            title: template.title,
            calories: template.calories,
            protein: template.protein,
            carbs: template.carbs,
            fats: template.fats,
            instructions: template.instructions,
            diet_type: template.diet_type,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WorkoutPlanResponse {
    pub goal: String,
    pub level: String,
    pub plan: IndexMap<String, Vec<WorkoutItem>>,
}

impl From<WorkoutPlan> for WorkoutPlanResponse {
    fn from(plan: WorkoutPlan) -> Self {
        let plan_days: IndexMap<String, Vec<WorkoutItem>> = plan
            .days
            .into_iter()
            .map(|(day, templates)| {
                let items: Vec<WorkoutItem> = templates.into_iter().map(WorkoutItem::from).collect();
                (format!("day_{}", day), items)
            })
            .collect();

        Self {
            goal: plan.goal,
            level: plan.level,
            plan: plan_days,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MealPlanResponse {
    pub goal: String,
    pub diet_type: String,
    pub total_daily_calories: i64,
    pub plan: IndexMap<String, Vec<MealItem>>,
}

impl From<MealPlan> for MealPlanResponse {
    fn from(plan: MealPlan) -> Self {
        let meals: IndexMap<String, Vec<MealItem>> = plan
            .meals
            .into_iter()
            .map(|(meal_type, templates)| {
                (meal_type, templates.into_iter().map(MealItem::from).collect::<Vec<_>>())
            })
            .collect();

        Self {
            goal: plan.goal,
            diet_type: plan.diet_type,
            total_daily_calories: plan.total_daily_calories,
            plan: meals,
        }
    }
}
