use std::collections::BTreeMap;
use tracing::info;

use crate::error::AppError;
use crate::models::{
    MealPlan, MealTemplate, PlanQuery, WorkoutPlan, WorkoutTemplate, DIET_WILDCARD, LEVEL_WILDCARD,
};
use crate::services::PreferenceService;
use crate::store::SharedStore;

/// Keep templates tagged with the requested level or the "all" wildcard,
/// grouped by day. Input order within a day is preserved.
pub fn group_workouts(
    templates: Vec<WorkoutTemplate>,
    level: &str,
) -> BTreeMap<i32, Vec<WorkoutTemplate>> {
    let mut days: BTreeMap<i32, Vec<WorkoutTemplate>> = BTreeMap::new();

    for template in templates
        .into_iter()
        .filter(|template| template.level == level || template.level == LEVEL_WILDCARD)
    {
        days.entry(template.day).or_default().push(template);
    }

    days
}

/// Keep templates tagged with the requested diet or the "standard" wildcard, grouped by meal type
pub fn group_meals(templates: Vec<MealTemplate>, diet: &str) -> BTreeMap<String, Vec<MealTemplate>> {
    let mut meals: BTreeMap<String, Vec<MealTemplate>> = BTreeMap::new();

    for template in templates
        .into_iter()
        .filter(|template| template.diet_type == diet || template.diet_type == DIET_WILDCARD)
    {
        meals.entry(template.meal_type.clone()).or_default().push(template);
    }

    meals
}

/// Sum of calories over every meal; unknown calorie counts add nothing
pub fn total_calories<'a>(meals: impl IntoIterator<Item = &'a MealTemplate>) -> i64 {
    meals
        .into_iter()
        .map(|meal| i64::from(meal.calories.unwrap_or(0)))
        .sum()
}

#[derive(Clone)]
pub struct PlanService {
    store: SharedStore,
    preferences: PreferenceService,
}

impl PlanService {
    pub fn new(store: SharedStore) -> Self {
        Self {
            preferences: PreferenceService::new(store.clone()),
            store,
        }
    }

    pub async fn workout_plan(&self, goal: &str, level: &str) -> Result<WorkoutPlan, AppError> {
        let templates = self.store.workout_templates(goal).await?;
        let days = group_workouts(templates, level);

        if days.is_empty() {
            return Err(AppError::not_found(format!(
                "No workouts found for goal '{}' at level '{}'",
                goal, level
            )));
        }

        let plan = WorkoutPlan {
            goal: goal.to_string(),
            level: level.to_string(),
            days,
        };

        info!(goal, level, templates = plan.template_count(), "Workout plan resolved");
        Ok(plan)
    }

    pub async fn meal_plan(&self, goal: &str, diet: &str) -> Result<MealPlan, AppError> {
        let templates = self.store.meal_templates(goal).await?;
        let meals = group_meals(templates, diet);

        if meals.is_empty() {
            return Err(AppError::not_found(format!(
                "No meals found for goal '{}' with diet '{}'",
                goal, diet
            )));
        }

        let total_daily_calories = total_calories(meals.values().flatten());

        info!(goal, diet, total_daily_calories, "Meal plan resolved");
        Ok(MealPlan {
            goal: goal.to_string(),
            diet_type: diet.to_string(),
            total_daily_calories,
            meals,
        })
    }

    /// Resolve goal and level from the query and stored preferences, then build the workout plan
    pub async fn workout_plan_for(&self, query: &PlanQuery) -> Result<WorkoutPlan, AppError> {
        let context = self
            .preferences
            .resolve(query.user_id, query.goal.as_deref(), query.level.as_deref(), None)
            .await?;

        self.workout_plan(&context.goal, &context.level).await
    }

    /// Resolve goal and diet from the query and stored preferences, then build the meal plan
    pub async fn meal_plan_for(&self, query: &PlanQuery) -> Result<MealPlan, AppError> {
        let context = self
            .preferences
            .resolve(query.user_id, query.goal.as_deref(), None, query.diet_type.as_deref())
            .await?;

        self.meal_plan(&context.goal, &context.diet).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UpsertPreferenceRequest;
    use crate::services::fixtures::{self, meal, workout};
    use crate::store::InMemoryContentStore;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use std::sync::Arc;

    async fn setup() -> (Arc<InMemoryContentStore>, PlanService) {
        let store = Arc::new(InMemoryContentStore::new());
        store
            .load_catalog(
                vec![
                    workout(1, "lose_weight", "beginner", 2, "Treadmill intervals"),
                    workout(2, "lose_weight", "beginner", 1, "Circuit"),
                    workout(3, "lose_weight", "all", 1, "Mobility"),
                    workout(4, "lose_weight", "advanced", 1, "Sprint ladder"),
                    workout(5, "build_muscle", "beginner", 1, "Full body"),
                    workout(6, "lose_weight", "all", 10, "Long walk"),
                ],
                vec![
                    meal(1, "lose_weight", "standard", "breakfast", Some(350)),
                    meal(2, "lose_weight", "vegetarian", "lunch", Some(520)),
                    meal(3, "lose_weight", "vegan", "lunch", Some(480)),
                    meal(4, "lose_weight", "standard", "dinner", None),
                    meal(5, "build_muscle", "standard", "dinner", Some(900)),
                ],
                vec![],
                vec![],
            )
            .await;

        let service = PlanService::new(store.clone());
        (store, service)
    }

    #[tokio::test]
    async fn test_workout_plan_includes_wildcard_level_grouped_by_day() {
        let (_, service) = setup().await;

        let plan = service.workout_plan("lose_weight", "beginner").await.unwrap();

        let days: Vec<i32> = plan.days.keys().copied().collect();
        assert_eq!(days, vec![1, 2, 10]);

        let day_one: Vec<&str> = plan.days[&1].iter().map(|t| t.title.as_str()).collect();
        assert_eq!(day_one, vec!["Circuit", "Mobility"]);
        assert_eq!(plan.template_count(), 4);
    }

    #[tokio::test]
    async fn test_level_without_specific_templates_gets_wildcard_content() {
        let (_, service) = setup().await;

        let plan = service.workout_plan("lose_weight", "intermediate").await.unwrap();

        let titles: Vec<&str> = plan.days.values().flatten().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Mobility", "Long walk"]);
    }

    #[tokio::test]
    async fn test_unknown_goal_is_not_found() {
        let (_, service) = setup().await;

        assert_matches!(service.workout_plan("run_marathon", "beginner").await, Err(AppError::NotFound(_)));
        assert_matches!(service.meal_plan("run_marathon", "standard").await, Err(AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_meal_plan_totals_calories_with_missing_values_as_zero() {
        let (_, service) = setup().await;

        let plan = service.meal_plan("lose_weight", "vegetarian").await.unwrap();

        let meal_types: Vec<&str> = plan.meals.keys().map(String::as_str).collect();
        assert_eq!(meal_types, vec!["breakfast", "dinner", "lunch"]);
        assert_eq!(plan.total_daily_calories, 350 + 520);
        assert_eq!(plan.meals["lunch"].len(), 1);
    }

    #[tokio::test]
    async fn test_plans_resolve_from_stored_preferences() {
        let (store, service) = setup().await;
        let user = fixtures::user(&store, "erik@example.com").await;
        PreferenceService::new(store.clone())
            .upsert(UpsertPreferenceRequest {
                user_id: Some(user.id),
                primary_goal: Some("lose_weight".to_string()),
                experience_level: Some("advanced".to_string()),
                dietary_preference: Some("vegan".to_string()),
                allergies: vec![],
                training_frequency: None,
            })
            .await
            .unwrap();

        let query = PlanQuery {
            user_id: Some(user.id),
            goal: None,
            level: None,
            diet_type: None,
        };

        let workouts = service.workout_plan_for(&query).await.unwrap();
        assert_eq!(workouts.level, "advanced");
        assert_eq!(workouts.days[&1].len(), 2);

        let meals = service.meal_plan_for(&query).await.unwrap();
        assert_eq!(meals.diet_type, "vegan");
        assert_eq!(meals.total_daily_calories, 350 + 480);
    }

    #[tokio::test]
    async fn test_plan_without_goal_is_validation_error() {
        let (_, service) = setup().await;
        let query = PlanQuery {
            user_id: None,
            goal: None,
            level: Some("beginner".to_string()),
            diet_type: None,
        };

        assert_matches!(service.workout_plan_for(&query).await, Err(AppError::Validation(_)));
    }

    fn arb_workout() -> impl Strategy<Value = WorkoutTemplate> {
        (
            0i64..10_000,
            prop::sample::select(vec!["beginner", "advanced", "all"]),
            1i32..8,
        )
            .prop_map(|(id, level, day)| workout(id, "goal", level, day, "session"))
    }

    fn arb_meal() -> impl Strategy<Value = MealTemplate> {
        (
            0i64..10_000,
            prop::sample::select(vec!["standard", "vegan", "keto"]),
            prop::sample::select(vec!["breakfast", "lunch", "dinner"]),
            prop::option::of(0i32..2_000),
        )
            .prop_map(|(id, diet, meal_type, calories)| meal(id, "goal", diet, meal_type, calories))
    }

    proptest! {
        #[test]
        fn prop_grouping_keeps_every_matching_workout_once(templates in prop::collection::vec(arb_workout(), 0..40)) {
            let expected = templates
                .iter()
                .filter(|t| t.level == "beginner" || t.level == "all")
                .count();

            let days = group_workouts(templates, "beginner");

            let grouped: usize = days.values().map(Vec::len).sum();
            prop_assert_eq!(grouped, expected);
            for (day, group) in &days {
                prop_assert!(group.iter().all(|t| t.day == *day));
                prop_assert!(group.iter().all(|t| t.level != "advanced"));
            }
            let keys: Vec<i32> = days.keys().copied().collect();
            let mut sorted = keys.clone();
            sorted.sort_unstable();
            prop_assert_eq!(keys, sorted);
        }

        #[test]
        fn prop_total_calories_is_exact_sum(templates in prop::collection::vec(arb_meal(), 0..40)) {
            let meals = group_meals(templates.clone(), "vegan");
            let expected: i64 = templates
                .iter()
                .filter(|m| m.diet_type == "vegan" || m.diet_type == "standard")
                .map(|m| i64::from(m.calories.unwrap_or(0)))
                .sum();

            prop_assert_eq!(total_calories(meals.values().flatten()), expected);
        }
    }
}
