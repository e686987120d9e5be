//! Catalog builders shared by the service unit tests

use crate::models::{Ad, MachineGuide, MealTemplate, NewUser, SubscriptionTier, User, WorkoutTemplate};
use crate::store::{ContentStore, InMemoryContentStore};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

pub fn workout(id: i64, goal: &str, level: &str, day: i32, title: &str) -> WorkoutTemplate {
    WorkoutTemplate {
        id,
        goal: goal.to_string(),
        level: level.to_string(),
        day,
        title: title.to_string(),
        description: Some(format!("{} session", title)),
        duration_minutes: Some(30),
        equipment: Some("Bodyweight".to_string()),
        primary_muscles: strings(&["Legs", "Core"]),
        instructions: strings(&["Warm up", "Work", "Cool down"]),
    }
}

pub fn meal(id: i64, goal: &str, diet_type: &str, meal_type: &str, calories: Option<i32>) -> MealTemplate {
    MealTemplate {
        id,
        goal: goal.to_string(),
        diet_type: diet_type.to_string(),
        meal_type: meal_type.to_string(),
        title: format!("{} {}", diet_type, meal_type),
        calories,
        protein: Some(20),
        carbs: Some(40),
        fats: Some(10),
        instructions: Some("Mix and serve".to_string()),
    }
}

pub fn machine_guide(id: i64, label: &str, machine_name: &str, aliases: &[&str]) -> MachineGuide {
    MachineGuide {
        id,
        label: label.to_string(),
        machine_name: machine_name.to_string(),
        primary_muscles: strings(&["Back"]),
        cues: strings(&["Neutral spine"]),
        instructions: strings(&["Set up", "Pull"]),
        aliases: strings(aliases),
    }
}

pub fn ad(id: i64, target_tier: &str) -> Ad {
    Ad {
        id,
        title: format!("Ad {}", id),
        body: "Try the new protein bar".to_string(),
        image_url: Some(format!("https://cdn.example.com/ads/{}.png", id)),
        cta_label: Some("Read more".to_string()),
        cta_url: Some("https://example.com".to_string()),
        target_tier: target_tier.to_string(),
    }
}

pub async fn user(store: &InMemoryContentStore, email: &str) -> User {
    store
        .create_user(
            NewUser {
                email: email.to_string(),
                password_hash: "$2b$04$dummy".to_string(),
                name: "Test".to_string(),
            },
            SubscriptionTier::AdSupported,
        )
        .await
        .unwrap()
}
