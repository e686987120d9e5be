#![allow(dead_code)]

use std::sync::{Arc, Once};

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use fitness_coach::api::routes::create_routes;
use fitness_coach::config::DatabaseConfig;
use fitness_coach::models::{Ad, MachineGuide, MealTemplate, NewUser, SubscriptionTier, User, WorkoutTemplate};
use fitness_coach::store::{ContentStore, InMemoryContentStore, PgContentStore};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::PgPool;
use tower::ServiceExt;

static INIT: Once = Once::new();

/// Cheapest cost bcrypt accepts
pub const TEST_BCRYPT_COST: u32 = 4;

/// Initialize test logging
pub fn init_test_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .init();
    });
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

/// Catalog fixtures
pub struct Catalog;

impl Catalog {
    pub fn workouts() -> Vec<WorkoutTemplate> {
        let workout = |id: i64, level: &str, day: i32, title: &str| WorkoutTemplate {
            id,
            goal: "lose_weight".to_string(),
            level: level.to_string(),
            day,
            title: title.to_string(),
            description: Some("Conditioning focused circuit".to_string()),
            duration_minutes: Some(30),
            equipment: Some("Bodyweight".to_string()),
            primary_muscles: strings(&["Legs", "Core", "Shoulders"]),
            instructions: strings(&["Jumping jacks for 45 seconds", "Air squats", "Mountain climbers"]),
        };

        vec![
            workout(1, "beginner", 1, "Full body circuit"),
            workout(2, "beginner", 2, "Treadmill intervals"),
            workout(3, "all", 3, "Mobility flow"),
            workout(4, "advanced", 1, "Sprint ladder"),
        ]
    }

    pub fn meals() -> Vec<MealTemplate> {
        let meal = |id: i64, diet_type: &str, meal_type: &str, calories: Option<i32>| MealTemplate {
            id,
            goal: "lose_weight".to_string(),
            diet_type: diet_type.to_string(),
            meal_type: meal_type.to_string(),
            title: format!("{} {}", diet_type, meal_type),
            calories,
            protein: Some(25),
            carbs: Some(30),
            fats: Some(12),
            instructions: Some("Combine and serve".to_string()),
        };

        vec![
            meal(1, "standard", "breakfast", Some(320)),
            meal(2, "vegetarian", "lunch", Some(480)),
            meal(3, "standard", "dinner", None),
            meal(4, "vegan", "dinner", Some(600)),
        ]
    }

    pub fn machine_guides() -> Vec<MachineGuide> {
        vec![
            MachineGuide {
                id: 1,
                label: "rowing_machine".to_string(),
                machine_name: "Rowing machine".to_string(),
                primary_muscles: strings(&["Back", "Legs", "Arms"]),
                cues: strings(&["Drive with the legs", "Keep the back straight"]),
                instructions: strings(&["Strap in the feet", "Push with the legs", "Pull the handle to the ribs"]),
                aliases: strings(&["rower", "row machine", "rodd"]),
            },
            MachineGuide {
                id: 2,
                label: "leg_press".to_string(),
                machine_name: "Leg press".to_string(),
                primary_muscles: strings(&["Quadriceps", "Glutes"]),
                cues: strings(&["Knees track over toes"]),
                instructions: strings(&["Place feet shoulder width", "Lower with control", "Press up"]),
                aliases: strings(&["benpress"]),
            },
        ]
    }

    pub fn ads() -> Vec<Ad> {
        let ad = |id: i64, target_tier: &str| Ad {
            id,
            title: format!("Offer {}", id),
            body: "Fuel your training".to_string(),
            image_url: None,
            cta_label: Some("Read more".to_string()),
            cta_url: Some("https://example.com/offer".to_string()),
            target_tier: target_tier.to_string(),
        };

        vec![ad(1, "ad-supported"), ad(2, "all"), ad(3, "premium")]
    }
}

/// In-memory store loaded with the fixture catalog, plus a router over it
pub struct TestApp {
    pub store: Arc<InMemoryContentStore>,
    pub router: Router,
}

impl TestApp {
    pub async fn new() -> Self {
        init_test_logging();

        let store = Arc::new(InMemoryContentStore::new());
        store
            .load_catalog(
                Catalog::workouts(),
                Catalog::meals(),
                Catalog::machine_guides(),
                Catalog::ads(),
            )
            .await;

        let router = create_routes(store.clone(), TEST_BCRYPT_COST);
        Self { store, router }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json");

        let request = match body {
            Some(body) => builder.body(Body::from(body.to_string())).unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    /// Register a user and return its id
    pub async fn register(&self, email: &str) -> i64 {
        let (status, body) = self
            .post(
                "/api/users",
                serde_json::json!({ "email": email, "password": "hemligt", "name": "Test" }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "registration failed: {}", body);
        body["user_id"].as_i64().unwrap()
    }
}

/// PostgreSQL-backed store for tests run with `--ignored` against `DATABASE_URL`.
///
/// Tables are shared between tests, so every fixture gets a unique suffix
/// instead of relying on a clean database.
pub struct TestDatabase {
    pub pool: PgPool,
    pub store: Arc<PgContentStore>,
}

impl TestDatabase {
    pub async fn new() -> Self {
        init_test_logging();

        let config = DatabaseConfig::from_env().expect("valid database configuration");
        let pool = config
            .create_pool()
            .await
            .expect("PostgreSQL reachable at DATABASE_URL");
        let store = PgContentStore::new(pool.clone());
        store.run_migrations().await.expect("migrations apply");

        Self {
            pool,
            store: Arc::new(store),
        }
    }

    pub fn unique(prefix: &str) -> String {
        format!("{}_{}_{}", prefix, chrono::Utc::now().timestamp_micros(), rand::random::<u32>())
    }

    pub async fn create_user(&self, tier: SubscriptionTier) -> User {
        let new_user = NewUser {
            email: format!("{}@example.com", Self::unique("user")),
            password_hash: "$2b$04$dummy".to_string(),
            name: "Test".to_string(),
        };
        self.store.create_user(new_user, tier).await.unwrap()
    }

    pub async fn insert_workout(&self, goal: &str, level: &str, day: i32, title: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO workouts (goal, level, day, title, primary_muscles, instructions)
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
        )
        .bind(goal)
        .bind(level)
        .bind(day)
        .bind(title)
        .bind(Json(vec!["Legs", "Core"]))
        .bind(Json(vec!["Warm up", "Work", "Cool down"]))
        .fetch_one(&self.pool)
        .await
        .unwrap()
    }

    pub async fn insert_machine_guide(&self, label: &str, cues: &[&str], aliases: &[&str]) -> i64 {
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO machine_guides (label, machine_name, primary_muscles, cues, instructions, aliases)
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
        )
        .bind(label)
        .bind(format!("Machine {}", label))
        .bind(Json(vec!["Back"]))
        .bind(Json(cues))
        .bind(Json(vec!["Set up", "Pull"]))
        .bind(Json(aliases))
        .fetch_one(&self.pool)
        .await
        .unwrap()
    }

    pub async fn insert_ad(&self, target_tier: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO ads (title, body, target_tier) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(Self::unique("ad"))
        .bind("Fuel your training")
        .bind(target_tier)
        .fetch_one(&self.pool)
        .await
        .unwrap()
    }

    pub async fn impression_count(&self, user_id: i64) -> i64 {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM user_ad_impressions WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }
}
