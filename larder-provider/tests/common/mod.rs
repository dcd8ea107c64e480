//! Shared helpers for the live backend contract tests.

#![allow(dead_code)]

use std::env;
use std::sync::Arc;

use larder_provider::{
    BackendService, Food, ProviderConfig, ProviderKind, Subscription, create_service,
};

/// Returns early (skipping the test) when an environment variable is missing.
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("Skipping test: missing environment variable {}", $var);
                return;
            }
        )+
    };
}

/// Asserts that a `Result` is `Ok` and unwraps it (fails the test otherwise).
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// Environment variable for one configuration field, e.g. `LARDER_TEST_SUPABASE_URL`.
pub fn env_var(kind: ProviderKind, field: &str) -> String {
    format!("LARDER_TEST_{}_{field}", kind.as_str().to_uppercase())
}

/// Unique marker for records created by a test run.
pub fn generate_test_name() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}", &uuid.to_string()[..8])
}

pub fn test_food(name: &str) -> Food {
    Food {
        food_name: name.to_string(),
        category: "test".to_string(),
        quantity: 2.0,
        purchase_date: "2024-01-01".to_string(),
        expiry_date: "2024-01-15".to_string(),
        price: 3.5,
        notes: "integration-test".to_string(),
        created_at: Some(chrono::Utc::now()),
        updated_at: Some(chrono::Utc::now()),
        ..Default::default()
    }
}

pub fn test_subscription(name: &str) -> Subscription {
    Subscription {
        name: name.to_string(),
        price: 9.99,
        billing_cycle: "monthly".to_string(),
        start_date: "2024-01-01".to_string(),
        next_payment_date: "2024-02-01".to_string(),
        category: "test".to_string(),
        notes: "integration-test".to_string(),
        created_at: Some(chrono::Utc::now()),
        updated_at: Some(chrono::Utc::now()),
        ..Default::default()
    }
}

/// A service configured from `LARDER_TEST_<KIND>_*` variables.
pub struct TestContext {
    pub service: Arc<dyn BackendService>,
}

impl TestContext {
    pub fn from_env(kind: ProviderKind) -> Option<Self> {
        let read = |field: &str| env::var(env_var(kind, field)).unwrap_or_default();
        let config = ProviderConfig {
            url: env::var(env_var(kind, "URL")).ok()?,
            project_id: read("PROJECT_ID"),
            api_key: read("API_KEY"),
            database_id: read("DATABASE_ID"),
            food_collection: read("FOOD_COLLECTION"),
            subscription_collection: read("SUBSCRIPTION_COLLECTION"),
        };
        Some(Self {
            service: create_service(kind, config),
        })
    }

    /// Deletes every food created by earlier test runs.
    pub async fn cleanup_test_foods(&self) {
        if let Ok(foods) = self.service.get_all_foods().await {
            for food in foods.iter().filter(|f| f.food_name.starts_with("_test-")) {
                let _ = self.service.delete_food(&food.id).await;
            }
        }
    }
}
