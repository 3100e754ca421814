//! Seed script for development. Populates a fresh database with sample activities.
//!
//! Usage: `cargo run --bin seed`
//!
//! Requires the `DATABASE_URL` environment variable (reads .env).

use chrono::{Duration, Utc};
use delivery_admin::db::{self, ActivityStore, PgActivityStore};
use delivery_admin::models::activity::{Metadata, NewActivity, TargetRole};
use serde_json::json;
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let db_url = std::env::var("DATABASE_URL")?;
    let pool = db::create_pool(&db_url, 5, std::time::Duration::from_secs(5)).await?;

    // Run migrations first
    db::migrate(&pool).await?;

    println!("=== Delivery Admin Seed Script ===");

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM activities")
        .fetch_one(&pool)
        .await?;
    if existing > 0 {
        println!("[skip] activities table already has {existing} rows");
        return Ok(());
    }

    let store = PgActivityStore::new(pool);
    let restaurants = [Uuid::new_v4(), Uuid::new_v4()];
    let mut inserted = 0;

    for activity in sample_activities(&restaurants) {
        store.insert(activity).await?;
        inserted += 1;
    }

    println!("[done] Inserted {inserted} activities");
    for id in restaurants {
        println!("       restaurant feed: /api/activities/restaurant/{id}");
    }
    println!("\n=== Seed complete! ===");

    store.close().await;
    Ok(())
}

fn metadata(value: serde_json::Value) -> Metadata {
    match value {
        serde_json::Value::Object(map) => map,
        _ => Metadata::new(),
    }
}

fn sample_activities(restaurants: &[Uuid; 2]) -> Vec<NewActivity> {
    let now = Utc::now();
    let admin = |kind: &str, title: &str, description: &str, minutes_ago: i64, meta| NewActivity {
        kind: kind.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        user_id: Some(Uuid::new_v4()),
        restaurant_id: None,
        target_role: TargetRole::Admin,
        metadata: metadata(meta),
        timestamp: now - Duration::minutes(minutes_ago),
    };
    let owner = |restaurant: Uuid, kind: &str, title: &str, description: &str, minutes_ago: i64| {
        NewActivity {
            kind: kind.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            user_id: None,
            restaurant_id: Some(restaurant),
            target_role: TargetRole::RestaurantOwner,
            metadata: Metadata::new(),
            timestamp: now - Duration::minutes(minutes_ago),
        }
    };

    vec![
        admin(
            "restaurant",
            "New restaurant registered",
            "Spice Garden submitted an application",
            5,
            json!({"status": "pending", "cuisine": "Indian"}),
        ),
        admin(
            "order",
            "Large order placed",
            "Order #1042 worth ₹4,250",
            12,
            json!({"orderId": 1042, "amount": 4250}),
        ),
        admin(
            "customer",
            "New customer signup",
            "A customer registered via the mobile app",
            30,
            json!({"app": "customer-app"}),
        ),
        admin(
            "payment",
            "Refund issued",
            "Refund processed for order #1019",
            55,
            json!({"orderId": 1019, "method": "upi"}),
        ),
        admin(
            "system",
            "Nightly backup finished",
            "Database backup completed without errors",
            240,
            json!({}),
        ),
        owner(restaurants[0], "order", "New order", "Order #1043 placed", 3),
        owner(restaurants[0], "review", "New review", "A customer left a 5 star review", 40),
        owner(restaurants[0], "menu", "Menu item unavailable", "Paneer Tikka marked sold out", 90),
        owner(restaurants[1], "order", "New order", "Order #1044 placed", 8),
        owner(restaurants[1], "payout", "Payout scheduled", "Weekly payout scheduled", 600),
    ]
}
