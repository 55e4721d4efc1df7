//! Cache-aside over the in-process backend

use cachify::prelude::*;
use std::time::Duration;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct User {
    id: u64,
    name: String,
    email: String,
}

async fn load_user(id: u64) -> std::result::Result<User, CachifyError> {
    println!("   (loading user {} from the database)", id);
    tokio::time::sleep(Duration::from_millis(50)).await;
    Ok(User {
        id,
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
    })
}

#[tokio::main]
async fn main() -> std::result::Result<(), CachifyError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cachify=info".into()),
        )
        .init();

    println!("=== cachify Local Example ===\n");

    let cache = Cachify::new(CachifyConfig::new(Mode::Local).debug(true), None)?;
    let backend = cache.instance();

    println!("First read (cold)...");
    let user: User = backend
        .cachify("user:123", || load_user(123), Duration::from_secs(300))
        .await?;
    println!("   Got: {} <{}>", user.name, user.email);

    println!("Second read (warm)...");
    let user: User = backend
        .cachify("user:123", || load_user(123), Duration::from_secs(300))
        .await?;
    println!("   Got: {} <{}>", user.name, user.email);

    backend
        .json_set("settings:123", &serde_json::json!({"theme": "dark"}), Duration::from_secs(60))
        .await?;
    let settings: Option<serde_json::Value> = backend.json_get("settings:123").await?;
    println!("\nSettings: {:?}", settings);

    backend.dispose_prefix("user:").await?;
    println!(
        "After dispose_prefix: {:?}",
        backend.get::<User>("user:123").await?
    );

    if let Some(local) = backend.as_local() {
        let stats = local.stats();
        println!("\nHits: {}  Misses: {}  Writes: {}", stats.hits, stats.misses, stats.writes);
    }

    Ok(())
}
