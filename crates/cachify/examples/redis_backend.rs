//! Mode switching with a caller-owned Redis connection

use cachify::prelude::*;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> std::result::Result<(), CachifyError> {
    tracing_subscriber::fmt::init();

    let redis = RedisConfig::from_env();
    println!("Connecting to Redis at {}", redis.url);

    let conn = match redis.connect().await {
        Ok(conn) => conn,
        Err(e) => {
            eprintln!("Failed to connect to Redis: {}", e);
            println!("Make sure Redis is running at 127.0.0.1:6379 or set REDIS_URL");
            return Ok(());
        }
    };

    let store: Arc<dyn RemoteStore> = Arc::new(RedisStore::new(conn));
    let mut cache = Cachify::new(CachifyConfig::new(Mode::Remote), Some(store))?;

    cache
        .instance()
        .set("example:hello", "world", Duration::from_secs(300))
        .await?;
    println!(
        "Remote: {:?}",
        cache.instance().get::<String>("example:hello").await?
    );

    cache.set_mode(Mode::Local)?;
    println!(
        "Local after switch: {:?}",
        cache.instance().get::<String>("example:hello").await?
    );

    cache.set_mode(Mode::Remote)?;
    cache.instance().dispose_prefix("example:").await?;
    println!(
        "Remote after dispose_prefix: {:?}",
        cache.instance().get::<String>("example:hello").await?
    );

    Ok(())
}
