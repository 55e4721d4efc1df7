//! Behavior shared by both backends, exercised through the facade

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use crate::testing::FakeRemote;
    use serde::{Deserialize, Serialize};
    use std::fmt;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::sync::Barrier;

    const MINUTE: Duration = Duration::from_secs(60);

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Profile {
        id: u64,
        name: String,
        roles: Vec<String>,
    }

    fn profile() -> Profile {
        Profile {
            id: 1,
            name: "Ada".to_string(),
            roles: vec!["admin".to_string()],
        }
    }

    /// One facade per mode
    fn facades() -> Vec<Cachify> {
        let conn: Arc<dyn RemoteStore> = Arc::new(FakeRemote::default());
        [Mode::Local, Mode::Remote]
            .into_iter()
            .map(|mode| Cachify::new(CachifyConfig::new(mode), Some(conn.clone())).unwrap())
            .collect()
    }

    #[derive(Debug, PartialEq)]
    enum AppError {
        Cache(String),
        UpstreamDown,
    }

    impl fmt::Display for AppError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                AppError::Cache(msg) => write!(f, "cache: {}", msg),
                AppError::UpstreamDown => write!(f, "upstream down"),
            }
        }
    }

    impl From<CachifyError> for AppError {
        fn from(err: CachifyError) -> Self {
            AppError::Cache(err.to_string())
        }
    }

    #[tokio::test]
    async fn test_set_then_get() {
        for cache in facades() {
            let backend = cache.instance();
            backend.set("profile:1", &profile(), MINUTE).await.unwrap();

            let got: Option<Profile> = backend.get("profile:1").await.unwrap();
            assert_eq!(got, Some(profile()), "{}", cache.mode());
        }
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        for cache in facades() {
            let backend = cache.instance();
            backend.set("k", &1, MINUTE).await.unwrap();
            backend.set("k", &2, MINUTE).await.unwrap();

            assert_eq!(backend.get::<i32>("k").await.unwrap(), Some(2));
        }
    }

    #[tokio::test]
    async fn test_missing_and_disposed_are_absent() {
        for cache in facades() {
            let backend = cache.instance();
            assert_eq!(backend.get::<String>("never").await.unwrap(), None);

            backend.set("k", "v", MINUTE).await.unwrap();
            backend.dispose("k").await.unwrap();
            assert_eq!(backend.get::<String>("k").await.unwrap(), None);
        }
    }

    #[tokio::test]
    async fn test_dispose_prefix() {
        for cache in facades() {
            let backend = cache.instance();
            for key in ["a:1", "a:2", "b:1"] {
                backend.set(key, key, MINUTE).await.unwrap();
            }

            backend.dispose_prefix("a:").await.unwrap();

            assert_eq!(backend.get::<String>("a:1").await.unwrap(), None);
            assert_eq!(backend.get::<String>("a:2").await.unwrap(), None);
            assert_eq!(
                backend.get::<String>("b:1").await.unwrap().as_deref(),
                Some("b:1")
            );
        }
    }

    #[tokio::test]
    async fn test_cachify_cold_then_warm() {
        for cache in facades() {
            let backend = cache.instance();
            let calls = &AtomicUsize::new(0);

            let first: Profile = backend
                .cachify(
                    "profile:1",
                    move || async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        Ok::<_, CachifyError>(profile())
                    },
                    MINUTE,
                )
                .await
                .unwrap();
            assert_eq!(calls.load(Ordering::SeqCst), 1);
            assert_eq!(backend.get::<Profile>("profile:1").await.unwrap(), Some(first.clone()));

            let second: Profile = backend
                .cachify(
                    "profile:1",
                    move || async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        Ok::<_, CachifyError>(Profile {
                            id: 2,
                            name: "other".to_string(),
                            roles: Vec::new(),
                        })
                    },
                    MINUTE,
                )
                .await
                .unwrap();

            assert_eq!(second, first);
            assert_eq!(calls.load(Ordering::SeqCst), 1);
        }
    }

    #[tokio::test]
    async fn test_cachify_failure_is_not_cached() {
        for cache in facades() {
            let backend = cache.instance();

            let err = backend
                .cachify::<u32, _, _, _>(
                    "flaky",
                    || async { Err(AppError::UpstreamDown) },
                    MINUTE,
                )
                .await
                .unwrap_err();
            // producer error comes back as-is
            assert_eq!(err, AppError::UpstreamDown);
            assert_eq!(backend.get::<u32>("flaky").await.unwrap(), None);

            let value = backend
                .cachify("flaky", || async { Ok::<_, AppError>(5u32) }, MINUTE)
                .await
                .unwrap();
            assert_eq!(value, 5);
        }
    }

    #[tokio::test]
    async fn test_cachify_validation_converts_into_caller_error() {
        for cache in facades() {
            let err = cache
                .instance()
                .cachify("", || async { Ok::<_, AppError>(1u8) }, MINUTE)
                .await
                .unwrap_err();

            assert_eq!(
                err,
                AppError::Cache("Invalid key. It should be a non-empty string.".to_string())
            );
        }
    }

    /// Concurrent misses on one key are not de-duplicated: every caller runs
    /// its own producer and the last write wins.
    #[tokio::test]
    async fn test_concurrent_misses_each_run_producer() {
        for cache in facades() {
            let backend = cache.instance();
            let calls = &AtomicUsize::new(0);
            // both producers must be running at once to get past the barrier
            let barrier = &Barrier::new(2);

            let producer = move |value: u32| {
                move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    barrier.wait().await;
                    Ok::<_, CachifyError>(value)
                }
            };

            let (a, b) = tokio::join!(
                backend.cachify("hot", producer(1), MINUTE),
                backend.cachify("hot", producer(2), MINUTE),
            );

            assert_eq!(a.unwrap(), 1);
            assert_eq!(b.unwrap(), 2);
            assert_eq!(calls.load(Ordering::SeqCst), 2);
            assert!(backend.get::<u32>("hot").await.unwrap().is_some());
        }
    }

    #[tokio::test]
    async fn test_json_roundtrip() {
        let doc = serde_json::json!({
            "id": 9,
            "title": "quarterly",
            "tags": ["a", "b"],
            "meta": {"draft": false, "score": 1.5, "owner": null}
        });

        for cache in facades() {
            let backend = cache.instance();
            backend.json_set("doc:9", &doc, MINUTE).await.unwrap();

            let got: Option<serde_json::Value> = backend.json_get("doc:9").await.unwrap();
            assert_eq!(got, Some(doc.clone()));

            let typed = backend.json_get::<Profile>("doc:9").await.unwrap_err();
            assert!(matches!(typed, CachifyError::Deserialization { .. }));
        }
    }

    /// Doubles whose shortest text form needs a correctly rounded parser
    #[tokio::test]
    async fn test_floats_survive_storage_bit_exact() {
        let mut floats = vec![1.0715660391465826e-75, -1.81996730402717e-179];
        let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
        while floats.len() < 5_000 {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let f = f64::from_bits(state);
            if f.is_finite() {
                floats.push(f);
            }
        }

        for cache in facades() {
            let backend = cache.instance();
            for f in &floats {
                let doc = serde_json::json!({ "f": f });
                backend.json_set("float", &doc, MINUTE).await.unwrap();
                let got: Option<serde_json::Value> = backend.json_get("float").await.unwrap();
                assert_eq!(got, Some(doc), "{} {:e}", cache.mode(), f);

                backend.set("float", f, MINUTE).await.unwrap();
                let got = backend.get::<f64>("float").await.unwrap();
                assert_eq!(got.map(f64::to_bits), Some(f.to_bits()), "{} {:e}", cache.mode(), f);
            }
        }
    }

    #[tokio::test]
    async fn test_invalid_input_rejected() {
        for cache in facades() {
            let backend = cache.instance();

            let err = backend.set("", "v", Duration::from_millis(100)).await.unwrap_err();
            assert!(err.is_invalid_argument());

            let err = backend.set("k", "v", Duration::ZERO).await.unwrap_err();
            assert!(err.is_invalid_argument());

            let err = backend.json_set("k", "v", Duration::ZERO).await.unwrap_err();
            assert!(err.is_invalid_argument());

            assert_eq!(backend.get::<String>("k").await.unwrap(), None);
        }
    }

    #[tokio::test]
    async fn test_debug_toggle_does_not_change_results() {
        for cache in facades() {
            let backend = cache.instance();
            backend.set_debug(true);
            backend.set("k", "v", MINUTE).await.unwrap();
            backend.set_debug(false);

            assert_eq!(
                backend.get::<String>("k").await.unwrap().as_deref(),
                Some("v")
            );
        }
    }
}
