use std::sync::Arc;

use axum::Router;
use chrono::NaiveDate;
use tempfile::TempDir;

use mastery_engine::config::{Config, EngineConfig};
use mastery_engine::mastery::{FixedClock, MasteryEngine};
use mastery_engine::routes::build_router;
use mastery_engine::state::AppState;
use mastery_engine::store::Store;

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    pub config: Config,
    _temp_dir: TempDir,
}

pub fn test_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, 2).expect("valid date")
}

pub fn test_config(sled_path: String) -> Config {
    Config {
        host: std::net::IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
        port: 3000,
        log_level: "info".to_string(),
        enable_file_logs: false,
        log_dir: "./logs".to_string(),
        sled_path,
        cors_origin: "http://localhost:5173".to_string(),
        engine: EngineConfig {
            profile_key: format!("test-profile-{}", uuid::Uuid::new_v4().simple()),
            flush_on_write: false,
            weak_threshold: 3.0,
        },
    }
}

pub async fn spawn_test_app_on(today: NaiveDate) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("tempdir");
    let sled_path = temp_dir.path().join("mastery-test.sled");

    // Built directly so parallel tests never race on process env vars
    let config = test_config(sled_path.to_string_lossy().to_string());

    let store = Arc::new(Store::open(&config.sled_path).expect("open store"));
    let engine = MasteryEngine::open(store.clone(), Arc::new(FixedClock(today)), &config.engine)
        .await
        .expect("open engine");

    let state = AppState::new(store, engine, &config);
    let app = build_router(state.clone());

    TestApp {
        app,
        state,
        config,
        _temp_dir: temp_dir,
    }
}

pub async fn spawn_test_app() -> TestApp {
    spawn_test_app_on(test_today()).await
}
