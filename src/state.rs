use std::sync::Arc;
use std::time::Instant;

use tokio::sync::{Mutex, MutexGuard};

use crate::config::Config;
use crate::mastery::MasteryEngine;
use crate::store::Store;

#[derive(Clone)]
pub struct AppState {
    store: Arc<Store>,
    engine: Arc<Mutex<MasteryEngine>>,
    config: Arc<Config>,
    started_at: Instant,
}

impl AppState {
    pub fn new(store: Arc<Store>, engine: MasteryEngine, config: &Config) -> Self {
        Self {
            store,
            engine: Arc::new(Mutex::new(engine)),
            config: Arc::new(config.clone()),
            started_at: Instant::now(),
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Exclusive access to the engine. Requests touching the profile run one at a time.
    pub async fn engine(&self) -> MutexGuard<'_, MasteryEngine> {
        self.engine.lock().await
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
