//! Server state
//!
//! `ServerState` holds the configuration and the store handle; `Clone` is a
//! couple of `Arc` bumps. The store handle is created unconnected so the
//! HTTP server always comes up — if the store fails to open, `/api/*`
//! requests answer 503 until the process is restarted.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::Config;
use crate::db::DbService;

#[derive(Clone, Debug)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Embedded document store (SurrealDB)
    pub db: Surreal<Db>,
    /// Whether the store connection was established
    db_ready: Arc<AtomicBool>,
}

impl ServerState {
    /// Initialize the work directory and open the store.
    ///
    /// A store failure is logged, not fatal: requests are refused with 503
    /// instead (the per-request guard in `core::server`).
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db: Surreal<Db> = Surreal::init();
        let db_ready = Arc::new(AtomicBool::new(false));

        let db_path = config.database_dir().join("oakline.db");
        match DbService::connect(&db, &db_path).await {
            Ok(()) => db_ready.store(true, Ordering::SeqCst),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    "Database not connected; /api requests will answer 503"
                );
            }
        }

        Self {
            config: config.clone(),
            db,
            db_ready,
        }
    }

    /// Build a state around an already-connected store (tests).
    pub fn with_db(config: Config, db: Surreal<Db>) -> Self {
        Self {
            config,
            db,
            db_ready: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Build a state whose store never connected (tests for the 503 guard).
    pub fn with_disconnected_db(config: Config) -> Self {
        Self {
            config,
            db: Surreal::init(),
            db_ready: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn db_ready(&self) -> bool {
        self.db_ready.load(Ordering::SeqCst)
    }

    pub fn work_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.work_dir)
    }
}
