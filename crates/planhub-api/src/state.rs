//! Application state shared across all handlers.

use std::sync::Arc;

use sqlx::PgPool;

use planhub_core::config::AppConfig;
use planhub_database::repositories::ActionRepository;
use planhub_history::mutator::MutatorRegistry;
use planhub_history::recorder::ActionRecorder;
use planhub_history::replay::ReplayEngine;
use planhub_history::retention::RetentionPolicy;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,
    /// Action store repository.
    pub action_repo: Arc<ActionRepository>,
    /// Entity mutator dispatch registry.
    pub registry: Arc<MutatorRegistry>,
    /// Action recorder service.
    pub recorder: Arc<ActionRecorder>,
    /// Undo/redo replay engine.
    pub replay_engine: Arc<ReplayEngine>,
}

impl AppState {
    /// Wire repositories and services from configuration and a pool.
    pub fn build(config: AppConfig, db_pool: PgPool) -> Self {
        let action_repo = Arc::new(ActionRepository::new(db_pool.clone()));
        let registry = Arc::new(MutatorRegistry::new());
        let retention = RetentionPolicy::new(config.history.retention_limit);

        let recorder = Arc::new(ActionRecorder::new(
            Arc::clone(&action_repo),
            Arc::clone(&registry),
            retention,
        ));
        let replay_engine = Arc::new(ReplayEngine::new(
            db_pool.clone(),
            Arc::clone(&action_repo),
            Arc::clone(&registry),
        ));

        Self {
            config: Arc::new(config),
            db_pool,
            action_repo,
            registry,
            recorder,
            replay_engine,
        }
    }
}
