//! # planhub-api
//!
//! HTTP API layer for PlanHub's action history engine, built on Axum.
//!
//! Provides the `/api/action-history` endpoints, the bearer-token auth
//! extractor, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;
pub mod token;

pub use app::run_server;
pub use error::ApiError;
pub use state::AppState;
