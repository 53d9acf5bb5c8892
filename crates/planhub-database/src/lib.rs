//! # planhub-database
//!
//! PostgreSQL connection management and the concrete action store
//! repository for PlanHub's action history engine.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
