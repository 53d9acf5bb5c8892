//! # planhub-history
//!
//! PlanHub's undo/redo action history engine. The recorder appends
//! before/after snapshots of entity mutations to a bounded per-user log;
//! the replay engine applies a stored snapshot back onto its entity as a
//! sparse patch inside a single transaction.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod mutator;
pub mod recorder;
pub mod replay;
pub mod retention;

pub use context::RequestContext;
pub use mutator::{EntityMutator, MutatorRegistry};
pub use recorder::{ActionRecorder, RecordAction};
pub use replay::ReplayEngine;
pub use retention::RetentionPolicy;
