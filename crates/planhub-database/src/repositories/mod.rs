//! Concrete repository implementations.

pub mod action;

pub use action::ActionRepository;
