//! Logistic growth model implementation.
//!
//! Model evaluation is kept as small, pure functions so that estimation and
//! plotting code can share it.

pub mod model;

pub use model::*;
