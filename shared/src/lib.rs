//! Shared types and pipeline for the Univer tomato trial dashboard
//!
//! This crate holds everything the dashboard computes: variety
//! classification, dataset reshaping, breeder grouping, access filtering,
//! cumulative aggregation, panel selection state and the comparative
//! statistics. It is used by the native loader and by the WASM bindings.

pub mod access;
pub mod cumulative;
pub mod error;
pub mod grouping;
pub mod models;
pub mod panel;
pub mod series;
pub mod stats;
pub mod transform;
pub mod types;
pub mod validation;
pub mod view;

pub use access::*;
pub use cumulative::*;
pub use error::*;
pub use grouping::*;
pub use models::*;
pub use panel::*;
pub use series::*;
pub use stats::*;
pub use transform::*;
pub use types::*;
pub use validation::*;
pub use view::*;
