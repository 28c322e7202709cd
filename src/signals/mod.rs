//! Per-ticker signal evaluation: snapshot pass, trade plan, confidence.

pub mod plan;
pub mod scoring;
pub mod snapshot;

pub use plan::*;
pub use scoring::*;
pub use snapshot::*;
