//! Volume indicators: A/D Line, relative volume, contraction

pub mod adl;
pub mod relative_volume;

pub use adl::*;
pub use relative_volume::*;
