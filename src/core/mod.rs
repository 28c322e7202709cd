//! Application wiring and the HTTP surface

pub mod bootstrap;
pub mod http;

pub use bootstrap::*;
pub use http::*;
