//! Volatility indicators: ATR, close dispersion

pub mod atr;
pub mod dispersion;

pub use atr::*;
pub use dispersion::*;
