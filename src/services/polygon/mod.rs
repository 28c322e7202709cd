//! Polygon.io REST clients for daily bars and news

pub mod news;
pub mod prices;

pub use news::PolygonNewsSource;
pub use prices::PolygonPriceSource;
