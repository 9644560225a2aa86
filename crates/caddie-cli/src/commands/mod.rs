pub mod chart;
pub mod dispatch;
pub mod distance;
pub mod ellipse;
pub mod import;
pub mod library;
pub mod overlay;
pub mod schema;
pub mod shared;
