//! # caddie-core
//!
//! Numerical engine behind the Caddie dispersion chart and map overlay.
//!
//! This crate turns a club's shot samples into render-ready geometry:
//! - Confidence ellipses fitted from the sample covariance ([`ellipse`])
//! - Closed boundary polylines sampled from an ellipse ([`contour`])
//! - The one affine transform every element of a frame is mapped through ([`transform`])
//! - Web-Mercator ground resolution per pixel ([`map_scale`]) and haversine distance ([`geo`])
//! - Meter/yard conversion ([`units`]) and seeded display jitter ([`jitter`])
//!
//! On top of those primitives sit the frame builders consumed by renderers:
//! the scatter chart ([`chart`]), the map overlay ([`overlay`]), the target
//! distance readout ([`readout`]) and per-club summary statistics ([`stats`]).
//!
//! Everything here is a pure function over immutable inputs. Nothing is
//! persisted, nothing touches the network, and no rendering technology is
//! assumed.

pub mod chart;
pub mod contour;
pub mod ellipse;
pub mod enums;
pub mod errors;
pub mod geo;
pub mod geometry;
pub mod jitter;
pub mod map_scale;
pub mod overlay;
pub mod readout;
pub mod shot;
pub mod stats;
pub mod transform;
pub mod units;

pub use errors::CoreError;
