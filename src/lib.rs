//! timek-rs: intraday/K-line charting engine.
//!
//! This crate provides the numeric/geometric core of a stock chart: viewport
//! windowing over unbounded history, price/index coordinate mapping, axis
//! label derivation, crosshair resolution and tooltip payloads. Drawing and
//! layout are left to the hosting shell.

pub mod api;
pub mod core;
pub mod error;
pub mod history;
pub mod interaction;
pub mod telemetry;
pub mod text;

pub use api::{ChartEngine, ChartEngineConfig};
pub use error::{ChartError, ChartResult};
