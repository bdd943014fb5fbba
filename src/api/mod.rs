mod data_controller;
mod engine;
mod engine_config;
mod frame;
mod pointer_controller;
mod tooltip;
mod wheel_controller;

pub use engine::{ChartEngine, MaValue};
pub use engine_config::{ChartEngineConfig, ChartMode, RiseFallPalette};
pub use frame::ChartFrame;
pub use tooltip::{TooltipRow, Trend};
