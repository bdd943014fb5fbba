pub mod axis;
pub mod calendar;
pub mod coords;
pub mod format;
pub mod geometry;
pub mod moving_average;
pub mod primitives;
pub mod range;
pub mod types;
pub mod window;

pub use axis::{PriceAxisLabels, price_axis_labels};
pub use calendar::TradingCalendar;
pub use coords::{IndexMapper, PriceMapper};
pub use range::{OhlcExtremes, PriceRange};
pub use types::{BarPoint, TimePoint, Viewport};
pub use window::ViewportWindow;
