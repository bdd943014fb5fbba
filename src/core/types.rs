use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{datetime_to_unix_millis, decimal_to_f64};
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// One intraday sample of a continuous price curve.
///
/// Samples are ordered ascending by timestamp and treated as immutable once
/// handed to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimePoint {
    /// Exchange-local epoch milliseconds.
    pub timestamp: i64,
    pub price: f64,
    pub volume: f64,
    pub turnover: f64,
}

impl TimePoint {
    #[must_use]
    pub fn new(timestamp: i64, price: f64, volume: f64, turnover: f64) -> Self {
        Self {
            timestamp,
            price,
            volume,
            turnover,
        }
    }

    /// Converts strongly-typed temporal/decimal input into a sample.
    pub fn from_decimal_time(
        time: DateTime<Utc>,
        price: Decimal,
        volume: Decimal,
        turnover: Decimal,
    ) -> ChartResult<Self> {
        Ok(Self {
            timestamp: datetime_to_unix_millis(time),
            price: decimal_to_f64(price, "price")?,
            volume: decimal_to_f64(volume, "volume")?,
            turnover: decimal_to_f64(turnover, "turnover")?,
        })
    }
}

/// One OHLC record for a bar period (day/week/month).
///
/// Fields are assumed valid on the fast path
/// (`low <= min(open, close) <= max(open, close) <= high`); use
/// [`BarPoint::validated`] at the ingestion edge when the feed is untrusted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarPoint {
    /// Exchange-local epoch milliseconds.
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub turnover: f64,
    /// Tradable share count, when known; enables turnover-rate derivation.
    #[serde(default)]
    pub float_share: Option<f64>,
}

impl BarPoint {
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        timestamp: i64,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        turnover: f64,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
            turnover,
            float_share: None,
        }
    }

    #[must_use]
    pub fn with_float_share(mut self, float_share: f64) -> Self {
        self.float_share = Some(float_share);
        self
    }

    /// Builds a bar and enforces the OHLC invariants.
    #[allow(clippy::too_many_arguments)]
    pub fn validated(
        timestamp: i64,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        turnover: f64,
    ) -> ChartResult<Self> {
        if !open.is_finite() || !high.is_finite() || !low.is_finite() || !close.is_finite() {
            return Err(ChartError::InvalidData(
                "ohlc values must be finite".to_owned(),
            ));
        }

        if low > high {
            return Err(ChartError::InvalidData(
                "ohlc low must be <= high".to_owned(),
            ));
        }

        if open < low || open > high || close < low || close > high {
            return Err(ChartError::InvalidData(
                "ohlc open/close must be within low/high range".to_owned(),
            ));
        }

        Ok(Self::new(timestamp, open, high, low, close, volume, turnover))
    }

    /// Converts strongly-typed temporal/decimal input into a validated bar.
    #[allow(clippy::too_many_arguments)]
    pub fn from_decimal_time(
        time: DateTime<Utc>,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: Decimal,
        turnover: Decimal,
    ) -> ChartResult<Self> {
        Self::validated(
            datetime_to_unix_millis(time),
            decimal_to_f64(open, "open")?,
            decimal_to_f64(high, "high")?,
            decimal_to_f64(low, "low")?,
            decimal_to_f64(close, "close")?,
            decimal_to_f64(volume, "volume")?,
            decimal_to_f64(turnover, "turnover")?,
        )
    }

    /// Returns `true` when close price is greater than or equal to open price.
    #[must_use]
    pub fn is_bullish(self) -> bool {
        self.close >= self.open
    }
}
