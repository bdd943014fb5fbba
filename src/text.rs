//! Text measurement seam.
//!
//! Chart math never depends on glyph metrics; only annotation placement does
//! (which side of an extreme bar a label lands on). Hosts with a real text
//! stack implement [`TextMetrics`] against it; everyone else gets a
//! deterministic monospace approximation.

use serde::{Deserialize, Serialize};

/// Measured pixel size of a rendered label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextSize {
    pub width: f64,
    pub height: f64,
}

/// Injected capability: text + font → pixel size.
pub trait TextMetrics {
    fn measure(&self, text: &str, font_size: f64, font_family: &str) -> TextSize;
}

/// Deterministic fallback measurer.
///
/// Approximates every glyph at a fixed fraction of the font size, which is
/// close enough for side-of-marker placement decisions and keeps tests free
/// of platform font stacks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceTextMetrics {
    pub advance_ratio: f64,
}

impl Default for MonospaceTextMetrics {
    fn default() -> Self {
        Self { advance_ratio: 0.6 }
    }
}

impl TextMetrics for MonospaceTextMetrics {
    fn measure(&self, text: &str, font_size: f64, _font_family: &str) -> TextSize {
        TextSize {
            width: text.chars().count() as f64 * font_size * self.advance_ratio,
            height: font_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{MonospaceTextMetrics, TextMetrics};

    #[test]
    fn monospace_width_scales_with_char_count() {
        let metrics = MonospaceTextMetrics::default();
        let narrow = metrics.measure("12.00", 12.0, "Arial");
        let wide = metrics.measure("1200.00", 12.0, "Arial");
        assert!(wide.width > narrow.width);
        assert_eq!(narrow.height, 12.0);
    }
}
