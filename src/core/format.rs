//! Number formatting shared by axis labels and tooltip payloads.

/// Rounds to two decimals, the precision every price label carries.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Fixed two-decimal rendering used for prices and averages.
#[must_use]
pub fn fixed2(value: f64) -> String {
    format!("{value:.2}")
}

/// Two-decimal rendering with an explicit sign for positive values.
#[must_use]
pub fn signed_fixed2(value: f64) -> String {
    if value > 0.0 {
        format!("+{value:.2}")
    } else {
        format!("{value:.2}")
    }
}

/// Signed percentage of `price` against `base`, e.g. `+1.25%`.
///
/// Returns `None` when `base` is not a usable divisor; callers render an
/// empty cell instead of a bogus ratio.
#[must_use]
pub fn amplitude_percent(price: f64, base: f64) -> Option<String> {
    if !base.is_finite() || base <= 0.0 || !price.is_finite() {
        return None;
    }

    let percent = (price - base) / base * 100.0;
    Some(format!("{}%", signed_fixed2(percent)))
}

/// Compacts large magnitudes into `K`/`M`/`B` units, trimming a bare `.00`.
#[must_use]
pub fn format_compact(value: f64) -> String {
    let (scaled, unit) = if value >= 1e9 {
        (value / 1e9, "B")
    } else if value >= 1e6 {
        (value / 1e6, "M")
    } else if value >= 1e3 {
        (value / 1e3, "K")
    } else {
        return trim_exact_decimals(&format!("{value:.2}")).to_owned();
    };

    format!("{}{unit}", trim_exact_decimals(&format!("{scaled:.2}")))
}

fn trim_exact_decimals(rendered: &str) -> &str {
    rendered.strip_suffix(".00").unwrap_or(rendered)
}
