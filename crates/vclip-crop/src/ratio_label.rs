//! Human-readable aspect ratio labels for on-screen badges.
//!
//! Display only; nothing in the engine branches on these strings.

/// Common named ratios, checked first.
const NAMED_RATIOS: &[(u32, u32)] = &[
    (9, 16),
    (16, 9),
    (1, 1),
    (4, 3),
    (3, 4),
    (3, 2),
    (2, 3),
    (21, 9),
    (9, 8),
];

/// Relative tolerance for matching a named ratio.
const NAMED_TOLERANCE: f64 = 0.05;

/// Relative tolerance for a searched fraction.
const FRACTION_TOLERANCE: f64 = 0.02;

const MAX_DENOMINATOR: u32 = 20;

/// Format a width / height ratio as `"W:H"`.
///
/// Tries the named table (closest within 5%), then the first denominator in
/// 1..=20 whose rounded fraction is within 2%, then falls back to two
/// decimals. Non-finite or non-positive input formats as `"0.00"`.
pub fn format_ratio_label(ratio: f64) -> String {
    if !(ratio.is_finite() && ratio > 0.0) {
        return "0.00".to_string();
    }

    if let Some((w, h)) = closest_named(ratio) {
        return format!("{w}:{h}");
    }

    if let Some((w, h)) = simple_fraction(ratio) {
        return format!("{w}:{h}");
    }

    format!("{ratio:.2}")
}

fn closest_named(ratio: f64) -> Option<(u32, u32)> {
    NAMED_RATIOS
        .iter()
        .map(|&(w, h)| {
            let target = w as f64 / h as f64;
            ((w, h), (ratio - target).abs() / target)
        })
        .filter(|(_, error)| *error <= NAMED_TOLERANCE)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(pair, _)| pair)
}

fn simple_fraction(ratio: f64) -> Option<(u32, u32)> {
    (1..=MAX_DENOMINATOR).find_map(|denominator| {
        let numerator = (ratio * denominator as f64).round();
        if numerator < 1.0 || numerator > u32::MAX as f64 {
            return None;
        }
        let error = (numerator / denominator as f64 - ratio).abs() / ratio;
        if error > FRACTION_TOLERANCE {
            return None;
        }
        let numerator = numerator as u32;
        let divisor = gcd(numerator, denominator);
        Some((numerator / divisor, denominator / divisor))
    })
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}
