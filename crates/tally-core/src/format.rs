//! Two-decimal amount formatting.

/// Format an amount with exactly two decimal places.
///
/// Rounds to the nearest cent using the exact binary value, so `1.005` becomes
/// `"1.00"`. Exact halfway values round away from zero (`0.125` becomes
/// `"0.13"`) and negative zero prints as `"0.00"`.
pub fn format_amount(value: f64) -> String {
    if value == 0.0 {
        return "0.00".to_string();
    }
    format_halfway(value).unwrap_or_else(|| format!("{value:.2}"))
}

/// Halfway between two cents is only representable as an odd multiple of 1/8.
///
/// Odd integers stop being representable at 2^53, so `eighths` fits a `u64`.
fn format_halfway(value: f64) -> Option<String> {
    let eighths = value.abs() * 8.0;
    if eighths.fract() != 0.0 || eighths % 2.0 == 0.0 {
        return None;
    }

    // k/8 units is 12.5k cents; k is odd, so round the .5 up.
    let cents = (25 * eighths as u64 as u128 + 1) / 2;
    let sign = if value < 0.0 { "-" } else { "" };
    Some(format!("{sign}{}.{:02}", cents / 100, cents % 100))
}
