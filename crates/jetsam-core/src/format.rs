//! Human-readable byte formatting in binary units.

const UNITS: [&str; 6] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB"];

/// Render a byte count with two decimal places, e.g. `1.50 GiB`.
#[must_use]
pub fn human_size(bytes: u64) -> String {
    human_size_with(bytes, 2)
}

/// Render a byte count with the requested number of decimal places.
///
/// Divides by 1024 until the value drops below the next unit, clamping at
/// PiB: values past the top of the table keep dividing no further and render
/// as however many PiB they are. Pure and idempotent; the same input always
/// yields the same string.
#[must_use]
pub fn human_size_with(bytes: u64, decimals: u8) -> String {
    let mut value = to_f64(bytes);
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let precision = usize::from(decimals);
    format!("{value:.precision$} {}", UNITS[unit])
}

const fn to_f64(value: u64) -> f64 {
    #[expect(
        clippy::cast_precision_loss,
        reason = "u64 to f64 conversion is required for human-facing size reporting"
    )]
    {
        value as f64
    }
}
