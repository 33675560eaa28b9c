const US_PER_MS: u64 = 1_000;
const BYTES_PER_MB: u128 = 1024 * 1024;
const THOUSANDTHS: u128 = 1_000;

/// Microseconds as milliseconds with three decimals, e.g. `12.345`.
#[must_use]
pub fn format_ms(us: u64) -> String {
    let whole = us.checked_div(US_PER_MS).unwrap_or(0);
    let frac = us.checked_rem(US_PER_MS).unwrap_or(0);
    format!("{whole}.{frac:03}")
}

/// Bytes as MiB with three decimals, e.g. `0.001`.
#[must_use]
pub fn format_mb(bytes: u64) -> String {
    let bytes = u128::from(bytes);
    let whole = bytes.checked_div(BYTES_PER_MB).unwrap_or(0);
    let frac = bytes
        .checked_rem(BYTES_PER_MB)
        .unwrap_or(0)
        .saturating_mul(THOUSANDTHS)
        .checked_div(BYTES_PER_MB)
        .unwrap_or(0);
    format!("{whole}.{frac:03}")
}
