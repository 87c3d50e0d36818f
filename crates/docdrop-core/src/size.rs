//! Human-readable file sizes with binary (1024-based) units.

/// Unit labels, indexed by power of 1024.
///
/// Extends past `GB` so every `u64` byte count has a unit: the largest
/// value, `u64::MAX`, is just under 16 `EB`.
const UNITS: [&str; 7] = ["Bytes", "KB", "MB", "GB", "TB", "PB", "EB"];

/// Format a byte count, e.g. `1536` -> `"1.5 KB"`.
///
/// The unit is the largest power of 1024 not exceeding `bytes`. The
/// magnitude is rounded half-up to two decimals and printed without
/// trailing zeros, so `1024` reads `"1 KB"` and `1_100_000` reads
/// `"1.05 MB"`. Zero is `"0 Bytes"`.
#[must_use]
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return format!("0 {}", UNITS[0]);
    }

    let index = unit_index(bytes);

    // Every power of 1024 up to 1024^6 is exact in an f64, and the
    // rounding to two decimals hides the precision lost converting
    // `bytes` itself.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap
    )]
    let scaled = bytes as f64 / 1024_f64.powi(index as i32);
    let rounded = (scaled * 100.0).round() / 100.0;

    format!("{rounded} {}", UNITS[index])
}

/// `floor(log1024(bytes))`, clamped to the unit table.
///
/// Computed from the bit length so exact powers of 1024 never land one
/// unit low through floating-point logarithm error.
const fn unit_index(bytes: u64) -> usize {
    let log2 = (u64::BITS - 1 - bytes.leading_zeros()) as usize;
    let index = log2 / 10;
    if index < UNITS.len() {
        index
    } else {
        UNITS.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_bytes() {
        assert_eq!(format_size(0), "0 Bytes");
    }

    #[test]
    fn below_one_kilobyte_stays_in_bytes() {
        assert_eq!(format_size(1), "1 Bytes");
        assert_eq!(format_size(1023), "1023 Bytes");
    }

    #[test]
    fn exact_powers_drop_the_fraction() {
        assert_eq!(format_size(1024), "1 KB");
        assert_eq!(format_size(1_048_576), "1 MB");
        assert_eq!(format_size(2_097_152), "2 MB");
        assert_eq!(format_size(1 << 30), "1 GB");
    }

    #[test]
    fn fractions_keep_up_to_two_decimals() {
        assert_eq!(format_size(1536), "1.5 KB");
        // 1_100_000 / 1024^2 = 1.049041...
        assert_eq!(format_size(1_100_000), "1.05 MB");
        // 1234 / 1024 = 1.205078...
        assert_eq!(format_size(1234), "1.21 KB");
    }

    #[test]
    fn rounding_can_reach_the_next_integer_without_changing_unit() {
        // 1047552 / 1024 = 1023.0 and 1048575 / 1024 = 1023.999...
        assert_eq!(format_size(1_048_575), "1024 KB");
    }

    #[test]
    fn terabytes_and_beyond_have_units() {
        assert_eq!(format_size(1 << 40), "1 TB");
        assert_eq!(format_size(1 << 50), "1 PB");
        assert_eq!(format_size(1 << 60), "1 EB");
        assert_eq!(format_size(u64::MAX), "16 EB");
    }

    #[test]
    fn unit_index_matches_powers_of_1024() {
        assert_eq!(unit_index(1), 0);
        assert_eq!(unit_index(1023), 0);
        assert_eq!(unit_index(1024), 1);
        assert_eq!(unit_index((1 << 20) - 1), 1);
        assert_eq!(unit_index(1 << 20), 2);
        assert_eq!(unit_index(u64::MAX), 6);
    }
}
