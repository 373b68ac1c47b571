/// Format a count with thousands separators.
///
/// # Examples
///
/// ```
/// use label_core::formatting::format_count;
///
/// assert_eq!(format_count(0), "0");
/// assert_eq!(format_count(1234), "1,234");
/// assert_eq!(format_count(1234567), "1,234,567");
/// ```
pub fn format_count(value: usize) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Format a coordinate pair as hemisphere-suffixed decimal degrees.
///
/// # Examples
///
/// ```
/// use label_core::formatting::format_coord;
///
/// assert_eq!(format_coord(40.7128, -74.0060), "40.7128°N, 74.0060°W");
/// assert_eq!(format_coord(-33.8688, 151.2093), "33.8688°S, 151.2093°E");
/// ```
pub fn format_coord(lat: f64, lon: f64) -> String {
    let ns = if lat < 0.0 { 'S' } else { 'N' };
    let ew = if lon < 0.0 { 'W' } else { 'E' };
    format!("{:.4}°{}, {:.4}°{}", lat.abs(), ns, lon.abs(), ew)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── format_count ──────────────────────────────────────────────────────

    #[test]
    fn test_format_count_small() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(7), "7");
        assert_eq!(format_count(999), "999");
    }

    #[test]
    fn test_format_count_grouping() {
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(12_345), "12,345");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    // ── format_coord ──────────────────────────────────────────────────────

    #[test]
    fn test_format_coord_northeast() {
        assert_eq!(format_coord(41.8781, 87.6298), "41.8781°N, 87.6298°E");
    }

    #[test]
    fn test_format_coord_southwest() {
        assert_eq!(format_coord(-13.1631, -72.5450), "13.1631°S, 72.5450°W");
    }

    #[test]
    fn test_format_coord_origin_is_north_east() {
        assert_eq!(format_coord(0.0, 0.0), "0.0000°N, 0.0000°E");
    }

    #[test]
    fn test_format_coord_rounds_to_four_places() {
        assert_eq!(format_coord(40.712845, -74.005974), "40.7128°N, 74.0060°W");
    }
}
