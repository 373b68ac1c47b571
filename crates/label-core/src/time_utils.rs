use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::warn;

// ── System timezone detection ─────────────────────────────────────────────────

/// Detect the IANA timezone name of the running system.
///
/// Uses the `iana-time-zone` crate directly. Falls back to `"UTC"` if
/// detection fails.
pub fn get_system_timezone() -> String {
    iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string())
}

// ── TimezoneHandler ───────────────────────────────────────────────────────────

/// Converts annotation timestamps into the operator's display timezone.
pub struct TimezoneHandler {
    default_tz: Tz,
}

impl TimezoneHandler {
    /// Create a handler with the given IANA timezone name as the default.
    ///
    /// If `tz_name` is not a recognised IANA timezone, falls back to UTC
    /// and logs a warning.
    pub fn new(tz_name: &str) -> Self {
        let tz = tz_name.parse::<Tz>().unwrap_or_else(|_| {
            warn!(
                "TimezoneHandler: unrecognised timezone \"{}\", falling back to UTC",
                tz_name
            );
            Tz::UTC
        });
        Self { default_tz: tz }
    }

    /// Validate that `tz_name` is a recognised IANA timezone identifier.
    pub fn validate_timezone(tz_name: &str) -> bool {
        tz_name.parse::<Tz>().is_ok()
    }

    /// Convert a UTC [`DateTime`] into the handler's display timezone.
    pub fn to_local(&self, dt: DateTime<Utc>) -> DateTime<Tz> {
        dt.with_timezone(&self.default_tz)
    }

    /// Format a UTC [`DateTime`] for display in the handler's timezone.
    ///
    /// * `twelve_hour = true`  → `"2024-06-01 02:30 PM"`.
    /// * `twelve_hour = false` → `"2024-06-01 14:30"`.
    pub fn format_local(&self, dt: DateTime<Utc>, twelve_hour: bool) -> String {
        let local = self.to_local(dt);
        if twelve_hour {
            local.format("%Y-%m-%d %I:%M %p").to_string()
        } else {
            local.format("%Y-%m-%d %H:%M").to_string()
        }
    }

    /// Expose the configured display timezone.
    pub fn default_tz(&self) -> Tz {
        self.default_tz
    }
}

// ── 12-hour / 24-hour format detection ───────────────────────────────────────

/// IANA country codes whose users conventionally use 12-hour clock format.
const TWELVE_HOUR_COUNTRIES: &[&str] = &[
    "US", "CA", "AU", "NZ", "PH", "IN", "EG", "SA", "AE", "PK", "BD", "MY", "MX", "CO",
];

/// Decide whether to use 12-hour clock display.
///
/// Priority:
/// 1. `explicit` `"12h"` → `true`, `"24h"` → `false`.
/// 2. Country derived from `timezone` (e.g. `"America/New_York"` → `"US"`).
/// 3. Default: 24-hour.
pub fn detect_time_format(timezone: Option<&str>, explicit: Option<&str>) -> bool {
    if let Some(fmt) = explicit {
        match fmt.to_lowercase().as_str() {
            "12h" => return true,
            "24h" => return false,
            _ => {} // fall through
        }
    }

    let tz_to_check = timezone
        .map(|s| s.to_string())
        .unwrap_or_else(get_system_timezone);

    if let Some(country) = country_from_timezone(&tz_to_check) {
        return TWELVE_HOUR_COUNTRIES.contains(&country);
    }

    false
}

/// Heuristic: map a standard IANA timezone string such as
/// `"America/New_York"` or `"Australia/Sydney"` to a 2-letter country code.
fn country_from_timezone(tz: &str) -> Option<&'static str> {
    let lower = tz.to_lowercase();

    if lower.starts_with("america/") {
        const CA_CITIES: &[&str] = &[
            "toronto",
            "vancouver",
            "montreal",
            "edmonton",
            "winnipeg",
            "halifax",
            "regina",
            "st_johns",
        ];
        let city = lower.trim_start_matches("america/");
        if CA_CITIES.contains(&city) {
            return Some("CA");
        }
        if city == "mexico_city" {
            return Some("MX");
        }
        if city == "bogota" {
            return Some("CO");
        }
        return Some("US");
    }

    if lower.starts_with("australia/") {
        return Some("AU");
    }
    if lower.starts_with("pacific/auckland") || lower.starts_with("pacific/chatham") {
        return Some("NZ");
    }
    if lower.starts_with("asia/manila") {
        return Some("PH");
    }
    if lower.starts_with("asia/kolkata") || lower.starts_with("asia/calcutta") {
        return Some("IN");
    }
    if lower.starts_with("asia/karachi") {
        return Some("PK");
    }
    if lower.starts_with("asia/dhaka") {
        return Some("BD");
    }
    if lower.starts_with("asia/kuala_lumpur") || lower.starts_with("asia/kuching") {
        return Some("MY");
    }
    if lower.starts_with("africa/cairo") {
        return Some("EG");
    }
    if lower.starts_with("asia/riyadh") {
        return Some("SA");
    }
    if lower.starts_with("asia/dubai") {
        return Some("AE");
    }

    None
}

// ── Tests ─────────────────────────────────────────────────────────────────────
