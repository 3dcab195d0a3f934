//! Display formatting for the dashboard.
//!
//! Every function in this module maps a raw scalar (amount, date, byte count,
//! duration, phone number, name) to a display string. None of them fail: missing
//! or malformed input falls back to a fixed placeholder so that a single bad
//! field never breaks a card or a table row.
//!
//! ## Locale handling
//!
//! Currency output follows the configured [`Locale`]:
//!
//! - **en-IN** (default): lakh grouping, `₹1,23,456.78`
//! - **en-US**: thousands grouping, `$1,234.56`
//! - **de-DE**: dot grouping, comma decimals, trailing symbol, `1.234,56 €`
//!
//! Locale-independent helpers (durations, file sizes, abbreviations, phone
//! numbers, names) are free functions.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Shown instead of a currency string when the amount is absent or not a number
pub const NO_AMOUNT_PLACEHOLDER: &str = "No amount";
/// Shown when a date field is absent
pub const MISSING_DATE: &str = "N/A";
/// Shown when a date field is present but cannot be parsed
pub const INVALID_DATE: &str = "Invalid Date";

const FILE_SIZE_UNITS: [&str; 9] = ["Bytes", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    #[serde(rename = "en-IN")]
    EnIn,
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "de-DE")]
    DeDe,
}

impl Locale {
    pub fn default_currency_symbol(&self) -> &'static str {
        match self {
            Locale::EnIn => "₹",
            Locale::EnUs => "$",
            Locale::DeDe => "€",
        }
    }

    fn group_separator(&self) -> char {
        match self {
            Locale::EnIn | Locale::EnUs => ',',
            Locale::DeDe => '.',
        }
    }

    fn decimal_separator(&self) -> char {
        match self {
            Locale::EnIn | Locale::EnUs => '.',
            Locale::DeDe => ',',
        }
    }

    fn symbol_after_amount(&self) -> bool {
        matches!(self, Locale::DeDe)
    }
}

/// Date rendering variants
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DateStyle {
    Short,    // "Jan 15, 2024"
    Long,     // "Monday, January 15, 2024"
    Time,     // "2:30 PM"
    DateTime, // "Jan 15, 2024, 2:30 PM"
    Iso,      // "2024-01-15"
}

/// Configuration for locale-dependent formatting
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FormatConfig {
    pub locale: Locale,
    /// Overrides the locale's currency symbol when set
    pub currency_symbol: Option<String>,
    pub currency_decimals: u8,
    pub percentage_decimals: u8,
    pub file_size_decimals: u8,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            locale: Locale::EnIn,
            currency_symbol: None,
            currency_decimals: 2,
            percentage_decimals: 1,
            file_size_decimals: 2,
        }
    }
}

/// Locale-aware formatter for amounts and dates
#[derive(Debug, Clone, Default)]
pub struct Formatter {
    config: FormatConfig,
}

impl Formatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: FormatConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FormatConfig {
        &self.config
    }

    fn currency_symbol(&self) -> &str {
        self.config
            .currency_symbol
            .as_deref()
            .unwrap_or_else(|| self.config.locale.default_currency_symbol())
    }

    /// Format an amount as a currency string, e.g. "₹1,23,456.78"
    pub fn format_currency(&self, amount: Option<f64>) -> String {
        let Some(amount) = amount.filter(|value| value.is_finite()) else {
            return NO_AMOUNT_PLACEHOLDER.to_string();
        };

        let locale = self.config.locale;
        let fixed = format!("{:.*}", self.config.currency_decimals as usize, amount.abs());
        let (integer_digits, fraction_digits) = match fixed.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (fixed.as_str(), None),
        };

        let mut number = group_integer_digits(integer_digits, locale);
        if let Some(fraction) = fraction_digits {
            number.push(locale.decimal_separator());
            number.push_str(fraction);
        }

        // "-0.00" reads as a glitch; only show the sign when a digit survives rounding
        let is_negative = amount < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0');
        let sign = if is_negative { "-" } else { "" };

        if locale.symbol_after_amount() {
            format!("{}{} {}", sign, number, self.currency_symbol())
        } else {
            format!("{}{}{}", sign, self.currency_symbol(), number)
        }
    }

    /// Format a raw amount string ("1,200", "₹ 45.5") as currency
    pub fn format_currency_str(&self, raw: &str) -> String {
        self.format_currency(parse_amount(raw))
    }

    pub fn format_percentage(&self, value: Option<f64>) -> String {
        format_percentage(value, self.config.percentage_decimals)
    }

    pub fn format_file_size(&self, bytes: u64) -> String {
        format_file_size(bytes, self.config.file_size_decimals)
    }

    /// Format a date string in the requested style
    pub fn format_date(&self, value: Option<&str>, style: DateStyle) -> String {
        let Some(raw) = value.map(str::trim).filter(|raw| !raw.is_empty()) else {
            return MISSING_DATE.to_string();
        };
        let Some(datetime) = parse_datetime(raw) else {
            return INVALID_DATE.to_string();
        };

        let pattern = match style {
            DateStyle::Short => "%b %-d, %Y",
            DateStyle::Long => "%A, %B %-d, %Y",
            DateStyle::Time => "%-I:%M %p",
            DateStyle::DateTime => "%b %-d, %Y, %-I:%M %p",
            DateStyle::Iso => "%Y-%m-%d",
        };
        datetime.format(pattern).to_string()
    }

    /// Format a date relative to `now`, e.g. "3 hours ago"
    pub fn format_relative(&self, value: Option<&str>, now: DateTime<Utc>) -> String {
        let Some(raw) = value.map(str::trim).filter(|raw| !raw.is_empty()) else {
            return MISSING_DATE.to_string();
        };
        let Some(instant) = parse_instant(raw) else {
            return INVALID_DATE.to_string();
        };

        let elapsed = now.signed_duration_since(instant).num_seconds();
        let in_future = elapsed < 0;
        let seconds = elapsed.unsigned_abs();

        if seconds < 60 {
            return "just now".to_string();
        }

        let minutes = seconds / 60;
        let hours = minutes / 60;
        let days = hours / 24;
        let weeks = days / 7;
        let months = days / 30;

        let (count, unit) = if minutes < 60 {
            (minutes, "minute")
        } else if hours < 24 {
            (hours, "hour")
        } else if days < 7 {
            (days, "day")
        } else if weeks < 4 {
            (weeks, "week")
        } else if months < 12 {
            (months.max(1), "month")
        } else {
            ((days / 365).max(1), "year")
        };

        let plural = if count == 1 { "" } else { "s" };
        if in_future {
            format!("in {} {}{}", count, unit, plural)
        } else {
            format!("{} {}{} ago", count, unit, plural)
        }
    }
}

/// Parse a date or timestamp string into its wall-clock time.
///
/// Accepts RFC 3339, `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM[:SS[.fff]]` and the same
/// with a space separator.
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.naive_local());
    }

    const NAIVE_PATTERNS: [&str; 6] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    for pattern in NAIVE_PATTERNS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, pattern) {
            return Some(datetime);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Parse a date or timestamp string into an absolute instant. Values without
/// an offset are taken as UTC.
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw.trim()) {
        return Some(datetime.with_timezone(&Utc));
    }
    parse_datetime(raw).map(|naive| naive.and_utc())
}

/// Clean and parse a user-entered or API-provided amount. Currency symbols,
/// grouping commas and spaces are ignored.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches("Rs.")
        .trim_start_matches("Rs")
        .chars()
        .filter(|c| !matches!(c, '₹' | '$' | '€' | ',' | ' '))
        .collect();

    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Format a ratio already expressed in percent, e.g. `12.345` -> "12.3%"
pub fn format_percentage(value: Option<f64>, decimals: u8) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(value) => format!("{:.*}%", decimals as usize, value),
        None => "0%".to_string(),
    }
}

/// Format a byte count with the largest unit whose scaled value is at least 1
pub fn format_file_size(bytes: u64, decimals: u8) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit_index = 0;
    while value >= 1024.0 && unit_index < FILE_SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit_index += 1;
    }

    let fixed = format!("{:.*}", decimals as usize, value);
    format!("{} {}", trim_trailing_zeros(&fixed), FILE_SIZE_UNITS[unit_index])
}

/// Compact duration: "1h 1m", "2m 5s", "59s"
pub fn format_duration(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        if minutes > 0 {
            format!("{}h {}m", hours, minutes)
        } else {
            format!("{}h", hours)
        }
    } else if minutes > 0 {
        if seconds > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}m", minutes)
        }
    } else {
        format!("{}s", seconds)
    }
}

/// Abbreviate large numbers: 1500 -> "1.5K", 2_000_000 -> "2.0M"
pub fn abbreviate_number(value: f64, decimals: u8) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }

    let magnitude = value.abs();
    let (scaled, suffix) = if magnitude >= 1e9 {
        (value / 1e9, "B")
    } else if magnitude >= 1e6 {
        (value / 1e6, "M")
    } else if magnitude >= 1e3 {
        (value / 1e3, "K")
    } else {
        let fixed = format!("{:.*}", decimals as usize, value);
        return trim_trailing_zeros(&fixed);
    };

    format!("{:.*}{}", decimals as usize, scaled, suffix)
}

/// Normalize a phone number. Ten digit local numbers become "98765 43210",
/// twelve digit numbers with the 91 country code become "+91 98765 43210".
/// Anything else is returned unchanged.
pub fn format_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

    match digits.len() {
        10 => format!("{} {}", &digits[..5], &digits[5..]),
        12 if digits.starts_with("91") => format!("+91 {} {}", &digits[2..7], &digits[7..]),
        _ => raw.to_string(),
    }
}

/// Title-case every whitespace-separated token: "aNIL kumar" -> "Anil Kumar"
pub fn format_name(raw: &str) -> String {
    raw.split_whitespace()
        .map(|token| {
            let mut chars = token.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn group_integer_digits(digits: &str, locale: Locale) -> String {
    let separator = locale.group_separator();
    let len = digits.len();
    if len <= 3 {
        return digits.to_string();
    }

    let (head, last_three) = digits.split_at(len - 3);
    let group_size = match locale {
        Locale::EnIn => 2,
        Locale::EnUs | Locale::DeDe => 3,
    };

    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(group_size);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    groups.push(last_three);

    groups.join(&separator.to_string())
}

fn trim_trailing_zeros(fixed: &str) -> String {
    if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        fixed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn formatter_for(locale: Locale) -> Formatter {
        Formatter::with_config(FormatConfig {
            locale,
            ..FormatConfig::default()
        })
    }

    #[test]
    fn test_currency_default_locale_uses_lakh_grouping() {
        let formatter = Formatter::new();

        assert_eq!(formatter.format_currency(Some(123456.78)), "₹1,23,456.78");
        assert_eq!(formatter.format_currency(Some(12345678.0)), "₹1,23,45,678.00");
        assert_eq!(formatter.format_currency(Some(999.5)), "₹999.50");
        assert_eq!(formatter.format_currency(Some(0.0)), "₹0.00");
    }

    #[test]
    fn test_currency_other_locales() {
        assert_eq!(formatter_for(Locale::EnUs).format_currency(Some(1234567.891)), "$1,234,567.89");
        assert_eq!(formatter_for(Locale::DeDe).format_currency(Some(1234.5)), "1.234,50 €");
    }

    #[test]
    fn test_currency_negative_amounts() {
        let formatter = formatter_for(Locale::EnUs);

        assert_eq!(formatter.format_currency(Some(-5.25)), "-$5.25");
        assert_eq!(formatter.format_currency(Some(-0.001)), "$0.00");
    }

    #[test]
    fn test_currency_placeholder_for_missing_or_invalid() {
        let formatter = Formatter::new();

        assert_eq!(formatter.format_currency(None), NO_AMOUNT_PLACEHOLDER);
        assert_eq!(formatter.format_currency(Some(f64::NAN)), NO_AMOUNT_PLACEHOLDER);
        assert_eq!(formatter.format_currency(Some(f64::INFINITY)), NO_AMOUNT_PLACEHOLDER);
        assert_eq!(formatter.format_currency_str("abc"), NO_AMOUNT_PLACEHOLDER);
    }

    #[test]
    fn test_currency_symbol_override() {
        let formatter = Formatter::with_config(FormatConfig {
            locale: Locale::EnIn,
            currency_symbol: Some("Rs. ".to_string()),
            currency_decimals: 0,
            ..FormatConfig::default()
        });

        assert_eq!(formatter.format_currency(Some(150000.0)), "Rs. 1,50,000");
    }

    #[test]
    fn test_parse_amount_cleans_input() {
        assert_eq!(parse_amount("10.50"), Some(10.50));
        assert_eq!(parse_amount(" ₹1,234.56 "), Some(1234.56));
        assert_eq!(parse_amount("$ 5"), Some(5.0));
        assert_eq!(parse_amount("Rs. 120"), Some(120.0));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount("NaN"), None);
    }

    #[test]
    fn test_percentage() {
        assert_eq!(format_percentage(Some(12.345), 1), "12.3%");
        assert_eq!(format_percentage(Some(50.0), 0), "50%");
        assert_eq!(format_percentage(None, 1), "0%");
        assert_eq!(format_percentage(Some(f64::NAN), 2), "0%");
    }

    #[test]
    fn test_date_styles() {
        let formatter = Formatter::new();
        let value = Some("2024-01-15T14:30:00");

        assert_eq!(formatter.format_date(value, DateStyle::Short), "Jan 15, 2024");
        assert_eq!(formatter.format_date(value, DateStyle::Long), "Monday, January 15, 2024");
        assert_eq!(formatter.format_date(value, DateStyle::Time), "2:30 PM");
        assert_eq!(formatter.format_date(value, DateStyle::DateTime), "Jan 15, 2024, 2:30 PM");
        assert_eq!(formatter.format_date(value, DateStyle::Iso), "2024-01-15");
    }

    #[test]
    fn test_date_accepts_rfc3339_and_plain_dates() {
        let formatter = Formatter::new();

        assert_eq!(
            formatter.format_date(Some("2025-06-13T09:00:00-04:00"), DateStyle::Short),
            "Jun 13, 2025"
        );
        assert_eq!(formatter.format_date(Some("2024-01-01"), DateStyle::Short), "Jan 1, 2024");
        assert_eq!(
            formatter.format_date(Some("2024-03-05 08:05:09.123"), DateStyle::Time),
            "8:05 AM"
        );
    }

    #[test]
    fn test_date_placeholders() {
        let formatter = Formatter::new();

        assert_eq!(formatter.format_date(None, DateStyle::Short), MISSING_DATE);
        assert_eq!(formatter.format_date(Some("  "), DateStyle::Short), MISSING_DATE);
        assert_eq!(formatter.format_date(Some("not a date"), DateStyle::Short), INVALID_DATE);
        assert_eq!(formatter.format_date(Some("2024-13-45"), DateStyle::Long), INVALID_DATE);
    }

    #[test]
    fn test_relative_dates_choose_largest_unit() {
        let formatter = Formatter::new();
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();

        assert_eq!(formatter.format_relative(Some("2024-06-01T11:59:30Z"), now), "just now");
        assert_eq!(formatter.format_relative(Some("2024-06-01T11:59:00Z"), now), "1 minute ago");
        assert_eq!(formatter.format_relative(Some("2024-06-01T11:15:00Z"), now), "45 minutes ago");
        assert_eq!(formatter.format_relative(Some("2024-06-01T09:00:00Z"), now), "3 hours ago");
        assert_eq!(formatter.format_relative(Some("2024-05-31T12:00:00Z"), now), "1 day ago");
        assert_eq!(formatter.format_relative(Some("2024-05-18"), now), "2 weeks ago");
        assert_eq!(formatter.format_relative(Some("2024-05-03"), now), "1 month ago");
        assert_eq!(formatter.format_relative(Some("2024-01-01"), now), "5 months ago");
        assert_eq!(formatter.format_relative(Some("2022-05-01"), now), "2 years ago");
    }

    #[test]
    fn test_relative_dates_in_future_and_placeholders() {
        let formatter = Formatter::new();
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();

        assert_eq!(formatter.format_relative(Some("2024-06-01T14:00:00Z"), now), "in 2 hours");
        assert_eq!(formatter.format_relative(None, now), MISSING_DATE);
        assert_eq!(formatter.format_relative(Some("yesterday"), now), INVALID_DATE);
    }

    #[test]
    fn test_file_size() {
        assert_eq!(format_file_size(0, 2), "0 Bytes");
        assert_eq!(format_file_size(512, 2), "512 Bytes");
        assert_eq!(format_file_size(1024, 2), "1 KB");
        assert_eq!(format_file_size(1536, 2), "1.5 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024, 2), "5 MB");
        assert_eq!(format_file_size(1_234_567_890, 2), "1.15 GB");
        assert_eq!(format_file_size(u64::MAX, 1), "16 EB");
    }

    #[test]
    fn test_duration() {
        assert_eq!(format_duration(0), "0s");
        assert_eq!(format_duration(59), "59s");
        assert_eq!(format_duration(60), "1m");
        assert_eq!(format_duration(125), "2m 5s");
        assert_eq!(format_duration(3600), "1h");
        assert_eq!(format_duration(3661), "1h 1m");
        assert_eq!(format_duration(7320), "2h 2m");
    }

    #[test]
    fn test_abbreviate_number() {
        assert_eq!(abbreviate_number(999.0, 1), "999");
        assert_eq!(abbreviate_number(12.5, 1), "12.5");
        assert_eq!(abbreviate_number(1000.0, 1), "1.0K");
        assert_eq!(abbreviate_number(1500.0, 1), "1.5K");
        assert_eq!(abbreviate_number(2_000_000.0, 1), "2.0M");
        assert_eq!(abbreviate_number(3_450_000_000.0, 2), "3.45B");
        assert_eq!(abbreviate_number(-2500.0, 1), "-2.5K");
        assert_eq!(abbreviate_number(f64::NAN, 1), "0");
    }

    #[test]
    fn test_phone_numbers() {
        assert_eq!(format_phone("9876543210"), "98765 43210");
        assert_eq!(format_phone("(987) 654-3210"), "98765 43210");
        assert_eq!(format_phone("+91-98765-43210"), "+91 98765 43210");
        assert_eq!(format_phone("12345"), "12345");
        assert_eq!(format_phone("441234567890"), "441234567890");
    }

    #[test]
    fn test_names() {
        assert_eq!(format_name("aNIL kumar"), "Anil Kumar");
        assert_eq!(format_name("  priya   sharma "), "Priya Sharma");
        assert_eq!(format_name(""), "");
    }

    #[test]
    fn test_configured_decimals() {
        let formatter = Formatter::with_config(FormatConfig {
            percentage_decimals: 0,
            file_size_decimals: 1,
            ..FormatConfig::default()
        });

        assert_eq!(formatter.format_percentage(Some(84.6)), "85%");
        assert_eq!(formatter.format_file_size(1536), "1.5 KB");
        assert_eq!(Formatter::new().format_percentage(Some(12.345)), "12.3%");
    }
}
