//! Region codes, display names and calendar labels used in reports

use inflation_forecast::YearMonth;

/// COICOP code of the all-items (headline) index
pub const HEADLINE_COICOP: &str = "CP00";

/// Current euro area aggregate
pub const EURO_AREA: &str = "EA20";

/// Previous euro area aggregate, used when EA20 is not published
pub const LEGACY_EURO_AREA: &str = "EA19";

/// Regions covered by a default report
pub const DEFAULT_COUNTRIES: [&str; 3] = ["AT", "DE", EURO_AREA];

/// German month abbreviations, January first
pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mär", "Apr", "Mai", "Jun", "Jul", "Aug", "Sep", "Okt", "Nov", "Dez",
];

/// German display name of a region; unknown codes are returned unchanged
pub fn country_name(code: &str) -> &str {
    match code {
        "AT" => "Österreich",
        "DE" => "Deutschland",
        EURO_AREA | LEGACY_EURO_AREA => "Eurozone",
        other => other,
    }
}

/// `Okt 2025`
pub fn month_label(date: YearMonth) -> String {
    format!("{} {}", MONTH_NAMES[date.month() as usize - 1], date.year())
}
