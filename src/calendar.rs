use chrono::{Datelike, NaiveDate};

// UI vocabulary is Polish, matching the shell's static markup.
pub const MONTH_NAMES_PL: [&str; 12] = [
    "Styczeń",
    "Luty",
    "Marzec",
    "Kwiecień",
    "Maj",
    "Czerwiec",
    "Lipiec",
    "Sierpień",
    "Wrzesień",
    "Październik",
    "Listopad",
    "Grudzień",
];

const WEEKDAY_NAMES_PL: [&str; 7] = [
    "niedziela",
    "poniedziałek",
    "wtorek",
    "środa",
    "czwartek",
    "piątek",
    "sobota",
];

pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Zero-padded `DD-MM-YYYY`.
pub fn format_date_dmy(d: NaiveDate) -> String {
    d.format("%d-%m-%Y").to_string()
}

/// Sunday-based weekday index, 0..=6. Day-table rows order by this value.
pub fn weekday_index(d: NaiveDate) -> u32 {
    d.weekday().num_days_from_sunday()
}

pub fn weekday_name_pl(d: NaiveDate) -> &'static str {
    WEEKDAY_NAMES_PL[weekday_index(d) as usize]
}

/// Week number shown on week buttons:
/// `ceil((days since Jan 1 + weekday of Jan 1 + 1) / 7)` with Sunday = 0.
/// Intentionally not ISO-8601; `week_number(2024-01-01) == 1`.
pub fn week_number(d: NaiveDate) -> u32 {
    let first_jan = NaiveDate::from_yo_opt(d.year(), 1).unwrap_or(d);
    let days = (d - first_jan).num_days();
    let offset = days + i64::from(first_jan.weekday().num_days_from_sunday()) + 1;
    ((offset + 6) / 7) as u32
}

/// Week button label for a week-start date string. Unparseable starts keep
/// the raw string so the button is still addressable.
pub fn week_label(start: &str) -> String {
    match parse_iso_date(start) {
        Some(d) => format!("Week {}", week_number(d)),
        None => start.to_string(),
    }
}
