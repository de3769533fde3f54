//! Date helpers for the `YYYY-MM-DD` display dates.

use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate};

use crate::error::ConfigError;

pub const DISPLAY_DATE_FORMAT: &str = "%Y-%m-%d";

const MONTHS_PT: [&str; 12] = [
    "janeiro", "fevereiro", "março", "abril", "maio", "junho", "julho", "agosto", "setembro",
    "outubro", "novembro", "dezembro",
];

/// Language used for long dates on cards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    PtPt,
    En,
}

impl FromStr for Locale {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pt" | "pt-pt" | "pt_pt" => Ok(Self::PtPt),
            "en" | "en-us" | "en-gb" => Ok(Self::En),
            _ => Err(ConfigError::InvalidValue {
                name: "JOURNAL_LOCALE",
                value: s.to_string(),
            }),
        }
    }
}

/// The current local date as `YYYY-MM-DD`.
pub fn today() -> String {
    Local::now().date_naive().format(DISPLAY_DATE_FORMAT).to_string()
}

/// Render `2024-06-01` as `1 de junho de 2024` or `June 1, 2024`.
///
/// Anything that is not a valid display date is returned as given.
pub fn format_long(date: &str, locale: Locale) -> String {
    let Ok(parsed) = NaiveDate::parse_from_str(date, DISPLAY_DATE_FORMAT) else {
        return date.to_string();
    };
    match locale {
        Locale::PtPt => format!(
            "{} de {} de {}",
            parsed.day(),
            MONTHS_PT[parsed.month0() as usize],
            parsed.year()
        ),
        Locale::En => parsed.format("%B %-d, %Y").to_string(),
    }
}
