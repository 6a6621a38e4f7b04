use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

const DAYS_ES: [&str; 7] = ["Lunes", "Martes", "Miércoles", "Jueves", "Viernes", "Sábado", "Domingo"];
const DAYS_EN: [&str; 7] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"];

const MONTHS_ES: [&str; 12] = [
    "Enero", "Febrero", "Marzo", "Abril", "Mayo", "Junio",
    "Julio", "Agosto", "Septiembre", "Octubre", "Noviembre", "Diciembre",
];
const MONTHS_EN: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// Language used for the denormalized display labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Es,
    En,
}

impl Locale {
    /// Unknown codes fall back to Spanish.
    pub fn from_code(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "en" | "en-us" | "en_us" | "english" => Locale::En,
            _ => Locale::Es,
        }
    }

    fn week_word(&self) -> &'static str {
        match self {
            Locale::Es => "Semana",
            Locale::En => "Week",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::Es => write!(f, "es"),
            Locale::En => write!(f, "en"),
        }
    }
}

/// "Semana 7" / "Week 7" using the ISO week number.
pub fn week_label(date: NaiveDate, locale: Locale) -> String {
    format!("{} {}", locale.week_word(), date.iso_week().week())
}

pub fn day_label(date: NaiveDate, locale: Locale) -> String {
    let idx = date.weekday().num_days_from_monday() as usize;
    match locale {
        Locale::Es => DAYS_ES[idx],
        Locale::En => DAYS_EN[idx],
    }
    .to_string()
}

/// `month` is 1-based; `None` outside 1..=12.
pub fn month_name(month: u32, locale: Locale) -> Option<&'static str> {
    let idx = month.checked_sub(1)? as usize;
    match locale {
        Locale::Es => MONTHS_ES.get(idx).copied(),
        Locale::En => MONTHS_EN.get(idx).copied(),
    }
}

/// "Marzo 2025"
pub fn period_label(year: i32, month: u32, locale: Locale) -> String {
    match month_name(month, locale) {
        Some(name) => format!("{name} {year}"),
        None => format!("{month:02}/{year}"),
    }
}
