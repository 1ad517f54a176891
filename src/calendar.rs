use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Jours fériés connus. Sert uniquement à savoir si une garde de jour existe.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HolidayCalendar {
    #[serde(default)]
    dates: BTreeSet<NaiveDate>,
}

/// Nature d'une date, pour l'affichage et les exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayKind {
    Weekday,
    Saturday,
    SundayOrHoliday,
}

impl DayKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DayKind::Weekday => "weekday",
            DayKind::Saturday => "saturday",
            DayKind::SundayOrHoliday => "holiday",
        }
    }
}

impl HolidayCalendar {
    pub fn new<I: IntoIterator<Item = NaiveDate>>(dates: I) -> Self {
        Self { dates: dates.into_iter().collect() }
    }

    pub fn insert(&mut self, date: NaiveDate) -> bool {
        self.dates.insert(date)
    }

    pub fn extend<I: IntoIterator<Item = NaiveDate>>(&mut self, dates: I) {
        self.dates.extend(dates);
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    pub fn kind(&self, date: NaiveDate) -> DayKind {
        match date.weekday() {
            Weekday::Sun => DayKind::SundayOrHoliday,
            _ if self.is_holiday(date) => DayKind::SundayOrHoliday,
            Weekday::Sat => DayKind::Saturday,
            _ => DayKind::Weekday,
        }
    }

    /// Une garde de jour existe le samedi, le dimanche et les jours fériés.
    pub fn has_day_duty(&self, date: NaiveDate) -> bool {
        self.kind(date) != DayKind::Weekday
    }
}

/// Abréviation anglaise du jour (`Mon`, `Tue`, …).
pub fn weekday_label(date: NaiveDate) -> String {
    date.weekday().to_string()
}
