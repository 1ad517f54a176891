use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::scheduler::{AssignOptions, SchedError};

/// Identifiant fort pour un membre de garde (son nom, unique dans le tableau).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StaffId(String);

impl StaffId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().trim().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StaffId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Les deux rôles quotidiens. La garde de jour passe toujours avant la nuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DutyRole {
    Day,
    Night,
}

impl fmt::Display for DutyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DutyRole::Day => f.write_str("day"),
            DutyRole::Night => f.write_str("night"),
        }
    }
}

/// Compteur cumulé d'une personne.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub staff: StaffId,
    #[serde(default)]
    pub count: u32,
}

/// Registre des gardes : l'ordre des entrées est l'ordre du tableau.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawLedger")]
pub struct DutyLedger {
    pub entries: Vec<LedgerEntry>,
}

#[derive(Deserialize)]
struct RawLedger {
    #[serde(default)]
    entries: Vec<LedgerEntry>,
}

impl TryFrom<RawLedger> for DutyLedger {
    type Error = SchedError;

    fn try_from(raw: RawLedger) -> Result<Self, Self::Error> {
        Self::new(raw.entries.into_iter().map(|e| (e.staff, e.count)))
    }
}

impl DutyLedger {
    /// Construit un registre en refusant les doublons et les noms vides.
    pub fn new<I>(entries: I) -> Result<Self, SchedError>
    where
        I: IntoIterator<Item = (StaffId, u32)>,
    {
        let mut ledger = Self::default();
        for (staff, count) in entries {
            if staff.as_str().is_empty() {
                return Err(SchedError::Configuration("empty staff name".into()));
            }
            if ledger.count_of(&staff).is_some() {
                return Err(SchedError::Configuration(format!(
                    "duplicate staff name: {staff}"
                )));
            }
            ledger.entries.push(LedgerEntry { staff, count });
        }
        Ok(ledger)
    }

    /// Registre à zéro pour une liste de noms.
    pub fn with_staff<I, S>(names: I) -> Result<Self, SchedError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(names.into_iter().map(|n| (StaffId::new(n), 0)))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn count_of(&self, staff: &StaffId) -> Option<u32> {
        self.entries.iter().find(|e| &e.staff == staff).map(|e| e.count)
    }
    pub fn min_count(&self) -> Option<u32> {
        self.entries.iter().map(|e| e.count).min()
    }
    pub fn max_count(&self) -> Option<u32> {
        self.entries.iter().map(|e| e.count).max()
    }

    pub(crate) fn increment(&mut self, idx: usize) {
        self.entries[idx].count += 1;
    }

    /// Retire les gardes d'un tableau déjà compté (régénération d'un mois).
    pub fn release(&mut self, roster: &MonthRoster) {
        for staff in roster.days.iter().flat_map(|d| d.assignees()) {
            if let Some(entry) = self.entries.iter_mut().find(|e| &e.staff == staff) {
                entry.count = entry.count.saturating_sub(1);
            }
        }
    }
}

/// Gardes de la veille (jour, nuit), qui ne peuvent pas être reprises le lendemain.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CarryOver {
    pub day: Option<StaffId>,
    pub night: Option<StaffId>,
}

impl CarryOver {
    pub fn new(day: Option<StaffId>, night: Option<StaffId>) -> Self {
        Self { day, night }
    }
    pub fn ids(&self) -> impl Iterator<Item = &StaffId> {
        self.day.iter().chain(self.night.iter())
    }
}

/// Résultat d'une date : garde de jour facultative, garde de nuit obligatoire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyAssignment {
    pub date: NaiveDate,
    #[serde(default)]
    pub day: Option<StaffId>,
    pub night: StaffId,
}

impl DailyAssignment {
    pub fn assignees(&self) -> impl Iterator<Item = &StaffId> {
        self.day.iter().chain(std::iter::once(&self.night))
    }
}

/// Mois cible (année, mois 1..=12).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawYearMonth")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

#[derive(Deserialize)]
struct RawYearMonth {
    year: i32,
    month: u32,
}

impl TryFrom<RawYearMonth> for YearMonth {
    type Error = SchedError;

    fn try_from(raw: RawYearMonth) -> Result<Self, Self::Error> {
        Self::new(raw.year, raw.month)
    }
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, SchedError> {
        if !(1..=12).contains(&month) {
            return Err(SchedError::Configuration(format!(
                "month must be within 1..=12, got {month}"
            )));
        }
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(SchedError::Configuration(format!("year out of range: {year}")));
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        // validé par `new`
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self { year: self.year - 1, month: 12 }
        } else {
            Self { year: self.year, month: self.month - 1 }
        }
    }

    /// Toutes les dates du mois, en ordre croissant.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let month = self.month;
        self.first_day()
            .iter_days()
            .take_while(move |d| d.month() == month)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = SchedError;

    /// Accepte `YYYY-MM` ou `YYYY/MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || SchedError::Configuration(format!("invalid month identifier: {s}"));
        let (y, m) = s.trim().split_once(['-', '/']).ok_or_else(bad)?;
        let year = y.parse::<i32>().map_err(|_| bad())?;
        let month = m.parse::<u32>().map_err(|_| bad())?;
        Self::new(year, month)
    }
}

/// Tableau d'un mois, tel que rangé dans le classeur.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthRoster {
    pub month: YearMonth,
    pub days: Vec<DailyAssignment>,
    #[serde(default)]
    pub finalized: bool,
    /// Règles utilisées à la génération, reprises par la vérification.
    #[serde(default)]
    pub options: AssignOptions,
}

impl MonthRoster {
    pub fn new(month: YearMonth) -> Self {
        Self::with_options(month, AssignOptions::default())
    }

    pub fn with_options(month: YearMonth, options: AssignOptions) -> Self {
        Self { month, days: Vec::new(), finalized: false, options }
    }

    /// Un tableau complet couvre chaque date du mois.
    pub fn is_complete(&self) -> bool {
        self.days.len() == self.month.days().count()
    }

    /// Gardes du dernier jour, pour amorcer le mois suivant.
    pub fn carry_out(&self) -> CarryOver {
        self.days
            .last()
            .map(|d| CarryOver::new(d.day.clone(), Some(d.night.clone())))
            .unwrap_or_default()
    }

    /// Nombre de gardes tenues par chacun ce mois-ci.
    pub fn count_for(&self, staff: &StaffId) -> u32 {
        self.days
            .iter()
            .flat_map(|d| d.assignees())
            .filter(|s| *s == staff)
            .count() as u32
    }
}
