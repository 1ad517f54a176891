//! Demandes de congés : table brute (une ligne par personne, une colonne par
//! mois dans un ordre tournant) et index des jours indisponibles pour un mois.

use crate::model::StaffId;
use crate::scheduler::SchedError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

/// Mois de la première colonne par défaut (avril, début d'exercice).
pub const DEFAULT_ANCHOR_MONTH: u32 = 4;

/// Virgules pleine chasse, acceptées en plus des espaces et de `,`.
const FULLWIDTH_SEPARATORS: [char; 2] = ['、', '，'];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationRow {
    pub staff: StaffId,
    /// Texte libre par mois, à partir de `anchor_month`.
    #[serde(default)]
    pub cells: Vec<String>,
}

/// Table brute des demandes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationTable {
    pub anchor_month: u32,
    #[serde(default)]
    pub rows: Vec<VacationRow>,
}

impl Default for VacationTable {
    fn default() -> Self {
        Self { anchor_month: DEFAULT_ANCHOR_MONTH, rows: Vec::new() }
    }
}

impl VacationTable {
    pub fn new(anchor_month: u32) -> Result<Self, SchedError> {
        check_month(anchor_month, "anchor month")?;
        Ok(Self { anchor_month, rows: Vec::new() })
    }

    /// Index de colonne du mois dans l'ordre tournant.
    pub fn column_for(&self, month: u32) -> Result<usize, SchedError> {
        check_month(self.anchor_month, "anchor month")?;
        check_month(month, "month")?;
        Ok(((month + 12 - self.anchor_month) % 12) as usize)
    }
}

/// Jeton de congé illisible, ignoré.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataParseWarning {
    pub staff: StaffId,
    pub token: String,
}

/// Jours du mois où chaque personne est indisponible. Absent = jamais en congé.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VacationIndex {
    days: BTreeMap<StaffId, BTreeSet<u32>>,
}

impl VacationIndex {
    /// Construit l'index du mois cible. Les jetons sans chiffre de tête ou hors
    /// 1..=31 sont écartés et renvoyés comme avertissements.
    pub fn build(
        table: &VacationTable,
        month: u32,
    ) -> Result<(Self, Vec<DataParseWarning>), SchedError> {
        let col = table.column_for(month)?;
        let mut index = Self::default();
        let mut warnings = Vec::new();

        for row in &table.rows {
            let Some(cell) = row.cells.get(col) else {
                continue;
            };
            let mut days = BTreeSet::new();
            for token in split_tokens(cell) {
                match parse_day(token) {
                    Some(day) => {
                        days.insert(day);
                    }
                    None => {
                        warn!(staff = %row.staff, token, month, "ignoring unparseable vacation day");
                        warnings.push(DataParseWarning {
                            staff: row.staff.clone(),
                            token: token.to_string(),
                        });
                    }
                }
            }
            if !days.is_empty() {
                index.days.entry(row.staff.clone()).or_default().extend(days);
            }
        }

        Ok((index, warnings))
    }

    pub fn insert(&mut self, staff: StaffId, day: u32) {
        self.days.entry(staff).or_default().insert(day);
    }

    pub fn is_on_vacation(&self, staff: &StaffId, day_of_month: u32) -> bool {
        self.days
            .get(staff)
            .is_some_and(|set| set.contains(&day_of_month))
    }

    pub fn days_of(&self, staff: &StaffId) -> Option<&BTreeSet<u32>> {
        self.days.get(staff)
    }

    pub fn staff(&self) -> impl Iterator<Item = &StaffId> {
        self.days.keys()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

fn split_tokens(cell: &str) -> impl Iterator<Item = &str> {
    cell.split(|c: char| c.is_whitespace() || c == ',' || FULLWIDTH_SEPARATORS.contains(&c))
        .filter(|t| !t.is_empty())
}

/// Lit les chiffres de tête (`10日` donne 10, `3days` donne 3).
fn parse_day(token: &str) -> Option<u32> {
    let end = token
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(token.len());
    token[..end].parse::<u32>().ok().filter(|d| (1..=31).contains(d))
}

fn check_month(month: u32, what: &str) -> Result<(), SchedError> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(SchedError::Configuration(format!(
            "{what} must be within 1..=12, got {month}"
        )))
    }
}
