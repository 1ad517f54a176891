use crate::builder::{MonthOutcome, MonthRequest};
use crate::calendar::HolidayCalendar;
use crate::model::{CarryOver, DutyLedger, MonthRoster, YearMonth};
use crate::scheduler::{AssignOptions, SchedError};
use crate::vacation::{DataParseWarning, VacationIndex, VacationTable};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::warn;

/// Classeur : registre, jours fériés, demandes de congés et tableaux mensuels.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Workbook {
    #[serde(default)]
    pub ledger: DutyLedger,
    #[serde(default)]
    pub holidays: HolidayCalendar,
    #[serde(default)]
    pub vacations: VacationTable,
    #[serde(default)]
    pub rosters: Vec<MonthRoster>,
}

impl Workbook {
    pub fn roster(&self, month: YearMonth) -> Option<&MonthRoster> {
        self.rosters.iter().find(|r| r.month == month)
    }

    fn roster_mut(&mut self, month: YearMonth) -> Option<&mut MonthRoster> {
        self.rosters.iter_mut().find(|r| r.month == month)
    }

    /// Gardes du dernier jour du mois précédent ; vide s'il n'existe pas ou
    /// s'il est resté partiel.
    pub fn carry_seed(&self, month: YearMonth) -> CarryOver {
        match self.roster(month.previous()) {
            Some(prev) if prev.is_complete() => prev.carry_out(),
            Some(prev) => {
                warn!(
                    %month,
                    previous = %prev.month,
                    days = prev.days.len(),
                    "previous roster is partial, starting without carry-over"
                );
                CarryOver::default()
            }
            None => CarryOver::default(),
        }
    }

    /// Prépare les entrées du mois. Un mois déjà généré mais non validé rend
    /// d'abord ses gardes au registre.
    pub fn request(
        &self,
        month: YearMonth,
        options: AssignOptions,
    ) -> Result<(MonthRequest, Vec<DataParseWarning>), SchedError> {
        let mut ledger = self.ledger.clone();
        if let Some(existing) = self.roster(month) {
            if existing.finalized {
                return Err(SchedError::Finalized(month));
            }
            ledger.release(existing);
        }
        let (vacations, warnings) = VacationIndex::build(&self.vacations, month.month())?;
        let request = MonthRequest {
            month,
            ledger,
            carry_over: self.carry_seed(month),
            vacations,
            holidays: self.holidays.clone(),
            options,
        };
        Ok((request, warnings))
    }

    /// Range un tableau (complet ou partiel) avec le registre qui lui correspond.
    pub fn store(&mut self, roster: MonthRoster, ledger: DutyLedger) {
        self.ledger = ledger;
        match self.roster_mut(roster.month) {
            Some(slot) => *slot = roster,
            None => {
                self.rosters.push(roster);
                self.rosters.sort_by_key(|r| r.month);
            }
        }
    }

    pub fn store_outcome(&mut self, outcome: MonthOutcome) {
        self.store(outcome.roster, outcome.ledger);
    }

    pub fn finalize(&mut self, month: YearMonth) -> Result<(), SchedError> {
        let roster = self
            .roster_mut(month)
            .ok_or_else(|| SchedError::Configuration(format!("no roster stored for {month}")))?;
        if !roster.is_complete() {
            return Err(SchedError::Configuration(format!(
                "roster for {month} is incomplete"
            )));
        }
        roster.finalized = true;
        Ok(())
    }
}

pub trait Storage {
    /// Charge un classeur depuis un support.
    fn load(&self) -> anyhow::Result<Workbook>;
    /// Sauvegarde de manière atomique.
    fn save(&self, workbook: &Workbook) -> anyhow::Result<()>;
}

pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self { path: path.as_ref().to_path_buf() })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Classeur vide si le fichier n'existe pas encore.
    pub fn load_or_default(&self) -> anyhow::Result<Workbook> {
        if self.path.exists() {
            self.load()
        } else {
            Ok(Workbook::default())
        }
    }
}

impl Storage for JsonStorage {
    fn load(&self) -> anyhow::Result<Workbook> {
        let data = fs::read(&self.path).with_context(|| format!("reading {}", self.path.display()))?;
        let workbook: Workbook = serde_json::from_slice(&data)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(workbook)
    }

    fn save(&self, workbook: &Workbook) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(workbook)?;
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).with_context(|| "atomic rename")?;
        Ok(())
    }
}
