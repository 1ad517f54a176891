mod assignment;
mod conflicts;
mod eligibility;
mod selection;
mod types;

pub use conflicts::detect_violations;
pub use types::{
    AssignOptions, DayCarry, Pick, RelaxedPick, SchedError, Tier, Violation, ViolationKind,
};

use crate::calendar::HolidayCalendar;
use crate::model::{CarryOver, DailyAssignment, DutyLedger, DutyRole, StaffId};
use crate::vacation::VacationIndex;
use chrono::NaiveDate;
use rand::Rng;

/// Moteur d'assignation : possède l'état qui passe d'une date à la suivante
/// (compteurs, gardes de la veille) pour la durée d'un mois.
#[derive(Debug, Clone)]
pub struct DutyEngine {
    ledger: DutyLedger,
    carry: CarryOver,
    vacations: VacationIndex,
    holidays: HolidayCalendar,
    opts: AssignOptions,
    relaxed: Vec<RelaxedPick>,
}

impl DutyEngine {
    pub fn new(
        ledger: DutyLedger,
        vacations: VacationIndex,
        holidays: HolidayCalendar,
        carry: CarryOver,
        opts: AssignOptions,
    ) -> Result<Self, SchedError> {
        if ledger.is_empty() {
            return Err(SchedError::Configuration("staff roster is empty".into()));
        }
        Ok(Self {
            ledger,
            carry,
            vacations,
            holidays,
            opts,
            relaxed: Vec::new(),
        })
    }

    pub fn ledger(&self) -> &DutyLedger {
        &self.ledger
    }
    pub fn carry_over(&self) -> &CarryOver {
        &self.carry
    }
    pub fn relaxed_picks(&self) -> &[RelaxedPick] {
        &self.relaxed
    }

    /// Vérifie qu'une personne peut tenir une garde à `date`, compte tenu des
    /// gardes de la veille.
    pub fn is_eligible(&self, staff: &StaffId, date: NaiveDate) -> bool {
        eligibility::is_eligible(staff, date, self.carry.ids(), &self.vacations)
    }

    /// Choisit la personne la plus équitable parmi les éligibles hors `blocked`
    /// et incrémente son compteur.
    pub fn pick<R: Rng + ?Sized>(
        &mut self,
        date: NaiveDate,
        role: DutyRole,
        blocked: &[StaffId],
        rng: &mut R,
    ) -> Result<Pick, SchedError> {
        selection::pick(self, date, role, blocked, rng)
    }

    /// Traite une date : garde de jour éventuelle puis garde de nuit.
    pub fn assign_date<R: Rng + ?Sized>(
        &mut self,
        date: NaiveDate,
        rng: &mut R,
    ) -> Result<DailyAssignment, SchedError> {
        assignment::assign_date(self, date, rng)
    }

    pub fn into_parts(self) -> (DutyLedger, CarryOver, Vec<RelaxedPick>) {
        (self.ledger, self.carry, self.relaxed)
    }
}
