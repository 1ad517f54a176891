use crate::calendar::HolidayCalendar;
use crate::model::{CarryOver, DutyLedger, MonthRoster, YearMonth};
use crate::scheduler::{AssignOptions, DutyEngine, RelaxedPick, SchedError};
use crate::vacation::VacationIndex;
use rand::Rng;
use tracing::{info, warn};

/// Entrées d'un mois : tout ce que le moteur consomme, sans accès au stockage.
#[derive(Debug, Clone)]
pub struct MonthRequest {
    pub month: YearMonth,
    pub ledger: DutyLedger,
    pub carry_over: CarryOver,
    pub vacations: VacationIndex,
    pub holidays: HolidayCalendar,
    pub options: AssignOptions,
}

/// Sorties d'un mois complet.
#[derive(Debug, Clone)]
pub struct MonthOutcome {
    pub roster: MonthRoster,
    pub ledger: DutyLedger,
    pub carry_over: CarryOver,
    pub relaxed: Vec<RelaxedPick>,
}

/// Pilote le moteur date par date. En cas d'échec, les dates déjà traitées et
/// leurs compteurs restent acquis (pas de retour arrière).
#[derive(Debug)]
pub struct MonthRosterBuilder {
    engine: DutyEngine,
    roster: MonthRoster,
}

impl MonthRosterBuilder {
    pub fn new(request: MonthRequest) -> Result<Self, SchedError> {
        for staff in request.vacations.staff() {
            if request.ledger.count_of(staff).is_none() {
                warn!(staff = %staff, month = %request.month, "vacation request for unknown staff");
            }
        }
        let roster = MonthRoster::with_options(request.month, request.options);
        let engine = DutyEngine::new(
            request.ledger,
            request.vacations,
            request.holidays,
            request.carry_over,
            request.options,
        )?;
        Ok(Self { engine, roster })
    }

    pub fn roster(&self) -> &MonthRoster {
        &self.roster
    }
    pub fn engine(&self) -> &DutyEngine {
        &self.engine
    }

    /// Traite les dates restantes du mois en ordre croissant.
    pub fn run<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), SchedError> {
        let month = self.roster.month;
        info!(%month, staff = self.engine.ledger().len(), "generating roster");
        let done = self.roster.days.len();
        for date in month.days().skip(done) {
            let assignment = self.engine.assign_date(date, rng)?;
            self.roster.days.push(assignment);
        }
        info!(
            %month,
            relaxed = self.engine.relaxed_picks().len(),
            "roster generated"
        );
        Ok(())
    }

    pub fn finish(self) -> MonthOutcome {
        let (ledger, carry_over, relaxed) = self.engine.into_parts();
        MonthOutcome {
            roster: self.roster,
            ledger,
            carry_over,
            relaxed,
        }
    }
}

/// Génère un mois complet ; échoue sur la première date impossible à pourvoir.
pub fn generate_month<R: Rng + ?Sized>(
    request: MonthRequest,
    rng: &mut R,
) -> Result<MonthOutcome, SchedError> {
    let mut builder = MonthRosterBuilder::new(request)?;
    builder.run(rng)?;
    Ok(builder.finish())
}
