use super::{eligibility, DutyEngine, Pick, RelaxedPick, SchedError, Tier};
use crate::model::{DutyRole, StaffId};
use chrono::NaiveDate;
use rand::Rng;
use tracing::{debug, warn};

pub(super) fn pick<R: Rng + ?Sized>(
    engine: &mut DutyEngine,
    date: NaiveDate,
    role: DutyRole,
    blocked: &[StaffId],
    rng: &mut R,
) -> Result<Pick, SchedError> {
    // minimum sur tout le monde, éligible ou non
    let Some(min_count) = engine.ledger.min_count() else {
        return Err(SchedError::Configuration("staff roster is empty".into()));
    };

    let eligible: Vec<usize> = engine
        .ledger
        .entries
        .iter()
        .enumerate()
        .filter(|(_, e)| {
            eligibility::is_eligible(&e.staff, date, blocked.iter(), &engine.vacations)
        })
        .map(|(idx, _)| idx)
        .collect();

    let strict: Vec<usize> = eligible
        .iter()
        .copied()
        .filter(|&idx| engine.ledger.entries[idx].count == min_count)
        .collect();

    let (tier, pool) = if !strict.is_empty() {
        (Tier::Strict, strict)
    } else if !eligible.is_empty() {
        (Tier::Relaxed, eligible)
    } else {
        return Err(SchedError::Unsatisfiable { date, role });
    };

    let idx = pool[rng.gen_range(0..pool.len())];
    engine.ledger.increment(idx);
    let entry = &engine.ledger.entries[idx];
    let staff = entry.staff.clone();

    if tier == Tier::Relaxed {
        warn!(%date, %role, staff = %staff, min_count, "fairness relaxed: no minimum-count candidate eligible");
        engine.relaxed.push(RelaxedPick { date, role, staff: staff.clone() });
    } else {
        debug!(%date, %role, staff = %staff, count = entry.count, "assigned");
    }

    Ok(Pick { staff, tier })
}
