use super::{DayCarry, DutyEngine, SchedError};
use crate::model::{DailyAssignment, DutyRole, StaffId};
use chrono::NaiveDate;
use rand::Rng;

pub(super) fn assign_date<R: Rng + ?Sized>(
    engine: &mut DutyEngine,
    date: NaiveDate,
    rng: &mut R,
) -> Result<DailyAssignment, SchedError> {
    let yesterday_day = engine.carry.day.clone();

    let day = if engine.holidays.has_day_duty(date) {
        let blocked: Vec<StaffId> = engine.carry.ids().cloned().collect();
        let pick = engine.pick(date, DutyRole::Day, &blocked, rng)?;
        engine.carry.day = Some(pick.staff.clone());
        Some(pick.staff)
    } else {
        None
    };

    // la nuit exclut l'état courant : garde de jour du jour si elle vient d'être posée
    let mut blocked: Vec<StaffId> = engine.carry.ids().cloned().collect();
    if engine.opts.rest_after_day_duty && day.is_some() {
        blocked.extend(yesterday_day);
    }
    let night = engine.pick(date, DutyRole::Night, &blocked, rng)?.staff;
    engine.carry.night = Some(night.clone());

    if day.is_none() && engine.opts.day_carry == DayCarry::NextDayOnly {
        engine.carry.day = None;
    }

    Ok(DailyAssignment { date, day, night })
}
