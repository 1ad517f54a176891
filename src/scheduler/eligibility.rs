use crate::model::StaffId;
use crate::vacation::VacationIndex;
use chrono::{Datelike, NaiveDate};

/// Éligible si la personne n'est pas exclue et n'est pas en congé ce jour-là.
/// Même prédicat pour le jour et la nuit ; seul l'ensemble exclu change.
pub(super) fn is_eligible<'a, I>(
    staff: &StaffId,
    date: NaiveDate,
    mut excluded: I,
    vacations: &VacationIndex,
) -> bool
where
    I: Iterator<Item = &'a StaffId>,
{
    if excluded.any(|s| s == staff) {
        return false;
    }
    !vacations.is_on_vacation(staff, date.day())
}
