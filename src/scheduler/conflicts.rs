use super::{AssignOptions, Violation, ViolationKind};
use crate::calendar::HolidayCalendar;
use crate::model::{CarryOver, DailyAssignment, MonthRoster, StaffId};
use crate::vacation::VacationIndex;
use chrono::Datelike;

/// Vérifie un tableau déjà produit (ou saisi à la main) contre les règles
/// d'assignation. `carry_in` porte les gardes du dernier jour du mois précédent.
pub fn detect_violations(
    roster: &MonthRoster,
    holidays: &HolidayCalendar,
    vacations: &VacationIndex,
    carry_in: &CarryOver,
    opts: AssignOptions,
) -> Vec<Violation> {
    let mut out = Vec::new();
    let mut previous = carry_in.clone();

    for today in &roster.days {
        let slot = holidays.has_day_duty(today.date);
        match (&today.day, slot) {
            (None, true) => out.push(violation(today, None, ViolationKind::MissingDayDuty)),
            (Some(d), false) => {
                out.push(violation(today, Some(d), ViolationKind::UnexpectedDayDuty))
            }
            _ => {}
        }

        if today.day.as_ref() == Some(&today.night) {
            out.push(violation(today, Some(&today.night), ViolationKind::SameDay));
        }

        for staff in today.assignees() {
            if vacations.is_on_vacation(staff, today.date.day()) {
                out.push(violation(today, Some(staff), ViolationKind::Vacation));
            }
        }

        if let Some(d) = &today.day {
            if previous.ids().any(|s| s == d) {
                out.push(violation(today, Some(d), ViolationKind::Consecutive));
            }
        }
        // la garde de jour de la veille est remplacée par celle du jour
        let night_blocked = previous.night.as_ref() == Some(&today.night)
            || match &today.day {
                Some(_) => {
                    opts.rest_after_day_duty && previous.day.as_ref() == Some(&today.night)
                }
                None => previous.day.as_ref() == Some(&today.night),
            };
        if night_blocked {
            out.push(violation(today, Some(&today.night), ViolationKind::Consecutive));
        }

        previous = CarryOver::new(
            today.day.clone().or(previous.day.clone()),
            Some(today.night.clone()),
        );
        if today.day.is_none() && opts.day_carry == super::DayCarry::NextDayOnly {
            previous.day = None;
        }
    }

    out
}

fn violation(day: &DailyAssignment, staff: Option<&StaffId>, kind: ViolationKind) -> Violation {
    Violation {
        date: day.date,
        staff: staff.cloned(),
        kind,
    }
}
