use crate::model::{DutyRole, StaffId, YearMonth};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Devenir de la garde de jour de la veille après une date sans garde de jour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DayCarry {
    /// La dernière garde de jour reste exclue jusqu'à la prochaine garde de jour.
    #[default]
    Sticky,
    /// La garde de jour n'exclut que la date suivante.
    NextDayOnly,
}

/// Options d'assignation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignOptions {
    pub day_carry: DayCarry,
    /// Exclut aussi la garde de jour de la veille de la nuit du jour,
    /// même quand une garde de jour vient d'être posée ce jour-là.
    pub rest_after_day_duty: bool,
}

/// Palier de sélection ayant fourni la personne retenue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Compteur minimal et éligible.
    Strict,
    /// Éligible, compteur ignoré.
    Relaxed,
}

/// Choix d'une personne pour un rôle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pick {
    pub staff: StaffId,
    pub tier: Tier,
}

/// Trace d'un recours au palier relâché.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelaxedPick {
    pub date: NaiveDate,
    pub role: DutyRole,
    pub staff: StaffId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    SameDay,
    Consecutive,
    Vacation,
    MissingDayDuty,
    UnexpectedDayDuty,
}

impl ViolationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationKind::SameDay => "same-day",
            ViolationKind::Consecutive => "consecutive",
            ViolationKind::Vacation => "vacation",
            ViolationKind::MissingDayDuty => "missing-day",
            ViolationKind::UnexpectedDayDuty => "unexpected-day",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub date: NaiveDate,
    pub staff: Option<StaffId>,
    pub kind: ViolationKind,
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("no eligible staff for {role} duty on {date}")]
    Unsatisfiable { date: NaiveDate, role: DutyRole },
    #[error("roster for {0} is finalized")]
    Finalized(YearMonth),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
