#![forbid(unsafe_code)]
//! Garde — génération locale (sans BD) du tableau mensuel des gardes.
//!
//! - Garde de jour les samedis, dimanches et jours fériés ; garde de nuit chaque jour.
//! - Choix équitable au plus petit compteur, puis repli sur tout éligible.
//! - Congés et gardes de la veille toujours respectés ; échec explicite sinon.
//! - Stockage fichiers (JSON/CSV).

pub mod builder;
pub mod calendar;
pub mod io;
pub mod model;
pub mod scheduler;
pub mod storage;
pub mod vacation;

pub use builder::{generate_month, MonthOutcome, MonthRequest, MonthRosterBuilder};
pub use calendar::{DayKind, HolidayCalendar};
pub use model::{
    CarryOver, DailyAssignment, DutyLedger, DutyRole, LedgerEntry, MonthRoster, StaffId,
    YearMonth,
};
pub use scheduler::{
    detect_violations, AssignOptions, DayCarry, DutyEngine, Pick, RelaxedPick, SchedError, Tier,
    Violation, ViolationKind,
};
pub use storage::{JsonStorage, Storage, Workbook};
pub use vacation::{DataParseWarning, VacationIndex, VacationRow, VacationTable};
