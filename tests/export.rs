#![forbid(unsafe_code)]
use chrono::NaiveDate;
use garde::{
    detect_violations, io, AssignOptions, CarryOver, DailyAssignment, HolidayCalendar,
    MonthRoster, StaffId, VacationIndex, ViolationKind, YearMonth,
};

fn d(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
}

fn assignment(day: u32, day_duty: Option<&str>, night: &str) -> DailyAssignment {
    DailyAssignment {
        date: d(day),
        day: day_duty.map(StaffId::new),
        night: StaffId::new(night),
    }
}

fn sample_roster() -> MonthRoster {
    let mut roster = MonthRoster::new(YearMonth::new(2024, 6).unwrap());
    roster.days = vec![
        assignment(1, Some("alice"), "bob"),
        assignment(2, Some("carol"), "dave"),
        assignment(3, None, "alice"),
        assignment(4, Some("bob"), "carol"),
    ];
    roster
}

#[test]
fn roster_csv_export() {
    let holidays = HolidayCalendar::new([d(4)]);
    let mut out = Vec::new();
    io::write_roster_csv(&mut out, &sample_roster(), &holidays).unwrap();
    let csv = String::from_utf8(out).unwrap();
    insta::assert_snapshot!(csv.trim_end(), @r"
    date,weekday,kind,day,night
    2024-06-01,Sat,saturday,alice,bob
    2024-06-02,Sun,holiday,carol,dave
    2024-06-03,Mon,weekday,,alice
    2024-06-04,Tue,holiday,bob,carol
    ");
}

#[test]
fn clean_roster_has_no_violations() {
    let holidays = HolidayCalendar::new([d(4)]);
    let violations = detect_violations(
        &sample_roster(),
        &holidays,
        &VacationIndex::default(),
        &CarryOver::default(),
        AssignOptions::default(),
    );
    assert!(violations.is_empty(), "{violations:?}");
}

#[test]
fn check_reports_each_kind() {
    let mut roster = MonthRoster::new(YearMonth::new(2024, 6).unwrap());
    roster.days = vec![
        // samedi sans garde de jour, bob enchaîne depuis le mois précédent
        assignment(1, None, "bob"),
        // dimanche : même personne jour et nuit
        assignment(2, Some("carol"), "carol"),
        // lundi : garde de jour inattendue, alice en congé
        assignment(3, Some("dave"), "alice"),
    ];
    let mut vacations = VacationIndex::default();
    vacations.insert(StaffId::new("alice"), 3);

    let violations = detect_violations(
        &roster,
        &HolidayCalendar::default(),
        &vacations,
        &CarryOver::new(None, Some(StaffId::new("bob"))),
        AssignOptions::default(),
    );
    let kinds: Vec<(u32, ViolationKind)> = violations
        .iter()
        .map(|v| (chrono::Datelike::day(&v.date), v.kind.clone()))
        .collect();

    assert!(kinds.contains(&(1, ViolationKind::MissingDayDuty)));
    assert!(kinds.contains(&(1, ViolationKind::Consecutive)));
    assert!(kinds.contains(&(2, ViolationKind::SameDay)));
    assert!(kinds.contains(&(3, ViolationKind::UnexpectedDayDuty)));
    assert!(kinds.contains(&(3, ViolationKind::Vacation)));
    assert!(!kinds.contains(&(3, ViolationKind::Consecutive)));
}

#[test]
fn strict_check_flags_yesterday_day_duty_at_night() {
    let mut roster = MonthRoster::new(YearMonth::new(2024, 6).unwrap());
    roster.days = vec![
        assignment(1, Some("alice"), "bob"),
        assignment(2, Some("carol"), "alice"),
    ];
    let holidays = HolidayCalendar::default();
    let vacations = VacationIndex::default();
    let carry = CarryOver::default();

    assert!(detect_violations(&roster, &holidays, &vacations, &carry, AssignOptions::default())
        .is_empty());

    let strict = AssignOptions {
        rest_after_day_duty: true,
        ..AssignOptions::default()
    };
    let violations = detect_violations(&roster, &holidays, &vacations, &carry, strict);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].kind, ViolationKind::Consecutive);
    assert_eq!(violations[0].staff, Some(StaffId::new("alice")));
}
