#![forbid(unsafe_code)]
use garde::{SchedError, StaffId, VacationIndex, VacationRow, VacationTable};

fn table(rows: &[(&str, &[&str])]) -> VacationTable {
    let mut t = VacationTable::new(4).unwrap();
    for (name, cells) in rows {
        t.rows.push(VacationRow {
            staff: StaffId::new(name),
            cells: cells.iter().map(|c| c.to_string()).collect(),
        });
    }
    t
}

#[test]
fn columns_rotate_from_anchor_month() {
    let t = VacationTable::new(4).unwrap();
    assert_eq!(t.column_for(4).unwrap(), 0);
    assert_eq!(t.column_for(12).unwrap(), 8);
    assert_eq!(t.column_for(1).unwrap(), 9);
    assert_eq!(t.column_for(3).unwrap(), 11);
    assert!(VacationTable::new(0).is_err());
    assert!(matches!(t.column_for(13), Err(SchedError::Configuration(_))));
}

#[test]
fn splits_on_all_delimiters() {
    // avril, mai, juin
    let t = table(&[("alice", &["", "", "1, 2、3\u{3000}4，5  10"])]);
    let (index, warnings) = VacationIndex::build(&t, 6).unwrap();
    let days: Vec<u32> = index.days_of(&StaffId::new("alice")).unwrap().iter().copied().collect();
    assert_eq!(days, vec![1, 2, 3, 4, 5, 10]);
    assert!(warnings.is_empty());
}

#[test]
fn malformed_tokens_are_ignored_with_warning() {
    let t = table(&[("alice", &["3 x 40 0"]), ("bob", &["abc"])]);
    let (index, warnings) = VacationIndex::build(&t, 4).unwrap();

    let alice = StaffId::new("alice");
    assert!(index.is_on_vacation(&alice, 3));
    assert_eq!(index.days_of(&alice).unwrap().len(), 1);
    assert!(index.days_of(&StaffId::new("bob")).is_none());

    let tokens: Vec<&str> = warnings.iter().map(|w| w.token.as_str()).collect();
    assert_eq!(tokens, vec!["x", "40", "0", "abc"]);
}

#[test]
fn leading_digits_are_read_before_suffix() {
    let t = table(&[("alice", &["10日 12日、3days"]), ("bob", &["日10 45日"])]);
    let (index, warnings) = VacationIndex::build(&t, 4).unwrap();

    let alice = StaffId::new("alice");
    let days: Vec<u32> = index.days_of(&alice).unwrap().iter().copied().collect();
    assert_eq!(days, vec![3, 10, 12]);
    assert!(!index.is_on_vacation(&alice, 11));

    // pas de chiffre en tête, ou hors du mois : ignorés
    let tokens: Vec<&str> = warnings.iter().map(|w| w.token.as_str()).collect();
    assert_eq!(tokens, vec!["日10", "45日"]);
}

#[test]
fn empty_or_missing_cells_produce_no_entry() {
    let t = table(&[("alice", &["", "5"]), ("bob", &["  "]), ("carol", &[])]);
    let (index, _) = VacationIndex::build(&t, 4).unwrap();
    assert!(index.is_empty());

    let (may, _) = VacationIndex::build(&t, 5).unwrap();
    assert_eq!(may.staff().count(), 1);
    assert!(may.is_on_vacation(&StaffId::new("alice"), 5));
    assert!(!may.is_on_vacation(&StaffId::new("bob"), 5));
}

#[test]
fn duplicates_are_harmless_and_build_is_idempotent() {
    let t = table(&[("alice", &["7 7,7、8"]), ("bob", &["1"])]);
    let first = VacationIndex::build(&t, 4).unwrap();
    let second = VacationIndex::build(&t, 4).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.0.days_of(&StaffId::new("alice")).unwrap().len(), 2);
}
