use crate::calendar::{weekday_label, HolidayCalendar};
use crate::model::{DutyLedger, MonthRoster, StaffId};
use crate::scheduler::Violation;
use crate::vacation::{VacationRow, VacationTable};
use anyhow::{bail, Context};
use chrono::NaiveDate;
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Import du registre depuis CSV: header `name[,count]`
pub fn import_ledger_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<DutyLedger> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let mut rows = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let name = rec.get(0).context("missing name")?.trim();
        if name.is_empty() {
            bail!("invalid staff row (empty name)");
        }
        let count = match rec.get(1).map(str::trim) {
            None | Some("") => 0,
            Some(raw) => raw
                .parse::<u32>()
                .with_context(|| format!("invalid count for {name}: {raw}"))?,
        };
        rows.push((StaffId::new(name), count));
    }
    let ledger = DutyLedger::new(rows)?;
    if ledger.is_empty() {
        bail!("staff file contains no rows");
    }
    Ok(ledger)
}

/// Import des jours fériés: header `date` (`YYYY-MM-DD` ou `YYYY/MM/DD`)
pub fn import_holidays_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<NaiveDate>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let raw = rec.get(0).context("missing date")?.trim();
        if raw.is_empty() {
            continue;
        }
        out.push(parse_date(raw)?);
    }
    Ok(out)
}

fn parse_date(raw: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y/%m/%d"))
        .with_context(|| format!("invalid date: {raw}"))
}

/// Import des demandes de congés: header `name,<12 mois>`, la première
/// colonne de mois étant `anchor_month`.
pub fn import_vacations_csv<P: AsRef<Path>>(
    path: P,
    anchor_month: u32,
) -> anyhow::Result<VacationTable> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let mut table = VacationTable::new(anchor_month)?;
    for rec in rdr.records() {
        let rec = rec?;
        let name = rec.get(0).context("missing name")?.trim();
        if name.is_empty() {
            continue;
        }
        let cells = rec.iter().skip(1).take(12).map(|c| c.trim().to_string()).collect();
        table.rows.push(VacationRow {
            staff: StaffId::new(name),
            cells,
        });
    }
    Ok(table)
}

/// Export CSV d'un mois: header `date,weekday,kind,day,night`
pub fn write_roster_csv<W: Write>(
    writer: W,
    roster: &MonthRoster,
    holidays: &HolidayCalendar,
) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_writer(writer);
    w.write_record(["date", "weekday", "kind", "day", "night"])?;
    for d in &roster.days {
        let date = d.date.to_string();
        let weekday = weekday_label(d.date);
        w.write_record([
            date.as_str(),
            weekday.as_str(),
            holidays.kind(d.date).as_str(),
            d.day.as_ref().map(StaffId::as_str).unwrap_or(""),
            d.night.as_str(),
        ])?;
    }
    w.flush()?;
    Ok(())
}

pub fn export_roster_csv<P: AsRef<Path>>(
    path: P,
    roster: &MonthRoster,
    holidays: &HolidayCalendar,
) -> anyhow::Result<()> {
    let file = fs::File::create(path.as_ref())
        .with_context(|| format!("creating {}", path.as_ref().display()))?;
    write_roster_csv(file, roster, holidays)
}

/// Export JSON d'un mois (jolie mise en forme)
pub fn export_roster_json<P: AsRef<Path>>(path: P, roster: &MonthRoster) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(roster)?;
    fs::write(path, s)?;
    Ok(())
}

/// Rapport CSV des anomalies: header `date,staff,kind`
pub fn export_violations_csv<P: AsRef<Path>>(
    path: P,
    violations: &[Violation],
) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["date", "staff", "kind"])?;
    for v in violations {
        let date = v.date.to_string();
        w.write_record([
            date.as_str(),
            v.staff.as_ref().map(StaffId::as_str).unwrap_or(""),
            v.kind.as_str(),
        ])?;
    }
    w.flush()?;
    Ok(())
}
