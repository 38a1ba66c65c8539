//! CSV persistence for the [`Ledger`].
//!
//! The backing file has a header row followed by one row per person:
//!
//! ```text
//! name,balance,deps,wds
//! Alex,5.0,5.0,0.0
//! ```
//!
//! `deps` is the amount owed to the user, `wds` the amount owed by the user.

use std::{
    fs::{self, File},
    io::{self, BufReader, Read, Write},
    path::Path,
};

use csv::{ReaderBuilder, WriterBuilder};

use crate::{
    Ledger, Record, ResultLedger,
    amount::{format_plain, parse_field},
    normalize_name,
};

/// Column names of the backing file.
pub const HEADER: [&str; 4] = ["name", "balance", "deps", "wds"];

/// Largest gap between `balance` and `owed_to_user - owed_by_user` that is
/// still considered consistent.
const DRIFT_TOLERANCE: f64 = 0.005;

/// What happened while reading the backing file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Rows turned into records.
    pub loaded: usize,
    /// Malformed rows that were ignored.
    pub skipped: usize,
    /// `true` when there was no file to read.
    pub missing: bool,
}

/// Loads the ledger stored at `path`.
///
/// A missing file is not an error: it yields an empty ledger and a report with
/// `missing` set.
pub fn load(path: impl AsRef<Path>) -> ResultLedger<(Ledger, LoadReport)> {
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            tracing::warn!("No file \"{}\" found", path.display());
            let report = LoadReport {
                missing: true,
                ..LoadReport::default()
            };
            return Ok((Ledger::new(), report));
        }
        Err(err) => return Err(err.into()),
    };

    let (ledger, report) = read_from(BufReader::new(file))?;
    tracing::info!(
        "Successfully read file \"{}\": {} people {:?}",
        path.display(),
        ledger.len(),
        ledger.names()
    );
    Ok((ledger, report))
}

/// Reads a ledger from CSV data. The first row is always treated as header.
///
/// Rows with fewer than four fields, an empty name or an unparsable number are
/// skipped and counted; they never abort the read. Empty numeric fields are
/// read as zero.
pub fn read_from<R: Read>(reader: R) -> ResultLedger<(Ledger, LoadReport)> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut ledger = Ledger::new();
    let mut report = LoadReport::default();

    for (idx, result) in reader.records().enumerate() {
        // Data rows start on line 2.
        let line = idx + 2;
        let row = match result {
            Ok(row) => row,
            Err(err) if err.is_io_error() => return Err(err.into()),
            Err(err) => {
                tracing::debug!("line {line}: unreadable row: {err}");
                report.skipped += 1;
                continue;
            }
        };

        match parse_row(&row) {
            Some((name, record)) => {
                ledger.upsert(name, record);
                report.loaded += 1;
            }
            None => {
                tracing::debug!("line {line}: malformed row {row:?}");
                report.skipped += 1;
            }
        }
    }

    if report.skipped > 0 {
        tracing::warn!("Skipped {} malformed row(s)", report.skipped);
    }

    let drifted: Vec<&str> = ledger
        .iter()
        .filter(|(_, record)| (record.balance - record.net()).abs() > DRIFT_TOLERANCE)
        .map(|(name, _)| name)
        .collect();
    if !drifted.is_empty() {
        tracing::warn!("Balance differs from owed totals for {drifted:?}");
    }

    Ok((ledger, report))
}

fn parse_row(row: &csv::StringRecord) -> Option<(String, Record)> {
    if row.len() < HEADER.len() {
        return None;
    }
    let name = normalize_name(row.get(0)?).ok()?;
    let balance = parse_field(row.get(1)?)?;
    let owed_to_user = parse_field(row.get(2)?)?;
    let owed_by_user = parse_field(row.get(3)?)?;
    Some((name, Record::new(balance, owed_to_user, owed_by_user)))
}

/// Overwrites `path` with the whole ledger, creating parent directories when
/// needed.
pub fn save(ledger: &Ledger, path: impl AsRef<Path>) -> ResultLedger<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    write_to(ledger, file)?;
    tracing::info!(
        "Successfully saved {} people to \"{}\"",
        ledger.len(),
        path.display()
    );
    Ok(())
}

/// Writes the header row and one row per record, in ledger order.
pub fn write_to<W: Write>(ledger: &Ledger, writer: W) -> ResultLedger<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);
    writer.write_record(HEADER)?;
    for (name, record) in ledger.iter() {
        writer.write_record([
            name,
            format_plain(record.balance).as_str(),
            format_plain(record.owed_to_user).as_str(),
            format_plain(record.owed_by_user).as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Direction;

    fn read(data: &str) -> (Ledger, LoadReport) {
        read_from(data.as_bytes()).unwrap()
    }

    fn written(ledger: &Ledger) -> String {
        let mut out = Vec::new();
        write_to(ledger, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn reads_well_formed_rows() {
        let (ledger, report) = read("name,balance,deps,wds\nAlex,5.0,5.0,0.0\nSam,-2.5,1,3.5\n");
        assert_eq!(report.loaded, 2);
        assert_eq!(report.skipped, 0);
        assert_eq!(ledger.get("Alex"), Some(&Record::new(5.0, 5.0, 0.0)));
        assert_eq!(ledger.get("Sam"), Some(&Record::new(-2.5, 1.0, 3.5)));
        assert_eq!(ledger.names(), vec!["Alex", "Sam"]);
    }

    #[test]
    fn empty_numeric_fields_read_as_zero() {
        let (ledger, _) = read("name,balance,deps,wds\nAlex,,4,\n");
        assert_eq!(ledger.get("Alex"), Some(&Record::new(0.0, 4.0, 0.0)));
    }

    #[test]
    fn malformed_rows_are_skipped_not_fatal() {
        let data = "name,balance,deps,wds\n\
                    Short,1,2\n\
                    ,1,1,0\n\
                    Bad,abc,0,0\n\
                    Alex,1,1,0\n";
        let (ledger, report) = read(data);
        assert_eq!(report.skipped, 3);
        assert_eq!(report.loaded, 1);
        assert_eq!(ledger.names(), vec!["Alex"]);
    }

    #[test]
    fn extra_fields_are_ignored() {
        let (ledger, report) = read("name,balance,deps,wds\nAlex,1,1,0,note\n");
        assert_eq!(report.skipped, 0);
        assert_eq!(ledger.get("Alex"), Some(&Record::new(1.0, 1.0, 0.0)));
    }

    #[test]
    fn duplicate_name_keeps_first_position_and_last_values() {
        let (ledger, _) = read("name,balance,deps,wds\nA,1,1,0\nB,2,2,0\nA,9,9,0\n");
        assert_eq!(ledger.names(), vec!["A", "B"]);
        assert_eq!(ledger.get("A"), Some(&Record::new(9.0, 9.0, 0.0)));
    }

    #[test]
    fn header_only_yields_empty_ledger() {
        let (ledger, report) = read("name,balance,deps,wds\n");
        assert!(ledger.is_empty());
        assert_eq!(report, LoadReport::default());
    }

    #[test]
    fn empty_ledger_still_writes_header() {
        assert_eq!(written(&Ledger::new()), "name,balance,deps,wds\n");
    }

    #[test]
    fn writes_rows_in_ledger_order() {
        let mut ledger = Ledger::new();
        ledger.toggle("Sam").unwrap();
        ledger.toggle("Alex").unwrap();
        ledger.adjust("Alex", 5.0, Direction::CreditToUser).unwrap();
        ledger.adjust("Sam", 2.25, Direction::DebtFromUser).unwrap();
        assert_eq!(
            written(&ledger),
            "name,balance,deps,wds\nSam,-2.25,0.0,2.25\nAlex,5.0,5.0,0.0\n"
        );
    }

    #[test]
    fn names_with_commas_are_quoted() {
        let mut ledger = Ledger::new();
        ledger.toggle("Doe, Jane").unwrap();
        let data = written(&ledger);
        assert!(data.contains("\"Doe, Jane\",0.0,0.0,0.0"));
        let (reloaded, _) = read(&data);
        assert!(reloaded.contains("Doe, Jane"));
    }
}
