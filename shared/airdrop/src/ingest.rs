use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::recipient::parse_address;
use crate::{AirdropError, Recipient};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestOptions {
    /// Fail on the first address that appears twice instead of reporting it.
    pub reject_duplicates: bool,
}

/// A row dropped during ingestion. `line` is 1-based and counts the header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    pub line: u64,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    pub recipients: Vec<Recipient>,
    pub skipped: Vec<SkippedRow>,
    /// Addresses listed more than once, in order of first repetition.
    pub duplicates: Vec<Address>,
}

pub fn read_recipients(path: &Path, options: &IngestOptions) -> Result<IngestReport, AirdropError> {
    parse_recipients(File::open(path)?, options)
}

/// Reads a recipient table with an `address` column and an optional `amount` column.
///
/// Header names match case-insensitively and other columns are ignored.
/// Rows with a missing or invalid address, or that are malformed CSV, are
/// skipped and reported. Amounts are carried through unvalidated.
pub fn parse_recipients<R: Read>(
    reader: R,
    options: &IngestOptions,
) -> Result<IngestReport, AirdropError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    if headers.iter().all(str::is_empty) {
        return Err(AirdropError::EmptyRecipientSet);
    }
    let column = |name: &str| {
        headers
            .iter()
            .position(|header| header.trim_start_matches('\u{feff}').eq_ignore_ascii_case(name))
    };
    let address_column = column("address").ok_or(AirdropError::MissingAddressColumn)?;
    let amount_column = column("amount");

    let mut report = IngestReport::default();
    let mut seen = HashSet::new();
    for result in csv_reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(err) if err.is_io_error() => return Err(err.into()),
            Err(err) => {
                let line = err.position().map(|position| position.line()).unwrap_or_default();
                report.skip(line, format!("malformed row: {err}"));
                continue;
            }
        };
        if record.iter().all(str::is_empty) {
            continue;
        }
        let line = record
            .position()
            .map(|position| position.line())
            .unwrap_or_default();

        let address = match record.get(address_column).filter(|text| !text.is_empty()) {
            Some(text) => match parse_address(text) {
                Ok(address) => address,
                Err(err) => {
                    report.skip(line, err.to_string());
                    continue;
                }
            },
            None => {
                report.skip(line, "missing address".to_string());
                continue;
            }
        };
        let amount = amount_column
            .and_then(|column| record.get(column))
            .filter(|text| !text.is_empty())
            .map(str::to_string);

        if !seen.insert(address) {
            if options.reject_duplicates {
                return Err(AirdropError::DuplicateAddress(address));
            }
            if !report.duplicates.contains(&address) {
                warn!(line, %address, "Address listed more than once");
                report.duplicates.push(address);
            }
        }
        report.recipients.push(Recipient::new(address, amount));
    }

    if !report.skipped.is_empty() {
        warn!(
            skipped = report.skipped.len(),
            kept = report.recipients.len(),
            "Dropped invalid recipient rows"
        );
    }
    if report.recipients.is_empty() {
        return Err(AirdropError::EmptyRecipientSet);
    }
    Ok(report)
}

impl IngestReport {
    fn skip(&mut self, line: u64, reason: String) {
        warn!(line, reason = %reason, "Skipping recipient row");
        self.skipped.push(SkippedRow { line, reason });
    }
}
