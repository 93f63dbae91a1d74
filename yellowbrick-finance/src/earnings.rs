//! Parse monthly earnings CSV exports.
//!
//! Header: month,gross,irwe   (any order; month as YYYY-MM; irwe optional)

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::Path;

use crate::benefits::MonthlyEarnings;

struct Columns {
    month: usize,
    gross: usize,
    irwe: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        Ok(Self {
            month: find("month").context("earnings CSV has no 'month' column")?,
            gross: find("gross").context("earnings CSV has no 'gross' column")?,
            irwe: find("irwe"),
        })
    }
}

fn parse_month(s: &str) -> Option<NaiveDate> {
    let (y, m) = s.trim().split_once('-')?;
    NaiveDate::from_ymd_opt(y.parse().ok()?, m.parse().ok()?, 1)
}

/// "$1,234.50" -> 1234.5
fn parse_amount(s: &str) -> Option<f64> {
    let cleaned: String = s
        .trim()
        .chars()
        .filter(|c| *c != '$' && *c != ',')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

/// Parse an earnings CSV, skipping rows whose month or gross can't be read.
pub fn parse_earnings_csv(path: impl AsRef<Path>) -> Result<Vec<MonthlyEarnings>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path.as_ref())
        .with_context(|| format!("opening {}", path.as_ref().display()))?;

    let cols = Columns::from_headers(rdr.headers()?)?;
    let mut out = Vec::new();
    for (line, result) in rdr.records().enumerate() {
        let record = result?;

        let month = match record.get(cols.month).and_then(parse_month) {
            Some(m) => m,
            None => {
                tracing::warn!(row = line + 2, "skipping earnings row with bad month");
                continue;
            }
        };
        let gross = match record.get(cols.gross).and_then(parse_amount) {
            Some(g) => g,
            None => {
                tracing::warn!(row = line + 2, "skipping earnings row with bad gross amount");
                continue;
            }
        };
        let irwe = cols
            .irwe
            .and_then(|i| record.get(i))
            .and_then(parse_amount)
            .unwrap_or(0.0);

        out.push(MonthlyEarnings { month, gross, irwe });
    }

    Ok(out)
}
