//! Idc command implementation
//!
//! Enumerates PRC resident ID numbers from area codes, birth dates and
//! sequence numbers, each component merged through a SegmentSet.

use anyhow::{bail, Result};
use chrono::{Datelike, NaiveDate};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;

use yudo_range::{adapter, DateRanges, Segment, SegmentSet};

use crate::adcode::{AreaCodes, CodeQuery, DEFAULT_DATASET};
use crate::config::ConfigStore;
use crate::confirm::{confirm_on_terminal, emit, Estimate};
use crate::idcard::{self, CHECKSUM_CHARS};
use crate::range_args::{AgeRange, DateRange, IntegerRange};

/// Length of one ID number, used for the size estimate.
const LINE_BYTES: u64 = 18;

/// Sequence numbers used when `--seq` is absent (996..999 are reserved).
pub const DEFAULT_SEQ: &str = "1~996";

/// Options of one `idc` invocation.
#[derive(Debug, Clone, Default)]
pub struct IdcArgs {
    pub data: Option<PathBuf>,
    pub provinces: Vec<String>,
    pub cities: Vec<String>,
    pub counties: Vec<String>,
    pub ages: Vec<AgeRange>,
    pub births: Vec<DateRange>,
    pub seqs: Vec<IntegerRange>,
    pub male: bool,
    pub female: bool,
    pub checksums: Option<String>,
    pub force: bool,
}

/// The resolved components of an ID enumeration.
#[derive(Debug, Clone)]
pub struct IdcPlan {
    pub codes: Vec<String>,
    pub births: Vec<NaiveDate>,
    pub seqs: Vec<i64>,
    pub checksums: Option<Vec<char>>,
}

impl IdcPlan {
    pub fn build(args: &IdcArgs, dataset: &AreaCodes) -> Result<Self> {
        let checksums = match args.checksums.as_deref() {
            None | Some("") => None,
            Some(chars) => {
                if let Some(bad) = chars.chars().find(|c| !CHECKSUM_CHARS.contains(*c)) {
                    bail!("checksum '{}' is not one of {}", bad, CHECKSUM_CHARS);
                }
                Some(chars.chars().collect())
            }
        };

        Ok(Self {
            codes: area_codes(args, dataset),
            births: birth_dates(args)?,
            seqs: sequences(args)?,
            checksums,
        })
    }

    /// Name of the first component that has no values.
    pub fn empty_component(&self) -> Option<&'static str> {
        if self.codes.is_empty() {
            Some("area code")
        } else if self.births.is_empty() {
            Some("birth date")
        } else if self.seqs.is_empty() {
            Some("sequence number")
        } else {
            None
        }
    }

    /// Item count of the full product, scaled by the checksum restriction.
    pub fn estimate(&self) -> Estimate {
        let mut items = (self.codes.len() as u64)
            .saturating_mul(self.births.len() as u64)
            .saturating_mul(self.seqs.len() as u64);
        if let Some(checksums) = &self.checksums {
            let mut distinct = checksums.clone();
            distinct.sort_unstable();
            distinct.dedup();
            items = items.saturating_mul(distinct.len() as u64).div_ceil(11);
        }
        Estimate::new(items, items.saturating_mul(LINE_BYTES))
    }

    pub fn numbers(&self) -> impl Iterator<Item = String> + '_ {
        self.codes.iter().flat_map(move |code| {
            self.births.iter().flat_map(move |birth| {
                self.seqs.iter().filter_map(move |seq| {
                    let body = format!(
                        "{}{:04}{:02}{:02}{:03}",
                        code,
                        birth.year(),
                        birth.month(),
                        birth.day(),
                        seq
                    );
                    let number = idcard::patch_checksum(&body).ok()?;
                    let admitted = self.checksums.as_ref().map_or(true, |allowed| {
                        number.chars().last().is_some_and(|c| allowed.contains(&c))
                    });
                    admitted.then_some(number)
                })
            })
        })
    }
}

/// County-level codes, sorted and deduplicated through an integer SegmentSet.
fn area_codes(args: &IdcArgs, dataset: &AreaCodes) -> Vec<String> {
    let query = CodeQuery {
        provinces: args.provinces.clone(),
        cities: args.cities.clone(),
        counties: args.counties.clone(),
        ..CodeQuery::default()
    };
    let points: SegmentSet<i64> = dataset
        .counties()
        .filter(|code| query.admits(code, ""))
        .filter_map(|code| code.parse::<i64>().ok())
        .map(|code| Segment::new(code, code + 1))
        .collect();
    points.iter().map(|code| format!("{:06}", code)).collect()
}

fn birth_dates(args: &IdcArgs) -> Result<Vec<NaiveDate>> {
    let ranges = DateRanges {
        intervals: args.births.clone(),
        ages: args.ages.clone(),
        offsets: Vec::new(),
    };
    let set = SegmentSet::new(ranges.segments()?);
    Ok(set
        .iter()
        .filter(|date| (0..=9999).contains(&date.year()))
        .collect())
}

fn sequences(args: &IdcArgs) -> Result<Vec<i64>> {
    let segments = if args.seqs.is_empty() {
        vec![adapter::integer_segment(&crate::range_args::integer(DEFAULT_SEQ)?)]
    } else {
        args.seqs.iter().map(adapter::integer_segment).collect()
    };
    let parity = match (args.male, args.female) {
        (true, false) => Some(1),
        (false, true) => Some(0),
        _ => None,
    };
    Ok(SegmentSet::new(segments)
        .iter()
        .filter(|seq| (0..1000).contains(seq))
        .filter(|seq| parity.map_or(true, |p| seq.rem_euclid(2) == p))
        .collect())
}

/// Run the idc command.
pub fn run(args: IdcArgs) -> Result<ExitCode> {
    let config = ConfigStore::load()?;
    let path = args
        .data
        .clone()
        .unwrap_or_else(|| PathBuf::from(config.resolve(None, "idc", "data", DEFAULT_DATASET)));
    let dataset = AreaCodes::load(&path)?;
    tracing::debug!(path = %path.display(), entries = dataset.len(), "area codes loaded");

    let plan = IdcPlan::build(&args, &dataset)?;
    if let Some(component) = plan.empty_component() {
        eprintln!("{}", format!("no matching {}", component).yellow());
        return Ok(ExitCode::SUCCESS);
    }
    tracing::debug!(
        codes = plan.codes.len(),
        births = plan.births.len(),
        seqs = plan.seqs.len(),
        "id components resolved"
    );

    if confirm_on_terminal(&plan.estimate(), args.force)? {
        emit(plan.numbers())?;
    }
    Ok(ExitCode::SUCCESS)
}
