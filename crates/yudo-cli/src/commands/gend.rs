//! Gend command implementation
//!
//! Enumerates dates from interval, age and offset ranges.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::process::ExitCode;

use yudo_range::domain::DATE_FORMAT;
use yudo_range::{DateRanges, Enumeration, FullMatch, OutputFormat, ZodiacFilter};

use crate::config::ConfigStore;
use crate::confirm::{confirm_on_terminal, emit, Estimate};
use crate::range_args::{AgeRange, DateOffsetRange, DateRange};

/// Options of one `gend` invocation.
#[derive(Debug, Clone, Default)]
pub struct GendArgs {
    pub format: Option<String>,
    pub intervals: Vec<DateRange>,
    pub ages: Vec<AgeRange>,
    pub offsets: Vec<DateOffsetRange>,
    pub zodiacs: Option<String>,
    pub regex: Option<String>,
    pub force: bool,
}

/// Builds the filtered date enumeration described by `args`.
pub fn build(args: &GendArgs, config: &ConfigStore) -> Result<Enumeration<NaiveDate>> {
    let pattern = config.resolve(args.format.as_deref(), "gend", "format", DATE_FORMAT);
    let format = OutputFormat::new(pattern).context("Invalid date format")?;
    let regex = args
        .regex
        .as_deref()
        .map(FullMatch::new)
        .transpose()
        .context("Invalid --regex")?;

    let ranges = DateRanges {
        intervals: args.intervals.clone(),
        ages: args.ages.clone(),
        offsets: args.offsets.clone(),
    };
    let segments = ranges.segments().context("Failed to resolve date ranges")?;
    tracing::debug!(segments = segments.len(), "date ranges resolved");

    let mut enumeration = Enumeration::new(format).matching(regex);
    if let Some(animals) = args.zodiacs.as_deref() {
        let zodiacs = ZodiacFilter::new(animals);
        enumeration = enumeration.keep(move |date| zodiacs.admits(date));
    }
    enumeration.merge(segments);
    tracing::debug!(merged = ?enumeration.segments(), "date segments merged");
    Ok(enumeration)
}

/// Run the gend command.
pub fn run(args: GendArgs) -> Result<ExitCode> {
    let config = ConfigStore::load()?;
    let enumeration = build(&args, &config)?;

    let estimate = Estimate::scan(enumeration.lines());
    if confirm_on_terminal(&estimate, args.force)? {
        emit(enumeration.lines())?;
    }
    Ok(ExitCode::SUCCESS)
}
