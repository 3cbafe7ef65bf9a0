//! Gendt command implementation
//!
//! Enumerates datetimes from interval, timestamp and offset ranges.

use anyhow::{Context, Result};
use chrono::{NaiveDateTime, TimeDelta};
use std::process::ExitCode;

use yudo_range::domain::DATETIME_FORMAT;
use yudo_range::{DateTimeRanges, Enumeration, FullMatch, OutputFormat};

use crate::config::ConfigStore;
use crate::confirm::{confirm_on_terminal, emit, Estimate};
use crate::range_args::{DateTimeOffsetRange, DateTimeRange, TimestampRange};

/// Options of one `gendt` invocation.
#[derive(Debug, Clone, Default)]
pub struct GendtArgs {
    pub format: Option<String>,
    pub intervals: Vec<DateTimeRange>,
    pub timestamps: Vec<TimestampRange>,
    pub offsets: Vec<DateTimeOffsetRange>,
    pub regex: Option<String>,
    /// Step by one millisecond instead of one second.
    pub millisecond: bool,
    pub force: bool,
}

pub fn build(args: &GendtArgs, config: &ConfigStore) -> Result<Enumeration<NaiveDateTime>> {
    let pattern = config.resolve(args.format.as_deref(), "gendt", "format", DATETIME_FORMAT);
    let format = OutputFormat::new(pattern).context("Invalid datetime format")?;
    let regex = args
        .regex
        .as_deref()
        .map(FullMatch::new)
        .transpose()
        .context("Invalid --regex")?;

    let unit = if args.millisecond {
        TimeDelta::milliseconds(1)
    } else {
        TimeDelta::seconds(1)
    };
    let ranges = DateTimeRanges {
        intervals: args.intervals.clone(),
        timestamps: args.timestamps.clone(),
        offsets: args.offsets.clone(),
        unit,
    };
    let segments = ranges
        .segments()
        .context("Failed to resolve datetime ranges")?;
    tracing::debug!(segments = segments.len(), ?unit, "datetime ranges resolved");

    let mut enumeration = Enumeration::new(format).matching(regex);
    enumeration.merge(segments);
    Ok(enumeration)
}

/// Run the gendt command.
pub fn run(args: GendtArgs) -> Result<ExitCode> {
    let config = ConfigStore::load()?;
    let enumeration = build(&args, &config)?;

    let estimate = Estimate::scan(enumeration.lines());
    if confirm_on_terminal(&estimate, args.force)? {
        emit(enumeration.lines())?;
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range_args;
    use pretty_assertions::assert_eq;

    fn lines(args: &GendtArgs) -> Vec<String> {
        build(args, &ConfigStore::default())
            .unwrap()
            .lines()
            .collect()
    }

    #[test]
    fn interval_in_seconds() {
        let args = GendtArgs {
            intervals: vec![range_args::datetime("2024.01.01+23:59:58~2024.01.02").unwrap()],
            ..GendtArgs::default()
        };
        assert_eq!(
            lines(&args),
            vec!["2024.01.01+23:59:58", "2024.01.01+23:59:59"]
        );
    }

    #[test]
    fn timestamps_read_in_their_zone() {
        let args = GendtArgs {
            format: Some("%Y-%m-%d %H:%M:%S".into()),
            timestamps: vec![range_args::timestamp("0~2,+08:00").unwrap()],
            ..GendtArgs::default()
        };
        assert_eq!(
            lines(&args),
            vec!["1970-01-01 08:00:00", "1970-01-01 08:00:01"]
        );
    }

    #[test]
    fn millisecond_unit_applies_to_offsets() {
        let args = GendtArgs {
            format: Some("%S%.3f".into()),
            offsets: vec![range_args::datetime_offset("0f~3f,2024.01.01+00:00:00").unwrap()],
            millisecond: true,
            ..GendtArgs::default()
        };
        assert_eq!(lines(&args), vec!["00.000", "00.001", "00.002"]);
    }

    #[test]
    fn adjacent_offsets_around_now_do_not_overreach() {
        let args = GendtArgs {
            format: Some("%H:%M:%S%.6f".into()),
            offsets: vec![
                range_args::datetime_offset("0s~1s").unwrap(),
                range_args::datetime_offset("1s~2s").unwrap(),
            ],
            ..GendtArgs::default()
        };
        let now = range_args::anchor().naive_local();
        let expected: Vec<String> = [now, now + TimeDelta::seconds(1)]
            .iter()
            .map(|t| t.format("%H:%M:%S%.6f").to_string())
            .collect();
        assert_eq!(lines(&args), expected);
    }

    #[test]
    fn overlapping_kinds_merge() {
        let args = GendtArgs {
            intervals: vec![range_args::datetime("2024.01.01+00:00:00~2024.01.01+00:00:02").unwrap()],
            offsets: vec![range_args::datetime_offset("1s~3s,2024.01.01+00:00:00").unwrap()],
            format: Some("%S".into()),
            ..GendtArgs::default()
        };
        assert_eq!(lines(&args), vec!["00", "01", "02"]);
    }
}
