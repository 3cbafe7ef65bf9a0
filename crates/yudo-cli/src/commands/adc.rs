//! Adc command implementation
//!
//! Looks up one area code or lists codes matching the given filters.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;

use yudo_range::{FullMatch, TitleFilter};

use crate::adcode::{AreaCodes, CodeQuery, DEFAULT_DATASET};
use crate::config::ConfigStore;
use crate::confirm::emit;

/// Options of one `adc` invocation.
#[derive(Debug, Clone, Default)]
pub struct AdcArgs {
    pub data: Option<PathBuf>,
    pub detail: Option<String>,
    pub provinces: Vec<String>,
    pub cities: Vec<String>,
    pub counties: Vec<String>,
    pub townships: Vec<String>,
    pub regex: Option<String>,
    pub name: Option<String>,
    pub purify: bool,
}

/// `code name` lines (or bare codes) admitted by the filters.
pub fn listing(args: &AdcArgs, dataset: &AreaCodes) -> Result<Vec<String>> {
    let query = CodeQuery {
        provinces: args.provinces.clone(),
        cities: args.cities.clone(),
        counties: args.counties.clone(),
        townships: args.townships.clone(),
        pattern: args
            .regex
            .as_deref()
            .map(FullMatch::new)
            .transpose()
            .context("Invalid --regex")?,
        title: args.name.as_deref().map(TitleFilter::new),
    };

    Ok(dataset
        .iter()
        .filter(|(code, name)| query.admits(code, name))
        .map(|(code, name)| {
            if args.purify {
                code.to_string()
            } else {
                format!("{} {}", code, name)
            }
        })
        .collect())
}

/// Run the adc command.
pub fn run(args: AdcArgs) -> Result<ExitCode> {
    let config = ConfigStore::load()?;
    let path = args
        .data
        .clone()
        .unwrap_or_else(|| PathBuf::from(config.resolve(None, "adc", "data", DEFAULT_DATASET)));
    let dataset = AreaCodes::load(&path)?;
    tracing::debug!(path = %path.display(), entries = dataset.len(), "area codes loaded");

    if let Some(code) = args.detail.as_deref() {
        let detail = dataset.detail(code)?;
        println!("{}", "detail:".bold());
        println!("  {}", detail);
        return Ok(ExitCode::SUCCESS);
    }

    emit(listing(&args, &dataset)?)?;
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dataset() -> AreaCodes {
        AreaCodes::from_json(
            r#"{
                "110000000000": "北京市",
                "110101000000": "东城区",
                "110101001000": "东华门街道",
                "440106000000": {"name": "天河区"}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn lists_everything_without_filters() {
        let lines = listing(&AdcArgs::default(), &dataset()).unwrap();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[3], "440106000000 天河区");
    }

    #[test]
    fn purify_drops_names() {
        let args = AdcArgs {
            townships: vec!["001".into()],
            purify: true,
            ..AdcArgs::default()
        };
        assert_eq!(listing(&args, &dataset()).unwrap(), vec!["110101001000"]);
    }

    #[test]
    fn name_and_regex_filters() {
        let args = AdcArgs {
            name: Some("区".into()),
            regex: Some(r"11\d{10}".into()),
            ..AdcArgs::default()
        };
        assert_eq!(
            listing(&args, &dataset()).unwrap(),
            vec!["110101000000 东城区"]
        );
    }

    #[test]
    fn bad_regex_is_an_error() {
        let args = AdcArgs {
            regex: Some("(".into()),
            ..AdcArgs::default()
        };
        assert!(listing(&args, &dataset()).is_err());
    }
}
