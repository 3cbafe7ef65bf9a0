//! PRC administrative division codes.
//!
//! The dataset is a JSON object mapping 12-digit codes to either a name or an
//! object carrying a `name` field:
//!
//! ```json
//! { "110000000000": "北京市", "110101000000": { "name": "东城区" } }
//! ```

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use yudo_range::{FullMatch, TitleFilter};

/// Dataset file name used when neither a flag nor the config names one.
pub const DEFAULT_DATASET: &str = "code2022.json";

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AreaName {
    Plain(String),
    Named { name: String },
}

impl AreaName {
    fn into_name(self) -> String {
        match self {
            AreaName::Plain(name) | AreaName::Named { name } => name,
        }
    }
}

/// The loaded code table, ordered by code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AreaCodes {
    entries: BTreeMap<String, String>,
}

impl AreaCodes {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read area-code dataset: {}", path.display()))?;
        Self::from_json(&text)
            .with_context(|| format!("Failed to parse area-code dataset: {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let raw: BTreeMap<String, AreaName> = serde_json::from_str(text)?;
        let entries = raw
            .into_iter()
            .map(|(code, name)| (code, name.into_name()))
            .collect();
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn name(&self, code: &str) -> Option<&str> {
        self.entries.get(code).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(code, name)| (code.as_str(), name.as_str()))
    }

    /// Six-digit codes of every city- and county-level division.
    ///
    /// These are the codes that may open an ID number. Province rows
    /// (`XX0000`) are left out.
    pub fn counties(&self) -> impl Iterator<Item = &str> {
        self.entries
            .keys()
            .filter(|code| code.len() == 12 && code.ends_with("000000"))
            .map(|code| &code[..6])
            .filter(|code| !code.ends_with("0000"))
    }

    /// The division chain above and including `code`.
    pub fn detail(&self, code: &str) -> Result<Detail> {
        if code.is_empty() || !code.bytes().all(|b| b.is_ascii_digit()) {
            bail!("area code must be digits, got '{}'", code);
        }
        let code = &code[..code.len().min(12)];
        let full = format!("{:0<12}", code);

        let levels = [2, 4, 6, 9, 12]
            .into_iter()
            .map(|width| {
                let level = format!("{:0<12}", &full[..width]);
                let name = self.name(&level).map(str::to_string);
                (level, name)
            })
            .collect();
        Ok(Detail { levels })
    }
}

/// Province, city, county, township and village of one code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detail {
    pub levels: Vec<(String, Option<String>)>,
}

impl std::fmt::Display for Detail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .levels
            .iter()
            .map(|(code, name)| format!("{}({})", name.as_deref().unwrap_or("?"), code))
            .collect();
        write!(f, "{}", parts.join(" "))
    }
}

/// Filters for listing codes. Empty filter lists admit everything.
#[derive(Debug, Clone, Default)]
pub struct CodeQuery {
    pub provinces: Vec<String>,
    pub cities: Vec<String>,
    pub counties: Vec<String>,
    pub townships: Vec<String>,
    pub pattern: Option<FullMatch>,
    pub title: Option<TitleFilter>,
}

impl CodeQuery {
    pub fn admits(&self, code: &str, name: &str) -> bool {
        part_matches(&self.provinces, code, 0..2)
            && part_matches(&self.cities, code, 2..4)
            && part_matches(&self.counties, code, 4..6)
            && part_matches(&self.townships, code, 6..9)
            && self.pattern.as_ref().map_or(true, |p| p.is_match(code))
            && self.title.as_ref().map_or(true, |t| t.admits(name))
    }
}

fn part_matches(allowed: &[String], code: &str, span: std::ops::Range<usize>) -> bool {
    if allowed.is_empty() {
        return true;
    }
    code.get(span)
        .map_or(false, |part| allowed.iter().any(|a| a == part))
}
