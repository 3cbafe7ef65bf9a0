//! Conf and disconf command implementations
//!
//! Reads, writes and deletes entries of the yudo configuration file.

use anyhow::{bail, Result};
use colored::Colorize;
use std::process::ExitCode;

use crate::config::{ConfigPath, ConfigStore};
use crate::confirm::ask_on_terminal;

/// What a `conf` invocation resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfOutcome {
    /// Lines to print.
    Show(Vec<String>),
    /// A value was written.
    Written,
    /// The named section or key does not exist.
    Missing(String),
}

fn section_lines(store: &ConfigStore, name: &str, out: &mut Vec<String>) {
    out.push(format!("[{}]", name));
    if let Some(section) = store.section(name) {
        for (key, value) in section {
            out.push(format!("{} = {}", key, value));
        }
    }
}

/// Applies a `SECTION[.KEY[=VALUE]]` argument to `store`.
pub fn apply(store: &mut ConfigStore, path: &ConfigPath) -> ConfOutcome {
    let mut lines = Vec::new();

    if path.section.is_empty() && path.key.is_none() {
        let names: Vec<String> = store.sections().map(str::to_string).collect();
        for (i, name) in names.iter().enumerate() {
            if i > 0 {
                lines.push(String::new());
            }
            section_lines(store, name, &mut lines);
        }
        return ConfOutcome::Show(lines);
    }

    match (&path.key, &path.value) {
        (None, _) => {
            if store.section(&path.section).is_none() {
                return ConfOutcome::Missing(format!("section [{}]", path.section));
            }
            section_lines(store, &path.section, &mut lines);
            ConfOutcome::Show(lines)
        }
        (Some(key), None) => match store.get(&path.section, key) {
            Some(value) => ConfOutcome::Show(vec![value.to_string()]),
            None => ConfOutcome::Missing(format!("key {}.{}", path.section, key)),
        },
        (Some(key), Some(value)) => {
            store.set(&path.section, key, value);
            ConfOutcome::Written
        }
    }
}

/// Run the conf command.
pub fn run(pattern: Option<String>) -> Result<ExitCode> {
    let path = ConfigPath::parse(pattern.as_deref().unwrap_or_default())?;
    let mut store = ConfigStore::load()?;
    tracing::debug!(file = %store.path().display(), ?path, "conf");

    match apply(&mut store, &path) {
        ConfOutcome::Show(lines) => {
            for line in lines {
                println!("{}", line);
            }
        }
        ConfOutcome::Written => store.save()?,
        ConfOutcome::Missing(what) => {
            eprintln!("{}", format!("no such {}", what).yellow());
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Run the disconf command.
pub fn run_remove(pattern: &str) -> Result<ExitCode> {
    let path = ConfigPath::parse(pattern)?;
    if path.section.is_empty() {
        bail!("disconf needs SECTION[.KEY]");
    }
    let mut store = ConfigStore::load()?;

    match path.key.as_deref() {
        Some(key) => {
            if store.get(&path.section, key).is_none() {
                eprintln!("{}", format!("no such key {}.{}", path.section, key).yellow());
                return Ok(ExitCode::SUCCESS);
            }
            if !ask_on_terminal("delete this key?")? {
                return Ok(ExitCode::SUCCESS);
            }
            store.remove_key(&path.section, key);
        }
        None => {
            if store.section(&path.section).is_none() {
                eprintln!("{}", format!("no such section [{}]", path.section).yellow());
                return Ok(ExitCode::SUCCESS);
            }
            if !ask_on_terminal("delete the whole section?")? {
                return Ok(ExitCode::SUCCESS);
            }
            store.remove_section(&path.section);
        }
    }

    store.save()?;
    tracing::debug!(section = %path.section, key = ?path.key, "config entry removed");
    Ok(ExitCode::SUCCESS)
}
