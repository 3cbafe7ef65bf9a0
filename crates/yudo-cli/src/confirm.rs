//! Size estimate and confirmation prompt shown before large outputs.

use anyhow::Result;
use colored::Colorize;
use std::convert::Infallible;
use std::io::{self, BufRead, Write};

/// Predicted size of an output about to be printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Estimate {
    /// Number of lines.
    pub items: u64,
    /// Text size in bytes, excluding line breaks.
    pub bytes: u64,
}

impl Estimate {
    pub fn new(items: u64, bytes: u64) -> Self {
        Self { items, bytes }
    }

    /// Counts `lines`, assuming every line is as long as the first one.
    pub fn scan<I>(lines: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        match Self::try_scan(lines.into_iter().map(Ok::<_, Infallible>)) {
            Ok(estimate) => estimate,
            Err(never) => match never {},
        }
    }

    /// [`Estimate::scan`] over fallible lines; stops at the first error.
    pub fn try_scan<I, T, E>(lines: I) -> Result<Self, E>
    where
        I: IntoIterator<Item = Result<T, E>>,
        T: AsRef<str>,
    {
        let mut items = 0u64;
        let mut width = 0u64;
        for line in lines {
            let line = line?;
            if items == 0 {
                width = line.as_ref().len() as u64;
            }
            items += 1;
        }
        Ok(Self {
            items,
            bytes: width.saturating_mul(items),
        })
    }
}

/// Renders a byte count with a 1024-based unit.
pub fn fmt_datasize(size: u64) -> String {
    const KB: f64 = 1024.0;
    let value = size as f64;
    if size < 1024 {
        format!("{} Bytes", size)
    } else if value < KB * KB {
        format!("{:.2} KB", value / KB)
    } else if value < KB * KB * KB {
        format!("{:.2} MB", value / (KB * KB))
    } else if value < KB * KB * KB * KB {
        format!("{:.2} GB", value / (KB * KB * KB))
    } else {
        format!("{:.2} TB", value / (KB * KB * KB * KB))
    }
}

/// Decides whether an output of `estimate` should be printed.
///
/// An empty estimate prints a notice and returns `false`. Otherwise, unless
/// `force` is set, the estimate is shown on `prompt` and one line is read
/// from `input`; only an answer starting with `Y` proceeds.
pub fn confirm<R: BufRead, W: Write>(
    estimate: &Estimate,
    force: bool,
    input: &mut R,
    prompt: &mut W,
) -> io::Result<bool> {
    if estimate.items == 0 {
        writeln!(prompt, "{}", "no data produced".yellow())?;
        return Ok(false);
    }
    if force {
        return Ok(true);
    }

    write!(
        prompt,
        "about {} items, {} of text, continue? (Y/[n]) ",
        estimate.items,
        fmt_datasize(estimate.bytes)
    )?;
    prompt.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(answer.starts_with('Y'))
}

/// [`confirm`] against the terminal.
pub fn confirm_on_terminal(estimate: &Estimate, force: bool) -> Result<bool> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut prompt = io::stderr();
    Ok(confirm(estimate, force, &mut input, &mut prompt)?)
}

/// Asks a yes/no question on the terminal; only `Y` agrees.
pub fn ask_on_terminal(question: &str) -> Result<bool> {
    let mut prompt = io::stderr();
    write!(prompt, "{} ", format!("{} (Y/[n])", question).yellow())?;
    prompt.flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(answer.starts_with('Y'))
}

/// Prints `lines` to stdout, one per line.
pub fn emit<I>(lines: I) -> Result<()>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    for line in lines {
        writeln!(out, "{}", line.as_ref())?;
    }
    out.flush()?;
    Ok(())
}

/// [`emit`] over fallible lines; stops at the first error.
pub fn try_emit<I, T>(lines: I) -> Result<()>
where
    I: IntoIterator<Item = Result<T>>,
    T: AsRef<str>,
{
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    for line in lines {
        writeln!(out, "{}", line?.as_ref())?;
    }
    out.flush()?;
    Ok(())
}
