//! Char command implementation
//!
//! Prints random characters drawn from a charset assembled from flags.

use anyhow::Result;
use colored::Colorize;
use rand::seq::SliceRandom;
use rand::Rng;
use std::process::ExitCode;

use crate::confirm::emit;

const DIGITS: &str = "0123456789";
const DIGITS_SAFE: &str = "23456789";
const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const LOWERCASE_SAFE: &str = "abcdefghijkmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const UPPERCASE_SAFE: &str = "ABCDEFGHJKLMNPQRSTUVWXYZ";
const SYMBOLS: &str = r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;
const SYMBOLS_UNSHIFTED: &str = r"`-=[]\;',./";
const SYMBOLS_SHIFTED: &str = r#"~!@#$%^&*()_+{}|:"<>?"#;
const BASE16: &str = "0123456789ABCDEF";
const BASE64: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz+/";

/// Options of one `char` invocation.
#[derive(Debug, Clone, Default)]
pub struct CharArgs {
    pub length: usize,
    pub digit: bool,
    pub digit_safe: bool,
    pub lowercase: bool,
    pub lowercase_safe: bool,
    pub uppercase: bool,
    pub uppercase_safe: bool,
    pub symbol: bool,
    pub symbol_unshifted: bool,
    pub symbol_shifted: bool,
    pub b16: bool,
    pub b64: bool,
    pub line_max: Option<usize>,
}

impl CharArgs {
    /// Characters to draw from, each listed once.
    ///
    /// `--b16` and `--b64` replace any custom selection.
    pub fn charset(&self) -> Vec<char> {
        if self.b16 {
            return BASE16.chars().collect();
        }
        if self.b64 {
            return BASE64.chars().collect();
        }

        let parts = [
            (self.digit, DIGITS),
            (self.uppercase, UPPERCASE),
            (self.lowercase, LOWERCASE),
            (self.digit_safe, DIGITS_SAFE),
            (self.uppercase_safe, UPPERCASE_SAFE),
            (self.lowercase_safe, LOWERCASE_SAFE),
            (self.symbol, SYMBOLS),
            (self.symbol_unshifted, SYMBOLS_UNSHIFTED),
            (self.symbol_shifted, SYMBOLS_SHIFTED),
        ];
        let mut charset: Vec<char> = Vec::new();
        for c in parts
            .iter()
            .filter(|(enabled, _)| *enabled)
            .flat_map(|(_, chars)| chars.chars())
        {
            if !charset.contains(&c) {
                charset.push(c);
            }
        }
        charset
    }
}

/// Draws `length` characters and splits them into lines of `line_max`.
pub fn generate<R: Rng>(args: &CharArgs, charset: &[char], rng: &mut R) -> Vec<String> {
    let text: Vec<char> = (0..args.length)
        .filter_map(|_| charset.choose(&mut *rng).copied())
        .collect();
    match args.line_max {
        Some(width) if width > 0 => text
            .chunks(width)
            .map(|line| line.iter().collect())
            .collect(),
        _ => vec![text.into_iter().collect()],
    }
}

/// Run the char command.
pub fn run(args: CharArgs) -> Result<ExitCode> {
    let charset = args.charset();
    if charset.is_empty() {
        eprintln!("{}", "no charset selected".yellow());
        return Ok(ExitCode::SUCCESS);
    }
    tracing::debug!(size = charset.len(), "charset assembled");

    emit(generate(&args, &charset, &mut rand::thread_rng()))?;
    Ok(ExitCode::SUCCESS)
}
