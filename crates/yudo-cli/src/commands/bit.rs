//! Bit command implementation
//!
//! Prints random bit strings in the selected encoding.

use anyhow::{bail, Result};
use rand::Rng;
use std::process::ExitCode;

use crate::binary::{random_bits, Decoration, Encoding};
use crate::confirm::emit;

/// Options of one `bit` invocation.
#[derive(Debug, Clone)]
pub struct BitArgs {
    pub bits: u32,
    pub qty: usize,
    pub hex: bool,
    pub dec: bool,
    pub int: bool,
    pub b64: bool,
    pub b32: bool,
    pub b85: bool,
    pub group: usize,
    pub separator: Option<String>,
    pub prefix: String,
    pub suffix: String,
    pub head: String,
    pub tail: String,
}

impl Default for BitArgs {
    fn default() -> Self {
        Self {
            bits: 128,
            qty: 1,
            hex: false,
            dec: false,
            int: false,
            b64: false,
            b32: false,
            b85: false,
            group: 1,
            separator: None,
            prefix: String::new(),
            suffix: String::new(),
            head: String::new(),
            tail: String::new(),
        }
    }
}

impl BitArgs {
    /// Encoding selected by the flags; hex when none is set.
    ///
    /// At most one of the encoding flags may be set.
    pub fn encoding(&self) -> Result<Encoding> {
        let selected = [self.hex, self.dec, self.int, self.b64, self.b32, self.b85]
            .iter()
            .filter(|&&flag| flag)
            .count();
        if selected > 1 {
            bail!("choose one of --hex, --dec, --int, --b64, --b32 and --b85");
        }

        if self.int {
            return Ok(Encoding::Int);
        }
        if self.b64 {
            return Ok(Encoding::Base64);
        }
        if self.b85 {
            return Ok(Encoding::Base85);
        }
        if self.b32 {
            return Ok(Encoding::Base32);
        }

        let decoration = |separator: String| Decoration {
            separator,
            prefix: self.prefix.clone(),
            suffix: self.suffix.clone(),
            head: self.head.clone(),
            tail: self.tail.clone(),
        };
        if self.dec {
            let separator = self.separator.clone().unwrap_or_else(|| ",".to_string());
            if separator.is_empty() {
                bail!("decimal output needs a non-empty --separator");
            }
            return Ok(Encoding::Dec(decoration(separator)));
        }

        if self.group == 0 {
            bail!("--group must be at least 1");
        }
        Ok(Encoding::Hex {
            decoration: decoration(self.separator.clone().unwrap_or_default()),
            group: self.group,
        })
    }
}

/// `args.qty` encoded random strings.
pub fn generate<R: Rng>(args: &BitArgs, rng: &mut R) -> Result<Vec<String>> {
    let encoding = args.encoding()?;
    tracing::debug!(bits = args.bits, ?encoding, "encoding selected");
    Ok((0..args.qty)
        .map(|_| encoding.encode(&random_bits(&mut *rng, args.bits)))
        .collect())
}

/// Run the bit command.
pub fn run(args: BitArgs) -> Result<ExitCode> {
    let lines = generate(&args, &mut rand::thread_rng())?;
    emit(lines)?;
    Ok(ExitCode::SUCCESS)
}
