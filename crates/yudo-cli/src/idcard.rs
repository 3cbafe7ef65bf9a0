//! PRC resident ID number checksum (ISO 7064 MOD 11-2).

use anyhow::{bail, Result};

/// Weights of the first seventeen digits.
pub const WEIGHTS: [u32; 17] = [7, 9, 10, 5, 8, 4, 2, 1, 6, 3, 7, 9, 10, 5, 8, 4, 2];

/// Check character indexed by the weighted sum modulo 11.
const CHECK_DIGITS: &[u8; 11] = b"10X98765432";

/// Characters a checksum can take.
pub const CHECKSUM_CHARS: &str = "0123456789X";

/// Check character for the first seventeen digits of `number`.
pub fn checksum(number: &str) -> Result<char> {
    let body = number.as_bytes();
    if body.len() < 17 {
        bail!("ID number needs at least 17 digits, got '{}'", number);
    }

    let mut sum = 0u32;
    for (digit, weight) in body.iter().zip(WEIGHTS) {
        if !digit.is_ascii_digit() {
            bail!("ID number must start with 17 digits, got '{}'", number);
        }
        sum += u32::from(digit - b'0') * weight;
    }
    Ok(char::from(CHECK_DIGITS[(sum % 11) as usize]))
}

/// The first seventeen digits of `number` followed by their check character.
pub fn patch_checksum(number: &str) -> Result<String> {
    let check = checksum(number)?;
    let mut patched = String::with_capacity(18);
    patched.push_str(&number[..17]);
    patched.push(check);
    Ok(patched)
}
