//! Random byte strings and their text encodings.

use base64::Engine;
use rand::Rng;

/// Digest algorithms accepted in place of a bit count.
pub const ALGORITHMS: &[(&str, u32)] = &[
    ("SM3", 256),
    ("MD2", 128),
    ("MD4", 128),
    ("MD5", 128),
    ("SHA-0", 160),
    ("SHA-1", 160),
    ("SHA-224", 224),
    ("SHA3-224", 224),
    ("SHA-512/224", 224),
    ("SHA-256", 256),
    ("SHA3-256", 256),
    ("SHA-512/256", 256),
    ("SHA-384", 384),
    ("SHA3-384", 384),
    ("SHA-512", 512),
    ("SHA3-512", 512),
];

/// Parses a bit count or a digest algorithm name.
pub fn parse_bit_length(text: &str) -> Result<u32, String> {
    if let Some((_, bits)) = ALGORITHMS.iter().find(|(name, _)| *name == text) {
        return Ok(*bits);
    }
    match text.parse::<u32>() {
        Ok(bits) if bits > 0 => Ok(bits),
        _ => {
            let names: Vec<&str> = ALGORITHMS.iter().map(|(name, _)| *name).collect();
            Err(format!(
                "expected a positive bit count or one of: {}",
                names.join(", ")
            ))
        }
    }
}

/// Little-endian bytes of a uniformly random integer below `2^bits`.
pub fn random_bits<R: Rng>(rng: &mut R, bits: u32) -> Vec<u8> {
    let mut bytes = vec![0u8; bits.div_ceil(8) as usize];
    rng.fill(bytes.as_mut_slice());
    let spare = bits % 8;
    if spare != 0 {
        if let Some(top) = bytes.last_mut() {
            *top &= (1u8 << spare) - 1;
        }
    }
    bytes
}

/// Decimal rendering of a little-endian unsigned integer.
pub fn le_bytes_to_decimal(bytes: &[u8]) -> String {
    const CHUNK: u64 = 1_000_000_000;

    let mut digits: Vec<u8> = bytes.iter().rev().copied().collect();
    let mut chunks = Vec::new();
    while digits.iter().any(|&d| d != 0) {
        let mut remainder = 0u64;
        for digit in digits.iter_mut() {
            let current = remainder * 256 + u64::from(*digit);
            *digit = (current / CHUNK) as u8;
            remainder = current % CHUNK;
        }
        chunks.push(remainder);
    }

    match chunks.split_last() {
        None => "0".to_string(),
        Some((head, rest)) => {
            let mut out = head.to_string();
            for chunk in rest.iter().rev() {
                out.push_str(&format!("{:09}", chunk));
            }
            out
        }
    }
}

/// Decoration around grouped byte renderings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decoration {
    pub separator: String,
    pub prefix: String,
    pub suffix: String,
    pub head: String,
    pub tail: String,
}

/// How a byte string becomes text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Encoding {
    /// Lowercase hex, `group` bytes per decorated group.
    Hex { decoration: Decoration, group: usize },
    /// One decimal number per byte.
    Dec(Decoration),
    /// The whole string as one decimal integer.
    Int,
    Base64,
    Base32,
    Base85,
}

impl Encoding {
    pub fn encode(&self, bytes: &[u8]) -> String {
        match self {
            Encoding::Hex { decoration, group } => {
                let groups = bytes.chunks((*group).max(1)).map(|chunk| {
                    let hex: String = chunk.iter().map(|b| format!("{:02x}", b)).collect();
                    format!("{}{}{}", decoration.prefix, hex, decoration.suffix)
                });
                decorate(decoration, groups)
            }
            Encoding::Dec(decoration) => {
                let groups = bytes
                    .iter()
                    .map(|b| format!("{}{}{}", decoration.prefix, b, decoration.suffix));
                decorate(decoration, groups)
            }
            Encoding::Int => le_bytes_to_decimal(bytes),
            Encoding::Base64 => base64::engine::general_purpose::STANDARD.encode(bytes),
            Encoding::Base32 => base32(bytes),
            Encoding::Base85 => base85(bytes),
        }
    }
}

fn decorate(decoration: &Decoration, groups: impl Iterator<Item = String>) -> String {
    let body: Vec<String> = groups.collect();
    format!(
        "{}{}{}",
        decoration.head,
        body.join(&decoration.separator),
        decoration.tail
    )
}

const BASE32_ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// RFC 4648 base32 with `=` padding.
pub fn base32(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len().div_ceil(5) * 8);
    for chunk in bytes.chunks(5) {
        let mut block = [0u8; 5];
        block[..chunk.len()].copy_from_slice(chunk);
        let value = block.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b));

        let used = (chunk.len() * 8).div_ceil(5);
        for i in 0..8 {
            if i < used {
                let index = (value >> (35 - i * 5)) & 0x1f;
                out.push(char::from(BASE32_ALPHABET[index as usize]));
            } else {
                out.push('=');
            }
        }
    }
    out
}

const BASE85_ALPHABET: &[u8; 85] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz!#$%&()*+-;<=>?@^_`{|}~";

/// RFC 1924 base85 without padding.
pub fn base85(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len().div_ceil(4) * 5);
    for chunk in bytes.chunks(4) {
        let mut block = [0u8; 4];
        block[..chunk.len()].copy_from_slice(chunk);
        let mut value = u32::from_be_bytes(block);

        let mut encoded = [0u8; 5];
        for slot in encoded.iter_mut().rev() {
            *slot = BASE85_ALPHABET[(value % 85) as usize];
            value /= 85;
        }
        // A short chunk was zero-padded; drop the characters the padding produced.
        for &c in &encoded[..chunk.len() + 1] {
            out.push(char::from(c));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn bit_length_accepts_names_and_numbers() {
        assert_eq!(parse_bit_length("SHA-256"), Ok(256));
        assert_eq!(parse_bit_length("MD5"), Ok(128));
        assert_eq!(parse_bit_length("12"), Ok(12));
        assert!(parse_bit_length("0").is_err());
        assert!(parse_bit_length("SHA-257").is_err());
    }

    #[test]
    fn random_bits_respect_width() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..200 {
            let bytes = random_bits(&mut rng, 12);
            assert_eq!(bytes.len(), 2);
            assert!(bytes[1] < 16);
        }
        assert_eq!(random_bits(&mut rng, 256).len(), 32);
    }

    #[test]
    fn random_bits_are_seeded() {
        let a = random_bits(&mut Pcg32::seed_from_u64(1), 128);
        let b = random_bits(&mut Pcg32::seed_from_u64(1), 128);
        assert_eq!(a, b);
    }

    #[test]
    fn little_endian_decimal() {
        assert_eq!(le_bytes_to_decimal(&[]), "0");
        assert_eq!(le_bytes_to_decimal(&[0, 0]), "0");
        assert_eq!(le_bytes_to_decimal(&[0x01, 0x02]), "513");
        assert_eq!(
            le_bytes_to_decimal(&[0xff; 16]),
            "340282366920938463463374607431768211455"
        );
    }

    #[test]
    fn hex_groups_and_decoration() {
        let bytes = [0xde, 0xad, 0xbe, 0xef];
        let plain = Encoding::Hex {
            decoration: Decoration::default(),
            group: 1,
        };
        assert_eq!(plain.encode(&bytes), "deadbeef");

        let pythonic = Encoding::Hex {
            decoration: Decoration {
                prefix: r"\x".into(),
                head: "b\"".into(),
                tail: "\"".into(),
                ..Decoration::default()
            },
            group: 1,
        };
        assert_eq!(pythonic.encode(&bytes), r#"b"\xde\xad\xbe\xef""#);

        let grouped = Encoding::Hex {
            decoration: Decoration {
                separator: ":".into(),
                ..Decoration::default()
            },
            group: 3,
        };
        assert_eq!(grouped.encode(&bytes), "deadbe:ef");
    }

    #[test]
    fn decimal_bytes() {
        let dec = Encoding::Dec(Decoration {
            separator: ",".into(),
            head: "[".into(),
            tail: "]".into(),
            ..Decoration::default()
        });
        assert_eq!(dec.encode(&[1, 2, 255]), "[1,2,255]");
    }

    #[test]
    fn base_encodings() {
        assert_eq!(Encoding::Base64.encode(&[1, 2, 3]), "AQID");
        assert_eq!(base32(b"foobar"), "MZXW6YTBOI======");
        assert_eq!(base32(&[1, 2, 3]), "AEBAG===");
        assert_eq!(base85(b"hello"), "Xk~0{Zv");
        assert_eq!(base85(&[0, 0, 0, 0]), "00000");
        assert_eq!(base85(&[0xff]), "{{");
    }
}
