//! Reversible, salt-keyed obfuscation of numeric subject ids
//!
//! Issued tokens carry the user id as a short alphanumeric string
//! instead of a plain decimal so casual observers cannot read or
//! enumerate ids from captured tokens. The mapping is a bijection keyed
//! by a shared secret: encoding under one secret and decoding under
//! another fails.
//!
//! This is an identifier-shortening transform, not a security boundary.
//! Anyone holding the secret can reverse it; access control rests on
//! the token signature alone.

use crate::errors::TokenError;

/// Alphabet for encoded subject ids. Order matters: it is the identity
/// permutation that every salt-keyed shuffle starts from.
const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ1234567890";

/// Salt-keyed codec between non-negative `i64` ids and obfuscated strings
///
/// Encoded form: a lottery character chosen from the id, the id digits
/// in a per-value shuffled base-62 alphabet, and a trailing checksum
/// character. Decoding rebuilds the shuffles from the lottery character
/// and validates by re-encoding, so tampered or wrong-secret strings
/// are rejected rather than silently mapped to a different id.
#[derive(Clone)]
pub struct SubjectCodec {
    /// Alphabet shuffled once by the secret
    base: Vec<u8>,
    secret: Vec<u8>,
    /// Sum of the secret bytes, reduced into the alphabet
    checksum_offset: usize,
}

impl std::fmt::Debug for SubjectCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubjectCodec").finish_non_exhaustive()
    }
}

impl SubjectCodec {
    /// Creates a codec keyed by the given secret
    pub fn new(secret: &str) -> Self {
        let secret = secret.as_bytes().to_vec();
        let mut base = ALPHABET.to_vec();
        consistent_shuffle(&mut base, &secret);
        let checksum_offset = secret.iter().map(|&b| b as usize).sum::<usize>() % ALPHABET.len();

        Self {
            base,
            secret,
            checksum_offset,
        }
    }

    /// Encodes a non-negative id into its obfuscated string form
    pub fn encode(&self, id: i64) -> Result<String, TokenError> {
        if id < 0 {
            return Err(TokenError::Encoding {
                message: "id must be non-negative".to_string(),
            });
        }

        let radix = self.base.len() as i64;
        let lottery = self.base[(id % radix) as usize];
        let alphabet = self.per_value_alphabet(lottery);

        let mut digits = Vec::new();
        let mut remainder = id;
        loop {
            digits.push((remainder % radix) as usize);
            remainder /= radix;
            if remainder == 0 {
                break;
            }
        }

        let mut out = Vec::with_capacity(digits.len() + 2);
        out.push(lottery);
        out.extend(digits.iter().rev().map(|&d| alphabet[d]));
        out.push(alphabet[((id % radix) as usize + self.checksum_offset) % self.base.len()]);

        // Alphabet is pure ASCII, so the bytes are valid UTF-8
        String::from_utf8(out).map_err(|_| TokenError::Encoding {
            message: "non-ascii alphabet".to_string(),
        })
    }

    /// Decodes an obfuscated string back to its id
    ///
    /// Fails with `TokenError::Decoding` when the string contains
    /// characters outside the alphabet, overflows `i64`, fails the
    /// checksum, or does not round-trip to the same bytes (the wrong
    /// secret or a tampered string).
    pub fn decode(&self, encoded: &str) -> Result<i64, TokenError> {
        let bytes = encoded.as_bytes();
        if bytes.len() < 3 {
            return Err(decoding_error("encoded id too short"));
        }

        let lottery = bytes[0];
        let alphabet = self.per_value_alphabet(lottery);
        let radix = self.base.len() as i64;

        let mut id: i64 = 0;
        for &b in &bytes[1..bytes.len() - 1] {
            let digit = alphabet
                .iter()
                .position(|&c| c == b)
                .ok_or_else(|| decoding_error("character outside alphabet"))? as i64;
            id = id
                .checked_mul(radix)
                .and_then(|v| v.checked_add(digit))
                .ok_or_else(|| decoding_error("id overflow"))?;
        }

        let expected_check =
            alphabet[((id % radix) as usize + self.checksum_offset) % self.base.len()];
        if bytes[bytes.len() - 1] != expected_check {
            return Err(decoding_error("checksum mismatch"));
        }

        if self.encode(id)? != encoded {
            return Err(decoding_error("non-canonical encoding"));
        }

        Ok(id)
    }

    /// Alphabet reshuffled for a single value, seeded by its lottery
    /// character and the secret
    fn per_value_alphabet(&self, lottery: u8) -> Vec<u8> {
        let mut salt = Vec::with_capacity(self.base.len());
        salt.push(lottery);
        salt.extend_from_slice(&self.secret);
        salt.truncate(self.base.len());

        let mut alphabet = self.base.clone();
        consistent_shuffle(&mut alphabet, &salt);
        alphabet
    }
}

fn decoding_error(message: &str) -> TokenError {
    TokenError::Decoding {
        message: message.to_string(),
    }
}

/// Deterministic salt-keyed permutation of the alphabet
///
/// A swap-based shuffle whose swap targets are derived from the salt
/// bytes, so equal salts always yield the same permutation.
fn consistent_shuffle(chars: &mut [u8], salt: &[u8]) {
    if salt.is_empty() {
        return;
    }

    let mut v = 0usize;
    let mut p = 0usize;
    for i in (1..chars.len()).rev() {
        v %= salt.len();
        let t = salt[v] as usize;
        p += t;
        let j = (t + v + p) % i;
        chars.swap(i, j);
        v += 1;
    }
}
