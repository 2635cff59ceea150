//! Accepted input alphabet and the validator gating tree construction

use crate::error::ValidationError;

/// Every byte a tree accepts, in the order virtual edges are created
pub const ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\t\n\r \"',.[]{}()-*&^%$#@!1?;:234567890_abcdefghijklmnopqrstuvwxyz";

/// Appended once to every text so that no suffix is a prefix of another
pub const TERMINATOR: u8 = b'$';

const ACCEPTED: [bool; 256] = build_table();

const fn build_table() -> [bool; 256] {
    let mut table = [false; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = true;
        i += 1;
    }
    table
}

/// Check whether a byte belongs to the alphabet (the terminator included)
#[inline]
pub fn is_accepted(byte: u8) -> bool {
    ACCEPTED[byte as usize]
}

/// Letters are the only bytes a qualifying substring may contain
#[inline]
pub fn is_letter(byte: u8) -> bool {
    byte.is_ascii_alphabetic()
}

/// Validate caller-supplied text
///
/// The first offending byte decides the error. Nothing is allocated here.
pub fn validate(text: &[u8]) -> Result<(), ValidationError> {
    for (position, &byte) in text.iter().enumerate() {
        if !is_accepted(byte) {
            return Err(ValidationError::InvalidCharacter { byte, position });
        }
        if byte == TERMINATOR {
            return Err(ValidationError::ReservedCharacterPresent { position });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_has_no_duplicates() {
        let mut seen = [false; 256];
        for &b in ALPHABET {
            assert!(!seen[b as usize], "duplicate byte {:?}", b as char);
            seen[b as usize] = true;
        }
        // 52 letters, 10 digits, 4 whitespace, 23 punctuation
        assert_eq!(ALPHABET.len(), 89);
    }

    #[test]
    fn test_accepts_plain_text() {
        assert!(validate(b"hall feels heels").is_ok());
        assert!(validate(b"Line one.\r\nLine\ttwo: (x) [y] {z} _-*&^%#@!?;'\"").is_ok());
        assert!(validate(b"").is_ok());
    }

    #[test]
    fn test_rejects_terminator() {
        assert_eq!(
            validate(b"cost: 5$"),
            Err(ValidationError::ReservedCharacterPresent { position: 7 })
        );
    }

    #[test]
    fn test_rejects_unknown_bytes() {
        assert_eq!(
            validate(b"a+b"),
            Err(ValidationError::InvalidCharacter { byte: b'+', position: 1 })
        );
        assert_eq!(
            validate("caf\u{e9}".as_bytes()),
            Err(ValidationError::InvalidCharacter { byte: 0xc3, position: 3 })
        );
        assert!(matches!(
            validate(b"x\0"),
            Err(ValidationError::InvalidCharacter { byte: 0, position: 1 })
        ));
    }

    #[test]
    fn test_first_offending_byte_wins() {
        assert_eq!(
            validate(b"a~b$"),
            Err(ValidationError::InvalidCharacter { byte: b'~', position: 1 })
        );
        assert_eq!(
            validate(b"a$b~"),
            Err(ValidationError::ReservedCharacterPresent { position: 1 })
        );
    }

    #[test]
    fn test_letters() {
        assert!(is_letter(b'a'));
        assert!(is_letter(b'Z'));
        assert!(!is_letter(b'1'));
        assert!(!is_letter(b' '));
        assert!(!is_letter(TERMINATOR));
    }
}
