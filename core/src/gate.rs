//! Board-access gate: shared-secret comparison.
//!
//! The expected passcode comes from configuration, never from source. The
//! comparison runs in time independent of where the first mismatch occurs,
//! so response timing leaks nothing about the secret's content.

/// Compare a supplied passcode against the configured one in constant time.
///
/// Folds the length difference and every byte difference into one
/// accumulator before testing it, so all inputs of a given length take the
/// same number of operations.
pub fn verify_passcode(supplied: &str, expected: &str) -> bool {
    let a = supplied.as_bytes();
    let b = expected.as_bytes();

    let mut diff = a.len() ^ b.len();
    for i in 0..a.len().max(b.len()) {
        let x = a.get(i).copied().unwrap_or(0);
        let y = b.get(i).copied().unwrap_or(0);
        diff |= (x ^ y) as usize;
    }
    diff == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_exact_match() {
        assert!(verify_passcode("Board-2025", "Board-2025"));
    }

    #[test]
    fn rejects_wrong_content_and_wrong_length() {
        assert!(!verify_passcode("Board-2024", "Board-2025"));
        assert!(!verify_passcode("Board-2025x", "Board-2025"));
        assert!(!verify_passcode("", "Board-2025"));
    }

    #[test]
    fn empty_expected_only_matches_empty() {
        assert!(verify_passcode("", ""));
        assert!(!verify_passcode("a", ""));
    }
}
