//! Sample text generators
//!
//! Both are independent of the suffix tree; they only produce input files.

use rand::seq::SliceRandom;
use rand::Rng;

/// Repeats used when the caller gives none
pub const DEFAULT_REPEATS: u64 = 5;

/// Pattern used by `repeat` when none is given
pub const DEFAULT_PATTERN: &str = "asdf ";

/// Words used by `shuffle` when none are given
pub const DEFAULT_WORDS: [&str; 3] = ["hall ", "feels ", "heels "];

/// `pattern` written `repeats` times back to back
pub fn repeat_pattern(pattern: &str, repeats: usize) -> String {
    pattern.repeat(repeats)
}

/// `repeats` rounds of the words in shuffled order, concatenated without
/// separators
///
/// Each round reshuffles the previous round's order.
pub fn shuffled_words<S, R>(words: &[S], repeats: usize, rng: &mut R) -> String
where
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    let mut order: Vec<&str> = words.iter().map(AsRef::as_ref).collect();
    let round_len: usize = order.iter().map(|w| w.len()).sum();
    let mut out = String::with_capacity(round_len.saturating_mul(repeats));

    for _ in 0..repeats {
        order.shuffle(rng);
        for word in &order {
            out.push_str(word);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_repeat_pattern() {
        assert_eq!(repeat_pattern("asdf ", 3), "asdf asdf asdf ");
        assert_eq!(repeat_pattern("x", 0), "");
    }

    #[test]
    fn test_shuffled_words_keeps_every_word() {
        let mut rng = SmallRng::seed_from_u64(42);
        let text = shuffled_words(&DEFAULT_WORDS, 4, &mut rng);
        assert_eq!(text.len(), 4 * ("hall feels heels ".len()));

        let mut words: Vec<&str> = text.split_whitespace().collect();
        words.sort_unstable();
        assert_eq!(words.len(), 12);
        assert_eq!(words.iter().filter(|w| **w == "feels").count(), 4);
        assert_eq!(words.iter().filter(|w| **w == "hall").count(), 4);
        assert_eq!(words.iter().filter(|w| **w == "heels").count(), 4);
    }

    #[test]
    fn test_shuffled_words_is_reproducible_per_seed() {
        let words = ["ab", "cd", "ef", "gh"];
        let a = shuffled_words(&words, 5, &mut SmallRng::seed_from_u64(7));
        let b = shuffled_words(&words, 5, &mut SmallRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_shuffled_words_empty_input() {
        let words: [&str; 0] = [];
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(shuffled_words(&words, 10, &mut rng), "");
    }
}
