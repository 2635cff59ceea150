//! Utility functions shared by the library and the CLI.
//!
//! ## Modules
//!
//! - [`generate`] - Sample text generators (repeated pattern, shuffled words)
//! - [`progress`] - Construction spinner, compiled out without `progress`
//!
//! ## Key Functions
//!
//! ```no_run
//! use suffreq::utils::{repeat_pattern, shuffled_words};
//! use rand::SeedableRng;
//!
//! let text = repeat_pattern("asdf ", 5);
//! // Returns: "asdf asdf asdf asdf asdf "
//!
//! let mut rng = rand::rngs::SmallRng::seed_from_u64(1);
//! let text = shuffled_words(&["hall ", "feels ", "heels "], 5, &mut rng);
//! ```

pub mod generate;
pub mod progress;

pub use generate::*;
pub use progress::Spinner;
