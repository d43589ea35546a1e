//! Shared proptest configuration.
//!
//! The `PROPTEST_CASES` environment variable overrides the default case count:
//!
//! ```bash
//! PROPTEST_CASES=500 cargo test
//! ```
//!
//! Property tests build a runner from the shared config; async properties
//! create one runtime per test function and `block_on` inside the closure:
//!
//! ```no_run
//! use tracker_test_fixtures::proptest_config::proptest_config;
//! use proptest::prelude::*;
//! use proptest::test_runner::TestRunner;
//!
//! let mut runner = TestRunner::new(proptest_config());
//! runner.run(&any::<u32>(), |input| {
//!     prop_assert_eq!(input.wrapping_add(0), input);
//!     Ok(())
//! }).expect("proptest failed");
//! ```

use proptest::test_runner::Config as ProptestConfig;

/// Case count when `PROPTEST_CASES` is unset or invalid
pub const DEFAULT_PROPTEST_CASES: u32 = 50;

/// Number of cases to run, from `PROPTEST_CASES` or [`DEFAULT_PROPTEST_CASES`].
#[must_use]
pub fn test_cases() -> u32 {
    std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|s| s.parse().ok())
        .filter(|&cases| cases > 0)
        .unwrap_or(DEFAULT_PROPTEST_CASES)
}

/// Proptest configuration for `TestRunner` and `proptest!` blocks.
#[must_use]
pub fn proptest_config() -> ProptestConfig {
    ProptestConfig::with_cases(test_cases())
}
