//! Per-installation experiment assignment.
//!
//! One persisted uniform seed drives every experiment. Each flag consumes one
//! bit of the seed, so the same installation sees the same assignment on
//! every launch until the seed is cleared.

pub mod assignment;
pub mod flags;
pub mod split;

pub use assignment::{
    derive_flags, experiments_randomness, is_new_user, is_welcome_page_enabled, load_experiments,
    stored_overrides, sync_overrides, watch_experiment_overrides, EXPERIMENTS_SECTION,
    FIRST_SESSION_DATE_KEY, OVERRIDES_KEY, RANDOMNESS_KEY,
};
pub use flags::{ExperimentFlags, ExperimentOverrides, DEFAULT_EXPERIMENTS};
pub use split::{split_random, BucketSplitter};
