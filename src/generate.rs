//! Random tree fixtures
//!
//! Grows a tree by drawing distinct keys from a bounded range until the tree
//! reaches a target height. Useful as a property-test and demo fixture.
//! Termination is probabilistic (a narrow key range may never reach a tall
//! target), so every run is capped by a retry budget and exhaustion is
//! reported as an error rather than looping forever.

use std::collections::HashSet;
use std::ops::RangeInclusive;

use rand::Rng;
use thiserror::Error;

use crate::tree::AvlTree;

/// Parameters for one growth run.
#[derive(Debug, Clone)]
pub struct GrowthConfig {
    /// Grow until the tree's height reaches this value.
    pub target_height: u32,
    /// Keys are drawn uniformly from this range.
    pub key_range: RangeInclusive<i64>,
    /// Give up after this many draws (duplicates included).
    pub max_attempts: usize,
}

impl GrowthConfig {
    /// Config targeting `target_height` with the default range and budget.
    pub fn to_height(target_height: u32) -> Self {
        GrowthConfig {
            target_height,
            key_range: 1..=100,
            max_attempts: 10_000,
        }
    }
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self::to_height(5)
    }
}

/// Growth run failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GrowthError {
    /// The retry budget ran out before the target height was reached.
    #[error("gave up after {attempts} draws at height {reached} (target {target})")]
    RetryLimit {
        /// Draws spent, duplicates included.
        attempts: usize,
        /// Height reached when the budget ran out.
        reached: u32,
        /// The height that was asked for.
        target: u32,
    },
}

/// Grow a tree of distinct keys until it reaches the configured height.
///
/// Each drawn value is inserted at most once per run; values already seen
/// are skipped but still count against the retry budget.
pub fn random_tree<R: Rng + ?Sized>(
    config: &GrowthConfig,
    rng: &mut R,
) -> Result<AvlTree<i64>, GrowthError> {
    let mut tree = AvlTree::new();
    let mut used = HashSet::new();
    let mut attempts = 0usize;

    while tree.height() < config.target_height {
        if attempts >= config.max_attempts {
            return Err(GrowthError::RetryLimit {
                attempts,
                reached: tree.height(),
                target: config.target_height,
            });
        }
        attempts += 1;

        let key = rng.gen_range(config.key_range.clone());
        if used.insert(key) {
            tree.insert(key);
        }
    }

    tracing::debug!(
        height = tree.height(),
        keys = tree.len(),
        attempts,
        "grew random tree"
    );
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn grows_to_the_target_height_without_duplicates() {
        let mut rng = StdRng::seed_from_u64(7);
        let tree = random_tree(&GrowthConfig::default(), &mut rng).unwrap();

        assert!(tree.height() >= 5);
        assert!(tree.validate());
        tree.audit().unwrap();

        let keys: Vec<i64> = tree.inorder().map(|v| *v.key).collect();
        for pair in keys.windows(2) {
            assert!(pair[0] < pair[1], "generated keys must be distinct");
        }
    }

    #[test]
    fn zero_target_yields_an_empty_tree() {
        let mut rng = StdRng::seed_from_u64(7);
        let tree = random_tree(&GrowthConfig::to_height(0), &mut rng).unwrap();
        assert!(tree.is_empty());
    }

    #[test]
    fn impossible_target_exhausts_the_budget() {
        // Two possible keys can never stack seven levels high.
        let config = GrowthConfig {
            target_height: 7,
            key_range: 1..=2,
            max_attempts: 50,
        };
        let mut rng = StdRng::seed_from_u64(7);
        let err = random_tree(&config, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            GrowthError::RetryLimit { attempts: 50, target: 7, .. }
        ));
    }
}
