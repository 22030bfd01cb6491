//! Index samplers feeding the robust estimator with minimal samples.
//!
//! A sampler draws `size` distinct indices from the universe `[0, maximum]`
//! and writes them in strictly increasing order. Two strategies exist:
//!
//!  - [`OrderedSampler`] walks every combination in lexicographic order,
//!    so a run over [`population`] samples is exhaustive.
//!  - [`RandomSampler`] draws combinatorially uniform samples from a
//!    seeded generator.

mod ordered;
mod random;

pub use ordered::OrderedSampler;
pub use random::RandomSampler;

use crate::error::Error;

/// Source of index subsets of a fixed width.
pub trait Sampler {
    /// Number of indices written by each call to [`Sampler::sample`].
    fn size(&self) -> usize;

    /// Inclusive upper bound of the drawn indices.
    fn maximum(&self) -> usize;

    /// Overwrite the first [`Sampler::size`] entries of `out` with the next
    /// sample, in strictly increasing order.
    ///
    /// Panics if `out` is shorter than [`Sampler::size`].
    fn sample(&mut self, out: &mut [usize]);
}

/// Number of distinct `num`-element subsets of the universe `[0, max]`,
/// that is the binomial coefficient $\binom{max + 1}{num}$.
///
/// Returns 0 when `num > max + 1` and 1 when `num == 0`.
/// Saturates at `usize::MAX` when the coefficient does not fit.
pub fn population(num: usize, max: usize) -> usize {
    let n = max as u128 + 1;
    let num = num as u128;
    if num > n {
        return 0;
    }

    // C(n, k) == C(n, n - k), iterate over the smaller one.
    let k = num.min(n - num);
    let mut count: u128 = 1;
    for i in 1..=k {
        // count == C(n - k + i - 1, i - 1) here, so the division is exact.
        count = match count.checked_mul(n - k + i) {
            Some(c) => c / i,
            None => return usize::MAX,
        };
    }
    usize::try_from(count).unwrap_or(usize::MAX)
}

/// Reject samplers asked for more distinct indices than `[0, maximum]` holds.
fn check_size(size: usize, maximum: usize) -> Result<(), Error> {
    let universe = maximum.saturating_add(1);
    if size > universe && maximum != usize::MAX {
        return Err(Error::SampleTooLarge { size, universe });
    }
    Ok(())
}

// Tests #######################################################################

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros;

    #[test]
    fn small_populations() {
        assert_eq!(population(2, 5), 15);
        assert_eq!(population(3, 4), 10);
        assert_eq!(population(1, 9), 10);
        assert_eq!(population(6, 5), 1);
        assert_eq!(population(2, 0), 0);
        assert_eq!(population(25, 49), 126_410_606_437_752);
    }

    #[test]
    fn huge_population_saturates() {
        assert_eq!(population(60, 199), usize::MAX);
    }

    #[test]
    fn boundaries() {
        for max in 0..20 {
            assert_eq!(population(0, max), 1);
            assert_eq!(population(max + 2, max), 0);
            assert_eq!(population(max + 10, max), 0);
        }
    }

    #[test]
    fn oversized_sampler_is_rejected() {
        assert!(matches!(
            check_size(4, 2),
            Err(Error::SampleTooLarge { size: 4, universe: 3 })
        ));
        assert!(check_size(3, 2).is_ok());
        assert!(check_size(0, 0).is_ok());
    }

    #[quickcheck_macros::quickcheck]
    fn symmetry(num: u8, max: u8) -> bool {
        let max = max as usize % 64;
        let num = num as usize % (max + 2);
        population(num, max) == population(max + 1 - num, max)
    }
}
